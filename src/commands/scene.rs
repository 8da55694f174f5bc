use std::path::PathBuf;

use anyhow::Result;
use colored::*;

use pmt_scaffold::core::scene::{
    copy_scene, create_scene, delete_scene, list_scene_files, rename_scene, scene_in,
};
use pmt_scaffold::{Modeler, PmtConfig, PmtError, Scaffold, SceneLocation};

use super::{column_width, confirm, pad, silence_input};
use crate::SceneAction;

pub fn run(config: &PmtConfig, scaffold: &Scaffold, action: SceneAction) -> Result<()> {
    match action {
        SceneAction::List { location, json } => list(scaffold, &location, json),
        SceneAction::Create { location, name, open } => {
            silence_input(create(config, scaffold, &location, &name, open))
        }
        SceneAction::Rename {
            location,
            file,
            new_name,
        } => silence_input(rename(scaffold, &location, &file, &new_name)),
        SceneAction::Delete { location, file, yes } => silence_input(delete(scaffold, &location, &file, yes)),
        SceneAction::Copy { location, file, to } => copy(scaffold, &location, &file, &to),
        SceneAction::Open { location, file } => {
            let (_, path) = scene_path(scaffold, &location, &file)?;
            open_and_exit(config, &path)
        }
    }
}

fn resolve(scaffold: &Scaffold, location: &str) -> Result<(SceneLocation, PathBuf)> {
    let location: SceneLocation = location.parse()?;
    if let SceneLocation::Source { project, .. } | SceneLocation::Exported { project, .. } = &location {
        if !scaffold.project_exists(project) {
            return Err(PmtError::ProjectNotFound(project.clone()).into());
        }
    }
    let dir = location.resolve(scaffold.paths());
    Ok((location, dir))
}

fn scene_path(scaffold: &Scaffold, location: &str, file: &str) -> Result<(SceneLocation, PathBuf)> {
    let (location, dir) = resolve(scaffold, location)?;
    let path = scene_in(&dir, file, location.ascii_only())?;
    Ok((location, path))
}

fn list(scaffold: &Scaffold, location: &str, json: bool) -> Result<()> {
    let (location, dir) = resolve(scaffold, location)?;
    let scenes = list_scene_files(&dir, location.ascii_only())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&scenes)?);
        return Ok(());
    }

    println!("{} {}", "Scenes in".bold(), location.to_string().cyan());
    println!("{}", "=".repeat(50));
    if scenes.is_empty() {
        println!("{}", "(no scenes)".dimmed());
        return Ok(());
    }

    let width = column_width(scenes.iter().map(|s| s.name.as_str()));
    for scene in &scenes {
        let modified = scene
            .modified
            .map(|m| m.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        println!("  {}  {}", pad(&scene.name, width), modified.dimmed());
    }
    Ok(())
}

fn create(config: &PmtConfig, scaffold: &Scaffold, location: &str, name: &str, open: bool) -> Result<()> {
    let (location, dir) = resolve(scaffold, location)?;
    let path = create_scene(&dir, name, location.scene_header())?;
    println!("{} Created Maya file {}", "✓".green(), path.display());

    if open {
        open_and_exit(config, &path)?;
    }
    Ok(())
}

fn rename(scaffold: &Scaffold, location: &str, file: &str, new_name: &str) -> Result<()> {
    let (location, path) = scene_path(scaffold, location, file)?;
    let renamed = rename_scene(&path, new_name, location.forces_ascii_extension())?;
    println!(
        "{} Renamed file to {}",
        "✓".green(),
        renamed.file_name().unwrap_or_default().to_string_lossy()
    );
    Ok(())
}

fn delete(scaffold: &Scaffold, location: &str, file: &str, yes: bool) -> Result<()> {
    let (_, path) = scene_path(scaffold, location, file)?;
    let deleted = delete_scene(&path, |_| {
        confirm(&format!("Are you sure you want to delete the file '{}'?", file), yes)
    })?;
    if deleted {
        println!("{} Deleted file '{}'", "✓".green(), file);
    }
    Ok(())
}

fn copy(scaffold: &Scaffold, location: &str, file: &str, to: &str) -> Result<()> {
    let (_, path) = scene_path(scaffold, location, file)?;
    let (dest, dest_dir) = resolve(scaffold, to)?;
    let copied = copy_scene(&path, &dest_dir)?;
    println!(
        "{} Copied {} to {}",
        "✓".green(),
        copied.file_name().unwrap_or_default().to_string_lossy(),
        dest.to_string().cyan()
    );
    Ok(())
}

/// Hands the scene to Maya and ends this process.
fn open_and_exit(config: &PmtConfig, path: &std::path::Path) -> Result<()> {
    let modeler = Modeler::locate(config)?;
    modeler.open(path)?;
    std::process::exit(0);
}
