use anyhow::Result;
use colored::*;
use serde::Serialize;

use pmt_scaffold::core::scene::list_scene_files;
use pmt_scaffold::{Scaffold, SourceCategory};

use super::{column_width, confirm, pad, silence_input};
use crate::ProjectAction;

#[derive(Serialize)]
struct ProjectSummary {
    name: String,
    categories: Vec<CategorySummary>,
}

#[derive(Serialize)]
struct CategorySummary {
    category: String,
    scenes: Vec<String>,
}

pub fn run(scaffold: &Scaffold, action: ProjectAction) -> Result<()> {
    match action {
        ProjectAction::List { json } => list(scaffold, json),
        ProjectAction::Show { name, json } => show(scaffold, &name, json),
        ProjectAction::Create { name, json } => silence_input(create(scaffold, &name, json)),
        ProjectAction::Rename { old, new } => silence_input(rename(scaffold, &old, &new)),
        ProjectAction::Delete { name, yes } => silence_input(delete(scaffold, &name, yes)),
    }
}

fn list(scaffold: &Scaffold, json: bool) -> Result<()> {
    let projects = scaffold.list_projects()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&projects)?);
        return Ok(());
    }

    println!("{}", "PMT Projects".bold());
    println!("{}", "=".repeat(50));
    if projects.is_empty() {
        println!("{}", "No projects yet. Create one with `pmt project create <name>`.".dimmed());
        return Ok(());
    }

    let width = column_width(projects.iter().map(String::as_str));
    for name in &projects {
        let categories = scaffold.source_categories(name).map(|c| c.join(", ")).unwrap_or_default();
        println!("  {}  {}", pad(name, width).cyan(), categories.dimmed());
    }
    Ok(())
}

fn show(scaffold: &Scaffold, name: &str, json: bool) -> Result<()> {
    let project = scaffold.paths().project(name);
    let mut summary = ProjectSummary {
        name: name.to_string(),
        categories: Vec::new(),
    };

    for category in scaffold.source_categories(name)? {
        let dir = project.source_root().join(&category);
        let scenes = list_scene_files(&dir, true)?
            .into_iter()
            .map(|e| e.name)
            .collect();
        summary.categories.push(CategorySummary { category, scenes });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{} {}", "Project".bold(), name.bold().cyan());
    println!("{}", "=".repeat(50));
    for category in &summary.categories {
        println!("{}", category.category.cyan());
        if category.scenes.is_empty() {
            println!("   {}", "(no scenes)".dimmed());
        }
        for scene in &category.scenes {
            println!("   {}", scene);
        }
    }
    Ok(())
}

fn create(scaffold: &Scaffold, name: &str, json: bool) -> Result<()> {
    let report = scaffold.create_project(name)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} Created project structure for {}", "✓".green(), name.cyan());
    for category in SourceCategory::ALL {
        println!("   Source/{}", category);
    }
    for warning in &report.warnings {
        println!("{} {}", "!".yellow(), warning);
    }
    Ok(())
}

fn rename(scaffold: &Scaffold, old: &str, new: &str) -> Result<()> {
    scaffold.rename_project(old, new)?;
    println!("{} Renamed project to {}", "✓".green(), new);
    Ok(())
}

fn delete(scaffold: &Scaffold, name: &str, yes: bool) -> Result<()> {
    let deleted = scaffold.delete_project(name, |_| {
        confirm(&format!("Are you sure you want to delete the project '{}'?", name), yes)
    })?;

    if deleted {
        println!("{} Deleted project '{}'", "✓".green(), name);
    }
    Ok(())
}
