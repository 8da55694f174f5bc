//! External applications
//!
//! The modeling application and game engine are located by probing fixed
//! install paths. Scenes are opened fire-and-forget; the caller exits right
//! after a successful spawn.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Child, Command};

use super::config::PmtConfig;
use super::error::{PmtError, Result};
use super::schema::SHELF_SCRIPT_FILE;

pub const MODELER_NAME: &str = "Maya 2024";
pub const ENGINE_NAME: &str = "Unreal Engine 5.3";

/// First candidate that exists on disk.
pub fn locate(name: &str, candidates: &[PathBuf]) -> Result<PathBuf> {
    candidates
        .iter()
        .find(|p| p.is_file())
        .cloned()
        .ok_or_else(|| PmtError::ApplicationNotFound {
            name: name.to_string(),
            candidates: candidates.to_vec(),
        })
}

#[derive(Debug, Clone)]
pub struct Prerequisites {
    pub modeler: PathBuf,
    pub engine: PathBuf,
}

impl Prerequisites {
    /// Both applications must be installed; the modeler is checked first.
    pub fn check(config: &PmtConfig) -> Result<Self> {
        let modeler = locate(MODELER_NAME, &config.modeler_candidates)?;
        let engine = locate(ENGINE_NAME, &config.engine_candidates)?;
        Ok(Self { modeler, engine })
    }
}

#[derive(Debug, Clone)]
pub struct Modeler {
    executable: PathBuf,
}

impl Modeler {
    pub fn new(executable: PathBuf) -> Self {
        Self { executable }
    }

    pub fn locate(config: &PmtConfig) -> Result<Self> {
        locate(MODELER_NAME, &config.modeler_candidates).map(Self::new)
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Spawns `<executable> <scene>` without waiting on it.
    pub fn open(&self, scene: &Path) -> Result<Child> {
        if !scene.is_file() {
            return Err(PmtError::SceneNotFound(scene.to_path_buf()));
        }
        let child = Command::new(&self.executable)
            .arg(scene)
            .spawn()
            .map_err(|e| PmtError::io("Failed to launch", &self.executable, e))?;
        tracing::info!(
            executable = %self.executable.display(),
            scene = %scene.display(),
            pid = child.id(),
            "launched modeler"
        );
        Ok(child)
    }
}

/// Copies the shelf script into the modeler's shelf preferences.
pub fn install_shelf_script(config: &PmtConfig) -> Result<PathBuf> {
    let shelves = config.shelves_dir().ok_or_else(|| {
        PmtError::io(
            "Failed to locate shelves directory",
            Path::new("<documents>"),
            std::io::Error::new(ErrorKind::NotFound, "no documents directory"),
        )
    })?;
    if !shelves.is_dir() {
        return Err(PmtError::io(
            "Shelves directory missing",
            &shelves,
            std::io::Error::new(ErrorKind::NotFound, "directory does not exist"),
        ));
    }

    let source = config.shelf_script_asset();
    let target = shelves.join(SHELF_SCRIPT_FILE);
    fs::copy(&source, &target).map_err(|e| PmtError::io("Failed to copy shelf script", &source, e))?;
    tracing::info!(from = %source.display(), to = %target.display(), "installed shelf script");
    Ok(target)
}
