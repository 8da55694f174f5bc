//! Error types for scaffold, manifest and scene operations.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::schema::NameViolation;

pub type Result<T> = std::result::Result<T, PmtError>;

#[derive(Error, Debug)]
pub enum PmtError {
    // =========================================================================
    // Prerequisites
    // =========================================================================
    #[error("{name} is required but was not found (looked in: {})", display_paths(.candidates))]
    ApplicationNotFound {
        name: String,
        candidates: Vec<PathBuf>,
    },

    // =========================================================================
    // Input
    // =========================================================================
    #[error("Invalid name '{name}': {violation}")]
    InvalidName {
        name: String,
        violation: NameViolation,
    },

    // =========================================================================
    // Projects and scenes
    // =========================================================================
    #[error("Project already exists: {0}")]
    ProjectExists(String),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Scene file not found: {}", .0.display())]
    SceneNotFound(PathBuf),

    #[error("Scene file already exists: {}", .0.display())]
    SceneExists(PathBuf),

    #[error("Unknown location '{0}' (expected dept, assets, <project>/<Category> or <project>/Exported/<Category>)")]
    InvalidLocation(String),

    // =========================================================================
    // Filesystem and documents
    // =========================================================================
    #[error("{action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed manifest {}: {source}", .path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl PmtError {
    pub fn io(action: &'static str, path: &Path, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }

    /// Input problems the front end drops without a notice.
    pub fn is_silent(&self) -> bool {
        matches!(
            self,
            Self::InvalidName {
                violation: NameViolation::Empty,
                ..
            }
        )
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
