//! pmt-scaffold library
//!
//! Project scaffolding for a Maya/Unreal content pipeline.
//!
//! # Modules
//!
//! - `core::scaffold`: company skeleton and per-project folder trees
//! - `core::manifest`: `ConfigInfo.json` generation from the project tree
//! - `core::scene`: scene file listing, creation, rename, copy, delete
//! - `core::launcher`: locating and launching the external applications

pub mod core;

// Re-exports for convenience
pub use core::config::{ManifestScan, PmtConfig};
pub use core::error::{PmtError, Result};
pub use core::launcher::{install_shelf_script, locate, Modeler, Prerequisites};
pub use core::manifest::{build_manifest, ensure_manifest, read_manifest, write_manifest, FolderNode, Manifest};
pub use core::paths::{PmtPaths, ProjectPaths};
pub use core::scaffold::{LayoutReport, ProjectReport, Scaffold};
pub use core::scene::{SceneEntry, SceneLocation};
pub use core::schema::{NameViolation, SourceCategory};
