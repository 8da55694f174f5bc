//! Tool configuration
//!
//! Install root, company name and external application locations are read
//! from a YAML file so nothing machine-specific is compiled in. Lookup order:
//! explicit path, `PMT_CONFIG`, `./pmt.yaml`, built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{PmtError, Result};
use super::schema::{EXPORT_TOOL_FILE, SHELF_SCRIPT_FILE};

pub const CONFIG_ENV: &str = "PMT_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "pmt.yaml";

const DEFAULT_INSTALL_ROOT: &str = "C:/Autodesk/Autodesk_Maya_2024_1_Update_Windows_64bit_dlm";
const DEFAULT_COMPANY: &str = "Company Name";

/// How deep the manifest lists scene files below each project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestScan {
    /// Files for the project folder and its direct children only.
    #[default]
    Shallow,
    /// Files at every level.
    Full,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PmtConfig {
    pub install_root: PathBuf,
    pub company_name: String,
    pub modeler_candidates: Vec<PathBuf>,
    pub engine_candidates: Vec<PathBuf>,
    /// Directory shipping the export tool and shelf script.
    pub tool_assets_dir: Option<PathBuf>,
    pub shelves_dir: Option<PathBuf>,
    pub manifest_scan: ManifestScan,
}

impl Default for PmtConfig {
    fn default() -> Self {
        Self {
            install_root: PathBuf::from(DEFAULT_INSTALL_ROOT),
            company_name: DEFAULT_COMPANY.to_string(),
            modeler_candidates: vec![
                PathBuf::from("C:/Program Files/Autodesk/Maya2024/bin/maya.exe"),
                PathBuf::from("D:/Program Files/Autodesk/Maya2024/bin/maya.exe"),
            ],
            engine_candidates: vec![
                PathBuf::from(
                    "C:/Program Files/Epic Games/UE_5.3/Engine/Binaries/Win64/UnrealEditor.exe",
                ),
                PathBuf::from(
                    "D:/Program Files/Epic Games/UE_5.3/Engine/Binaries/Win64/UnrealEditor.exe",
                ),
            ],
            tool_assets_dir: None,
            shelves_dir: None,
            manifest_scan: ManifestScan::default(),
        }
    }
}

impl PmtConfig {
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::from_file(Path::new(&path));
        }
        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.is_file() {
            return Self::from_file(local);
        }
        tracing::debug!("no config file found, using defaults");
        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|e| PmtError::io("Failed to read config", path, e))?;
        let config = Self::parse(&content).map_err(|source| PmtError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn parse(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    pub fn with_overrides(mut self, root: Option<PathBuf>, company: Option<String>) -> Self {
        if let Some(root) = root {
            self.install_root = root;
        }
        if let Some(company) = company {
            self.company_name = company;
        }
        self
    }

    pub fn tool_assets_dir(&self) -> PathBuf {
        self.tool_assets_dir.clone().unwrap_or_else(|| {
            std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(Path::to_path_buf))
                .unwrap_or_else(|| PathBuf::from("."))
        })
    }

    pub fn export_tool_asset(&self) -> PathBuf {
        self.tool_assets_dir().join(EXPORT_TOOL_FILE)
    }

    pub fn shelf_script_asset(&self) -> PathBuf {
        self.tool_assets_dir().join(SHELF_SCRIPT_FILE)
    }

    pub fn shelves_dir(&self) -> Option<PathBuf> {
        self.shelves_dir.clone().or_else(|| {
            dirs::document_dir().map(|docs| docs.join("maya").join("2024").join("prefs").join("shelves"))
        })
    }
}
