//! Manifest synchronizer
//!
//! Mirrors the `PMT Projects` tree into `ConfigInfo.json`, the document the
//! scaffold copies into every project and the export tooling reads back.
//! The canonical copy is written once when absent and never merged.

use std::collections::BTreeMap;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::json;
use walkdir::WalkDir;

use super::config::ManifestScan;
use super::error::{PmtError, Result};
use super::scene::is_scene_file;
use super::schema::{PROJECT_ASSETS_DIR, SKIPPED_DIRS, SOFTWARE_REQUIRED};

const FILES_KEY: &str = "files";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(rename = "Software Required")]
    pub software_required: Vec<String>,
    #[serde(rename = "Structure Description")]
    pub structure_description: StructureDescription,
    #[serde(rename = "Projects")]
    pub projects: BTreeMap<String, FolderNode>,
}

/// Static description of the expected layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureDescription {
    #[serde(rename = "Company Name")]
    pub company_name: String,
    #[serde(rename = "Structure")]
    pub structure: serde_json::Value,
}

impl StructureDescription {
    pub fn for_company(company_name: &str) -> Self {
        Self {
            company_name: company_name.to_string(),
            structure: json!({
                "Department Assets": {},
                "PMT Projects": {
                    "Project Assets": {},
                    "Project Name": {
                        "Characters": {},
                        "Environment": {},
                        "Props": {}
                    }
                }
            }),
        }
    }
}

/// One folder in the `Projects` snapshot.
///
/// Serializes as a JSON object whose keys are subfolder names followed by
/// a `files` list; `files` is absent where the scan did not list files.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FolderNode {
    pub folders: BTreeMap<String, FolderNode>,
    pub files: Option<Vec<String>>,
}

impl FolderNode {
    pub fn files(&self) -> &[String] {
        self.files.as_deref().unwrap_or(&[])
    }
}

impl Serialize for FolderNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let len = self.folders.len() + usize::from(self.files.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        for (name, node) in &self.folders {
            map.serialize_entry(name, node)?;
        }
        if let Some(files) = &self.files {
            map.serialize_entry(FILES_KEY, files)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FolderNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct NodeVisitor;

        impl<'de> Visitor<'de> for NodeVisitor {
            type Value = FolderNode;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a folder object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<FolderNode, A::Error> {
                let mut node = FolderNode::default();
                while let Some(key) = access.next_key::<String>()? {
                    if key == FILES_KEY {
                        node.files = Some(access.next_value()?);
                    } else {
                        let child = access.next_value()?;
                        node.folders.insert(key, child);
                    }
                }
                Ok(node)
            }
        }

        deserializer.deserialize_map(NodeVisitor)
    }
}

pub fn build_manifest(projects_root: &Path, company_name: &str, scan: ManifestScan) -> Result<Manifest> {
    let mut projects = BTreeMap::new();

    if projects_root.is_dir() {
        for entry in list_dir(projects_root)? {
            let name = entry.file_name().to_string_lossy().to_string();
            if !entry.file_type().is_dir() || SKIPPED_DIRS.contains(name.as_str()) || name == PROJECT_ASSETS_DIR {
                continue;
            }
            projects.insert(name, scan_folder(entry.path(), 0, scan)?);
        }
    }

    Ok(Manifest {
        software_required: SOFTWARE_REQUIRED.iter().map(|s| s.to_string()).collect(),
        structure_description: StructureDescription::for_company(company_name),
        projects,
    })
}

fn scan_folder(dir: &Path, level: usize, scan: ManifestScan) -> Result<FolderNode> {
    let list_files = scan == ManifestScan::Full || level <= 1;
    let mut node = FolderNode::default();
    let mut files = Vec::new();

    for entry in list_dir(dir)? {
        let name = entry.file_name().to_string_lossy().to_string();
        if entry.file_type().is_dir() {
            if SKIPPED_DIRS.contains(name.as_str()) {
                continue;
            }
            // "files" is the file-list key; a folder with that name can't be recorded
            if name == FILES_KEY {
                tracing::debug!(path = %entry.path().display(), "folder name clashes with file list key, skipped");
                continue;
            }
            node.folders
                .insert(name, scan_folder(entry.path(), level + 1, scan)?);
        } else if list_files && entry.file_type().is_file() && is_scene_file(entry.path()) {
            files.push(name);
        }
    }

    if list_files {
        node.files = Some(files);
    }
    Ok(node)
}

fn list_dir(dir: &Path) -> Result<Vec<walkdir::DirEntry>> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| entry.map_err(|e| PmtError::io("Failed to scan", dir, e.into())))
        .collect()
}

/// Overwrites `path` with the manifest as 4-space-indented JSON.
pub fn write_manifest(path: &Path, manifest: &Manifest) -> Result<()> {
    let file = File::create(path).map_err(|e| PmtError::io("Failed to create manifest", path, e))?;
    let mut writer = BufWriter::new(file);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    manifest
        .serialize(&mut serializer)
        .map_err(|source| PmtError::Manifest {
            path: path.to_path_buf(),
            source,
        })?;
    writer
        .flush()
        .map_err(|e| PmtError::io("Failed to write manifest", path, e))?;
    Ok(())
}

pub fn read_manifest(path: &Path) -> Result<Manifest> {
    let content = fs::read_to_string(path).map_err(|e| PmtError::io("Failed to read manifest", path, e))?;
    serde_json::from_str(&content).map_err(|source| PmtError::Manifest {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes the manifest at `path` unless one is already there.
pub fn ensure_manifest(
    path: &Path,
    projects_root: &Path,
    company_name: &str,
    scan: ManifestScan,
) -> Result<PathBuf> {
    if path.exists() {
        tracing::debug!(path = %path.display(), "manifest already exists");
        return Ok(path.to_path_buf());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| PmtError::io("Failed to create", parent, e))?;
    }

    let manifest = build_manifest(projects_root, company_name, scan)?;
    write_manifest(path, &manifest)?;
    tracing::info!(path = %path.display(), projects = manifest.projects.len(), "created manifest");
    Ok(path.to_path_buf())
}
