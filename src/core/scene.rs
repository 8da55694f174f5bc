use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Local};
use serde::Serialize;

use super::error::{PmtError, Result};
use super::paths::PmtPaths;
use super::schema::{
    is_scene_extension, validate_component, validate_project_name, NameViolation, SourceCategory,
    ASCII_SCENE_EXTENSION, EXPORTED_DIR, PROJECT_ASSETS_SCENE_HEADER, SCENE_HEADER,
};

pub fn is_scene_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(is_scene_extension)
        .unwrap_or(false)
}

/// Where a scene file lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneLocation {
    DepartmentAssets,
    ProjectAssets,
    Source {
        project: String,
        category: SourceCategory,
    },
    Exported {
        project: String,
        category: SourceCategory,
    },
}

impl SceneLocation {
    pub fn resolve(&self, paths: &PmtPaths) -> PathBuf {
        match self {
            Self::DepartmentAssets => paths.department_assets.clone(),
            Self::ProjectAssets => paths.project_assets.clone(),
            Self::Source { project, category } => paths.project(project).source(*category),
            Self::Exported { project, category } => paths.project(project).exported(*category),
        }
    }

    /// Header written into new scenes created here.
    pub fn scene_header(&self) -> &'static str {
        match self {
            Self::ProjectAssets => PROJECT_ASSETS_SCENE_HEADER,
            _ => SCENE_HEADER,
        }
    }

    /// Pools rename to whatever name is given; category folders keep `.ma`.
    pub fn forces_ascii_extension(&self) -> bool {
        matches!(self, Self::Source { .. } | Self::Exported { .. })
    }

    /// Category folders only show ASCII scenes.
    pub fn ascii_only(&self) -> bool {
        self.forces_ascii_extension()
    }
}

impl fmt::Display for SceneLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DepartmentAssets => write!(f, "Department Assets"),
            Self::ProjectAssets => write!(f, "Project Assets"),
            Self::Source { project, category } => write!(f, "{}/Source/{}", project, category),
            Self::Exported { project, category } => write!(f, "{}/Exported/{}", project, category),
        }
    }
}

impl FromStr for SceneLocation {
    type Err = PmtError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || PmtError::InvalidLocation(s.to_string());

        match s.to_ascii_lowercase().as_str() {
            "dept" | "department" | "department assets" => return Ok(Self::DepartmentAssets),
            "assets" | "project assets" => return Ok(Self::ProjectAssets),
            _ => {}
        }

        let parts: Vec<&str> = s.split('/').collect();
        let (project, exported, category) = match parts.as_slice() {
            [project, category] => (*project, false, *category),
            [project, middle, category] if middle.eq_ignore_ascii_case("source") => (*project, false, *category),
            [project, middle, category] if middle.eq_ignore_ascii_case(EXPORTED_DIR) => (*project, true, *category),
            _ => return Err(invalid()),
        };
        validate_project_name(project).map_err(|_| invalid())?;
        let category = category.parse::<SourceCategory>().map_err(|_| invalid())?;
        let project = project.to_string();

        Ok(if exported {
            Self::Exported { project, category }
        } else {
            Self::Source { project, category }
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SceneEntry {
    pub name: String,
    pub path: PathBuf,
    pub modified: Option<DateTime<Local>>,
}

/// Scene files directly inside `dir`, sorted by name.
pub fn list_scene_files(dir: &Path, ascii_only: bool) -> Result<Vec<SceneEntry>> {
    if !dir.is_dir() {
        return Err(PmtError::io(
            "Failed to list",
            dir,
            std::io::Error::new(ErrorKind::NotFound, "directory does not exist"),
        ));
    }

    let pattern = format!("{}/*", glob::Pattern::escape(&dir.to_string_lossy()));
    let paths = glob::glob(&pattern).map_err(|e| {
        PmtError::io(
            "Failed to list",
            dir,
            std::io::Error::new(ErrorKind::InvalidInput, e.to_string()),
        )
    })?;

    let mut entries = Vec::new();
    for path in paths.flatten() {
        if !path.is_file() {
            continue;
        }
        let wanted = if ascii_only {
            has_ascii_extension(&path)
        } else {
            is_scene_file(&path)
        };
        if !wanted {
            continue;
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let modified = fs::metadata(&path)
            .and_then(|m| m.modified())
            .ok()
            .map(DateTime::from);
        entries.push(SceneEntry { name, path, modified });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Resolves a scene file name the user picked inside `dir`.
///
/// Only a bare file name with a scene extension is accepted, so the result
/// always stays directly inside `dir`.
pub fn scene_in(dir: &Path, file: &str, ascii_only: bool) -> Result<PathBuf> {
    validate_component(file).map_err(|violation| PmtError::InvalidName {
        name: file.to_string(),
        violation,
    })?;
    let path = dir.join(file);
    let wanted = if ascii_only {
        has_ascii_extension(&path)
    } else {
        is_scene_file(&path)
    };
    if !wanted {
        return Err(PmtError::InvalidName {
            name: file.to_string(),
            violation: NameViolation::NotASceneFile,
        });
    }
    if !path.is_file() {
        return Err(PmtError::SceneNotFound(path));
    }
    Ok(path)
}

fn has_ascii_extension(path: &Path) -> bool {
    path.extension()
        .map(|e| e == ASCII_SCENE_EXTENSION)
        .unwrap_or(false)
}

fn require_scene(path: &Path) -> Result<()> {
    if path.is_file() && is_scene_file(path) {
        Ok(())
    } else {
        Err(PmtError::SceneNotFound(path.to_path_buf()))
    }
}

/// Creates `<stem>.ma` holding only `header`. Never truncates an existing file.
pub fn create_scene(dir: &Path, stem: &str, header: &str) -> Result<PathBuf> {
    validate_component(stem).map_err(|violation| PmtError::InvalidName {
        name: stem.to_string(),
        violation,
    })?;

    let path = dir.join(format!("{}.{}", stem, ASCII_SCENE_EXTENSION));
    write_new_scene(&path, header)?;
    tracing::info!(path = %path.display(), "created scene file");
    Ok(path)
}

pub(crate) fn write_new_scene(path: &Path, header: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => PmtError::SceneExists(path.to_path_buf()),
            _ => PmtError::io("Failed to create", path, e),
        })?;
    file.write_all(header.as_bytes())
        .map_err(|e| PmtError::io("Failed to write", path, e))
}

/// Renames a scene within its folder.
///
/// With `force_ascii` the new name is treated as a stem and `.ma` appended;
/// otherwise it must already carry a scene extension.
pub fn rename_scene(path: &Path, new_name: &str, force_ascii: bool) -> Result<PathBuf> {
    let invalid = |violation| PmtError::InvalidName {
        name: new_name.to_string(),
        violation,
    };
    validate_component(new_name).map_err(invalid)?;
    require_scene(path)?;

    let file_name = if force_ascii {
        let stem = new_name
            .strip_suffix(".ma")
            .or_else(|| new_name.strip_suffix(".MA"))
            .unwrap_or(new_name);
        validate_component(stem).map_err(invalid)?;
        format!("{}.{}", stem, ASCII_SCENE_EXTENSION)
    } else if is_scene_file(Path::new(new_name)) {
        new_name.to_string()
    } else {
        return Err(invalid(NameViolation::NotASceneFile));
    };
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let target = parent.join(file_name);
    if target.exists() {
        return Err(PmtError::SceneExists(target));
    }

    fs::rename(path, &target).map_err(|e| PmtError::io("Failed to rename", path, e))?;
    tracing::info!(from = %path.display(), to = %target.display(), "renamed scene file");
    Ok(target)
}

/// Deletes a scene once `confirm` agrees. Returns whether it was deleted.
pub fn delete_scene(path: &Path, confirm: impl FnOnce(&Path) -> bool) -> Result<bool> {
    require_scene(path)?;
    if !confirm(path) {
        return Ok(false);
    }
    fs::remove_file(path).map_err(|e| PmtError::io("Failed to delete", path, e))?;
    tracing::info!(path = %path.display(), "deleted scene file");
    Ok(true)
}

/// Copies a scene into `dest_dir` under the same file name, replacing any
/// file already there.
pub fn copy_scene(path: &Path, dest_dir: &Path) -> Result<PathBuf> {
    require_scene(path)?;
    if !dest_dir.is_dir() {
        return Err(PmtError::io(
            "Failed to copy into",
            dest_dir,
            std::io::Error::new(ErrorKind::NotFound, "directory does not exist"),
        ));
    }
    let file_name = path
        .file_name()
        .ok_or_else(|| PmtError::SceneNotFound(path.to_path_buf()))?;
    let target = dest_dir.join(file_name);
    fs::copy(path, &target).map_err(|e| PmtError::io("Failed to copy", path, e))?;
    tracing::info!(from = %path.display(), to = %target.display(), "copied scene file");
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_location_parsing() {
        assert_eq!("dept".parse::<SceneLocation>().unwrap(), SceneLocation::DepartmentAssets);
        assert_eq!("assets".parse::<SceneLocation>().unwrap(), SceneLocation::ProjectAssets);
        assert_eq!(
            "Orbit/props".parse::<SceneLocation>().unwrap(),
            SceneLocation::Source {
                project: "Orbit".into(),
                category: SourceCategory::Props
            }
        );
        assert_eq!(
            "Orbit/Exported/Characters".parse::<SceneLocation>().unwrap(),
            SceneLocation::Exported {
                project: "Orbit".into(),
                category: SourceCategory::Characters
            }
        );
        assert!("Orbit/Vehicles".parse::<SceneLocation>().is_err());
        assert!("Orbit".parse::<SceneLocation>().is_err());
        assert!("../Props".parse::<SceneLocation>().is_err());
    }

    #[test]
    fn test_list_filters_scenes() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.ma"), SCENE_HEADER).unwrap();
        fs::write(dir.path().join("a.mb"), "bin").unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        fs::create_dir(dir.path().join("sub.ma")).unwrap();

        let all: Vec<String> = list_scene_files(dir.path(), false)
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(all, vec!["a.mb", "b.ma"]);

        let ascii = list_scene_files(dir.path(), true).unwrap();
        assert_eq!(ascii.len(), 1);
        assert_eq!(ascii[0].name, "b.ma");
        assert!(ascii[0].modified.is_some());
    }

    #[test]
    fn test_list_handles_glob_metacharacters_in_path() {
        let dir = tempdir().unwrap();
        let odd = dir.path().join("Shots [v2]");
        fs::create_dir(&odd).unwrap();
        fs::write(odd.join("x.ma"), SCENE_HEADER).unwrap();

        assert_eq!(list_scene_files(&odd, false).unwrap().len(), 1);
    }

    #[test]
    fn test_create_refuses_to_overwrite() {
        let dir = tempdir().unwrap();
        let path = create_scene(dir.path(), "Hero", SCENE_HEADER).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "//Maya ASCII 2023 scene\n");

        fs::write(&path, "edited").unwrap();
        let err = create_scene(dir.path(), "Hero", SCENE_HEADER).unwrap_err();
        assert!(matches!(err, PmtError::SceneExists(_)));
        assert_eq!(fs::read_to_string(&path).unwrap(), "edited");
    }

    #[test]
    fn test_create_with_empty_name_is_silent_error() {
        let dir = tempdir().unwrap();
        let err = create_scene(dir.path(), "", SCENE_HEADER).unwrap_err();
        assert!(err.is_silent());
    }

    #[test]
    fn test_rename_in_category_keeps_ascii_extension() {
        let dir = tempdir().unwrap();
        let path = create_scene(dir.path(), "Hero", SCENE_HEADER).unwrap();

        let renamed = rename_scene(&path, "Villain", true).unwrap();
        assert_eq!(renamed, dir.path().join("Villain.ma"));
        assert!(!path.exists());
    }

    #[test]
    fn test_rename_clash_leaves_both_files() {
        let dir = tempdir().unwrap();
        let a = create_scene(dir.path(), "A", SCENE_HEADER).unwrap();
        let b = create_scene(dir.path(), "B", SCENE_HEADER).unwrap();
        fs::write(&b, "keep").unwrap();

        let err = rename_scene(&a, "B.ma", false).unwrap_err();
        assert!(matches!(err, PmtError::SceneExists(_)));
        assert!(a.exists());
        assert_eq!(fs::read_to_string(&b).unwrap(), "keep");
    }

    #[test]
    fn test_rename_strips_repeated_ascii_extension() {
        let dir = tempdir().unwrap();
        let path = create_scene(dir.path(), "Hero", SCENE_HEADER).unwrap();

        let renamed = rename_scene(&path, "Villain.ma", true).unwrap();
        assert_eq!(renamed, dir.path().join("Villain.ma"));
        assert!(rename_scene(&renamed, ".ma", true).unwrap_err().is_silent());
    }

    #[test]
    fn test_rename_in_pool_requires_scene_extension() {
        let dir = tempdir().unwrap();
        let path = create_scene(dir.path(), "Hero", SCENE_HEADER).unwrap();

        let err = rename_scene(&path, "Hero.txt", false).unwrap_err();
        assert!(matches!(
            err,
            PmtError::InvalidName {
                violation: NameViolation::NotASceneFile,
                ..
            }
        ));
        assert!(path.exists());
        assert_eq!(rename_scene(&path, "Hero.mb", false).unwrap(), dir.path().join("Hero.mb"));
    }

    #[test]
    fn test_scene_in_rejects_paths_and_other_files() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("Tools/Config")).unwrap();
        fs::write(dir.path().join("Tools/Config/ConfigInfo.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        fs::write(dir.path().join("bin.mb"), "x").unwrap();
        create_scene(dir.path(), "Hero", SCENE_HEADER).unwrap();

        assert!(matches!(
            scene_in(dir.path(), "Tools/Config/ConfigInfo.json", false),
            Err(PmtError::InvalidName { .. })
        ));
        assert!(matches!(
            scene_in(dir.path(), "/etc/passwd", false),
            Err(PmtError::InvalidName { .. })
        ));
        assert!(matches!(
            scene_in(dir.path(), "notes.txt", false),
            Err(PmtError::InvalidName { .. })
        ));
        assert!(matches!(
            scene_in(dir.path(), "Ghost.ma", false),
            Err(PmtError::SceneNotFound(_))
        ));
        assert!(scene_in(dir.path(), "bin.mb", true).is_err());
        assert!(scene_in(dir.path(), "bin.mb", false).is_ok());
        assert_eq!(scene_in(dir.path(), "Hero.ma", true).unwrap(), dir.path().join("Hero.ma"));
    }

    #[test]
    fn test_file_operations_refuse_non_scene_files() {
        let dir = tempdir().unwrap();
        let manifest = dir.path().join("ConfigInfo.json");
        fs::write(&manifest, "{}").unwrap();
        let dest = dir.path().join("pool");
        fs::create_dir(&dest).unwrap();

        assert!(matches!(delete_scene(&manifest, |_| true), Err(PmtError::SceneNotFound(_))));
        assert!(matches!(rename_scene(&manifest, "x.ma", false), Err(PmtError::SceneNotFound(_))));
        assert!(matches!(copy_scene(&manifest, &dest), Err(PmtError::SceneNotFound(_))));
        assert!(manifest.exists());
        assert!(!dest.join("ConfigInfo.json").exists());
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let dir = tempdir().unwrap();
        let path = create_scene(dir.path(), "Hero", SCENE_HEADER).unwrap();

        assert!(!delete_scene(&path, |_| false).unwrap());
        assert!(path.exists());

        assert!(delete_scene(&path, |_| true).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn test_copy_keeps_file_name() {
        let dir = tempdir().unwrap();
        let src = create_scene(dir.path(), "Hero", SCENE_HEADER).unwrap();
        let dest = dir.path().join("pool");
        fs::create_dir(&dest).unwrap();

        let copied = copy_scene(&src, &dest).unwrap();
        assert_eq!(copied, dest.join("Hero.ma"));
        assert_eq!(fs::read(&copied).unwrap(), fs::read(&src).unwrap());

        assert!(copy_scene(&src, &dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_location_headers() {
        assert_eq!(SceneLocation::ProjectAssets.scene_header(), "//Maya ASCII 2024 scene\n");
        assert_eq!(SceneLocation::DepartmentAssets.scene_header(), SCENE_HEADER);
    }
}
