//! Directory scaffold builder
//!
//! Creates the company skeleton and per-project trees under `PMT Projects`.
//! Nothing here is transactional: a failure partway through a project leaves
//! whatever was already created on disk.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::config::{ManifestScan, PmtConfig};
use super::error::{PmtError, Result};
use super::manifest::ensure_manifest;
use super::paths::PmtPaths;
use super::scene::write_new_scene;
use super::schema::{
    validate_project_name, SourceCategory, EXPORT_TOOL_FILE, PROJECT_ASSETS_DIR, SCENE_HEADER,
    SKIPPED_DIRS,
};

#[derive(Debug, Default, Serialize)]
pub struct LayoutReport {
    pub created: Vec<PathBuf>,
    pub existing: Vec<PathBuf>,
    pub failures: Vec<LayoutFailure>,
    pub manifest: Option<PathBuf>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct LayoutFailure {
    pub path: PathBuf,
    pub error: String,
}

impl LayoutReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    fn fail(&mut self, path: &Path, error: impl ToString) {
        let error = error.to_string();
        tracing::debug!(path = %path.display(), %error, "layout step failed");
        self.failures.push(LayoutFailure {
            path: path.to_path_buf(),
            error,
        });
    }
}

#[derive(Debug, Serialize)]
pub struct ProjectReport {
    pub name: String,
    pub root: PathBuf,
    pub placeholders: Vec<PathBuf>,
    pub manifest_copies: Vec<PathBuf>,
    pub warnings: Vec<String>,
}

pub struct Scaffold {
    paths: PmtPaths,
    company_name: String,
    export_tool: Option<PathBuf>,
    scan: ManifestScan,
}

impl Scaffold {
    pub fn new(paths: PmtPaths, company_name: &str) -> Self {
        Self {
            paths,
            company_name: company_name.to_string(),
            export_tool: None,
            scan: ManifestScan::default(),
        }
    }

    pub fn from_config(config: &PmtConfig) -> Self {
        Self::new(PmtPaths::from_config(config), &config.company_name)
            .with_export_tool(config.export_tool_asset())
            .with_manifest_scan(config.manifest_scan)
    }

    /// Asset copied next to every manifest copy when it exists.
    pub fn with_export_tool(mut self, path: PathBuf) -> Self {
        self.export_tool = Some(path);
        self
    }

    pub fn with_manifest_scan(mut self, scan: ManifestScan) -> Self {
        self.scan = scan;
        self
    }

    pub fn paths(&self) -> &PmtPaths {
        &self.paths
    }

    /// Idempotently creates the company skeleton and the canonical manifest.
    ///
    /// Every step is attempted even when an earlier one failed.
    pub fn ensure_company_layout(&self) -> LayoutReport {
        let mut report = LayoutReport::default();

        for (path, _purpose) in self.paths.required_folders() {
            ensure_dir(path, &mut report);
        }

        let canonical = self.paths.canonical_manifest();
        match ensure_manifest(&canonical, &self.paths.projects, &self.company_name, self.scan) {
            Ok(path) => report.manifest = Some(path),
            Err(e) => report.fail(&canonical, e),
        }

        for (path, _purpose) in self.paths.project_assets_folders() {
            ensure_dir(path, &mut report);
        }

        if report.manifest.is_some() {
            let copy = self.paths.project_assets_manifest();
            if let Err(e) = fs::copy(&canonical, &copy) {
                report.fail(&copy, e);
            }
        }

        match self.export_tool_source() {
            Some(tool) => {
                for dir in [&self.paths.project_assets_tools, &self.paths.department_tools] {
                    let target = dir.join(EXPORT_TOOL_FILE);
                    if let Err(e) = fs::copy(&tool, &target) {
                        report.fail(&target, e);
                    }
                }
            }
            None => report.warnings.extend(self.missing_export_tool_warning()),
        }

        report
    }

    /// Creates `PMT Projects/<name>` with its full category tree.
    pub fn create_project(&self, name: &str) -> Result<ProjectReport> {
        check_name(name)?;
        let project = self.paths.project(name);
        if project.root.exists() {
            return Err(PmtError::ProjectExists(name.to_string()));
        }

        let canonical = ensure_manifest(
            &self.paths.canonical_manifest(),
            &self.paths.projects,
            &self.company_name,
            self.scan,
        )?;

        for dir in project.all_dirs() {
            fs::create_dir_all(&dir).map_err(|e| PmtError::io("Failed to create", &dir, e))?;
        }

        let export_tool = self.export_tool_source();
        let mut report = ProjectReport {
            name: name.to_string(),
            root: project.root.clone(),
            placeholders: Vec::new(),
            manifest_copies: Vec::new(),
            warnings: Vec::new(),
        };
        if export_tool.is_none() {
            report.warnings.extend(self.missing_export_tool_warning());
        }

        for category in SourceCategory::ALL {
            let copy = project.manifest_copy(category);
            fs::copy(&canonical, &copy).map_err(|e| PmtError::io("Failed to copy manifest to", &copy, e))?;
            report.manifest_copies.push(copy);

            if let Some(tool) = &export_tool {
                let target = project.config(category).join(EXPORT_TOOL_FILE);
                fs::copy(tool, &target).map_err(|e| PmtError::io("Failed to copy export tool to", &target, e))?;
            }
        }

        for category in SourceCategory::ALL {
            let scene = project.placeholder_scene(category);
            write_new_scene(&scene, SCENE_HEADER)?;
            report.placeholders.push(scene);
        }

        tracing::info!(project = name, root = %project.root.display(), "created project");
        Ok(report)
    }

    /// Renames a project folder. An existing target is never replaced.
    pub fn rename_project(&self, old: &str, new: &str) -> Result<PathBuf> {
        check_name(new)?;
        check_name(old)?;
        let from = self.paths.project(old).root;
        if !from.is_dir() {
            return Err(PmtError::ProjectNotFound(old.to_string()));
        }
        let to = self.paths.project(new).root;
        if to.exists() {
            return Err(PmtError::ProjectExists(new.to_string()));
        }

        fs::rename(&from, &to).map_err(|e| PmtError::io("Failed to rename", &from, e))?;
        tracing::info!(from = old, to = new, "renamed project");
        Ok(to)
    }

    /// Recursively deletes a project once `confirm` agrees.
    pub fn delete_project(&self, name: &str, confirm: impl FnOnce(&Path) -> bool) -> Result<bool> {
        check_name(name)?;
        let root = self.paths.project(name).root;
        if !root.is_dir() {
            return Err(PmtError::ProjectNotFound(name.to_string()));
        }
        if !confirm(&root) {
            tracing::debug!(project = name, "delete declined");
            return Ok(false);
        }

        fs::remove_dir_all(&root).map_err(|e| PmtError::io("Failed to delete", &root, e))?;
        tracing::info!(project = name, "deleted project");
        Ok(true)
    }

    pub fn project_exists(&self, name: &str) -> bool {
        validate_project_name(name).is_ok() && self.paths.project(name).root.is_dir()
    }

    /// Project folder names, sorted, without the shared pools.
    pub fn list_projects(&self) -> Result<Vec<String>> {
        let mut names = subdirectory_names(&self.paths.projects)?;
        names.retain(|n| n != PROJECT_ASSETS_DIR && !SKIPPED_DIRS.contains(n.as_str()));
        Ok(names)
    }

    /// Category folders present under a project's `Source`.
    pub fn source_categories(&self, project: &str) -> Result<Vec<String>> {
        if !self.project_exists(project) {
            return Err(PmtError::ProjectNotFound(project.to_string()));
        }
        subdirectory_names(&self.paths.project(project).source_root())
    }

    fn export_tool_source(&self) -> Option<PathBuf> {
        self.export_tool.clone().filter(|p| p.is_file())
    }

    fn missing_export_tool_warning(&self) -> Option<String> {
        let path = self.export_tool.as_ref()?;
        let warning = format!("{} not found at {}", EXPORT_TOOL_FILE, path.display());
        tracing::debug!("{}", warning);
        Some(warning)
    }
}

fn check_name(name: &str) -> Result<()> {
    validate_project_name(name).map_err(|violation| PmtError::InvalidName {
        name: name.to_string(),
        violation,
    })
}

fn ensure_dir(path: &Path, report: &mut LayoutReport) {
    if path.is_dir() {
        report.existing.push(path.to_path_buf());
        return;
    }
    match fs::create_dir_all(path) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "created folder");
            report.created.push(path.to_path_buf());
        }
        Err(e) => report.fail(path, e),
    }
}

fn subdirectory_names(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir).map_err(|e| match e.kind() {
        ErrorKind::NotFound => PmtError::io("Folder does not exist:", dir, e),
        _ => PmtError::io("Failed to list", dir, e),
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| PmtError::io("Failed to list", dir, e))?;
        if entry.path().is_dir() {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn scaffold(root: &Path) -> Scaffold {
        Scaffold::new(PmtPaths::from_root(root, "Acme"), "Acme")
    }

    #[test]
    fn test_layout_reports_created_then_existing() {
        let dir = tempdir().unwrap();
        let scaffold = scaffold(dir.path());

        let first = scaffold.ensure_company_layout();
        assert!(first.is_complete());
        assert!(first.created.contains(&scaffold.paths().department_config));
        assert!(first.manifest.is_some());

        let second = scaffold.ensure_company_layout();
        assert!(second.is_complete());
        assert!(second.created.is_empty());
    }

    #[test]
    fn test_layout_continues_past_failed_folder() {
        let dir = tempdir().unwrap();
        let scaffold = scaffold(dir.path());
        // A file where Department Assets should be blocks that branch only.
        fs::create_dir_all(&scaffold.paths().company).unwrap();
        fs::write(&scaffold.paths().department_assets, "not a folder").unwrap();

        let report = scaffold.ensure_company_layout();
        assert!(!report.is_complete());
        assert!(scaffold.paths().projects.is_dir());
        assert!(scaffold.paths().project_assets_config.is_dir());
        assert!(report.manifest.is_none());
    }

    #[test]
    fn test_export_tool_copied_when_present() {
        let dir = tempdir().unwrap();
        let tool = dir.path().join(EXPORT_TOOL_FILE);
        fs::write(&tool, "export").unwrap();
        let scaffold = scaffold(&dir.path().join("root")).with_export_tool(tool);

        let layout = scaffold.ensure_company_layout();
        assert!(layout.warnings.is_empty());
        assert!(scaffold.paths().department_tools.join(EXPORT_TOOL_FILE).is_file());

        let report = scaffold.create_project("Orbit").unwrap();
        assert!(report.warnings.is_empty());
        let project = scaffold.paths().project("Orbit");
        for category in SourceCategory::ALL {
            assert!(project.config(category).join(EXPORT_TOOL_FILE).is_file());
        }
    }

    #[test]
    fn test_missing_export_tool_is_a_warning() {
        let dir = tempdir().unwrap();
        let scaffold = scaffold(dir.path()).with_export_tool(dir.path().join("absent.txt"));
        scaffold.ensure_company_layout();

        let report = scaffold.create_project("Orbit").unwrap();
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.placeholders.len(), 3);
    }

    #[test]
    fn test_create_rejects_reserved_and_duplicate_names() {
        let dir = tempdir().unwrap();
        let scaffold = scaffold(dir.path());
        scaffold.ensure_company_layout();

        assert!(matches!(
            scaffold.create_project("Project Assets"),
            Err(PmtError::InvalidName { .. })
        ));
        assert!(scaffold.create_project("").unwrap_err().is_silent());

        scaffold.create_project("Orbit").unwrap();
        assert!(matches!(
            scaffold.create_project("Orbit"),
            Err(PmtError::ProjectExists(_))
        ));
    }

    #[test]
    fn test_list_projects_hides_shared_pools() {
        let dir = tempdir().unwrap();
        let scaffold = scaffold(dir.path());
        scaffold.ensure_company_layout();
        scaffold.create_project("Zeta").unwrap();
        scaffold.create_project("Alpha").unwrap();
        fs::create_dir_all(scaffold.paths().projects.join("Tools")).unwrap();

        assert_eq!(scaffold.list_projects().unwrap(), vec!["Alpha", "Zeta"]);
        assert_eq!(
            scaffold.source_categories("Alpha").unwrap(),
            vec!["Characters", "Environments", "Props"]
        );
    }

    #[test]
    fn test_list_projects_without_layout_fails() {
        let dir = tempdir().unwrap();
        assert!(scaffold(dir.path()).list_projects().is_err());
    }

    #[test]
    fn test_rename_missing_project() {
        let dir = tempdir().unwrap();
        let scaffold = scaffold(dir.path());
        scaffold.ensure_company_layout();
        assert!(matches!(
            scaffold.rename_project("Ghost", "Spirit"),
            Err(PmtError::ProjectNotFound(_))
        ));
    }
}
