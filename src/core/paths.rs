use std::path::{Path, PathBuf};

use super::config::PmtConfig;
use super::schema::{
    SourceCategory, CONFIG_DIR, DEPARTMENT_ASSETS_DIR, EXPORTED_DIR, MANIFEST_FILE,
    PROJECTS_DIR, PROJECT_ASSETS_DIR, SOURCE_DIR, TEMP_DIR, TOOLS_DIR,
};

/// Fixed locations under `<install_root>/<company>`.
#[derive(Debug, Clone)]
pub struct PmtPaths {
    pub company: PathBuf,
    pub projects: PathBuf,
    pub project_assets: PathBuf,
    pub project_assets_tools: PathBuf,
    pub project_assets_config: PathBuf,
    pub project_assets_temp: PathBuf,
    pub department_assets: PathBuf,
    pub department_tools: PathBuf,
    pub department_config: PathBuf,
    pub department_temp: PathBuf,
}

impl PmtPaths {
    pub fn from_config(config: &PmtConfig) -> Self {
        Self::from_root(&config.install_root, &config.company_name)
    }

    pub fn from_root(install_root: &Path, company_name: &str) -> Self {
        let company = install_root.join(company_name);
        let projects = company.join(PROJECTS_DIR);
        let project_assets = projects.join(PROJECT_ASSETS_DIR);
        let department_assets = company.join(DEPARTMENT_ASSETS_DIR);

        Self {
            project_assets_tools: project_assets.join(TOOLS_DIR),
            project_assets_config: project_assets.join(TOOLS_DIR).join(CONFIG_DIR),
            project_assets_temp: project_assets.join(TEMP_DIR),
            department_tools: department_assets.join(TOOLS_DIR),
            department_config: department_assets.join(TOOLS_DIR).join(CONFIG_DIR),
            department_temp: department_assets.join(TEMP_DIR),
            project_assets,
            department_assets,
            projects,
            company,
        }
    }

    /// The manifest every other copy is taken from.
    pub fn canonical_manifest(&self) -> PathBuf {
        self.department_config.join(MANIFEST_FILE)
    }

    pub fn project_assets_manifest(&self) -> PathBuf {
        self.project_assets_config.join(MANIFEST_FILE)
    }

    pub fn project(&self, name: &str) -> ProjectPaths {
        ProjectPaths::new(self.projects.join(name))
    }

    /// Skeleton folders created up front, in creation order.
    pub fn required_folders(&self) -> Vec<(&PathBuf, &str)> {
        vec![
            (&self.company, "Company root"),
            (&self.projects, "Project collection"),
            (&self.department_assets, "Department-wide assets"),
            (&self.department_tools, "Department tools"),
            (&self.department_config, "Canonical manifest"),
            (&self.department_temp, "Department scratch space"),
            (&self.project_assets_temp, "Project assets scratch space"),
        ]
    }

    /// Project Assets folders created after the canonical manifest exists.
    pub fn project_assets_folders(&self) -> Vec<(&PathBuf, &str)> {
        vec![
            (&self.project_assets, "Shared project assets"),
            (&self.project_assets_tools, "Project assets tools"),
            (&self.project_assets_config, "Project assets manifest copy"),
        ]
    }
}

/// Locations inside one `PMT Projects/<name>` folder.
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    pub root: PathBuf,
}

impl ProjectPaths {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn name(&self) -> &str {
        self.root
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("")
    }

    pub fn source_root(&self) -> PathBuf {
        self.root.join(SOURCE_DIR)
    }

    pub fn source(&self, category: SourceCategory) -> PathBuf {
        self.root.join(SOURCE_DIR).join(category.dir_name())
    }

    pub fn exported(&self, category: SourceCategory) -> PathBuf {
        self.root.join(EXPORTED_DIR).join(category.dir_name())
    }

    pub fn tools(&self, category: SourceCategory) -> PathBuf {
        self.source(category).join(TOOLS_DIR)
    }

    pub fn config(&self, category: SourceCategory) -> PathBuf {
        self.tools(category).join(CONFIG_DIR)
    }

    pub fn temp(&self, category: SourceCategory) -> PathBuf {
        self.source(category).join(TEMP_DIR)
    }

    pub fn manifest_copy(&self, category: SourceCategory) -> PathBuf {
        self.config(category).join(MANIFEST_FILE)
    }

    pub fn placeholder_scene(&self, category: SourceCategory) -> PathBuf {
        self.source(category)
            .join(format!("{}.ma", category.placeholder_stem()))
    }

    /// Every directory a complete project owns, parents first.
    pub fn all_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = vec![self.root.clone()];
        for category in SourceCategory::ALL {
            dirs.push(self.exported(category));
        }
        for category in SourceCategory::ALL {
            dirs.push(self.source(category));
            dirs.push(self.tools(category));
            dirs.push(self.temp(category));
            dirs.push(self.config(category));
        }
        dirs
    }
}
