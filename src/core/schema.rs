use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const PROJECTS_DIR: &str = "PMT Projects";
pub const PROJECT_ASSETS_DIR: &str = "Project Assets";
pub const DEPARTMENT_ASSETS_DIR: &str = "Department Assets";
pub const TOOLS_DIR: &str = "Tools";
pub const CONFIG_DIR: &str = "Config";
pub const TEMP_DIR: &str = "Temp";
pub const EXPORTED_DIR: &str = "Exported";
pub const SOURCE_DIR: &str = "Source";

pub const MANIFEST_FILE: &str = "ConfigInfo.json";
pub const EXPORT_TOOL_FILE: &str = "PMT Export Tool.txt";
pub const SHELF_SCRIPT_FILE: &str = "shelf_AutoExport.mel";

pub const SCENE_HEADER: &str = "//Maya ASCII 2023 scene\n";
pub const PROJECT_ASSETS_SCENE_HEADER: &str = "//Maya ASCII 2024 scene\n";
pub const SCENE_EXTENSIONS: [&str; 2] = ["ma", "mb"];
pub const ASCII_SCENE_EXTENSION: &str = "ma";

pub const SOFTWARE_REQUIRED: [&str; 2] = ["Maya 2024", "Unreal 5.3"];

lazy_static! {
    /// Directories never treated as projects or manifest folders.
    pub static ref SKIPPED_DIRS: HashSet<&'static str> = HashSet::from([TOOLS_DIR, TEMP_DIR]);
    pub static ref RESERVED_NAMES: HashSet<&'static str> =
        HashSet::from([TOOLS_DIR, TEMP_DIR, PROJECT_ASSETS_DIR]);
    static ref FORBIDDEN_CHARS_RE: Regex = Regex::new(r#"[/\\:*?"<>|\x00-\x1f]"#).unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SourceCategory {
    Characters,
    Environments,
    Props,
}

impl SourceCategory {
    pub const ALL: [SourceCategory; 3] = [Self::Characters, Self::Environments, Self::Props];

    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Characters => "Characters",
            Self::Environments => "Environments",
            Self::Props => "Props",
        }
    }

    /// Stem of the scene file seeded into a fresh Source category.
    pub fn placeholder_stem(self) -> &'static str {
        match self {
            Self::Characters => "Character",
            Self::Environments => "Environment",
            Self::Props => "Prop",
        }
    }
}

impl fmt::Display for SourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for SourceCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.dir_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown category '{}' (must be: Characters|Environments|Props)", s))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NameViolation {
    Empty,
    Reserved(String),
    ForbiddenCharacter(char),
    DotName,
    SurroundingWhitespace,
    NotASceneFile,
}

impl fmt::Display for NameViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "name is empty"),
            Self::Reserved(n) => write!(f, "'{}' is reserved (Tools|Temp|Project Assets)", n),
            Self::ForbiddenCharacter(c) => write!(f, "character {:?} is not allowed", c),
            Self::DotName => write!(f, "'.' and '..' are not allowed"),
            Self::SurroundingWhitespace => write!(f, "leading or trailing whitespace"),
            Self::NotASceneFile => write!(f, "not a .ma or .mb scene file"),
        }
    }
}

/// Checks a name that becomes a single path component.
pub fn validate_component(name: &str) -> Result<(), NameViolation> {
    if name.is_empty() {
        return Err(NameViolation::Empty);
    }
    if name == "." || name == ".." {
        return Err(NameViolation::DotName);
    }
    if name.trim() != name {
        return Err(NameViolation::SurroundingWhitespace);
    }
    if let Some(m) = FORBIDDEN_CHARS_RE.find(name) {
        let c = m.as_str().chars().next().unwrap_or('?');
        return Err(NameViolation::ForbiddenCharacter(c));
    }
    Ok(())
}

pub fn validate_project_name(name: &str) -> Result<(), NameViolation> {
    validate_component(name)?;
    if RESERVED_NAMES.contains(name) {
        return Err(NameViolation::Reserved(name.to_string()));
    }
    Ok(())
}

pub fn is_scene_extension(ext: &str) -> bool {
    SCENE_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext))
}
