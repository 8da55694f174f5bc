use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::tempdir;
use walkdir::WalkDir;

use pmt_scaffold::{build_manifest, read_manifest, ManifestScan, PmtError, PmtPaths, Scaffold, SourceCategory};

fn scaffold(root: &Path) -> Scaffold {
    Scaffold::new(PmtPaths::from_root(root, "Company Name"), "Company Name")
}

fn dir_set(root: &Path) -> BTreeSet<PathBuf> {
    WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir())
        .map(|e| e.path().strip_prefix(root).unwrap().to_path_buf())
        .collect()
}

fn file_set(root: &Path) -> BTreeSet<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().strip_prefix(root).unwrap().to_path_buf())
        .collect()
}

#[test]
fn empty_root_gets_skeleton_and_empty_manifest() {
    let dir = tempdir().unwrap();
    let scaffold = scaffold(dir.path());

    let report = scaffold.ensure_company_layout();
    assert!(report.is_complete());

    let expected: BTreeSet<PathBuf> = [
        "Company Name",
        "Company Name/PMT Projects",
        "Company Name/Department Assets",
        "Company Name/Department Assets/Tools",
        "Company Name/Department Assets/Tools/Config",
        "Company Name/Department Assets/Temp",
        "Company Name/PMT Projects/Project Assets",
        "Company Name/PMT Projects/Project Assets/Temp",
        "Company Name/PMT Projects/Project Assets/Tools",
        "Company Name/PMT Projects/Project Assets/Tools/Config",
    ]
    .iter()
    .map(PathBuf::from)
    .collect();
    assert_eq!(dir_set(dir.path()), expected);

    let canonical = scaffold.paths().canonical_manifest();
    let manifest = read_manifest(&canonical).unwrap();
    assert!(manifest.projects.is_empty());
    assert_eq!(manifest.structure_description.company_name, "Company Name");

    assert_eq!(
        fs::read(&canonical).unwrap(),
        fs::read(scaffold.paths().project_assets_manifest()).unwrap()
    );
}

#[test]
fn ensure_layout_is_idempotent() {
    let dir = tempdir().unwrap();
    let scaffold = scaffold(dir.path());

    scaffold.ensure_company_layout();
    let dirs_once = dir_set(dir.path());
    let files_once = file_set(dir.path());
    let manifest_once = fs::read(scaffold.paths().canonical_manifest()).unwrap();

    let second = scaffold.ensure_company_layout();
    assert!(second.is_complete());
    assert!(second.created.is_empty());
    assert_eq!(dir_set(dir.path()), dirs_once);
    assert_eq!(file_set(dir.path()), files_once);
    assert_eq!(fs::read(scaffold.paths().canonical_manifest()).unwrap(), manifest_once);
}

#[test]
fn create_project_builds_full_tree_with_identical_manifests() {
    let dir = tempdir().unwrap();
    let scaffold = scaffold(dir.path());
    scaffold.ensure_company_layout();

    scaffold.create_project("Orbit").unwrap();

    let project = scaffold.paths().project("Orbit");
    let expected: BTreeSet<PathBuf> = [
        "Exported",
        "Exported/Characters",
        "Exported/Environments",
        "Exported/Props",
        "Source",
        "Source/Characters",
        "Source/Characters/Temp",
        "Source/Characters/Tools",
        "Source/Characters/Tools/Config",
        "Source/Environments",
        "Source/Environments/Temp",
        "Source/Environments/Tools",
        "Source/Environments/Tools/Config",
        "Source/Props",
        "Source/Props/Temp",
        "Source/Props/Tools",
        "Source/Props/Tools/Config",
    ]
    .iter()
    .map(PathBuf::from)
    .collect();
    assert_eq!(dir_set(&project.root), expected);

    let canonical = fs::read(scaffold.paths().canonical_manifest()).unwrap();
    for category in SourceCategory::ALL {
        assert_eq!(fs::read(project.manifest_copy(category)).unwrap(), canonical);
        assert_eq!(
            fs::read_to_string(project.placeholder_scene(category)).unwrap(),
            "//Maya ASCII 2023 scene\n"
        );
    }
}

#[test]
fn project_copies_follow_canonical_manifest_even_when_stale() {
    let dir = tempdir().unwrap();
    let scaffold = scaffold(dir.path());
    scaffold.ensure_company_layout();

    // A hand-edited canonical manifest is what every new copy gets.
    let canonical = scaffold.paths().canonical_manifest();
    let mut manifest = read_manifest(&canonical).unwrap();
    manifest.software_required.push("Substance".into());
    pmt_scaffold::write_manifest(&canonical, &manifest).unwrap();

    scaffold.create_project("Orbit").unwrap();
    let copy = scaffold.paths().project("Orbit").manifest_copy(SourceCategory::Props);
    assert_eq!(fs::read(copy).unwrap(), fs::read(&canonical).unwrap());
}

#[test]
fn manifest_lists_projects_and_scene_files() {
    let dir = tempdir().unwrap();
    let projects = dir.path().join("PMT Projects");
    fs::create_dir_all(projects.join("A")).unwrap();
    fs::create_dir_all(projects.join("B")).unwrap();
    fs::write(projects.join("A/hero.ma"), "//Maya ASCII 2023 scene\n").unwrap();
    fs::write(projects.join("A/readme.txt"), "skip").unwrap();

    let manifest = build_manifest(&projects, "Company Name", ManifestScan::Shallow).unwrap();
    let keys: BTreeSet<&str> = manifest.projects.keys().map(String::as_str).collect();
    assert_eq!(keys, BTreeSet::from(["A", "B"]));
    assert_eq!(manifest.projects["A"].files(), ["hero.ma"]);
    assert!(manifest.projects["A"].folders.is_empty());
    assert!(manifest.projects["B"].files().is_empty());
}

#[test]
fn delete_project_removes_subtree() {
    let dir = tempdir().unwrap();
    let scaffold = scaffold(dir.path());
    scaffold.ensure_company_layout();
    scaffold.create_project("Orbit").unwrap();
    let root = scaffold.paths().project("Orbit").root;

    assert!(!scaffold.delete_project("Orbit", |_| false).unwrap());
    assert!(root.is_dir());

    assert!(scaffold.delete_project("Orbit", |p| p == root).unwrap());
    assert!(!root.exists());
    assert!(!scaffold.list_projects().unwrap().contains(&"Orbit".to_string()));
    assert!(matches!(
        scaffold.delete_project("Orbit", |_| true),
        Err(PmtError::ProjectNotFound(_))
    ));
}

#[test]
fn rename_onto_existing_project_fails_and_changes_nothing() {
    let dir = tempdir().unwrap();
    let scaffold = scaffold(dir.path());
    scaffold.ensure_company_layout();
    scaffold.create_project("Orbit").unwrap();
    scaffold.create_project("Nova").unwrap();

    let orbit = scaffold.paths().project("Orbit");
    let nova = scaffold.paths().project("Nova");
    fs::write(nova.source(SourceCategory::Props).join("Marker.ma"), "nova").unwrap();
    let orbit_before = file_set(&orbit.root);
    let nova_before = file_set(&nova.root);

    let err = scaffold.rename_project("Orbit", "Nova").unwrap_err();
    assert!(matches!(err, PmtError::ProjectExists(ref n) if n == "Nova"));

    assert_eq!(file_set(&orbit.root), orbit_before);
    assert_eq!(file_set(&nova.root), nova_before);
}

#[test]
fn rename_moves_project() {
    let dir = tempdir().unwrap();
    let scaffold = scaffold(dir.path());
    scaffold.ensure_company_layout();
    scaffold.create_project("Orbit").unwrap();

    let renamed = scaffold.rename_project("Orbit", "Orbit II").unwrap();
    assert!(renamed.join("Source/Props/Prop.ma").is_file());
    assert_eq!(scaffold.list_projects().unwrap(), vec!["Orbit II"]);
}

#[test]
fn canonical_manifest_is_not_regenerated_once_present() {
    let dir = tempdir().unwrap();
    let scaffold = scaffold(dir.path());
    scaffold.ensure_company_layout();
    scaffold.create_project("Orbit").unwrap();

    scaffold.ensure_company_layout();
    let manifest = read_manifest(&scaffold.paths().canonical_manifest()).unwrap();
    assert!(manifest.projects.is_empty());
}
