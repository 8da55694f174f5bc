use anyhow::Result;
use colored::*;

use pmt_scaffold::{build_manifest, read_manifest, FolderNode, Manifest, PmtConfig, Scaffold};

use crate::ManifestAction;

pub fn run(config: &PmtConfig, scaffold: &Scaffold, action: ManifestAction) -> Result<()> {
    let paths = scaffold.paths();

    match action {
        ManifestAction::Show { json } => {
            let path = paths.canonical_manifest();
            let manifest = read_manifest(&path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&manifest)?);
            } else {
                println!("{} {}", "Manifest".bold(), path.display().to_string().dimmed());
                println!("{}", "=".repeat(50));
                print_summary(&manifest);
            }
        }
        ManifestAction::Preview { json } => {
            let manifest = build_manifest(&paths.projects, &config.company_name, config.manifest_scan)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&manifest)?);
            } else {
                println!("{} {}", "Preview of".bold(), paths.projects.display().to_string().dimmed());
                println!("{}", "=".repeat(50));
                print_summary(&manifest);
            }
        }
    }
    Ok(())
}

fn print_summary(manifest: &Manifest) {
    println!("Company: {}", manifest.structure_description.company_name.cyan());
    println!("Software: {}", manifest.software_required.join(", "));
    println!();
    if manifest.projects.is_empty() {
        println!("{}", "(no projects recorded)".dimmed());
    }
    for (name, node) in &manifest.projects {
        println!("{}", name.cyan());
        print_node(node, 1);
    }
}

fn print_node(node: &FolderNode, depth: usize) {
    let indent = "   ".repeat(depth);
    for file in node.files() {
        println!("{}{}", indent, file);
    }
    for (name, child) in &node.folders {
        println!("{}{}/", indent, name);
        print_node(child, depth + 1);
    }
}
