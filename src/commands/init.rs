use anyhow::Result;
use colored::*;

use pmt_scaffold::{LayoutReport, PmtError, Scaffold};

/// Startup only logs layout problems at debug; `init` is where they surface.
pub fn run(scaffold: &Scaffold, layout: &LayoutReport, shelf: Option<PmtError>, json: bool) -> Result<()> {
    let warnings = layout_warnings(layout, shelf.as_ref());
    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(layout)?);
    } else {
        print_report(scaffold, layout, &warnings);
    }

    if !layout.is_complete() {
        std::process::exit(1);
    }
    Ok(())
}

fn layout_warnings(layout: &LayoutReport, shelf: Option<&PmtError>) -> Vec<String> {
    let failures = layout
        .failures
        .iter()
        .map(|f| format!("{}: {}", f.path.display(), f.error));
    failures
        .chain(layout.warnings.iter().cloned())
        .chain(shelf.map(|e| e.to_string()))
        .collect()
}

fn print_report(scaffold: &Scaffold, layout: &LayoutReport, warnings: &[String]) {
    let paths = scaffold.paths();

    println!("{}", "PMT Company Layout".bold());
    println!("{}", "=".repeat(50));
    println!();
    println!("{}", "Checking required folders...".cyan());
    println!();

    let folders = paths
        .required_folders()
        .into_iter()
        .chain(paths.project_assets_folders());
    for (path, purpose) in folders {
        if layout.created.contains(path) {
            println!("{} Created {} ({})", "✓".green(), path.display(), purpose);
        } else if layout.existing.contains(path) {
            println!("{} {} exists ({})", "✓".green(), path.display(), purpose);
        } else {
            println!("{} {} missing ({})", "✗".red(), path.display(), purpose);
        }
    }

    println!();
    match &layout.manifest {
        Some(path) => println!("{} Manifest at {}", "✓".green(), path.display()),
        None => println!("{} Manifest could not be written", "✗".red()),
    }

    for failure in &layout.failures {
        println!("{} {}: {}", "✗".red(), failure.path.display(), failure.error);
    }
    for warning in warnings.iter().skip(layout.failures.len()) {
        println!("{} {}", "!".yellow(), warning);
    }

    println!();
    println!("{}", "Summary".bold());
    println!("{}", "=".repeat(50));
    println!("Created: {} folders", layout.created.len().to_string().green());
    println!(
        "Failures: {}",
        if layout.failures.is_empty() {
            "0".green()
        } else {
            layout.failures.len().to_string().red()
        }
    );
    println!();

    if layout.is_complete() {
        println!("{}", "✓ Company layout is ready!".green());
    } else {
        println!("{}", "✗ Some folders could not be created. Check permissions.".red());
    }
}
