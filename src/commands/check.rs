use anyhow::Result;
use colored::*;
use serde::Serialize;

use pmt_scaffold::core::launcher::{ENGINE_NAME, MODELER_NAME};
use pmt_scaffold::{locate, PmtConfig};

#[derive(Serialize)]
struct Application {
    name: &'static str,
    found: Option<String>,
    candidates: Vec<String>,
}

pub fn run(config: &PmtConfig, json: bool) -> Result<()> {
    let apps = vec![
        detect(MODELER_NAME, &config.modeler_candidates),
        detect(ENGINE_NAME, &config.engine_candidates),
    ];

    if json {
        println!("{}", serde_json::to_string_pretty(&apps)?);
    } else {
        println!("{}", "Required Applications".bold());
        println!("{}", "=".repeat(50));
        for app in &apps {
            match &app.found {
                Some(path) => println!("{} {} ({})", "✓".green(), app.name, path),
                None => {
                    println!("{} {} not found", "✗".red(), app.name);
                    for candidate in &app.candidates {
                        println!("    looked in {}", candidate.dimmed());
                    }
                }
            }
        }
    }

    if apps.iter().any(|a| a.found.is_none()) {
        std::process::exit(1);
    }
    Ok(())
}

fn detect(name: &'static str, candidates: &[std::path::PathBuf]) -> Application {
    Application {
        name,
        found: locate(name, candidates)
            .ok()
            .map(|p| p.display().to_string()),
        candidates: candidates.iter().map(|p| p.display().to_string()).collect(),
    }
}
