mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::*;
use tracing_subscriber::EnvFilter;

use pmt_scaffold::{install_shelf_script, PmtConfig, Prerequisites, Scaffold};

#[derive(Parser)]
#[command(name = "pmt")]
#[command(about = "Project scaffolding for the Maya/Unreal content pipeline", long_about = None)]
#[command(version)]
struct Cli {
    #[arg(long, global = true, help = "Config file (default: $PMT_CONFIG or ./pmt.yaml)")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Install root override")]
    root: Option<PathBuf>,
    #[arg(long, global = true, help = "Company name override")]
    company: Option<String>,
    #[arg(long, global = true, help = "Do not require Maya and Unreal to be installed")]
    skip_prereq: bool,
    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "More log output (-v, -vv)")]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the company folder skeleton and canonical manifest
    Init {
        #[arg(long, help = "JSON output")]
        json: bool,
    },
    /// Report whether the required applications are installed
    Check {
        #[arg(long, help = "JSON output")]
        json: bool,
    },
    /// Manage projects under PMT Projects
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },
    /// Manage scene files
    Scene {
        #[command(subcommand)]
        action: SceneAction,
    },
    /// Inspect the manifest
    Manifest {
        #[command(subcommand)]
        action: ManifestAction,
    },
}

#[derive(Subcommand)]
pub enum ProjectAction {
    List {
        #[arg(long, help = "JSON output")]
        json: bool,
    },
    Show {
        name: String,
        #[arg(long, help = "JSON output")]
        json: bool,
    },
    Create {
        name: String,
        #[arg(long, help = "JSON output")]
        json: bool,
    },
    Rename {
        old: String,
        new: String,
    },
    Delete {
        name: String,
        #[arg(short, long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

/// `location` is `dept`, `assets`, `<project>/<Category>` or
/// `<project>/Exported/<Category>`.
#[derive(Subcommand)]
pub enum SceneAction {
    List {
        location: String,
        #[arg(long, help = "JSON output")]
        json: bool,
    },
    Create {
        location: String,
        name: String,
        #[arg(long, help = "Open the new scene in Maya and exit")]
        open: bool,
    },
    Rename {
        location: String,
        file: String,
        new_name: String,
    },
    Delete {
        location: String,
        file: String,
        #[arg(short, long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
    Copy {
        location: String,
        file: String,
        #[arg(help = "Destination location")]
        to: String,
    },
    Open {
        location: String,
        file: String,
    },
}

#[derive(Subcommand)]
pub enum ManifestAction {
    /// Print the canonical manifest
    Show {
        #[arg(long, help = "Raw JSON output")]
        json: bool,
    },
    /// Build the manifest from the current tree without writing it
    Preview {
        #[arg(long, help = "JSON output")]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = PmtConfig::load(cli.config.as_deref())?.with_overrides(cli.root, cli.company);

    if let Commands::Check { json } = cli.command {
        return commands::check::run(&config, json);
    }

    if !cli.skip_prereq {
        if let Err(e) = Prerequisites::check(&config) {
            eprintln!("{} {}", "✗".red(), e);
            eprintln!("{}", "Please install it to proceed.".yellow());
            std::process::exit(1);
        }
    }

    let scaffold = Scaffold::from_config(&config);
    let layout = scaffold.ensure_company_layout();

    let shelf = install_shelf_script(&config);
    if let Err(e) = &shelf {
        tracing::debug!("{}", e);
    }

    match cli.command {
        Commands::Init { json } => commands::init::run(&scaffold, &layout, shelf.err(), json),
        Commands::Check { json } => commands::check::run(&config, json),
        Commands::Project { action } => commands::project::run(&scaffold, action),
        Commands::Scene { action } => commands::scene::run(&config, &scaffold, action),
        Commands::Manifest { action } => commands::manifest::run(&config, &scaffold, action),
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
