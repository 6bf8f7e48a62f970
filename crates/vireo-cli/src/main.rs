use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use vireo_cli::{check_model, CheckReport, Model};
use vireo_config::{discover_config_path, VireoConfig};

#[derive(Parser)]
#[command(name = "vireo", version, about = "Vireo CLI (member override resolution)")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Report which members of a hierarchy model override which
    Check(CheckArgs),
    /// Print the JSON schema of `vireo.toml`
    Schema,
}

#[derive(Args)]
struct CheckArgs {
    /// Path to a JSON hierarchy model
    model: PathBuf,
    /// Config file (defaults to `vireo.toml` or `.vireo.toml` next to the model)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Emit JSON suitable for CI
    #[arg(long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();
    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            2
        }
    };

    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Command::Check(args) => {
            let config = load_config(&args)?;
            vireo_config::init_tracing(&config.logging);
            let model = Model::load_from_path(&args.model)
                .with_context(|| format!("loading model {}", args.model.display()))?;
            let report = check_model(&model, config.override_options());
            print_report(&report, args.json)?;
            Ok(0)
        }
        Command::Schema => {
            print_json(&vireo_config::json_schema())?;
            Ok(0)
        }
    }
}

fn load_config(args: &CheckArgs) -> Result<VireoConfig> {
    let path = match &args.config {
        Some(path) => Some(path.clone()),
        None => args.model.parent().and_then(discover_config_path),
    };
    match path {
        Some(path) => VireoConfig::load_from_path(&path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(VireoConfig::default()),
    }
}

fn print_report(report: &CheckReport, json: bool) -> Result<()> {
    if json {
        return print_json(report);
    }
    for found in &report.matches {
        println!("{found}");
    }
    println!(
        "summary: {} classes, {} members, {} overrides",
        report.summary.classes, report.summary.members, report.summary.matches
    );
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value)?;
    println!("{out}");
    Ok(())
}
