pub mod commands;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "fabquote",
    about = "Fabquote operator CLI",
    long_about = "Inspect configuration, run readiness checks, and price offline estimates \
                  against the built-in rate tables.",
    after_help = "Examples:\n  fabquote estimate --category countertop --sqft 45 --material granite\n  fabquote config\n  fabquote doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Price an estimate offline using the built-in fallback rate tables")]
    Estimate {
        #[arg(long, help = "Quote category: countertop, cabinet, or combo")]
        category: String,
        #[arg(long, help = "Countertop square footage")]
        sqft: Option<Decimal>,
        #[arg(long, help = "Countertop material name, for the line-item label")]
        material: Option<String>,
        #[arg(long, help = "Edge profile (straight adds no charge)")]
        edge_profile: Option<String>,
        #[arg(long, help = "Number of sink cutouts")]
        sink_cutouts: Option<u32>,
        #[arg(long, help = "Backsplash linear feet")]
        backsplash_lf: Option<Decimal>,
        #[arg(long, help = "Base cabinet linear feet")]
        base_lf: Option<Decimal>,
        #[arg(long, help = "Wall cabinet linear feet")]
        wall_lf: Option<Decimal>,
        #[arg(long, help = "Number of tall units")]
        tall_units: Option<u32>,
        #[arg(long, help = "Number of drawer stacks")]
        drawer_stacks: Option<u32>,
    },
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
    #[command(about = "Validate config and run deterministic pricing self-checks")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Estimate {
            category,
            sqft,
            material,
            edge_profile,
            sink_cutouts,
            backsplash_lf,
            base_lf,
            wall_lf,
            tall_units,
            drawer_stacks,
        } => commands::estimate::run(commands::estimate::EstimateArgs {
            category,
            sqft,
            material,
            edge_profile,
            sink_cutouts,
            backsplash_lf,
            base_lf,
            wall_lf,
            tall_units,
            drawer_stacks,
        }),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
