// ─────────────────────────────────────────────────────────────────────
// Halo Orbit Core — Extraction CLI
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Batch entry point. Each subcommand runs one pipeline over every
//! simulation listed in the survey config.

use clap::{Parser, Subcommand};

use halo_pipeline::{eigen_run, infall_run};
use halo_types::config::SurveyConfig;
use halo_types::error::HaloResult;

#[derive(Parser)]
#[command(name = "extract", about = "Satellite infall and tensor-field eigenvector extraction")]
struct Cli {
    /// Survey configuration (JSON).
    #[arg(short, long)]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Detect satellite infall epochs and write per-simulation tables.
    Infall,
    /// Sample eigenvectors along each host's tracked positions.
    Eigen,
    /// Sample eigenvectors at satellite infall and birth epochs.
    EigenBirth,
}

fn run(cli: &Cli) -> HaloResult<()> {
    let cfg = SurveyConfig::from_file(&cli.config)?;
    println!("Survey: {} ({} simulations)", cfg.survey_name, cfg.simulations.len());

    for sim in &cfg.simulations {
        match cli.command {
            Command::Infall => {
                infall_run::run_infall(&cfg, sim)?;
            }
            Command::Eigen => {
                eigen_run::run_current_positions(&cfg, sim)?;
            }
            Command::EigenBirth => {
                eigen_run::run_birth_infall(&cfg, sim)?;
            }
        }
    }
    println!("All simulations processed.");
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
