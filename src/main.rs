// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::process::ExitCode;

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use dompet::config::{Config, LOG_VAR};
use dompet::ledger::Ledger;
use dompet::{cli, commands, store};

fn setup_logging() {
    let filter = EnvFilter::try_from_env(LOG_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let config = Config::from_env()?;
    let mut ledger = Ledger::new(store::open(&config)?);

    match matches.subcommand() {
        Some(("init", _)) => {
            for collection in dompet::models::Collection::ALL {
                ledger.count(collection)?;
            }
            println!("Using {}", config.describe());
        }
        Some(("tx", sub)) => commands::transactions::handle(&mut ledger, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&mut ledger, sub)?,
        Some(("recurring", sub)) => commands::recurring::handle(&mut ledger, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&mut ledger, sub)?,
        Some(("tag", sub)) => commands::tags::handle(&mut ledger, sub)?,
        Some(("summary", sub)) => commands::reports::summary(&ledger, sub)?,
        Some(("report", sub)) => commands::reports::handle(&ledger, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&ledger, sub)?,
        Some(("import", sub)) => {
            commands::importer::handle(&mut ledger, sub)?;
        }
        Some(("dashboard", sub)) => commands::dashboard::handle(&ledger, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    setup_logging();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            // Caller mistakes exit with 2, system failures with 1.
            match err.downcast_ref::<dompet::Error>() {
                Some(e) if e.is_caller_fault() => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}
