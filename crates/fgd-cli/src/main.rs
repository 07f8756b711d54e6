//! FGD CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info, warn};

use fgd_cli::{
    Args,
    error_adapter::{Reportable, error_reportable, to_reportables},
};

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting fgd");
    debug!(args:?; "Parsed arguments");

    match fgd_cli::run(&args) {
        Ok(outcome) => {
            for reportable in to_reportables(&outcome) {
                report(&reportable);
            }
            if outcome.failed() {
                process::exit(1);
            }
        }
        Err(err) => {
            report(&error_reportable(&err));
            process::exit(1);
        }
    }

    info!("Completed successfully");
}

/// Render one report through miette and log it at its severity.
fn report(reportable: &Reportable<'_>) {
    let reporter = miette::GraphicalReportHandler::new();
    let mut writer = String::new();
    reporter
        .render_report(&mut writer, reportable)
        .expect("Writing to String buffer is infallible");

    if reportable.is_error() {
        error!("{writer}");
    } else {
        warn!("{writer}");
    }
}
