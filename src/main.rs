//! recur - Recurring-task automation for Todoist

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use recur::cli::Cli;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    let cli = Cli::parse();

    if let Err(err) = init_logging(cli.debug, cli.log_file.as_deref()) {
        eprintln!("error: cannot initialize logging: {err}");
        std::process::exit(err.exit_code());
    }

    if let Err(err) = cli.run() {
        error!(error = %err, "initialization failed");
        std::process::exit(err.exit_code());
    }
}

fn init_logging(debug: bool, log_file: Option<&Path>) -> recur::Result<()> {
    // RUST_LOG wins when set and sane; --debug only changes the default.
    let default_level = if debug { "debug" } else { "info" };
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() || raw.len() > 4096 {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
        .unwrap_or_else(|| EnvFilter::new(default_level));

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(Arc::new(file)))
                .with(filter)
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr))
                .with(filter)
                .init();
        }
    }
    Ok(())
}
