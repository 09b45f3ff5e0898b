//! Command-line interface for recur
//!
//! The CLI surface is deliberately thin: one required config path and a few
//! flags. All the behavior lives in the engines; `run` only wires
//! initialization together and isolates the two passes from each other.

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::recreate;
use crate::resolve;
use crate::service::TaskService;
use crate::session::Session;
use crate::state::RunStateStore;
use crate::todoist::TodoistClient;
use crate::update;

/// recur - Recurring-task automation for Todoist
///
/// Recreates tasks completed since the last run and applies time-based
/// rules (relabel, escalate priority, move between projects) to open tasks.
#[derive(Parser, Debug)]
#[command(name = "recur")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the recur.toml configuration file
    pub config: PathBuf,

    /// Log intended mutations without sending any to Todoist
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Append logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Todoist API token
    #[arg(long, env = "TODOIST_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

impl Cli {
    /// Initialize and run both passes.
    ///
    /// An error return means initialization failed and nothing ran; pass
    /// failures are caught inside and only logged.
    pub fn run(&self) -> Result<()> {
        let config = Config::load(&self.config)?;
        info!(
            path = %self.config.display(),
            rules = config.rules.len(),
            "loaded configuration"
        );

        let token = self.token.as_deref().ok_or(Error::MissingToken)?;
        let mut client = TodoistClient::connect(token)?;
        info!("connected to Todoist");

        let labels = client.list_labels()?;
        let projects = client.list_projects()?;
        let rules = resolve::resolve(&config, &labels, &projects)?;
        info!(rules = rules.rules.len(), "resolved rule names");

        let state_path = match &config.state_file {
            Some(path) => path.clone(),
            None => RunStateStore::default_path()?,
        };
        let state = RunStateStore::new(state_path);

        let mut session = Session::new(client, rules, state, self.dry_run);
        run_passes(&mut session);
        Ok(())
    }
}

/// Run the recreation pass, then the update pass. Each pass's failure is
/// logged and does not stop the other.
pub fn run_passes<S: TaskService>(session: &mut Session<S>) {
    match recreate::recreate_completed_tasks(session) {
        Ok(count) => info!(recreated = count, "recreation pass finished"),
        Err(err) => error!(error = %err, "recreation pass failed"),
    }

    match update::update_tasks(session) {
        Ok(count) => info!(updated = count, "update pass finished"),
        Err(err) => error!(error = %err, "update pass failed"),
    }
}
