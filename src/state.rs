//! Durable run state.
//!
//! The only state the tool owns: the timestamp of the last successful run,
//! kept in a single JSON file and rewritten atomically (write temp + rename)
//! after each successful recreation pass. A missing or unparsable file is a
//! valid initial state, not an error.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

const STATE_FILE: &str = "lastrun.json";

#[derive(Debug, Serialize, Deserialize)]
struct RunState {
    last_run: DateTime<Utc>,
}

/// Store for the last-run timestamp.
#[derive(Debug, Clone)]
pub struct RunStateStore {
    path: PathBuf,
}

impl RunStateStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default location under the platform data directory.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "recur").ok_or_else(|| {
            Error::InvalidConfig(
                "cannot determine a state directory; set state_file in the config".to_string(),
            )
        })?;
        Ok(dirs.data_dir().join(STATE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the last-run timestamp. Absent or corrupt state reads as "no
    /// prior run".
    pub fn load(&self) -> Option<DateTime<Utc>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) => {
                debug!(path = %self.path.display(), error = %err, "no readable state file");
                return None;
            }
        };
        match serde_json::from_str::<RunState>(&content) {
            Ok(state) => Some(state.last_run),
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "state file is corrupt, treating as no prior run"
                );
                None
            }
        }
    }

    /// Persist the last-run timestamp (write temp + rename).
    pub fn store(&self, last_run: DateTime<Utc>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&RunState { last_run })?;
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, json.as_bytes())?;
        fs::rename(&temp_path, &self.path)?;

        debug!(path = %self.path.display(), last_run = %last_run, "stored run state");
        Ok(())
    }
}
