//! Local mirror of a remote Todoist task.
//!
//! Task data is owned by Todoist; these values only live for the duration of
//! one run. Field names follow the Sync API item shape so the client can
//! deserialize items directly.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::priority::Priority;

/// One task as mirrored from the Sync API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub content: String,
    /// Label ids carried by the task.
    #[serde(default)]
    pub labels: Vec<String>,
    pub project_id: String,
    #[serde(default)]
    pub section_id: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    pub date_added: DateTime<Utc>,
    #[serde(default)]
    pub due: Option<Due>,
    /// Completed flag.
    #[serde(default)]
    pub checked: bool,
}

/// A task's due entry. Only the calendar date matters to the engines.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Due {
    #[serde(deserialize_with = "date_prefix")]
    pub date: NaiveDate,
}

/// Todoist sends `due.date` either as a plain date or as a full datetime
/// string; only the date part is meaningful here.
fn date_prefix<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let prefix = raw.get(..10).unwrap_or(&raw);
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").map_err(serde::de::Error::custom)
}
