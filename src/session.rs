//! Run session.
//!
//! Everything a pass needs travels in one explicit [`Session`] value instead
//! of module-level globals: the connected service, the resolved rules, the
//! run-state store, the dry-run flag, and the clock captured at session
//! start. Capturing `now` once keeps the recreation window race-free: tasks
//! completed while a pass is processing fall into the next run's window.

use chrono::{DateTime, NaiveDate, Utc};

use crate::rules::RuleSet;
use crate::service::TaskService;
use crate::state::RunStateStore;

/// State shared by the recreation and update passes of one run.
pub struct Session<S> {
    pub service: S,
    pub rules: RuleSet,
    pub state: RunStateStore,
    /// Suppress every create/update/commit call, but still count and log.
    pub dry_run: bool,
    /// Wall-clock time captured at session start.
    pub now: DateTime<Utc>,
}

impl<S: TaskService> Session<S> {
    pub fn new(service: S, rules: RuleSet, state: RunStateStore, dry_run: bool) -> Self {
        Self {
            service,
            rules,
            state,
            dry_run,
            now: Utc::now(),
        }
    }

    /// Pin the session clock. Tests use this to make trigger evaluation and
    /// the recreation window deterministic.
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// The calendar date triggers are evaluated against.
    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }
}
