//! Trigger evaluation.
//!
//! Triggers are evaluated against the current calendar date, never the
//! time of day, so a condition cannot flap between runs that happen at
//! different hours. Firing is monotonic in time; idempotence of the overall
//! run comes from the action applier, not from here.

use chrono::{Duration, NaiveDate};

use crate::rules::Trigger;
use crate::task::Task;

/// Whether a trigger condition holds for a task on the given date.
///
/// Clauses OR together: any satisfied clause fires. A `days_until_due`
/// clause never fires for a task without a due date; that is a defined
/// no-match, not an error.
pub fn fires(task: &Task, trigger: &Trigger, today: NaiveDate) -> bool {
    if let Some(days) = trigger.days_since_creation {
        if today >= task.date_added.date_naive() + Duration::days(days) {
            return true;
        }
    }
    if let Some(days) = trigger.days_until_due {
        if let Some(due) = &task.due {
            if today >= due.date - Duration::days(days) {
                return true;
            }
        }
    }
    false
}
