//! Filter matching predicates.

use crate::rules::Filter;
use crate::task::Task;

/// Whether a task's current attributes satisfy a filter.
///
/// Clauses AND together; a filter with no clauses matches every task. The
/// labels clause fails closed: every required label must be on the task.
pub fn matches(task: &Task, filter: &Filter) -> bool {
    if !filter
        .labels
        .iter()
        .all(|label| task.labels.iter().any(|have| have == &label.id))
    {
        return false;
    }
    if let Some(project) = &filter.project {
        if task.project_id != project.id {
            return false;
        }
    }
    true
}

/// The update-scan predicate: the raw filter plus the open-task restriction.
///
/// The recreate scan uses [`matches`] directly since it operates on tasks
/// fetched as already completed.
pub fn open_candidate(task: &Task, filter: &Filter) -> bool {
    !task.checked && matches(task, filter)
}
