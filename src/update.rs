//! Update engine.
//!
//! Scans open tasks per rule, evaluates each action's trigger against
//! today's date, and applies due effects through the action applier.
//! Actions run in declared order against the task's local mirror, so a
//! later action sees the state an earlier one produced. All resulting
//! patches are committed as one batch at the end of the pass.

use tracing::{debug, info};

use crate::apply;
use crate::error::Result;
use crate::matcher;
use crate::service::TaskService;
use crate::session::Session;
use crate::trigger;

/// Run the update pass. Returns how many tasks had at least one real
/// mutation (or would have, in dry-run).
pub fn update_tasks<S: TaskService>(session: &mut Session<S>) -> Result<usize> {
    let today = session.today();
    let dry_run = session.dry_run;
    let Session { service, rules, .. } = session;

    let mut updated = 0;
    for rule in &rules.rules {
        if rule.actions.is_empty() {
            continue;
        }

        let filter = &rule.filter;
        let tasks = service.open_tasks_matching(&|task| matcher::open_candidate(task, filter))?;
        debug!(rule = %rule.name, candidates = tasks.len(), "scanning open tasks");

        for mut task in tasks {
            let mut changed = false;
            for action in &rule.actions {
                if !trigger::fires(&task, &action.trigger, today) {
                    continue;
                }
                let Some(patch) = apply::apply(&mut task, &action.effect) else {
                    continue;
                };

                info!(
                    rule = %rule.name,
                    content = %task.content,
                    effect = %action.effect,
                    dry_run,
                    "applying effect"
                );
                changed = true;

                if !dry_run {
                    service.update_task(&task.id, patch)?;
                }
            }
            if changed {
                updated += 1;
            }
        }
    }

    if !dry_run {
        service.commit()?;
    }
    Ok(updated)
}
