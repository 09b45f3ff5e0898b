//! Recreation engine.
//!
//! Recreates tasks that were completed since the last run, for rules that
//! opted in via `recreate_on_complete`. The run-state timestamp bounds the
//! window and only advances when the whole pass succeeds outside dry-run,
//! giving at-least-once semantics: a crash mid-pass may recreate a task
//! twice on retry, never lose one.

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::matcher;
use crate::rules::{Recreate, Rule, RuleSet};
use crate::service::{TaskDraft, TaskService};
use crate::session::Session;
use crate::task::Task;

/// Run the recreation pass. Returns how many tasks were recreated (or would
/// have been, in dry-run).
pub fn recreate_completed_tasks<S: TaskService>(session: &mut Session<S>) -> Result<usize> {
    let now = session.now;
    let last_run = match session.state.load() {
        Some(last_run) => last_run,
        None => {
            // Conservative first-run window: nothing completed before this
            // run is recreated, so an initial setup cannot flood the list.
            warn!(
                state_file = %session.state.path().display(),
                "no prior run recorded, starting the recreation window now"
            );
            now
        }
    };

    let completed = session.service.completed_tasks_since(last_run)?;
    debug!(
        count = completed.len(),
        since = %last_run,
        "fetched completed tasks"
    );

    let mut recreated = 0;
    for task in &completed {
        let Some((rule, policy)) = first_recreate_match(&session.rules, task) else {
            debug!(content = %task.content, "completed task matches no recreate rule");
            continue;
        };

        let draft = recreation_draft(task, policy);
        info!(
            rule = %rule.name,
            content = %draft.content,
            dry_run = session.dry_run,
            "recreating completed task"
        );
        recreated += 1;

        if !session.dry_run {
            let new_id = session.service.create_task(&draft)?;
            debug!(task_id = %new_id, "created task");
        }
    }

    if !session.dry_run {
        session.state.store(now)?;
    }
    Ok(recreated)
}

/// First rule in declared order that both recreates and matches the task.
fn first_recreate_match<'a>(rules: &'a RuleSet, task: &Task) -> Option<(&'a Rule, &'a Recreate)> {
    rules.rules.iter().find_map(|rule| {
        let policy = rule.recreate.as_ref()?;
        matcher::matches(task, &rule.filter).then_some((rule, policy))
    })
}

/// The copy to create: same content, project, and section; labels minus the
/// rule's skip label; the rule's priority override or the task's own.
fn recreation_draft(task: &Task, policy: &Recreate) -> TaskDraft {
    let labels = task
        .labels
        .iter()
        .filter(|id| {
            policy
                .skip_label
                .as_ref()
                .map_or(true, |skip| &skip.id != *id)
        })
        .cloned()
        .collect();

    TaskDraft {
        content: task.content.clone(),
        project_id: task.project_id.clone(),
        section_id: task.section_id.clone(),
        labels,
        priority: policy.priority.unwrap_or(task.priority),
    }
}
