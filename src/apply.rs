//! Effect application.
//!
//! [`apply`] computes the state mutation for one effect against the local
//! task mirror and returns the patch to send, or `None` when the task is
//! already in the target state. Every branch is independently idempotent:
//! re-running the whole system against an unchanged task set produces zero
//! patches. Whether a patch is actually sent (dry-run) is the caller's
//! concern, not this module's.

use crate::priority::Priority;
use crate::rules::Effect;
use crate::service::TaskPatch;
use crate::task::Task;

/// Base urgency a priority raise is measured from: `increase_priority = n`
/// targets urgency `1 + n`, capped at the scale's top.
const BASE_URGENCY: u8 = 1;

/// Apply one effect to the local task mirror.
///
/// Mutates `task` in place so that later actions in the same run observe the
/// new state, and returns the corresponding patch when anything changed.
pub fn apply(task: &mut Task, effect: &Effect) -> Option<TaskPatch> {
    match effect {
        Effect::AddLabel(label) => {
            if task.labels.iter().any(|have| have == &label.id) {
                return None;
            }
            task.labels.push(label.id.clone());
            Some(TaskPatch {
                labels: Some(task.labels.clone()),
                ..TaskPatch::default()
            })
        }
        Effect::IncreasePriority(levels) => {
            let target = Priority::from_urgency(BASE_URGENCY.saturating_add(*levels));
            if task.priority.urgency() >= target.urgency() {
                return None;
            }
            task.priority = target;
            Some(TaskPatch {
                priority: Some(target),
                ..TaskPatch::default()
            })
        }
        Effect::MoveToProject(project) => {
            if task.project_id == project.id {
                return None;
            }
            task.project_id = project.id.clone();
            Some(TaskPatch {
                project_id: Some(project.id.clone()),
                ..TaskPatch::default()
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{LabelRef, ProjectRef};
    use chrono::Utc;

    fn task() -> Task {
        Task {
            id: "1".to_string(),
            content: "Water plants".to_string(),
            labels: vec!["l-home".to_string()],
            project_id: "p1".to_string(),
            section_id: None,
            priority: Priority::LOWEST,
            date_added: Utc::now(),
            due: None,
            checked: false,
        }
    }

    #[test]
    fn add_label_is_idempotent() {
        let mut task = task();
        let effect = Effect::AddLabel(LabelRef::new("l-stale", "stale"));

        let patch = apply(&mut task, &effect).expect("first application updates");
        assert_eq!(
            patch.labels.as_deref(),
            Some(&["l-home".to_string(), "l-stale".to_string()][..])
        );

        let labels_after_first = task.labels.clone();
        assert!(apply(&mut task, &effect).is_none());
        assert_eq!(task.labels, labels_after_first);
    }

    #[test]
    fn increase_priority_targets_base_plus_levels() {
        let mut task = task();
        assert_eq!(task.priority.urgency(), 1);

        let patch = apply(&mut task, &Effect::IncreasePriority(2)).expect("updates");
        assert_eq!(patch.priority, Some(Priority::from_urgency(3)));
        assert_eq!(task.priority.urgency(), 3);
    }

    #[test]
    fn increase_priority_never_lowers() {
        let mut task = task();
        apply(&mut task, &Effect::IncreasePriority(2)).expect("updates");

        // A smaller raise after a larger one is a no-op.
        assert!(apply(&mut task, &Effect::IncreasePriority(1)).is_none());
        assert_eq!(task.priority.urgency(), 3);

        // Reapplying the same raise is a no-op too.
        assert!(apply(&mut task, &Effect::IncreasePriority(2)).is_none());
        assert_eq!(task.priority.urgency(), 3);
    }

    #[test]
    fn increase_priority_caps_at_top_of_scale() {
        let mut task = task();
        apply(&mut task, &Effect::IncreasePriority(3)).expect("updates");
        assert_eq!(task.priority, Priority::HIGHEST);
        assert!(apply(&mut task, &Effect::IncreasePriority(3)).is_none());
    }

    #[test]
    fn move_to_project_is_idempotent() {
        let mut task = task();
        let effect = Effect::MoveToProject(ProjectRef::new("p2", "Backlog"));

        let patch = apply(&mut task, &effect).expect("updates");
        assert_eq!(patch.project_id.as_deref(), Some("p2"));
        assert_eq!(task.project_id, "p2");

        assert!(apply(&mut task, &effect).is_none());
    }
}
