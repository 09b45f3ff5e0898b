//! The task-service collaborator boundary.
//!
//! Both engines talk to Todoist exclusively through [`TaskService`], which
//! keeps them wire-agnostic and lets tests substitute an in-memory fake.
//! The production implementation is [`crate::todoist::TodoistClient`].

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::priority::Priority;
use crate::rules::{LabelRef, ProjectRef};
use crate::task::Task;

/// A new task to create, as computed by the recreation engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub content: String,
    pub project_id: String,
    pub section_id: Option<String>,
    pub labels: Vec<String>,
    pub priority: Priority,
}

/// A partial update to an existing task. Only the set fields change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// Replacement label-id list.
    pub labels: Option<Vec<String>>,
    pub priority: Option<Priority>,
    pub project_id: Option<String>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.labels.is_none() && self.priority.is_none() && self.project_id.is_none()
    }
}

/// Narrow interface over the remote task service.
pub trait TaskService {
    /// All labels, for name resolution.
    fn list_labels(&mut self) -> Result<Vec<LabelRef>>;

    /// All projects, for name resolution.
    fn list_projects(&mut self) -> Result<Vec<ProjectRef>>;

    /// Tasks completed strictly after `since` (exclusive bound), in full
    /// detail.
    fn completed_tasks_since(&mut self, since: DateTime<Utc>) -> Result<Vec<Task>>;

    /// Open tasks satisfying the supplied predicate.
    fn open_tasks_matching(&mut self, matches: &dyn Fn(&Task) -> bool) -> Result<Vec<Task>>;

    /// Create a task immediately. Returns the new task's id.
    fn create_task(&mut self, draft: &TaskDraft) -> Result<String>;

    /// Queue a partial update; nothing is sent until [`commit`].
    ///
    /// [`commit`]: TaskService::commit
    fn update_task(&mut self, task_id: &str, patch: TaskPatch) -> Result<()>;

    /// Send all queued updates as one batch.
    fn commit(&mut self) -> Result<()>;
}
