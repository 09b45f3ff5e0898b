#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

use recur::error::{Error, Result};
use recur::priority::Priority;
use recur::rules::{LabelRef, ProjectRef, RuleSet};
use recur::service::{TaskDraft, TaskPatch, TaskService};
use recur::session::Session;
use recur::state::RunStateStore;
use recur::task::Task;

/// In-memory stand-in for the Todoist collaborator. Records every mutation
/// call so tests can assert on exactly what would hit the wire.
#[derive(Default)]
pub struct FakeService {
    pub labels: Vec<LabelRef>,
    pub projects: Vec<ProjectRef>,
    /// Completion time paired with the task's full detail.
    pub completed: Vec<(DateTime<Utc>, Task)>,
    /// Open-item snapshot served to `open_tasks_matching`.
    pub open: Vec<Task>,

    pub created: Vec<TaskDraft>,
    pub updates: Vec<(String, TaskPatch)>,
    pub commits: usize,
    pub scans: usize,

    pub fail_create: bool,
    pub fail_commit: bool,
}

impl TaskService for FakeService {
    fn list_labels(&mut self) -> Result<Vec<LabelRef>> {
        Ok(self.labels.clone())
    }

    fn list_projects(&mut self) -> Result<Vec<ProjectRef>> {
        Ok(self.projects.clone())
    }

    fn completed_tasks_since(&mut self, since: DateTime<Utc>) -> Result<Vec<Task>> {
        Ok(self
            .completed
            .iter()
            .filter(|(completed_at, _)| *completed_at > since)
            .map(|(_, task)| task.clone())
            .collect())
    }

    fn open_tasks_matching(&mut self, matches: &dyn Fn(&Task) -> bool) -> Result<Vec<Task>> {
        self.scans += 1;
        Ok(self
            .open
            .iter()
            .filter(|task| matches(task))
            .cloned()
            .collect())
    }

    fn create_task(&mut self, draft: &TaskDraft) -> Result<String> {
        if self.fail_create {
            return Err(Error::Network("connection reset".to_string()));
        }
        self.created.push(draft.clone());
        Ok(format!("created-{}", self.created.len()))
    }

    fn update_task(&mut self, task_id: &str, patch: TaskPatch) -> Result<()> {
        self.updates.push((task_id.to_string(), patch));
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        if self.fail_commit {
            return Err(Error::Commit("batch rejected".to_string()));
        }
        self.commits += 1;
        Ok(())
    }
}

/// The pinned wall-clock time sessions run at in tests.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 8, 6, 30, 0)
        .single()
        .expect("timestamp")
}

/// A session over the fake service with its state file in a tempdir and the
/// clock pinned to [`fixed_now`].
pub fn session(
    service: FakeService,
    rules: RuleSet,
    dry_run: bool,
    dir: &TempDir,
) -> Session<FakeService> {
    let state = RunStateStore::new(dir.path().join("lastrun.json"));
    Session::new(service, rules, state, dry_run).with_now(fixed_now())
}

/// An open task with sensible defaults; tests adjust fields directly.
pub fn task(id: &str, content: &str, project_id: &str) -> Task {
    Task {
        id: id.to_string(),
        content: content.to_string(),
        labels: Vec::new(),
        project_id: project_id.to_string(),
        section_id: None,
        priority: Priority::LOWEST,
        date_added: fixed_now() - chrono::Duration::days(1),
        due: None,
        checked: false,
    }
}
