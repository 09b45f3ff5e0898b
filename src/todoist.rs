//! Todoist Sync API client.
//!
//! Blocking HTTP client implementing [`TaskService`]. One full sync at
//! connect time populates the label/project catalogs and the open-item
//! snapshot; both passes then work against that snapshot, so tasks created
//! mid-run are not re-evaluated within the same run.
//!
//! Mutations follow the Sync API command model: `create_task` posts one
//! `item_add` command immediately, while `update_task` queues `item_update`
//! and `item_move` commands that [`commit`] posts as a single batch.
//!
//! [`commit`]: TaskService::commit

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::rules::{LabelRef, ProjectRef};
use crate::service::{TaskDraft, TaskPatch, TaskService};
use crate::task::Task;

const SYNC_URL: &str = "https://api.todoist.com/sync/v9/sync";
const COMPLETED_URL: &str = "https://api.todoist.com/sync/v9/completed/get_all";
const ITEM_GET_URL: &str = "https://api.todoist.com/sync/v9/items/get";

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Connected Todoist client.
pub struct TodoistClient {
    agent: ureq::Agent,
    token: String,
    labels: Vec<LabelRef>,
    projects: Vec<ProjectRef>,
    /// Open-item snapshot from the connect-time sync.
    items: Vec<Task>,
    /// Commands queued by `update_task`, sent by `commit`.
    queue: Vec<Command>,
}

impl TodoistClient {
    /// Perform the initial sync and return a connected client.
    pub fn connect(token: &str) -> Result<Self> {
        let agent = ureq::AgentBuilder::new().timeout(HTTP_TIMEOUT).build();

        let response = agent
            .post(SYNC_URL)
            .set("Authorization", &format!("Bearer {token}"))
            .send_form(&[
                ("sync_token", "*"),
                ("resource_types", r#"["labels","projects","items"]"#),
            ]);
        let body: SyncResponse = read_json(response)?;

        debug!(
            labels = body.labels.len(),
            projects = body.projects.len(),
            items = body.items.len(),
            "initial sync complete"
        );

        Ok(Self {
            agent,
            token: token.to_string(),
            labels: body.labels.into_iter().map(WireLabel::into_ref).collect(),
            projects: body
                .projects
                .into_iter()
                .map(WireProject::into_ref)
                .collect(),
            items: body.items,
            queue: Vec::new(),
        })
    }

    fn post(&self, url: &str, form: &[(&str, &str)]) -> std::result::Result<ureq::Response, ureq::Error> {
        self.agent
            .post(url)
            .set("Authorization", &format!("Bearer {}", self.token))
            .send_form(form)
    }

    /// Post a command list and surface per-command rejections.
    fn post_commands(&self, commands: &[Command]) -> Result<CommandResponse> {
        let payload = serde_json::to_string(commands)?;
        let response = self.post(SYNC_URL, &[("commands", &payload)]);
        let body: CommandResponse = read_json(response)?;

        let rejected = rejections(&body);
        if !rejected.is_empty() {
            return Err(Error::Commit(rejected.join("; ")));
        }
        Ok(body)
    }

    /// Full detail for one task, or `None` when it no longer exists.
    fn item_detail(&self, task_id: &str) -> Result<Option<Task>> {
        let response = self.post(ITEM_GET_URL, &[("item_id", task_id)]);
        match response {
            Ok(body) => {
                let detail: ItemGetResponse = body
                    .into_json()
                    .map_err(|err| Error::Network(err.to_string()))?;
                Ok(Some(detail.item))
            }
            Err(ureq::Error::Status(404, _)) => Ok(None),
            Err(err) => Err(classify(err)),
        }
    }
}

impl TaskService for TodoistClient {
    fn list_labels(&mut self) -> Result<Vec<LabelRef>> {
        Ok(self.labels.clone())
    }

    fn list_projects(&mut self) -> Result<Vec<ProjectRef>> {
        Ok(self.projects.clone())
    }

    fn completed_tasks_since(&mut self, since: DateTime<Utc>) -> Result<Vec<Task>> {
        let since_param = since.format("%Y-%m-%dT%H:%M:%S").to_string();
        let response = self.post(COMPLETED_URL, &[("since", &since_param)]);
        let body: CompletedResponse = read_json(response)?;

        let mut tasks = Vec::new();
        for entry in body.items {
            // The since parameter is only a coarse server-side cut; the
            // exclusive bound is enforced here.
            if entry.completed_at <= since {
                continue;
            }
            match self.item_detail(&entry.task_id)? {
                Some(task) => tasks.push(task),
                None => warn!(
                    task_id = %entry.task_id,
                    content = %entry.content,
                    "completed task no longer exists, skipping"
                ),
            }
        }
        Ok(tasks)
    }

    fn open_tasks_matching(&mut self, matches: &dyn Fn(&Task) -> bool) -> Result<Vec<Task>> {
        Ok(self
            .items
            .iter()
            .filter(|task| matches(task))
            .cloned()
            .collect())
    }

    fn create_task(&mut self, draft: &TaskDraft) -> Result<String> {
        let temp_id = Uuid::new_v4().to_string();
        let mut args = json!({
            "content": draft.content,
            "project_id": draft.project_id,
            "labels": draft.labels,
            "priority": draft.priority.raw(),
        });
        if let Some(section_id) = &draft.section_id {
            args["section_id"] = json!(section_id);
        }

        let command = Command::new("item_add", args).with_temp_id(temp_id.clone());
        let body = self.post_commands(std::slice::from_ref(&command))?;

        Ok(body
            .temp_id_mapping
            .get(&temp_id)
            .cloned()
            .unwrap_or(temp_id))
    }

    fn update_task(&mut self, task_id: &str, patch: TaskPatch) -> Result<()> {
        if patch.is_empty() {
            return Ok(());
        }

        let mut update_args = json!({ "id": task_id });
        if let Some(labels) = &patch.labels {
            update_args["labels"] = json!(labels);
        }
        if let Some(priority) = patch.priority {
            update_args["priority"] = json!(priority.raw());
        }
        if update_args.as_object().map_or(0, |args| args.len()) > 1 {
            self.queue.push(Command::new("item_update", update_args));
        }

        if let Some(project_id) = &patch.project_id {
            self.queue.push(Command::new(
                "item_move",
                json!({ "id": task_id, "project_id": project_id }),
            ));
        }
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        if self.queue.is_empty() {
            return Ok(());
        }

        let commands = std::mem::take(&mut self.queue);
        debug!(commands = commands.len(), "committing queued updates");
        self.post_commands(&commands)?;
        Ok(())
    }
}

/// One Sync API command.
#[derive(Debug, serde::Serialize)]
struct Command {
    #[serde(rename = "type")]
    kind: &'static str,
    uuid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    temp_id: Option<String>,
    args: serde_json::Value,
}

impl Command {
    fn new(kind: &'static str, args: serde_json::Value) -> Self {
        Self {
            kind,
            uuid: Uuid::new_v4().to_string(),
            temp_id: None,
            args,
        }
    }

    fn with_temp_id(mut self, temp_id: String) -> Self {
        self.temp_id = Some(temp_id);
        self
    }
}

#[derive(Debug, Deserialize)]
struct SyncResponse {
    #[serde(default)]
    labels: Vec<WireLabel>,
    #[serde(default)]
    projects: Vec<WireProject>,
    #[serde(default)]
    items: Vec<Task>,
}

#[derive(Debug, Deserialize)]
struct WireLabel {
    id: String,
    name: String,
}

impl WireLabel {
    fn into_ref(self) -> LabelRef {
        LabelRef::new(self.id, self.name)
    }
}

#[derive(Debug, Deserialize)]
struct WireProject {
    id: String,
    name: String,
}

impl WireProject {
    fn into_ref(self) -> ProjectRef {
        ProjectRef::new(self.id, self.name)
    }
}

#[derive(Debug, Deserialize)]
struct CompletedResponse {
    #[serde(default)]
    items: Vec<CompletedEntry>,
}

#[derive(Debug, Deserialize)]
struct CompletedEntry {
    task_id: String,
    completed_at: DateTime<Utc>,
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct ItemGetResponse {
    item: Task,
}

#[derive(Debug, Deserialize)]
struct CommandResponse {
    #[serde(default)]
    sync_status: HashMap<String, serde_json::Value>,
    #[serde(default)]
    temp_id_mapping: HashMap<String, String>,
}

/// Human-readable messages for every rejected command in a response.
fn rejections(body: &CommandResponse) -> Vec<String> {
    let mut rejected = Vec::new();
    for (uuid, status) in &body.sync_status {
        if status.as_str() == Some("ok") {
            continue;
        }
        let message = status
            .get("error")
            .and_then(|value| value.as_str())
            .unwrap_or("unknown error");
        rejected.push(format!("{uuid}: {message}"));
    }
    rejected.sort();
    rejected
}

fn read_json<T: serde::de::DeserializeOwned>(
    response: std::result::Result<ureq::Response, ureq::Error>,
) -> Result<T> {
    match response {
        Ok(body) => body
            .into_json()
            .map_err(|err| Error::Network(format!("malformed response: {err}"))),
        Err(err) => Err(classify(err)),
    }
}

fn classify(err: ureq::Error) -> Error {
    match err {
        ureq::Error::Status(401 | 403, _) => {
            Error::Auth("Todoist rejected the API token".to_string())
        }
        ureq::Error::Status(code, _) => Error::Network(format!("Todoist returned HTTP {code}")),
        ureq::Error::Transport(transport) => Error::Network(transport.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::priority::Priority;

    #[test]
    fn item_add_command_serializes_expected_shape() {
        let draft = TaskDraft {
            content: "Water plants".to_string(),
            project_id: "p1".to_string(),
            section_id: Some("s1".to_string()),
            labels: vec!["l-home".to_string()],
            priority: Priority::from_urgency(3),
        };

        let mut args = json!({
            "content": draft.content,
            "project_id": draft.project_id,
            "labels": draft.labels,
            "priority": draft.priority.raw(),
        });
        args["section_id"] = json!(draft.section_id.as_deref().expect("section"));
        let command = Command::new("item_add", args).with_temp_id("tmp-1".to_string());

        let value = serde_json::to_value(&command).expect("serialize");
        assert_eq!(value["type"], "item_add");
        assert_eq!(value["temp_id"], "tmp-1");
        assert_eq!(value["args"]["content"], "Water plants");
        assert_eq!(value["args"]["section_id"], "s1");
        assert_eq!(value["args"]["priority"], 2);
        assert!(value["uuid"].as_str().is_some());
    }

    #[test]
    fn update_command_omits_temp_id() {
        let command = Command::new("item_update", json!({ "id": "1", "priority": 2 }));
        let value = serde_json::to_value(&command).expect("serialize");
        assert!(value.get("temp_id").is_none());
    }

    #[test]
    fn command_rejections_are_collected() {
        let body: CommandResponse = serde_json::from_str(
            r#"{
                "sync_status": {
                    "u1": "ok",
                    "u2": {"error": "Item not found", "error_code": 20}
                }
            }"#,
        )
        .expect("deserialize");

        assert_eq!(rejections(&body), vec!["u2: Item not found".to_string()]);
    }

    #[test]
    fn all_ok_statuses_yield_no_rejections() {
        let body: CommandResponse = serde_json::from_str(
            r#"{"sync_status": {"u1": "ok", "u2": "ok"}, "temp_id_mapping": {"tmp-1": "801"}}"#,
        )
        .expect("deserialize");

        assert!(rejections(&body).is_empty());
        assert_eq!(body.temp_id_mapping.get("tmp-1").map(String::as_str), Some("801"));
    }
}
