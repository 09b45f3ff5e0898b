//! Resolved rule-set domain types.
//!
//! A [`RuleSet`] is the name-resolved form of the configuration: every label
//! and project reference carries the remote id next to the display name. It
//! is produced once at startup by [`crate::resolve`] and read-only for the
//! rest of the run.

use std::fmt;

use crate::priority::Priority;

/// A label, resolved to its remote id. The display name is kept for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRef {
    pub id: String,
    pub name: String,
}

impl LabelRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A project, resolved to its remote id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRef {
    pub id: String,
    pub name: String,
}

impl ProjectRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Which tasks a rule applies to. Clauses AND together; an empty filter
/// matches every task.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    /// The task must carry all of these labels.
    pub labels: Vec<LabelRef>,
    /// The task must belong to exactly this project.
    pub project: Option<ProjectRef>,
}

/// A time-based condition. Clauses OR together: any satisfied clause fires.
#[derive(Debug, Clone, Copy, Default)]
pub struct Trigger {
    /// Fires once the task is at least this many days old.
    pub days_since_creation: Option<i64>,
    /// Fires within this many days of the due date. Never fires for tasks
    /// without one.
    pub days_until_due: Option<i64>,
}

/// The mutation an action applies once its trigger fires.
#[derive(Debug, Clone)]
pub enum Effect {
    AddLabel(LabelRef),
    IncreasePriority(u8),
    MoveToProject(ProjectRef),
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::AddLabel(label) => write!(f, "add label '{}'", label.name),
            Effect::IncreasePriority(levels) => write!(f, "raise priority by {levels}"),
            Effect::MoveToProject(project) => write!(f, "move to project '{}'", project.name),
        }
    }
}

/// One trigger paired with one effect.
#[derive(Debug, Clone)]
pub struct RuleAction {
    pub trigger: Trigger,
    pub effect: Effect,
}

/// Recreate-on-complete policy for a rule. Present iff the rule opted in.
#[derive(Debug, Clone)]
pub struct Recreate {
    /// Dropped from the copy's labels when present on the completed task.
    pub skip_label: Option<LabelRef>,
    /// Overrides the completed task's own priority on the copy.
    pub priority: Option<Priority>,
}

/// A resolved task-type rule.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Display name for log lines.
    pub name: String,
    pub filter: Filter,
    pub recreate: Option<Recreate>,
    pub actions: Vec<RuleAction>,
}

/// The resolved configuration: rules in declared order.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    pub rules: Vec<Rule>,
}
