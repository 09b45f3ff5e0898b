//! Configuration loading and validation
//!
//! Handles parsing of `recur.toml` configuration files. The parsed form
//! keeps label and project references as display names; `crate::resolve`
//! turns it into an id-keyed [`crate::rules::RuleSet`] without mutating the
//! config, so the raw form stays inspectable for diagnostics.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

const MAX_PRIORITY_RAISE: i64 = 3;
const MAX_URGENCY: i64 = 4;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Where the last-run timestamp lives; defaults to the platform data dir
    #[serde(default)]
    pub state_file: Option<PathBuf>,

    /// Task-type rules, evaluated in declared order
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

/// One task-type rule as written in the config file
#[derive(Debug, Clone, Deserialize)]
pub struct RuleConfig {
    /// Optional display name used in log lines
    #[serde(default)]
    pub name: Option<String>,

    /// Which tasks the rule applies to (an empty table matches every task)
    pub filter: FilterConfig,

    /// Recreate tasks matching this rule after they are completed
    #[serde(default)]
    pub recreate_on_complete: bool,

    /// Label to strip from the recreated copy
    #[serde(default)]
    pub skip_label_on_recreate: Option<String>,

    /// Urgency (1..=4, 4 = most urgent) for the recreated copy instead of
    /// the completed task's own priority
    #[serde(default)]
    pub priority_on_recreate: Option<i64>,

    /// Trigger/effect pairs applied to open tasks, in declared order
    #[serde(default)]
    pub actions: Vec<ActionConfig>,
}

impl RuleConfig {
    /// Display name for log lines and error messages.
    pub fn display_name(&self, index: usize) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("rule {}", index + 1),
        }
    }
}

/// Filter clauses; absent clauses are unconstrained
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterConfig {
    /// The task must carry all of these labels
    #[serde(default)]
    pub labels: Option<Vec<String>>,

    /// The task must belong to exactly this project
    #[serde(default)]
    pub project: Option<String>,
}

/// One trigger/effect pair
#[derive(Debug, Clone, Deserialize)]
pub struct ActionConfig {
    pub trigger: TriggerConfig,
    pub effect: EffectConfig,
}

/// Trigger clauses; any satisfied clause fires the action
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct TriggerConfig {
    #[serde(default)]
    pub days_since_creation: Option<i64>,

    #[serde(default)]
    pub days_until_due: Option<i64>,
}

/// The mutation to apply when the trigger fires
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectConfig {
    /// `effect = { add_label = "stale" }`
    AddLabel(String),
    /// `effect = { increase_priority = 2 }`
    IncreasePriority(i64),
    /// `effect = { move_to_project = "Backlog" }`
    MoveToProject(String),
}

impl Config {
    /// Load configuration from a `recur.toml` file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.rules.is_empty() {
            return Err(Error::InvalidConfig(
                "config defines no rules; nothing to do".to_string(),
            ));
        }
        for (index, rule) in self.rules.iter().enumerate() {
            rule.validate(&rule.display_name(index))?;
        }
        Ok(())
    }
}

impl RuleConfig {
    fn validate(&self, name: &str) -> Result<()> {
        if let Some(explicit) = &self.name {
            if explicit.trim().is_empty() {
                return Err(Error::InvalidConfig(
                    "rule name cannot be empty".to_string(),
                ));
            }
        }

        self.filter.validate(name)?;

        // Recreate fields are ignored, not rejected, when recreation is off.
        if self.recreate_on_complete {
            if let Some(label) = &self.skip_label_on_recreate {
                validate_reference(label, name, "skip_label_on_recreate")?;
            }
            if let Some(urgency) = self.priority_on_recreate {
                if !(1..=MAX_URGENCY).contains(&urgency) {
                    return Err(Error::InvalidConfig(format!(
                        "{name}: priority_on_recreate must be in 1..={MAX_URGENCY}, got {urgency}"
                    )));
                }
            }
        }

        for action in &self.actions {
            action.validate(name)?;
        }
        Ok(())
    }
}

impl FilterConfig {
    fn validate(&self, rule: &str) -> Result<()> {
        if let Some(labels) = &self.labels {
            let mut seen = std::collections::HashSet::new();
            for label in labels {
                validate_reference(label, rule, "filter.labels")?;
                if !seen.insert(label.as_str()) {
                    return Err(Error::InvalidConfig(format!(
                        "{rule}: filter.labels has duplicate entry '{label}'"
                    )));
                }
            }
        }
        if let Some(project) = &self.project {
            validate_reference(project, rule, "filter.project")?;
        }
        Ok(())
    }
}

impl ActionConfig {
    fn validate(&self, rule: &str) -> Result<()> {
        self.trigger.validate(rule)?;
        match &self.effect {
            EffectConfig::AddLabel(label) => validate_reference(label, rule, "add_label")?,
            EffectConfig::IncreasePriority(levels) => {
                if !(1..=MAX_PRIORITY_RAISE).contains(levels) {
                    return Err(Error::InvalidConfig(format!(
                        "{rule}: increase_priority must be in 1..={MAX_PRIORITY_RAISE}, got {levels}"
                    )));
                }
            }
            EffectConfig::MoveToProject(project) => {
                validate_reference(project, rule, "move_to_project")?;
            }
        }
        Ok(())
    }
}

impl TriggerConfig {
    fn validate(&self, rule: &str) -> Result<()> {
        if self.days_since_creation.is_none() && self.days_until_due.is_none() {
            return Err(Error::InvalidConfig(format!(
                "{rule}: trigger needs days_since_creation or days_until_due"
            )));
        }
        for (field, value) in [
            ("days_since_creation", self.days_since_creation),
            ("days_until_due", self.days_until_due),
        ] {
            if let Some(days) = value {
                if days < 0 {
                    return Err(Error::InvalidConfig(format!(
                        "{rule}: {field} cannot be negative, got {days}"
                    )));
                }
            }
        }
        Ok(())
    }
}

fn validate_reference(value: &str, rule: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidConfig(format!(
            "{rule}: {field} cannot be empty"
        )));
    }
    Ok(())
}
