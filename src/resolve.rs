//! Name resolution.
//!
//! A one-time, pure transform from the name-keyed config to an id-keyed
//! [`RuleSet`]. The config is left untouched; both engines only ever see the
//! resolved form. An unresolvable name is fatal: a rule that cannot be fully
//! resolved must not run with partial semantics.

use crate::config::{Config, EffectConfig, RuleConfig};
use crate::error::{Error, Result};
use crate::priority::Priority;
use crate::rules::{Effect, Filter, LabelRef, ProjectRef, Recreate, Rule, RuleAction, RuleSet, Trigger};

/// Resolve every label and project name in the config against the
/// collaborator's catalogs.
pub fn resolve(config: &Config, labels: &[LabelRef], projects: &[ProjectRef]) -> Result<RuleSet> {
    let rules = config
        .rules
        .iter()
        .enumerate()
        .map(|(index, rule)| resolve_rule(rule, index, labels, projects))
        .collect::<Result<Vec<_>>>()?;
    Ok(RuleSet { rules })
}

fn resolve_rule(
    rule: &RuleConfig,
    index: usize,
    labels: &[LabelRef],
    projects: &[ProjectRef],
) -> Result<Rule> {
    let filter = Filter {
        labels: rule
            .filter
            .labels
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|name| lookup_label(name, labels))
            .collect::<Result<Vec<_>>>()?,
        project: rule
            .filter
            .project
            .as_deref()
            .map(|name| lookup_project(name, projects))
            .transpose()?,
    };

    let recreate = if rule.recreate_on_complete {
        Some(Recreate {
            skip_label: rule
                .skip_label_on_recreate
                .as_deref()
                .map(|name| lookup_label(name, labels))
                .transpose()?,
            priority: rule
                .priority_on_recreate
                .map(|urgency| Priority::from_urgency(urgency as u8)),
        })
    } else {
        None
    };

    let actions = rule
        .actions
        .iter()
        .map(|action| {
            let effect = match &action.effect {
                EffectConfig::AddLabel(name) => Effect::AddLabel(lookup_label(name, labels)?),
                EffectConfig::IncreasePriority(levels) => Effect::IncreasePriority(*levels as u8),
                EffectConfig::MoveToProject(name) => {
                    Effect::MoveToProject(lookup_project(name, projects)?)
                }
            };
            Ok(RuleAction {
                trigger: Trigger {
                    days_since_creation: action.trigger.days_since_creation,
                    days_until_due: action.trigger.days_until_due,
                },
                effect,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Rule {
        name: rule.display_name(index),
        filter,
        recreate,
        actions,
    })
}

fn lookup_label(name: &str, labels: &[LabelRef]) -> Result<LabelRef> {
    labels
        .iter()
        .find(|label| label.name == name)
        .cloned()
        .ok_or_else(|| Error::UnknownLabel(name.to_string()))
}

fn lookup_project(name: &str, projects: &[ProjectRef]) -> Result<ProjectRef> {
    projects
        .iter()
        .find(|project| project.name == name)
        .cloned()
        .ok_or_else(|| Error::UnknownProject(name.to_string()))
}
