//! recur - Recurring-task automation for Todoist
//!
//! This library backs the `recur` CLI. Each run performs two independent
//! passes against the Todoist API:
//!
//! - **Recreation**: tasks completed since the last run are recreated for
//!   rules with `recreate_on_complete`, optionally dropping a label and
//!   overriding priority. A durable last-run timestamp bounds the window.
//! - **Update**: open tasks matching a rule's filter get its actions applied
//!   whenever a time trigger fires, idempotently, batched into one commit.
//!
//! # Module Organization
//!
//! - `cli`: command-line interface using clap and the top-level run flow
//! - `config`: configuration loading from `recur.toml`
//! - `error`: error types and result alias
//! - `rules`: resolved rule-set domain types
//! - `resolve`: name-to-id resolution of the config
//! - `matcher`: filter matching predicates
//! - `trigger`: calendar-day trigger evaluation
//! - `apply`: idempotent effect application
//! - `priority`: the Todoist priority-inversion adapter
//! - `task`: local mirror of a remote task
//! - `service`: the task-service collaborator boundary
//! - `todoist`: blocking Todoist Sync API client
//! - `state`: durable last-run state
//! - `session`: per-run session object shared by both passes
//! - `recreate` / `update`: the two engines

pub mod apply;
pub mod cli;
pub mod config;
pub mod error;
pub mod matcher;
pub mod priority;
pub mod recreate;
pub mod resolve;
pub mod rules;
pub mod service;
pub mod session;
pub mod state;
pub mod task;
pub mod todoist;
pub mod trigger;
pub mod update;

pub use error::{Error, Result};
