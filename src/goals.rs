//! Personal goal list
//!
//! An ordered list of short strings persisted to LocalStorage. Every mutation
//! writes the full list before it is committed in memory, so the stored copy
//! and the in-memory list never diverge.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{GOALS_STORAGE_KEY, MAX_GOAL_CHARS};
use crate::html;
use crate::persistence::{self, KeyValueStore, StorageError};

/// Goal list errors
#[derive(Debug, Error)]
pub enum GoalError {
    #[error("Please enter a goal.")]
    Empty,

    #[error("Keep the goal under 120 characters.")]
    TooLong,

    #[error("No goal at position {0}")]
    NoSuchGoal(usize),

    #[error("Could not save goals: {0}")]
    Storage(#[from] StorageError),
}

impl GoalError {
    /// Whether the error belongs next to the entry field
    pub fn is_input_error(&self) -> bool {
        matches!(self, GoalError::Empty | GoalError::TooLong)
    }
}

/// A single goal (trimmed, non-empty, at most `MAX_GOAL_CHARS` characters)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Goal(String);

impl Goal {
    /// Validate user input into a goal
    pub fn parse(input: &str) -> Result<Self, GoalError> {
        let text = input.trim();
        if text.is_empty() {
            return Err(GoalError::Empty);
        }
        if text.chars().count() > MAX_GOAL_CHARS {
            return Err(GoalError::TooLong);
        }
        Ok(Self(text.to_string()))
    }

    pub fn text(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Goal list bound to a store
#[derive(Debug)]
pub struct GoalList<S> {
    goals: Vec<Goal>,
    store: S,
}

impl<S: KeyValueStore> GoalList<S> {
    /// Placeholder row shown when the list is empty
    pub const EMPTY_PLACEHOLDER: &'static str =
        r#"<li style="opacity:.8">No goals yet — add one above.</li>"#;

    /// Question asked before clearing
    pub const CLEAR_PROMPT: &'static str = "Clear all goals?";

    /// Load the persisted list, starting empty if none is readable
    pub fn load(store: S) -> Self {
        let goals: Vec<Goal> =
            persistence::load_json(&store, GOALS_STORAGE_KEY).unwrap_or_default();
        if goals.is_empty() {
            log::info!("No saved goals, starting fresh");
        } else {
            log::info!("Loaded {} goals", goals.len());
        }
        Self { goals, store }
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Append a goal from raw input
    pub fn add(&mut self, input: &str) -> Result<&Goal, GoalError> {
        let goal = Goal::parse(input)?;
        let mut next = self.goals.clone();
        next.push(goal);
        self.commit(next)?;
        Ok(&self.goals[self.goals.len() - 1])
    }

    /// Remove the goal currently shown at `index`
    pub fn remove(&mut self, index: usize) -> Result<Goal, GoalError> {
        if index >= self.goals.len() {
            return Err(GoalError::NoSuchGoal(index));
        }
        let mut next = self.goals.clone();
        let removed = next.remove(index);
        self.commit(next)?;
        Ok(removed)
    }

    /// Empty the list if `confirm` agrees. Returns whether it was cleared.
    pub fn clear(&mut self, confirm: impl FnOnce(&str) -> bool) -> Result<bool, GoalError> {
        if !confirm(Self::CLEAR_PROMPT) {
            return Ok(false);
        }
        self.commit(Vec::new())?;
        Ok(true)
    }

    /// Persist `next`, then make it current
    fn commit(&mut self, next: Vec<Goal>) -> Result<(), GoalError> {
        if let Err(e) = persistence::save_json(&mut self.store, GOALS_STORAGE_KEY, &next) {
            log::error!("Goals not saved: {e}");
            return Err(e.into());
        }
        self.goals = next;
        log::info!("Goals saved ({} entries)", self.goals.len());
        Ok(())
    }

    /// Markup for the list container
    pub fn render(&self) -> String {
        if self.goals.is_empty() {
            return Self::EMPTY_PLACEHOLDER.to_string();
        }

        let mut out = String::new();
        for (i, goal) in self.goals.iter().enumerate() {
            out.push_str(&format!(
                concat!(
                    r#"<li><span>{}</span>"#,
                    r#"<div style="display:flex;gap:0.5rem">"#,
                    r#"<button type="button" class="btn" title="Remove goal" data-index="{}">Remove</button>"#,
                    r#"</div></li>"#,
                ),
                html::escape(goal.text()),
                i
            ));
        }
        out
    }
}
