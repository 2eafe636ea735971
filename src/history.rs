//! Undo/redo history of annotation actions.
//!
//! The toolbar only needs the *names* of the actions that undo and redo would
//! apply; the annotation engine that actually reverts them lives elsewhere.
//! `ActionHistory` keeps both stacks so the session can feed those names to the
//! header.

use serde::{Deserialize, Serialize};

/// A recorded annotation action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Human-readable action name shown in the undo/redo tooltips
    pub name: String,
    /// Frame the action happened on
    #[serde(default)]
    pub frame: Option<u32>,
}

impl HistoryEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            frame: None,
        }
    }

    /// Builder-style frame setter.
    pub fn on_frame(mut self, frame: u32) -> Self {
        self.frame = Some(frame);
        self
    }
}

/// Configuration for the history stacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum number of actions to keep for undo
    pub max_history: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { max_history: 100 }
    }
}

/// The undo/redo history stacks.
///
/// Recording a new action clears the redo stack. Undo moves the newest action
/// to the redo stack and redo moves it back.
#[derive(Debug, Clone, Default)]
pub struct ActionHistory {
    undo_stack: Vec<HistoryEntry>,
    redo_stack: Vec<HistoryEntry>,
    config: HistoryConfig,
}

impl ActionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom configuration
    pub fn with_config(config: HistoryConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Record a freshly performed action.
    pub fn record(&mut self, entry: HistoryEntry) {
        log::debug!("History: recorded '{}'", entry.name);
        self.undo_stack.push(entry);
        self.redo_stack.clear();

        // Limit history size
        while self.undo_stack.len() > self.config.max_history {
            self.undo_stack.remove(0);
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Move the newest action to the redo stack and return it.
    pub fn undo(&mut self) -> Option<&HistoryEntry> {
        let entry = self.undo_stack.pop()?;
        log::debug!("History: undo '{}'", entry.name);
        self.redo_stack.push(entry);
        self.redo_stack.last()
    }

    /// Move the newest undone action back and return it.
    pub fn redo(&mut self) -> Option<&HistoryEntry> {
        let entry = self.redo_stack.pop()?;
        log::debug!("History: redo '{}'", entry.name);
        self.undo_stack.push(entry);
        self.undo_stack.last()
    }

    /// Name of the action undo would revert.
    pub fn undo_action(&self) -> Option<String> {
        self.undo_stack.last().map(|e| e.name.clone())
    }

    /// Name of the action redo would reapply.
    pub fn redo_action(&self) -> Option<String> {
        self.redo_stack.last().map(|e| e.name.clone())
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        log::debug!("History cleared");
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }
}
