//! Records the session owns and the resolvers read.

use serde::{Deserialize, Serialize};

/// Whether the "pause algorithm" affordance is shown and whether it is engaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ToolsBlockerState {
    /// The active algorithmic tool asked for the blocker button
    #[serde(default)]
    pub button_visible: bool,
    /// Automatic algorithm runs are currently postponed
    #[serde(default)]
    pub algorithms_locked: bool,
}

impl ToolsBlockerState {
    /// Flip the lock and return the new value.
    pub fn toggle(&mut self) -> bool {
        self.algorithms_locked = !self.algorithms_locked;
        self.algorithms_locked
    }

    /// Back to the hidden, unlocked state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Per-control drawing flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DrawingSessionFlags {
    /// This control's tool is active and the canvas is capturing input
    #[serde(default)]
    pub is_drawing: bool,
    /// The control is unusable (e.g. no frame loaded yet)
    #[serde(default)]
    pub disabled: bool,
}

impl DrawingSessionFlags {
    pub fn new(is_drawing: bool, disabled: bool) -> Self {
        Self {
            is_drawing,
            disabled,
        }
    }
}

/// Save progress plus the undo/redo action names shown in the header.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SavingState {
    /// A save is in flight
    #[serde(default)]
    pub saving: bool,
    /// Progress messages of the current save, oldest first
    #[serde(default)]
    pub status_history: Vec<String>,
    /// Name of the action undo would revert
    #[serde(default)]
    pub undo_action: Option<String>,
    /// Name of the action redo would reapply
    #[serde(default)]
    pub redo_action: Option<String>,
}

impl SavingState {
    /// Start a new save. Statuses from the previous save are dropped.
    pub fn begin(&mut self) {
        self.saving = true;
        self.status_history.clear();
    }

    /// Append a progress message. Ignored when no save is running.
    pub fn push_status(&mut self, status: impl Into<String>) -> bool {
        if !self.saving {
            return false;
        }
        self.status_history.push(status.into());
        true
    }

    /// Mark the save as finished, successfully or not.
    pub fn finish(&mut self) {
        self.saving = false;
    }

    /// Undo action name, treating an empty string as absent.
    pub fn undo(&self) -> Option<&str> {
        non_empty(self.undo_action.as_deref())
    }

    /// Redo action name, treating an empty string as absent.
    pub fn redo(&self) -> Option<&str> {
        non_empty(self.redo_action.as_deref())
    }

    /// Statuses that already completed (all but the newest).
    pub fn completed_statuses(&self) -> &[String] {
        match self.status_history.split_last() {
            Some((_, done)) => done,
            None => &[],
        }
    }

    /// The newest status, i.e. the step still running.
    pub fn pending_status(&self) -> Option<&str> {
        self.status_history.last().map(String::as_str)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
