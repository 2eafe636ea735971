//! Error types for the toolbar session and its configuration.
//!
//! The resolvers themselves never fail: contradictory inputs hide the affected
//! control instead. These errors come from the layers around them.

use thiserror::Error;

use crate::phase::{PhaseEvent, ToolbarPhase};

/// Errors that can occur in the toolbar session, configuration, or CLI.
#[derive(Error, Debug)]
pub enum ToolbarError {
    /// The phase machine has no edge for this event in this state
    #[error("Invalid transition: {event:?} while {from:?}")]
    InvalidTransition {
        /// State the machine was in
        from: ToolbarPhase,
        /// Event that was rejected
        event: PhaseEvent,
    },

    /// An intent arrived while a save is in flight and the save modal blocks it
    #[error("'{intent}' is not available while saving")]
    BlockedBySave {
        /// Short name of the rejected intent
        intent: &'static str,
    },

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// Unparseable shortcut string
    #[error("Invalid shortcut: '{0}'")]
    InvalidShortcut(String),

    /// Two actions are bound to the same shortcut
    #[error("Shortcut {shortcut} is bound to both {first} and {second}")]
    ShortcutConflict {
        shortcut: String,
        first: &'static str,
        second: &'static str,
    },

    /// I/O error when reading/writing files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ToolbarError {
    /// Create an invalid transition error.
    pub fn invalid_transition(from: ToolbarPhase, event: PhaseEvent) -> Self {
        Self::InvalidTransition { from, event }
    }

    /// Create an invalid shortcut error.
    pub fn invalid_shortcut(shortcut: impl Into<String>) -> Self {
        Self::InvalidShortcut(shortcut.into())
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ToolbarError>;
