//! Keyboard shortcuts for the header actions.
//!
//! Shortcuts are shown in tooltips and used to dispatch the same intents the
//! buttons do. They can be customized through the configuration file.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ToolbarError;
use crate::message::Intent;
use crate::model::ActiveControl;

/// A key combination such as `Ctrl+Shift+Z`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shortcut {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    /// Key name without modifiers, e.g. `S`, `Tab`, `F2`
    pub key: String,
}

impl Shortcut {
    /// A bare key with no modifiers.
    pub fn key(key: impl Into<String>) -> Self {
        Self {
            ctrl: false,
            shift: false,
            alt: false,
            key: key.into(),
        }
    }

    /// `Ctrl` + key.
    pub fn ctrl(key: impl Into<String>) -> Self {
        Self {
            ctrl: true,
            ..Self::key(key)
        }
    }

    /// Builder-style `Shift` modifier.
    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            write!(f, "Ctrl+")?;
        }
        if self.shift {
            write!(f, "Shift+")?;
        }
        if self.alt {
            write!(f, "Alt+")?;
        }
        write!(f, "{}", self.key)
    }
}

impl FromStr for Shortcut {
    type Err = ToolbarError;

    /// Parse `Ctrl+Shift+Z` style strings. Modifiers are case-insensitive and
    /// single-letter keys are upper-cased.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts: Vec<&str> = s.split('+').map(str::trim).collect();
        let key = match parts.pop() {
            Some(key) if !key.is_empty() => key,
            _ => return Err(ToolbarError::invalid_shortcut(s)),
        };

        let mut shortcut = Shortcut::key(if key.chars().count() == 1 {
            key.to_uppercase()
        } else {
            key.to_string()
        });

        for modifier in parts {
            match modifier.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => shortcut.ctrl = true,
                "shift" => shortcut.shift = true,
                "alt" => shortcut.alt = true,
                _ => return Err(ToolbarError::invalid_shortcut(s)),
            }
        }

        Ok(shortcut)
    }
}

impl Serialize for Shortcut {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Shortcut {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Shortcut bindings for the header actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub save: Shortcut,
    pub undo: Shortcut,
    pub redo: Shortcut,
    /// Starts a new shape with the last used tool, or finishes the current one
    pub draw: Shortcut,
    pub switch_tools_blocker: Shortcut,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            save: Shortcut::ctrl("S"),
            undo: Shortcut::ctrl("Z"),
            redo: Shortcut::ctrl("Z").with_shift(),
            draw: Shortcut::key("N"),
            switch_tools_blocker: Shortcut::key("Tab"),
        }
    }
}

impl KeyBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the intent a key press maps to, given the active control.
    ///
    /// Shortcuts only map to intents whose button would be usable, so the
    /// draw key finishes a session only where "Done" is shown and the blocker
    /// key only works for tools that accept the toggle.
    pub fn intent_for(&self, pressed: &Shortcut, active: ActiveControl) -> Option<Intent> {
        if *pressed == self.save {
            Some(Intent::SaveAnnotation)
        } else if *pressed == self.undo {
            Some(Intent::Undo)
        } else if *pressed == self.redo {
            Some(Intent::Redo)
        } else if *pressed == self.draw && active.includes_done_button() {
            Some(Intent::FinishDraw)
        } else if *pressed == self.switch_tools_blocker && active.accepts_blocker_toggle() {
            Some(Intent::ToggleToolsBlocker)
        } else {
            None
        }
    }

    /// Display strings for tooltips.
    pub fn labels(&self) -> ShortcutLabels {
        ShortcutLabels {
            save: self.save.to_string(),
            undo: self.undo.to_string(),
            redo: self.redo.to_string(),
            draw: self.draw.to_string(),
            switch_tools_blocker: self.switch_tools_blocker.to_string(),
        }
    }

    fn bound(&self) -> [(&Shortcut, &'static str); 5] {
        [
            (&self.save, "Save"),
            (&self.undo, "Undo"),
            (&self.redo, "Redo"),
            (&self.draw, "Draw"),
            (&self.switch_tools_blocker, "Switch tools blocker"),
        ]
    }

    /// Check if a shortcut is already bound.
    /// Returns the name of the action it is bound to, if any.
    pub fn conflict(&self, shortcut: &Shortcut) -> Option<&'static str> {
        self.bound()
            .into_iter()
            .find(|(bound, _)| *bound == shortcut)
            .map(|(_, name)| name)
    }

    /// Reject bindings where one shortcut would trigger two actions.
    pub fn validate(&self) -> Result<(), ToolbarError> {
        let bound = self.bound();
        for (i, (shortcut, action)) in bound.iter().enumerate() {
            if let Some((_, other)) = bound[i + 1..].iter().find(|(b, _)| b == shortcut) {
                return Err(ToolbarError::ShortcutConflict {
                    shortcut: shortcut.to_string(),
                    first: *action,
                    second: *other,
                });
            }
        }
        Ok(())
    }
}

/// Shortcut display strings handed to the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutLabels {
    pub save: String,
    pub undo: String,
    pub redo: String,
    pub draw: String,
    pub switch_tools_blocker: String,
}

impl Default for ShortcutLabels {
    fn default() -> Self {
        KeyBindings::default().labels()
    }
}
