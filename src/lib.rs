//! Annotation toolbar state
//!
//! Decides, from a handful of session flags, which toolbar controls of an
//! annotation workspace are shown, which are enabled, how they look, and which
//! intent a click dispatches. Rendering, canvas geometry, and persistence stay
//! with the embedding application.

pub mod action_group;
pub mod config;
pub mod draw_control;
pub mod error;
pub mod history;
pub mod keybindings;
pub mod message;
pub mod model;
pub mod phase;
pub mod session;
pub mod toolbar;

#[cfg(test)]
mod tests;

pub use action_group::{
    ActionGroupProps, ActionGroupView, ButtonView, SaveProgressModal, ToolbarLabels,
};
pub use config::ToolbarConfig;
pub use draw_control::{ControlVisualState, DrawControlProps, DrawControlView};
pub use error::{Result, ToolbarError};
pub use message::Intent;
pub use model::{ActiveControl, DrawingSessionFlags, SavingState, ShapeType, ToolsBlockerState};
pub use session::{CanvasEngine, ToolbarSession};
pub use toolbar::{ToolbarSnapshot, ToolbarView};

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
