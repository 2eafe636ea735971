//! Data models for the annotation toolbar.

mod control;
mod session;

pub use control::{
    ActiveControl, MIN_POINTS_POINTS, MIN_POLYGON_POINTS, MIN_POLYLINE_POINTS, ShapeType,
};
pub use session::{DrawingSessionFlags, SavingState, ToolsBlockerState};
