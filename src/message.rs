//! Intents dispatched by toolbar controls.
//!
//! The resolvers never mutate state. A click (or shortcut) yields an [`Intent`],
//! and the owning session decides what to do with it, in the Elm architecture style.

use serde::{Deserialize, Serialize};

use crate::model::{ActiveControl, ShapeType};

/// Everything a toolbar control can ask the session to do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    /// Open the annotation menu dropdown
    OpenMenu,
    /// Save current annotations
    SaveAnnotation,
    /// Revert the last recorded action
    Undo,
    /// Reapply the last reverted action
    Redo,
    /// Finish the current multi-step draw operation
    FinishDraw,
    /// Flip the "pause algorithm" lock
    ToggleToolsBlocker,
    /// Start a draw session with the given shape and parameters
    BeginDrawing {
        shape: ShapeType,
        params: DrawShapeParams,
    },
    /// Stop the draw session of this shape's control
    DisableDrawing { shape: ShapeType },
    /// Switch to another workspace control without drawing
    SelectControl { control: ActiveControl },
}

impl Intent {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Intent::OpenMenu => "open-menu",
            Intent::SaveAnnotation => "save",
            Intent::Undo => "undo",
            Intent::Redo => "redo",
            Intent::FinishDraw => "finish-draw",
            Intent::ToggleToolsBlocker => "toggle-tools-blocker",
            Intent::BeginDrawing { .. } => "begin-drawing",
            Intent::DisableDrawing { .. } => "disable-drawing",
            Intent::SelectControl { .. } => "select-control",
        }
    }
}

/// How a new object is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectType {
    /// Annotation on a single frame
    #[default]
    Shape,
    /// Annotation interpolated across frames
    Track,
}

/// Rectangle drawing methods offered by the popover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RectDrawingMethod {
    /// Two opposite corners
    #[default]
    Classic,
    /// Four extreme points
    ExtremePoints,
}

/// Parameters picked in the draw configuration popover.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DrawShapeParams {
    /// Label to assign to the new object
    pub label_id: Option<u32>,
    #[serde(default)]
    pub object_type: ObjectType,
    /// Only meaningful for rectangles
    #[serde(default)]
    pub rect_drawing_method: RectDrawingMethod,
    /// Fixed number of points for polygon-like shapes; `None` draws until finished
    #[serde(default)]
    pub number_of_points: Option<u32>,
    /// Show a crosshair while drawing
    #[serde(default)]
    pub crosshair: bool,
}

impl DrawShapeParams {
    /// Builder-style label setter.
    pub fn with_label(mut self, label_id: u32) -> Self {
        self.label_id = Some(label_id);
        self
    }

    /// Builder-style point count setter.
    pub fn with_points(mut self, number_of_points: u32) -> Self {
        self.number_of_points = Some(number_of_points);
        self
    }
}

/// Options passed to the canvas `draw` call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DrawOptions {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape_type: Option<ShapeType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rect_drawing_method: Option<RectDrawingMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_points: Option<u32>,
    #[serde(default)]
    pub crosshair: bool,
}

impl DrawOptions {
    /// Options that end the current draw session.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Options that start drawing `shape` with the popover parameters.
    ///
    /// Parameters that do not apply to the shape are dropped, and a point count
    /// below the shape minimum is raised to it.
    pub fn begin(shape: ShapeType, params: &DrawShapeParams) -> Self {
        let rect_drawing_method =
            (shape == ShapeType::Rectangle).then_some(params.rect_drawing_method);
        let number_of_points = match (shape.min_points(), params.number_of_points) {
            (Some(min), Some(count)) => Some(count.max(min)),
            _ => None,
        };

        Self {
            enabled: true,
            shape_type: Some(shape),
            rect_drawing_method,
            number_of_points,
            crosshair: params.crosshair,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_options_for_rectangle() {
        let params = DrawShapeParams {
            rect_drawing_method: RectDrawingMethod::ExtremePoints,
            number_of_points: Some(7),
            crosshair: true,
            ..Default::default()
        };
        let options = DrawOptions::begin(ShapeType::Rectangle, &params);
        assert!(options.enabled);
        assert_eq!(options.shape_type, Some(ShapeType::Rectangle));
        assert_eq!(
            options.rect_drawing_method,
            Some(RectDrawingMethod::ExtremePoints)
        );
        assert_eq!(options.number_of_points, None);
        assert!(options.crosshair);
    }

    #[test]
    fn test_point_count_is_clamped_to_shape_minimum() {
        let params = DrawShapeParams::default().with_points(1);
        let options = DrawOptions::begin(ShapeType::Polygon, &params);
        assert_eq!(options.number_of_points, Some(3));
        assert_eq!(options.rect_drawing_method, None);

        let unbounded = DrawOptions::begin(ShapeType::Polyline, &DrawShapeParams::default());
        assert_eq!(unbounded.number_of_points, None);
    }

    #[test]
    fn test_intent_json_shape() {
        let intent = Intent::DisableDrawing {
            shape: ShapeType::Rectangle,
        };
        let json = serde_json::to_value(&intent).unwrap();
        assert_eq!(json["type"], "disable_drawing");
        assert_eq!(json["shape"], "rectangle");
    }
}
