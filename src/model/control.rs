//! Workspace controls and the drawable shape types behind them.

use serde::{Deserialize, Serialize};

/// Minimum number of points for a polygon shape.
pub const MIN_POLYGON_POINTS: u32 = 3;

/// Minimum number of points for a polyline shape.
pub const MIN_POLYLINE_POINTS: u32 = 2;

/// Minimum number of points for a points shape.
pub const MIN_POINTS_POINTS: u32 = 1;

/// The control currently selected in the annotation workspace.
///
/// Exactly one control is active at a time; [`ActiveControl::Cursor`] is the
/// resting state when no tool is in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActiveControl {
    /// Plain selection cursor
    #[default]
    Cursor,
    /// Panning the canvas
    DragCanvas,
    /// Zooming to a region
    ZoomCanvas,
    /// Drawing a rectangle
    DrawRectangle,
    /// Drawing a polygon
    DrawPolygon,
    /// Drawing a polyline
    DrawPolyline,
    /// Drawing a set of points
    DrawPoints,
    /// Drawing an ellipse
    DrawEllipse,
    /// Drawing a cuboid
    DrawCuboid,
    /// Drawing a skeleton
    DrawSkeleton,
    /// Merging tracks
    Merge,
    /// Grouping objects
    Group,
    /// Splitting a track
    Split,
    /// Editing a shape
    Edit,
    /// Opening an issue on a region
    OpenIssue,
    /// Interactive AI tools (detectors, interactors, trackers)
    AiTools,
    /// Photo context viewer
    PhotoContext,
    /// OpenCV-based tools (intelligent scissors and friends)
    OpencvTools,
}

impl ActiveControl {
    /// Controls that expose the "Done" button in the header.
    pub const FINISHABLE: [ActiveControl; 5] = [
        ActiveControl::DrawPolygon,
        ActiveControl::DrawPolyline,
        ActiveControl::DrawPoints,
        ActiveControl::AiTools,
        ActiveControl::OpencvTools,
    ];

    /// Controls that run an automatic algorithm which may be paused.
    pub const ALGORITHMIC: [ActiveControl; 2] =
        [ActiveControl::OpencvTools, ActiveControl::AiTools];

    /// Get the display name for this control.
    pub fn name(&self) -> &'static str {
        match self {
            ActiveControl::Cursor => "Cursor",
            ActiveControl::DragCanvas => "Move the image",
            ActiveControl::ZoomCanvas => "Zoom to region",
            ActiveControl::DrawRectangle => "Draw rectangle",
            ActiveControl::DrawPolygon => "Draw polygon",
            ActiveControl::DrawPolyline => "Draw polyline",
            ActiveControl::DrawPoints => "Draw points",
            ActiveControl::DrawEllipse => "Draw ellipse",
            ActiveControl::DrawCuboid => "Draw cuboid",
            ActiveControl::DrawSkeleton => "Draw skeleton",
            ActiveControl::Merge => "Merge tracks",
            ActiveControl::Group => "Group shapes",
            ActiveControl::Split => "Split track",
            ActiveControl::Edit => "Edit shape",
            ActiveControl::OpenIssue => "Open an issue",
            ActiveControl::AiTools => "AI tools",
            ActiveControl::PhotoContext => "Photo context",
            ActiveControl::OpencvTools => "OpenCV tools",
        }
    }

    /// Whether the header shows a "Done" button for this control.
    pub fn includes_done_button(&self) -> bool {
        Self::FINISHABLE.contains(self)
    }

    /// Whether this control runs an algorithm that the tools blocker can pause.
    pub fn is_algorithmic(&self) -> bool {
        Self::ALGORITHMIC.contains(self)
    }

    /// Whether the tools blocker button is interactive for this control.
    ///
    /// Only OpenCV tools accept the toggle; AI tools show the button read-only.
    pub fn accepts_blocker_toggle(&self) -> bool {
        matches!(self, ActiveControl::OpencvTools)
    }

    /// The shape this control draws, if it is a shape-drawing control.
    pub fn shape_type(&self) -> Option<ShapeType> {
        match self {
            ActiveControl::DrawRectangle => Some(ShapeType::Rectangle),
            ActiveControl::DrawPolygon => Some(ShapeType::Polygon),
            ActiveControl::DrawPolyline => Some(ShapeType::Polyline),
            ActiveControl::DrawPoints => Some(ShapeType::Points),
            ActiveControl::DrawEllipse => Some(ShapeType::Ellipse),
            ActiveControl::DrawCuboid => Some(ShapeType::Cuboid),
            ActiveControl::DrawSkeleton => Some(ShapeType::Skeleton),
            _ => None,
        }
    }

    /// Whether a draw session with this control is a multi-step one
    /// (polygon-like shapes and the algorithmic tools).
    pub fn is_multi_step(&self) -> bool {
        self.includes_done_button()
    }

    /// Whether this control starts a draw session on the canvas.
    pub fn is_drawing_control(&self) -> bool {
        self.shape_type().is_some() || self.is_algorithmic()
    }
}

/// Shape types the canvas can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShapeType {
    #[default]
    Rectangle,
    Polygon,
    Polyline,
    Points,
    Ellipse,
    Cuboid,
    Skeleton,
}

impl ShapeType {
    /// Get all drawable shape types, in side-bar order.
    pub fn all() -> &'static [ShapeType] {
        &[
            ShapeType::Rectangle,
            ShapeType::Polygon,
            ShapeType::Polyline,
            ShapeType::Points,
            ShapeType::Ellipse,
            ShapeType::Cuboid,
            ShapeType::Skeleton,
        ]
    }

    /// Lowercase identifier used in style classes and serialized data.
    pub fn id(&self) -> &'static str {
        match self {
            ShapeType::Rectangle => "rectangle",
            ShapeType::Polygon => "polygon",
            ShapeType::Polyline => "polyline",
            ShapeType::Points => "points",
            ShapeType::Ellipse => "ellipse",
            ShapeType::Cuboid => "cuboid",
            ShapeType::Skeleton => "skeleton",
        }
    }

    /// The workspace control that draws this shape.
    pub fn control(&self) -> ActiveControl {
        match self {
            ShapeType::Rectangle => ActiveControl::DrawRectangle,
            ShapeType::Polygon => ActiveControl::DrawPolygon,
            ShapeType::Polyline => ActiveControl::DrawPolyline,
            ShapeType::Points => ActiveControl::DrawPoints,
            ShapeType::Ellipse => ActiveControl::DrawEllipse,
            ShapeType::Cuboid => ActiveControl::DrawCuboid,
            ShapeType::Skeleton => ActiveControl::DrawSkeleton,
        }
    }

    /// Minimum number of points accepted for a fixed-count draw session.
    /// `None` means the shape has a fixed geometry and takes no point count.
    pub fn min_points(&self) -> Option<u32> {
        match self {
            ShapeType::Polygon => Some(MIN_POLYGON_POINTS),
            ShapeType::Polyline => Some(MIN_POLYLINE_POINTS),
            ShapeType::Points => Some(MIN_POINTS_POINTS),
            _ => None,
        }
    }
}
