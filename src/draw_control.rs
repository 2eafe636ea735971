//! Side-bar button that toggles draw mode for one shape tool.
//!
//! The button is a stateless function of its props: it is disabled, active
//! (clicking stops drawing), or inactive (clicking opens the configuration
//! popover whose confirmation starts drawing).

use serde::{Deserialize, Serialize};

use crate::message::{DrawShapeParams, Intent};
use crate::model::{DrawingSessionFlags, ShapeType};

/// Style class added while the control's tool is drawing.
pub const ACTIVE_CLASS: &str = "cvat-active-canvas-control";

/// Style class added while the control is unusable.
pub const DISABLED_CLASS: &str = "cvat-disabled-canvas-control";

/// Opaque identity of the canvas instance the control drives.
///
/// A new canvas (e.g. after reopening a job) has a new id, which forces the
/// memoized view to be rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CanvasId(pub u64);

/// Props of a draw control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DrawControlProps {
    #[serde(default)]
    pub shape: ShapeType,
    #[serde(default)]
    pub canvas: CanvasId,
    #[serde(flatten)]
    pub flags: DrawingSessionFlags,
}

/// Visual state of a draw control, each variant carrying only what its render needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ControlVisualState {
    /// Unusable; no handler, no popover
    Disabled,
    /// Drawing; clicking stops the session, popover hidden
    Active { on_activate: Intent },
    /// Idle; clicking opens the popover for `shape`
    Inactive { popover: ShapeType },
}

/// What the rendering layer needs to show one draw control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawControlView {
    pub shape: ShapeType,
    pub visual: ControlVisualState,
    /// The control reacts to pointer input at all
    pub clickable: bool,
    /// The configuration popover may be opened
    pub popover_enabled: bool,
    /// Space-separated style classes
    pub class_name: String,
}

impl DrawControlView {
    /// Resolve the view from props.
    pub fn resolve(props: &DrawControlProps) -> Self {
        let shape = props.shape;
        let base_class = format!("cvat-draw-{}-control", shape.id());

        let (visual, class_name) = if props.flags.disabled {
            (
                ControlVisualState::Disabled,
                format!("{} {}", base_class, DISABLED_CLASS),
            )
        } else if props.flags.is_drawing {
            (
                ControlVisualState::Active {
                    on_activate: Intent::DisableDrawing { shape },
                },
                format!("{} {}", base_class, ACTIVE_CLASS),
            )
        } else {
            (ControlVisualState::Inactive { popover: shape }, base_class)
        };

        Self {
            shape,
            clickable: !matches!(visual, ControlVisualState::Disabled),
            popover_enabled: matches!(visual, ControlVisualState::Inactive { .. }),
            visual,
            class_name,
        }
    }

    /// Intent dispatched by a click on the icon itself.
    ///
    /// Only an active control dispatches on click; an inactive one opens its
    /// popover instead, and a disabled one ignores the click.
    pub fn click(&self) -> Option<Intent> {
        match &self.visual {
            ControlVisualState::Active { on_activate } => Some(on_activate.clone()),
            ControlVisualState::Disabled | ControlVisualState::Inactive { .. } => None,
        }
    }

    /// Intent dispatched when the popover is confirmed with `params`.
    pub fn confirm_popover(&self, params: DrawShapeParams) -> Option<Intent> {
        match &self.visual {
            ControlVisualState::Inactive { popover } => Some(Intent::BeginDrawing {
                shape: *popover,
                params,
            }),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.visual, ControlVisualState::Active { .. })
    }
}

/// Memoized draw control: the view is rebuilt only when the props change.
#[derive(Debug, Clone, Default)]
pub struct DrawControlCache {
    last: Option<(DrawControlProps, DrawControlView)>,
    /// Statistics for debugging
    hits: u64,
    misses: u64,
}

impl DrawControlCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the view for `props`, recomputing it only if they differ from the last call.
    pub fn view(&mut self, props: &DrawControlProps) -> &DrawControlView {
        let fresh = match &self.last {
            Some((cached, _)) => cached != props,
            None => true,
        };

        if fresh {
            self.misses += 1;
            log::trace!("Draw control {:?}: rebuilding view", props.shape);
        } else {
            self.hits += 1;
        }

        let (_, view) = match self.last.take() {
            Some(entry) if !fresh => self.last.insert(entry),
            _ => self.last.insert((*props, DrawControlView::resolve(props))),
        };
        view
    }

    /// Cache statistics (hits, misses).
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::RectDrawingMethod;

    fn props(is_drawing: bool, disabled: bool) -> DrawControlProps {
        DrawControlProps {
            shape: ShapeType::Rectangle,
            canvas: CanvasId(1),
            flags: DrawingSessionFlags::new(is_drawing, disabled),
        }
    }

    #[test]
    fn test_disabled_wins_over_drawing() {
        for is_drawing in [false, true] {
            let view = DrawControlView::resolve(&props(is_drawing, true));
            assert_eq!(view.visual, ControlVisualState::Disabled);
            assert!(!view.clickable);
            assert!(!view.popover_enabled);
            assert_eq!(view.click(), None);
            assert_eq!(view.confirm_popover(DrawShapeParams::default()), None);
            assert_eq!(
                view.class_name,
                "cvat-draw-rectangle-control cvat-disabled-canvas-control"
            );
        }
    }

    #[test]
    fn test_active_click_disables_drawing_once() {
        let view = DrawControlView::resolve(&props(true, false));
        assert!(view.is_active());
        assert!(view.clickable);
        assert!(!view.popover_enabled);
        assert_eq!(
            view.click(),
            Some(Intent::DisableDrawing {
                shape: ShapeType::Rectangle
            })
        );
        assert_eq!(view.confirm_popover(DrawShapeParams::default()), None);
        assert_eq!(
            view.class_name,
            "cvat-draw-rectangle-control cvat-active-canvas-control"
        );
    }

    #[test]
    fn test_inactive_popover_begins_drawing() {
        let view = DrawControlView::resolve(&props(false, false));
        assert!(view.clickable);
        assert!(view.popover_enabled);
        assert_eq!(view.click(), None);
        assert_eq!(view.class_name, "cvat-draw-rectangle-control");

        let params = DrawShapeParams {
            rect_drawing_method: RectDrawingMethod::ExtremePoints,
            ..Default::default()
        }
        .with_label(4);
        assert_eq!(
            view.confirm_popover(params.clone()),
            Some(Intent::BeginDrawing {
                shape: ShapeType::Rectangle,
                params,
            })
        );
    }

    #[test]
    fn test_cache_recomputes_only_on_prop_change() {
        let mut cache = DrawControlCache::new();
        let idle = props(false, false);

        assert!(!cache.view(&idle).is_active());
        assert!(!cache.view(&idle).is_active());
        assert_eq!(cache.stats(), (1, 1));

        assert!(cache.view(&props(true, false)).is_active());
        assert_eq!(cache.stats(), (1, 2));

        let new_canvas = DrawControlProps {
            canvas: CanvasId(2),
            ..props(true, false)
        };
        cache.view(&new_canvas);
        assert_eq!(cache.stats(), (1, 3));
    }

    #[test]
    fn test_props_json_is_flat() {
        let props: DrawControlProps =
            serde_json::from_str(r#"{"shape":"polygon","is_drawing":true,"disabled":false}"#)
                .unwrap();
        assert_eq!(props.shape, ShapeType::Polygon);
        assert!(props.flags.is_drawing);
        assert_eq!(props.canvas, CanvasId(0));

        let bare: DrawControlProps = serde_json::from_str(r#"{"shape":"rectangle"}"#).unwrap();
        assert_eq!(bare.flags, DrawingSessionFlags::default());
        assert_eq!(DrawControlView::resolve(&bare).click(), None);
    }
}
