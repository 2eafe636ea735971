//! Whole-toolbar resolution: one snapshot in, one view model out.
//!
//! This is what the rendering layer (native CLI, browser) calls when it does
//! not keep a [`crate::session::ToolbarSession`] of its own.

use serde::{Deserialize, Serialize};

use crate::action_group::{ActionGroupProps, ActionGroupView, ToolbarLabels};
use crate::draw_control::{DrawControlProps, DrawControlView};

/// Everything the toolbar needs to know about the session at one moment.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ToolbarSnapshot {
    #[serde(default)]
    pub actions: ActionGroupProps,
    #[serde(default)]
    pub draw_controls: Vec<DrawControlProps>,
}

/// Resolved view of the header and the side-bar draw controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolbarView {
    pub actions: ActionGroupView,
    pub draw_controls: Vec<DrawControlView>,
}

impl ToolbarView {
    pub fn resolve(snapshot: &ToolbarSnapshot, labels: &ToolbarLabels) -> Self {
        Self {
            actions: ActionGroupView::resolve(&snapshot.actions, labels),
            draw_controls: snapshot
                .draw_controls
                .iter()
                .map(DrawControlView::resolve)
                .collect(),
        }
    }
}

/// Parse a JSON snapshot and return the resolved view as pretty JSON.
pub fn resolve_json(snapshot_json: &str, labels: &ToolbarLabels) -> crate::Result<String> {
    let snapshot: ToolbarSnapshot = serde_json::from_str(snapshot_json)?;
    let view = ToolbarView::resolve(&snapshot, labels);
    Ok(serde_json::to_string_pretty(&view)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ActiveControl;

    #[test]
    fn test_resolve_json_roundtrip_of_scenario() {
        let input = r#"{
            "actions": {
                "saving": { "saving": true, "status_history": ["uploaded", "validated"] },
                "active_control": "draw_polygon"
            },
            "draw_controls": [
                { "shape": "rectangle", "is_drawing": false, "disabled": true }
            ]
        }"#;

        let output = resolve_json(input, &ToolbarLabels::default()).unwrap();
        let view: ToolbarView = serde_json::from_str(&output).unwrap();

        let modal = view.actions.save_modal.unwrap();
        assert_eq!(modal.completed, vec!["uploaded".to_string()]);
        assert_eq!(modal.pending, "validated");
        assert!(view.actions.finish_draw.is_some());
        assert!(!view.draw_controls[0].clickable);
    }

    #[test]
    fn test_empty_snapshot_is_idle() {
        let view = ToolbarView::resolve(&ToolbarSnapshot::default(), &ToolbarLabels::default());
        assert!(view.actions.save_modal.is_none());
        assert!(view.actions.save.clickable);
        assert!(view.draw_controls.is_empty());
        assert_eq!(
            ToolbarSnapshot::default().actions.active_control,
            ActiveControl::Cursor
        );
    }

    #[test]
    fn test_malformed_snapshot_is_an_error() {
        let err = resolve_json("{ not json", &ToolbarLabels::default()).unwrap_err();
        assert!(matches!(err, crate::ToolbarError::Json(_)));
    }
}
