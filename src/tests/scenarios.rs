//! End-to-end flows through a session.

use crate::action_group::ToolbarLabels;
use crate::config::ToolbarConfig;
use crate::draw_control::CanvasId;
use crate::history::HistoryEntry;
use crate::message::{DrawShapeParams, Intent};
use crate::model::{ActiveControl, SavingState, ShapeType};
use crate::phase::ToolbarPhase;
use crate::session::{CanvasCall, RecordingCanvas, ToolbarSession};
use crate::toolbar::{ToolbarSnapshot, ToolbarView};

fn saving_with(statuses: &[&str]) -> ToolbarSnapshot {
    let mut snapshot = ToolbarSnapshot::default();
    snapshot.actions.saving = SavingState {
        saving: true,
        status_history: statuses.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    };
    snapshot
}

#[test]
fn test_save_modal_with_two_statuses() {
    let view = ToolbarView::resolve(
        &saving_with(&["uploaded", "validated"]),
        &ToolbarLabels::default(),
    );
    let modal = view.actions.save_modal.unwrap();
    assert_eq!(modal.completed, vec!["uploaded".to_string()]);
    assert_eq!(modal.pending, "validated");
}

#[test]
fn test_save_modal_without_statuses() {
    let view = ToolbarView::resolve(&saving_with(&[]), &ToolbarLabels::default());
    let modal = view.actions.save_modal.unwrap();
    assert!(modal.completed.is_empty());
    assert_eq!(modal.pending, "Pending..");
}

#[test]
fn test_not_saving_has_no_modal() {
    let view = ToolbarView::resolve(&ToolbarSnapshot::default(), &ToolbarLabels::default());
    assert!(view.actions.save_modal.is_none());
    assert!(view.actions.save.clickable);
    assert_eq!(view.actions.save.click(), Some(Intent::SaveAnnotation));
}

#[test]
fn test_annotation_session_walkthrough() {
    let mut config = ToolbarConfig::default();
    config.labels.done = "Finish".to_string();

    let mut session = ToolbarSession::with_config(RecordingCanvas::default(), &config);
    session.set_canvas_ready(CanvasId(1), true);

    // Draw a rectangle through the side-bar popover.
    let view = session.render();
    let rectangle = &view.draw_controls[0];
    assert_eq!(rectangle.shape, ShapeType::Rectangle);
    let begin = rectangle
        .confirm_popover(DrawShapeParams::default().with_label(1))
        .unwrap();
    session.dispatch(begin).unwrap();
    assert!(session.render().draw_controls[0].is_active());

    session.canvas_draw_stopped();
    session.record_action(HistoryEntry::new("Created rectangle").on_frame(0));

    // Switch to OpenCV, pause the algorithm, finish.
    session
        .dispatch(Intent::SelectControl {
            control: ActiveControl::OpencvTools,
        })
        .unwrap();
    session.set_tools_blocker_visible(true);
    let view = session.render();
    assert_eq!(view.actions.finish_draw.as_ref().unwrap().label, "Finish");
    let toggle = view.actions.tools_blocker.unwrap().click().unwrap();
    session.dispatch(toggle).unwrap();
    assert!(session.tools_blocker().algorithms_locked);
    session.dispatch(Intent::FinishDraw).unwrap();

    // Save and watch the modal.
    session.dispatch(Intent::SaveAnnotation).unwrap();
    session.push_save_status("Uploading annotations");
    session.push_save_status("Validating");
    let view = session.render();
    assert!(view.draw_controls.iter().all(|c| !c.is_active()));
    assert_eq!(
        view.actions.save_modal.unwrap().completed,
        vec!["Uploading annotations".to_string()]
    );
    session.finish_save(Ok(())).unwrap();

    // Undo is still available after the save.
    let view = session.render();
    assert_eq!(view.actions.undo.tooltip, "Undo: Created rectangle Ctrl+Z");
    assert_eq!(session.phase(), ToolbarPhase::Idle);

    assert_eq!(
        session.canvas().calls.iter().filter(|c| matches!(c, CanvasCall::Interact(_))).count(),
        2
    );
}
