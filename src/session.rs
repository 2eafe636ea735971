//! Toolbar session: the controller that owns toolbar state.
//!
//! The session receives intents from the controls (and shortcuts), drives the
//! canvas, and reacts to asynchronous notifications such as save progress. It
//! is the only place the session records are mutated; the resolvers only read
//! them through [`ToolbarSession::snapshot`].

use std::collections::HashMap;

use crate::action_group::{ActionGroupCache, ActionGroupProps, ToolbarLabels};
use crate::config::ToolbarConfig;
use crate::draw_control::{CanvasId, DrawControlCache, DrawControlProps};
use crate::error::{Result, ToolbarError};
use crate::history::{ActionHistory, HistoryEntry};
use crate::keybindings::{KeyBindings, Shortcut};
use crate::message::{DrawOptions, DrawShapeParams, Intent};
use crate::model::{
    ActiveControl, DrawingSessionFlags, SavingState, ShapeType, ToolsBlockerState,
};
use crate::phase::{PhaseEvent, PhaseMachine, ToolbarPhase};
use crate::toolbar::{ToolbarSnapshot, ToolbarView};

/// The canvas drawing engine, as far as the toolbar is concerned.
pub trait CanvasEngine {
    /// Begin or end a shape draw session.
    fn draw(&mut self, options: DrawOptions);

    /// Begin or end an interactive (AI/OpenCV) session.
    fn interact(&mut self, enabled: bool);
}

/// A call made on a [`RecordingCanvas`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanvasCall {
    Draw(DrawOptions),
    Interact(bool),
}

/// Canvas that only records what it was asked to do.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    pub calls: Vec<CanvasCall>,
}

impl CanvasEngine for RecordingCanvas {
    fn draw(&mut self, options: DrawOptions) {
        self.calls.push(CanvasCall::Draw(options));
    }

    fn interact(&mut self, enabled: bool) {
        self.calls.push(CanvasCall::Interact(enabled));
    }
}

/// Controller owning the toolbar records.
pub struct ToolbarSession<C: CanvasEngine> {
    canvas: C,
    canvas_id: CanvasId,
    /// A frame is loaded and the draw controls are usable
    canvas_ready: bool,
    active_control: ActiveControl,
    saving: SavingState,
    tools_blocker: ToolsBlockerState,
    phase: PhaseMachine,
    history: ActionHistory,
    keybindings: KeyBindings,
    labels: ToolbarLabels,
    /// Parameters of the most recent draw session, reused by the draw shortcut
    last_draw: Option<(ShapeType, DrawShapeParams)>,
    draw_caches: HashMap<ShapeType, DrawControlCache>,
    action_cache: ActionGroupCache,
}

impl<C: CanvasEngine> ToolbarSession<C> {
    /// Create a session with default configuration.
    pub fn new(canvas: C) -> Self {
        Self::with_config(canvas, &ToolbarConfig::default())
    }

    /// Create a session using shortcuts, labels, and history size from `config`.
    pub fn with_config(canvas: C, config: &ToolbarConfig) -> Self {
        Self {
            canvas,
            canvas_id: CanvasId::default(),
            canvas_ready: false,
            active_control: ActiveControl::Cursor,
            saving: SavingState::default(),
            tools_blocker: ToolsBlockerState::default(),
            phase: PhaseMachine::new(),
            history: ActionHistory::with_config(config.history),
            keybindings: config.keybindings.clone(),
            labels: config.labels.clone(),
            last_draw: None,
            draw_caches: HashMap::new(),
            action_cache: ActionGroupCache::new(),
        }
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn phase(&self) -> ToolbarPhase {
        self.phase.phase()
    }

    pub fn active_control(&self) -> ActiveControl {
        self.active_control
    }

    pub fn tools_blocker(&self) -> ToolsBlockerState {
        self.tools_blocker
    }

    pub fn saving_state(&self) -> &SavingState {
        &self.saving
    }

    pub fn history(&self) -> &ActionHistory {
        &self.history
    }

    /// Apply an intent from a control or shortcut.
    ///
    /// Returns `Ok(true)` if state changed and `Ok(false)` for a no-op (for
    /// instance disabling drawing that already ended).
    pub fn dispatch(&mut self, intent: Intent) -> Result<bool> {
        log::debug!("Intent: {}", intent.name());

        match intent {
            Intent::OpenMenu => Ok(false),
            Intent::SaveAnnotation => self.request_save(),
            Intent::Undo => {
                self.ensure_not_saving(&Intent::Undo)?;
                Ok(self.history.undo().is_some())
            }
            Intent::Redo => {
                self.ensure_not_saving(&Intent::Redo)?;
                Ok(self.history.redo().is_some())
            }
            Intent::FinishDraw => self.finish_draw(),
            Intent::ToggleToolsBlocker => Ok(self.toggle_tools_blocker()),
            Intent::BeginDrawing { shape, params } => self.begin_drawing(shape, params),
            Intent::DisableDrawing { shape } => self.disable_drawing(shape),
            Intent::SelectControl { control } => self.select_control(control),
        }
    }

    /// Dispatch whatever intent `pressed` is bound to.
    pub fn handle_shortcut(&mut self, pressed: &Shortcut) -> Result<bool> {
        if *pressed == self.keybindings.draw && !self.active_control.includes_done_button() {
            return self.redraw_last();
        }
        match self.keybindings.intent_for(pressed, self.active_control) {
            Some(intent) => self.dispatch(intent),
            None => Ok(false),
        }
    }

    /// A frame was loaded (or unloaded) on a new or existing canvas.
    pub fn set_canvas_ready(&mut self, canvas_id: CanvasId, ready: bool) {
        let new_canvas = canvas_id != self.canvas_id;
        if (new_canvas || !ready) && self.phase().is_drawing() {
            self.stop_drawing();
        }
        if new_canvas {
            // Actions on the previous canvas cannot be undone on this one.
            self.history.clear();
        }
        self.canvas_id = canvas_id;
        self.canvas_ready = ready;
    }

    /// The active algorithmic tool shows or hides its blocker button.
    ///
    /// Ignored unless an algorithmic tool is active.
    pub fn set_tools_blocker_visible(&mut self, visible: bool) -> bool {
        if !self.active_control.is_algorithmic() {
            log::debug!(
                "Ignoring blocker visibility request while {:?} is active",
                self.active_control
            );
            return false;
        }
        self.tools_blocker.button_visible = visible;
        true
    }

    /// The annotation engine performed an action that can be undone.
    pub fn record_action(&mut self, entry: HistoryEntry) {
        self.history.record(entry);
    }

    /// A save step finished and the next one started.
    pub fn push_save_status(&mut self, status: impl Into<String>) -> bool {
        self.saving.push_status(status)
    }

    /// The save pipeline finished.
    pub fn finish_save(&mut self, outcome: std::result::Result<(), String>) -> Result<()> {
        let event = match &outcome {
            Ok(()) => PhaseEvent::SaveCompleted,
            Err(_) => PhaseEvent::SaveFailed,
        };
        self.phase.apply(event)?;
        self.saving.finish();

        match outcome {
            Ok(()) => log::info!("Annotations saved"),
            Err(reason) => log::error!("Could not save annotations: {}", reason),
        }
        Ok(())
    }

    /// The canvas ended a draw session on its own (shape completed, Esc, ...).
    pub fn canvas_draw_stopped(&mut self) {
        if self.phase().is_drawing() {
            self.end_draw_phase();
            self.set_active(ActiveControl::Cursor);
        }
    }

    /// Inputs of the resolvers at this moment.
    pub fn snapshot(&self) -> ToolbarSnapshot {
        let mut saving = self.saving.clone();
        saving.undo_action = self.history.undo_action();
        saving.redo_action = self.history.redo_action();

        ToolbarSnapshot {
            actions: ActionGroupProps {
                saving,
                tools_blocker: self.tools_blocker,
                active_control: self.active_control,
                shortcuts: self.keybindings.labels(),
            },
            draw_controls: ShapeType::all()
                .iter()
                .map(|shape| self.draw_control_props(*shape))
                .collect(),
        }
    }

    /// Resolve the toolbar, reusing memoized views where props did not change.
    pub fn render(&mut self) -> ToolbarView {
        let snapshot = self.snapshot();
        let actions = self
            .action_cache
            .view(&snapshot.actions, &self.labels)
            .clone();
        let draw_controls = snapshot
            .draw_controls
            .iter()
            .map(|props| {
                self.draw_caches
                    .entry(props.shape)
                    .or_default()
                    .view(props)
                    .clone()
            })
            .collect();

        ToolbarView {
            actions,
            draw_controls,
        }
    }

    fn draw_control_props(&self, shape: ShapeType) -> DrawControlProps {
        let is_drawing = self.phase().is_drawing() && self.active_control == shape.control();
        DrawControlProps {
            shape,
            canvas: self.canvas_id,
            flags: DrawingSessionFlags::new(is_drawing, !self.canvas_ready),
        }
    }

    fn ensure_not_saving(&self, intent: &Intent) -> Result<()> {
        if self.saving.saving {
            log::warn!("Rejected '{}' while saving", intent.name());
            return Err(ToolbarError::BlockedBySave {
                intent: intent.name(),
            });
        }
        Ok(())
    }

    fn request_save(&mut self) -> Result<bool> {
        if self.saving.saving {
            return Ok(false);
        }
        if self.phase().is_drawing() {
            self.stop_drawing();
        }
        self.phase.apply(PhaseEvent::SaveRequested)?;
        self.saving.begin();
        log::info!("Saving annotations");
        Ok(true)
    }

    fn finish_draw(&mut self) -> Result<bool> {
        if !self.active_control.includes_done_button() || !self.phase().is_drawing() {
            return Ok(false);
        }
        self.stop_drawing();
        Ok(true)
    }

    fn toggle_tools_blocker(&mut self) -> bool {
        if !self.active_control.accepts_blocker_toggle() || !self.tools_blocker.button_visible {
            log::debug!("Tools blocker toggle ignored for {:?}", self.active_control);
            return false;
        }
        let locked = self.tools_blocker.toggle();
        log::debug!("Algorithms {}", if locked { "locked" } else { "unlocked" });
        true
    }

    fn begin_drawing(&mut self, shape: ShapeType, params: DrawShapeParams) -> Result<bool> {
        self.ensure_not_saving(&Intent::BeginDrawing {
            shape,
            params: params.clone(),
        })?;
        if !self.canvas_ready {
            log::debug!("Cannot draw {:?}: canvas not ready", shape);
            return Ok(false);
        }
        if self.phase().is_drawing() {
            self.stop_drawing();
        }

        let control = shape.control();
        self.canvas.draw(DrawOptions::begin(shape, &params));
        self.set_active(control);
        self.phase.apply(PhaseEvent::DrawStarted(control))?;
        self.last_draw = Some((shape, params));
        Ok(true)
    }

    fn disable_drawing(&mut self, shape: ShapeType) -> Result<bool> {
        if !self.phase().is_drawing() || self.active_control != shape.control() {
            return Ok(false);
        }
        self.stop_drawing();
        Ok(true)
    }

    fn select_control(&mut self, control: ActiveControl) -> Result<bool> {
        if control == self.active_control {
            return Ok(false);
        }
        if control.is_drawing_control() {
            self.ensure_not_saving(&Intent::SelectControl { control })?;
            if !self.canvas_ready {
                log::debug!("Cannot select {:?}: canvas not ready", control);
                return Ok(false);
            }
        }
        if self.phase().is_drawing() {
            self.stop_drawing();
        }

        if control.is_algorithmic() {
            self.canvas.interact(true);
            self.set_active(control);
            self.phase.apply(PhaseEvent::DrawStarted(control))?;
        } else if let Some(shape) = control.shape_type() {
            return self.begin_drawing(shape, DrawShapeParams::default());
        } else {
            self.set_active(control);
        }
        Ok(true)
    }

    fn redraw_last(&mut self) -> Result<bool> {
        match self.last_draw.clone() {
            Some((shape, params)) if !self.phase().is_drawing() => self.begin_drawing(shape, params),
            _ => Ok(false),
        }
    }

    fn stop_drawing(&mut self) {
        if self.active_control.is_algorithmic() {
            self.canvas.interact(false);
        } else {
            self.canvas.draw(DrawOptions::disabled());
        }
        self.end_draw_phase();
        self.set_active(ActiveControl::Cursor);
    }

    fn end_draw_phase(&mut self) {
        if let Err(e) = self.phase.apply(PhaseEvent::DrawStopped) {
            log::warn!("Draw session ended outside a drawing phase: {}", e);
        }
    }

    fn set_active(&mut self, control: ActiveControl) {
        if !control.is_algorithmic() && self.tools_blocker != ToolsBlockerState::default() {
            self.tools_blocker.reset();
        }
        if control != self.active_control {
            log::debug!(
                "Active control: {} -> {}",
                self.active_control.name(),
                control.name()
            );
        }
        self.active_control = control;
    }
}
