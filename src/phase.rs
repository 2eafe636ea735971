//! Phase machine for the header control group.
//!
//! ```text
//!           SaveRequested              DrawStarted(simple)
//!   Saving <------------- Idle ---------------------------> DrawingActive
//!          --------------> ^  <---------------------------
//!   SaveCompleted/Failed   |          DrawStopped
//!                          |
//!                          +--- DrawStarted(multi-step) <-> DrawingToolsActive
//! ```
//!
//! Saving never leads straight into a drawing phase; the machine has to pass
//! through `Idle` first.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolbarError};
use crate::model::ActiveControl;

/// Coarse state of the header controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolbarPhase {
    #[default]
    Idle,
    /// A simple shape is being drawn
    DrawingActive,
    /// A multi-point, AI, or OpenCV session is running; "Done" is shown
    DrawingToolsActive,
    /// A save is in flight and the progress modal is up
    Saving,
}

/// Events that move the phase machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "control", rename_all = "snake_case")]
pub enum PhaseEvent {
    SaveRequested,
    SaveCompleted,
    SaveFailed,
    DrawStarted(ActiveControl),
    DrawStopped,
}

impl ToolbarPhase {
    /// Compute the next phase, or reject the event.
    pub fn next(self, event: PhaseEvent) -> Result<Self> {
        use PhaseEvent::*;
        use ToolbarPhase::*;

        let next = match (self, event) {
            (Idle, SaveRequested) => Saving,
            (Saving, SaveCompleted | SaveFailed) => Idle,
            (Idle, DrawStarted(control)) if control.is_multi_step() => DrawingToolsActive,
            (Idle, DrawStarted(control)) if control.is_drawing_control() => DrawingActive,
            (DrawingActive | DrawingToolsActive, DrawStopped) => Idle,
            // A draw stop after the session already ended is harmless.
            (Idle, DrawStopped) => Idle,
            (from, event) => return Err(ToolbarError::invalid_transition(from, event)),
        };
        Ok(next)
    }

    /// Whether the phase belongs to an ongoing draw session.
    pub fn is_drawing(&self) -> bool {
        matches!(
            self,
            ToolbarPhase::DrawingActive | ToolbarPhase::DrawingToolsActive
        )
    }
}

/// Phase machine that keeps its current state and logs every move.
#[derive(Debug, Clone, Default)]
pub struct PhaseMachine {
    phase: ToolbarPhase,
}

impl PhaseMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> ToolbarPhase {
        self.phase
    }

    /// Apply an event. On rejection the phase is left unchanged.
    pub fn apply(&mut self, event: PhaseEvent) -> Result<ToolbarPhase> {
        match self.phase.next(event) {
            Ok(next) => {
                if next != self.phase {
                    log::debug!("Toolbar phase: {:?} -> {:?}", self.phase, next);
                }
                self.phase = next;
                Ok(next)
            }
            Err(e) => {
                log::warn!("{}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_cycle() {
        let mut machine = PhaseMachine::new();
        assert_eq!(
            machine.apply(PhaseEvent::SaveRequested).unwrap(),
            ToolbarPhase::Saving
        );
        assert_eq!(
            machine.apply(PhaseEvent::SaveFailed).unwrap(),
            ToolbarPhase::Idle
        );
        machine.apply(PhaseEvent::SaveRequested).unwrap();
        assert_eq!(
            machine.apply(PhaseEvent::SaveCompleted).unwrap(),
            ToolbarPhase::Idle
        );
    }

    #[test]
    fn test_simple_and_multi_step_drawing() {
        assert_eq!(
            ToolbarPhase::Idle
                .next(PhaseEvent::DrawStarted(ActiveControl::DrawRectangle))
                .unwrap(),
            ToolbarPhase::DrawingActive
        );
        assert_eq!(
            ToolbarPhase::Idle
                .next(PhaseEvent::DrawStarted(ActiveControl::DrawPolygon))
                .unwrap(),
            ToolbarPhase::DrawingToolsActive
        );
        assert_eq!(
            ToolbarPhase::Idle
                .next(PhaseEvent::DrawStarted(ActiveControl::OpencvTools))
                .unwrap(),
            ToolbarPhase::DrawingToolsActive
        );
        assert_eq!(
            ToolbarPhase::DrawingToolsActive
                .next(PhaseEvent::DrawStopped)
                .unwrap(),
            ToolbarPhase::Idle
        );
    }

    #[test]
    fn test_saving_cannot_enter_drawing() {
        let mut machine = PhaseMachine::new();
        machine.apply(PhaseEvent::SaveRequested).unwrap();

        let err = machine
            .apply(PhaseEvent::DrawStarted(ActiveControl::DrawRectangle))
            .unwrap_err();
        assert!(matches!(
            err,
            ToolbarError::InvalidTransition {
                from: ToolbarPhase::Saving,
                ..
            }
        ));
        assert_eq!(machine.phase(), ToolbarPhase::Saving);
    }

    #[test]
    fn test_rejected_pairs() {
        assert!(
            ToolbarPhase::Idle
                .next(PhaseEvent::DrawStarted(ActiveControl::Cursor))
                .is_err()
        );
        assert!(ToolbarPhase::DrawingActive.next(PhaseEvent::SaveRequested).is_err());
        assert!(ToolbarPhase::Idle.next(PhaseEvent::SaveCompleted).is_err());
        assert_eq!(
            ToolbarPhase::Idle.next(PhaseEvent::DrawStopped).unwrap(),
            ToolbarPhase::Idle
        );
    }
}
