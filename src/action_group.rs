//! Header action group: menu, save, undo, redo, done, and the tools blocker,
//! plus the modal that tracks save progress.

use serde::{Deserialize, Serialize};

use crate::keybindings::ShortcutLabels;
use crate::message::Intent;
use crate::model::{ActiveControl, SavingState, ToolsBlockerState};

/// Style class of an enabled header button.
pub const HEADER_BUTTON_CLASS: &str = "cvat-annotation-header-button";

/// Style class of the save button while a save is in flight.
pub const DISABLED_HEADER_BUTTON_CLASS: &str = "cvat-annotation-disabled-header-button";

/// Style class added to a pressed toggle button.
pub const PRESSED_CLASS: &str = "cvat-button-active";

/// Opacity of undo/redo when there is nothing to undo/redo.
pub const UNAVAILABLE_OPACITY: f32 = 0.5;

/// Visible texts of the header, overridable for localization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolbarLabels {
    pub menu: String,
    pub save: String,
    pub saving: String,
    pub undo: String,
    pub redo: String,
    pub done: String,
    pub tools_blocker: String,
    pub save_modal_title: String,
    /// Shown as the running step before the first status arrives
    pub pending_placeholder: String,
}

impl Default for ToolbarLabels {
    fn default() -> Self {
        Self {
            menu: "Menu".to_string(),
            save: "Save".to_string(),
            saving: "Saving...".to_string(),
            undo: "Undo".to_string(),
            redo: "Redo".to_string(),
            done: "Done".to_string(),
            tools_blocker: "Pause algorithm".to_string(),
            save_modal_title: "Saving changes on the server".to_string(),
            pending_placeholder: "Pending..".to_string(),
        }
    }
}

/// Inputs of the action group.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActionGroupProps {
    #[serde(default)]
    pub saving: SavingState,
    #[serde(default)]
    pub tools_blocker: ToolsBlockerState,
    #[serde(default)]
    pub active_control: ActiveControl,
    #[serde(default)]
    pub shortcuts: ShortcutLabels,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonStyle {
    Normal,
    /// Greyed out, ignores the pointer
    Disabled,
    /// Toggle button in its engaged state
    Pressed,
}

/// One header button as the rendering layer should draw it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonView {
    pub label: String,
    pub tooltip: String,
    pub style: ButtonStyle,
    pub class_name: String,
    pub opacity: f32,
    /// Whether the button receives pointer events
    pub pointer_events: bool,
    /// Whether a click does anything
    pub clickable: bool,
    /// Intent dispatched on click, present iff `clickable`
    pub on_activate: Option<Intent>,
}

impl ButtonView {
    fn new(label: &str, tooltip: String) -> Self {
        Self {
            label: label.to_string(),
            tooltip,
            style: ButtonStyle::Normal,
            class_name: HEADER_BUTTON_CLASS.to_string(),
            opacity: 1.0,
            pointer_events: true,
            clickable: false,
            on_activate: None,
        }
    }

    fn on_click(mut self, intent: Option<Intent>) -> Self {
        self.clickable = intent.is_some();
        self.on_activate = intent;
        self
    }

    /// Intent dispatched by a click, if the button is clickable.
    pub fn click(&self) -> Option<Intent> {
        if self.clickable {
            self.on_activate.clone()
        } else {
            None
        }
    }
}

/// Modal timeline shown while a save is in flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveProgressModal {
    pub title: String,
    /// Finished steps, oldest first
    pub completed: Vec<String>,
    /// The step still running
    pub pending: String,
    /// Always false: the user cannot dismiss the modal
    pub closable: bool,
}

/// Resolved header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionGroupView {
    pub menu: ButtonView,
    pub save: ButtonView,
    pub undo: ButtonView,
    pub redo: ButtonView,
    /// Present only for multi-step drawing and algorithmic tools
    pub finish_draw: Option<ButtonView>,
    /// Present only when an algorithmic tool asked for it
    pub tools_blocker: Option<ButtonView>,
    /// Present only while saving
    pub save_modal: Option<SaveProgressModal>,
}

impl ActionGroupView {
    /// Resolve the header from its props.
    pub fn resolve(props: &ActionGroupProps, labels: &ToolbarLabels) -> Self {
        let saving = &props.saving;
        let shortcuts = &props.shortcuts;
        let active = props.active_control;

        let menu =
            ButtonView::new(&labels.menu, labels.menu.clone()).on_click(Some(Intent::OpenMenu));

        Self {
            menu,
            save: save_button(saving.saving, shortcuts, labels),
            undo: history_button(
                &labels.undo,
                saving.undo(),
                &shortcuts.undo,
                Intent::Undo,
            ),
            redo: history_button(
                &labels.redo,
                saving.redo(),
                &shortcuts.redo,
                Intent::Redo,
            ),
            finish_draw: active.includes_done_button().then(|| {
                ButtonView::new(
                    &labels.done,
                    format!("Press \"{}\" to finish", shortcuts.draw),
                )
                .on_click(Some(Intent::FinishDraw))
            }),
            tools_blocker: tools_blocker_button(active, &props.tools_blocker, shortcuts, labels),
            save_modal: saving.saving.then(|| SaveProgressModal {
                title: labels.save_modal_title.clone(),
                completed: saving.completed_statuses().to_vec(),
                pending: saving
                    .pending_status()
                    .unwrap_or(labels.pending_placeholder.as_str())
                    .to_string(),
                closable: false,
            }),
        }
    }
}

fn save_button(saving: bool, shortcuts: &ShortcutLabels, labels: &ToolbarLabels) -> ButtonView {
    let tooltip = format!("Save current changes {}", shortcuts.save);
    if saving {
        let mut button = ButtonView::new(&labels.saving, tooltip).on_click(None);
        button.style = ButtonStyle::Disabled;
        button.class_name = DISABLED_HEADER_BUTTON_CLASS.to_string();
        button
    } else {
        ButtonView::new(&labels.save, tooltip).on_click(Some(Intent::SaveAnnotation))
    }
}

fn history_button(label: &str, action: Option<&str>, shortcut: &str, intent: Intent) -> ButtonView {
    let tooltip = format!("{}: {} {}", label, action.unwrap_or_default(), shortcut);
    let mut button = ButtonView::new(label, tooltip).on_click(action.map(|_| intent));
    if action.is_none() {
        button.style = ButtonStyle::Disabled;
        button.opacity = UNAVAILABLE_OPACITY;
        button.pointer_events = false;
    }
    button
}

fn tools_blocker_button(
    active: ActiveControl,
    blocker: &ToolsBlockerState,
    shortcuts: &ShortcutLabels,
    labels: &ToolbarLabels,
) -> Option<ButtonView> {
    if !(active.is_algorithmic() && blocker.button_visible) {
        return None;
    }

    let tooltip = format!(
        "Press \"{}\" to postpone running the algorithm",
        shortcuts.switch_tools_blocker
    );
    // AI tools show the lock state but cannot change it.
    let intent = active
        .accepts_blocker_toggle()
        .then_some(Intent::ToggleToolsBlocker);
    let mut button = ButtonView::new(&labels.tools_blocker, tooltip).on_click(intent);
    if blocker.algorithms_locked {
        button.style = ButtonStyle::Pressed;
        button.class_name = format!("{} {}", HEADER_BUTTON_CLASS, PRESSED_CLASS);
    }
    Some(button)
}

/// Memoized action group: the view is rebuilt only when props or labels change.
#[derive(Debug, Clone, Default)]
pub struct ActionGroupCache {
    last: Option<(ActionGroupProps, ToolbarLabels, ActionGroupView)>,
}

impl ActionGroupCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&mut self, props: &ActionGroupProps, labels: &ToolbarLabels) -> &ActionGroupView {
        let fresh = match &self.last {
            Some((p, l, _)) => p != props || l != labels,
            None => true,
        };

        let (_, _, view) = match self.last.take() {
            Some(entry) if !fresh => self.last.insert(entry),
            _ => {
                log::trace!("Action group: rebuilding view");
                let view = ActionGroupView::resolve(props, labels);
                self.last.insert((props.clone(), labels.clone(), view))
            }
        };
        view
    }
}
