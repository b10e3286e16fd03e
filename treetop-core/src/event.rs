//! Input events for canvas interaction.

use serde::{Deserialize, Serialize};

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    /// Primary button pressed.
    Down,
    /// Pointer moved, with or without the button held.
    Move,
    /// Primary button released.
    Up,
    /// Pointer left the drawing area.
    Leave,
}

/// A pointer (mouse or pen) event in drawing area coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Phase of this event.
    pub phase: PointerPhase,
    /// X position in pixels.
    pub x: f64,
    /// Y position in pixels.
    pub y: f64,
    /// Mouse button (0 = left, 1 = middle, 2 = right).
    #[serde(default)]
    pub button: u8,
}

impl PointerEvent {
    /// Create a left-button pointer event.
    #[must_use]
    pub fn new(phase: PointerPhase, x: f64, y: f64) -> Self {
        Self {
            phase,
            x,
            y,
            button: 0,
        }
    }

    /// Whether the primary (left) button generated this event.
    #[must_use]
    pub fn is_primary(&self) -> bool {
        self.button == 0
    }
}

/// All input events the canvas can receive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum InputEvent {
    /// Pointer (mouse) event.
    Pointer(PointerEvent),

    /// Keyboard event.
    Key {
        /// Key name, e.g. `"Escape"`, `"Backspace"`, `"Delete"` or `"z"`.
        key: String,
        /// Active modifier keys.
        #[serde(default)]
        modifiers: KeyModifiers,
    },
}

impl InputEvent {
    /// Shorthand for a left-button pointer event.
    #[must_use]
    pub fn pointer(phase: PointerPhase, x: f64, y: f64) -> Self {
        Self::Pointer(PointerEvent::new(phase, x, y))
    }

    /// Shorthand for a key press without modifiers.
    #[must_use]
    pub fn key(key: impl Into<String>) -> Self {
        Self::Key {
            key: key.into(),
            modifiers: KeyModifiers::default(),
        }
    }
}

/// Keyboard modifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct KeyModifiers {
    /// Shift key pressed.
    #[serde(default)]
    pub shift: bool,
    /// Control key pressed.
    #[serde(default)]
    pub ctrl: bool,
    /// Alt/Option key pressed.
    #[serde(default)]
    pub alt: bool,
    /// Meta/Command key pressed.
    #[serde(default)]
    pub meta: bool,
}

/// Editing command bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Lift the pen so the next click starts a new stroke.
    LiftPen,
    /// Undo the newest stroke.
    Undo,
    /// Redo the most recently undone stroke.
    Redo,
    /// Clear the canvas.
    Reset,
}

impl KeyAction {
    /// Map a key name and modifiers to a command. Unbound keys give `None`.
    #[must_use]
    pub fn from_key(key: &str, modifiers: KeyModifiers) -> Option<Self> {
        let command = modifiers.ctrl || modifiers.meta;
        match key {
            "Escape" | "Esc" => Some(Self::LiftPen),
            "Backspace" => Some(Self::Undo),
            // 127 is the DEL key code some hosts report instead of a name.
            "Delete" | "Del" | "\u{7f}" => Some(Self::Reset),
            "z" | "Z" if command && modifiers.shift => Some(Self::Redo),
            "z" | "Z" if command => Some(Self::Undo),
            "y" | "Y" if command => Some(Self::Redo),
            _ => None,
        }
    }
}
