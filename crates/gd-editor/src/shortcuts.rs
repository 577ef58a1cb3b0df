//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s. Uses
//! platform-aware modifier detection: on macOS `meta` is ⌘, on other
//! platforms `ctrl` serves the same role.
//!
//! While focus is inside a text field nothing resolves, so typing (and the
//! field's own undo) is never hijacked.

use crate::tools::ToolKind;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── Tool switching ──
    Tool(ToolKind),

    // ── Edit ──
    Undo,
    Redo,
    Save,
    Delete,
    Deselect,

    // ── View ──
    ZoomIn,
    ZoomOut,
    ZoomReset,

    // ── Z-order ──
    SendBackward,
    BringForward,
    SendToBack,
    BringToFront,
}

/// A key press as reported by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyInput {
    /// `KeyboardEvent.key` value (e.g. `"z"`, `"Delete"`).
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
    /// Focus is in a text input or editable text box.
    pub in_text_input: bool,
}

impl KeyInput {
    pub fn plain(key: &str) -> Self {
        Self {
            key: key.to_owned(),
            ..Default::default()
        }
    }

    /// Key with the platform command modifier (Ctrl).
    pub fn command(key: &str) -> Self {
        Self {
            key: key.to_owned(),
            ctrl: true,
            ..Default::default()
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn in_text_input(mut self) -> Self {
        self.in_text_input = true;
        self
    }
}

pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action. Returns `None` if the combo has no
    /// binding or focus is in a text input.
    pub fn resolve(input: &KeyInput) -> Option<ShortcutAction> {
        if input.in_text_input {
            return None;
        }
        let key = input.key.as_str();
        let cmd = input.ctrl || input.meta;

        // ── Modifier combos first (most specific) ──
        if cmd && input.shift {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Redo),
                "[" | "{" => Some(ShortcutAction::SendToBack),
                "]" | "}" => Some(ShortcutAction::BringToFront),
                _ => None,
            };
        }

        if cmd {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Undo),
                "y" | "Y" => Some(ShortcutAction::Redo),
                "s" | "S" => Some(ShortcutAction::Save),
                "=" | "+" => Some(ShortcutAction::ZoomIn),
                "-" => Some(ShortcutAction::ZoomOut),
                "0" => Some(ShortcutAction::ZoomReset),
                "[" => Some(ShortcutAction::SendBackward),
                "]" => Some(ShortcutAction::BringForward),
                _ => None,
            };
        }

        if input.alt || input.shift {
            return None;
        }

        // ── Single keys (no modifiers) ──
        match key {
            "v" | "V" => Some(ShortcutAction::Tool(ToolKind::Select)),
            "b" | "B" => Some(ShortcutAction::Tool(ToolKind::Draw)),
            "r" | "R" => Some(ShortcutAction::Tool(ToolKind::Rectangle)),
            "o" | "O" => Some(ShortcutAction::Tool(ToolKind::Circle)),
            "t" | "T" => Some(ShortcutAction::Tool(ToolKind::Text)),
            "e" | "E" => Some(ShortcutAction::Tool(ToolKind::Eraser)),
            "Delete" | "Backspace" => Some(ShortcutAction::Delete),
            "Escape" => Some(ShortcutAction::Deselect),
            _ => None,
        }
    }
}
