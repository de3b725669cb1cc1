//! Command types for the text editor and the name -> command registry.

use std::collections::HashMap;

/// Target for caret movement operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveTarget {
    /// Move one character left
    Left,
    /// Move one character right
    Right,
    /// Move one visual line up
    Up,
    /// Move one visual line down
    Down,
    /// Start of the visual line (start of text with control)
    Home,
    /// End of the visual line (end of text with control)
    End,
    /// Move one viewport up
    PageUp,
    /// Move one viewport down
    PageDown,
}

/// Modifier keys held during a movement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Extend the selection (Shift)
    pub selecting: bool,
    /// Jump to buffer start/end for Home/End (Control)
    pub control: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        selecting: false,
        control: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        selecting: true,
        control: false,
    };

    pub const CONTROL: Modifiers = Modifiers {
        selecting: false,
        control: true,
    };
}

/// Executable editor commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditCommand {
    // === Clipboard ===
    Cut,
    Copy,
    Paste,

    // === Selection ===
    SelectAll,
    /// Select the run of same-class characters under the caret
    SelectCurrentToken,

    // === Editing ===
    /// Switch between insert and overwrite mode
    ToggleInsertMode,
    /// Delete the selection or the unit before the caret
    Backspace,
    /// Delete the selection or the unit after the caret
    Delete,

    // === Movement ===
    Move(MoveTarget, Modifiers),
}

impl EditCommand {
    /// Check if this command modifies the buffer
    pub fn is_editing(&self) -> bool {
        matches!(
            self,
            EditCommand::Cut | EditCommand::Paste | EditCommand::Backspace | EditCommand::Delete
        )
    }

    /// Check if this command is a movement operation
    pub fn is_movement(&self) -> bool {
        matches!(self, EditCommand::Move(..))
    }
}

/// Stable command names and the commands they resolve to
const COMMAND_NAMES: &[(&str, EditCommand)] = &[
    ("cut", EditCommand::Cut),
    ("copy", EditCommand::Copy),
    ("paste", EditCommand::Paste),
    ("select-all", EditCommand::SelectAll),
    ("select-token", EditCommand::SelectCurrentToken),
    ("toggle-insert-mode", EditCommand::ToggleInsertMode),
    ("backspace", EditCommand::Backspace),
    ("delete", EditCommand::Delete),
    ("move-left", EditCommand::Move(MoveTarget::Left, Modifiers::NONE)),
    ("move-right", EditCommand::Move(MoveTarget::Right, Modifiers::NONE)),
    ("move-up", EditCommand::Move(MoveTarget::Up, Modifiers::NONE)),
    ("move-down", EditCommand::Move(MoveTarget::Down, Modifiers::NONE)),
    ("move-home", EditCommand::Move(MoveTarget::Home, Modifiers::NONE)),
    ("move-end", EditCommand::Move(MoveTarget::End, Modifiers::NONE)),
    ("move-page-up", EditCommand::Move(MoveTarget::PageUp, Modifiers::NONE)),
    ("move-page-down", EditCommand::Move(MoveTarget::PageDown, Modifiers::NONE)),
    ("move-text-start", EditCommand::Move(MoveTarget::Home, Modifiers::CONTROL)),
    ("move-text-end", EditCommand::Move(MoveTarget::End, Modifiers::CONTROL)),
    ("select-left", EditCommand::Move(MoveTarget::Left, Modifiers::SHIFT)),
    ("select-right", EditCommand::Move(MoveTarget::Right, Modifiers::SHIFT)),
    ("select-up", EditCommand::Move(MoveTarget::Up, Modifiers::SHIFT)),
    ("select-down", EditCommand::Move(MoveTarget::Down, Modifiers::SHIFT)),
    ("select-home", EditCommand::Move(MoveTarget::Home, Modifiers::SHIFT)),
    ("select-end", EditCommand::Move(MoveTarget::End, Modifiers::SHIFT)),
    ("select-page-up", EditCommand::Move(MoveTarget::PageUp, Modifiers::SHIFT)),
    ("select-page-down", EditCommand::Move(MoveTarget::PageDown, Modifiers::SHIFT)),
];

/// Lookup table between command names and commands, built once at startup
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    by_name: HashMap<&'static str, EditCommand>,
    by_command: HashMap<EditCommand, &'static str>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        let by_name = COMMAND_NAMES.iter().copied().collect();
        let by_command = COMMAND_NAMES.iter().map(|&(n, c)| (c, n)).collect();
        Self {
            by_name,
            by_command,
        }
    }

    pub fn lookup(&self, name: &str) -> Option<EditCommand> {
        self.by_name.get(name).copied()
    }

    pub fn name_of(&self, command: EditCommand) -> Option<&'static str> {
        self.by_command.get(&command).copied()
    }

    /// All registered names, in declaration order
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        COMMAND_NAMES.iter().map(|&(name, _)| name)
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
