//! Abstract Syntax Tree types for the command script.

use crate::circuit::GateType;

/// A parsed script: optional settings followed by commands in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    /// Rounds per propagation pass, from `.rounds`
    pub rounds: Option<usize>,
    /// Passes per edit, from `.passes`
    pub passes: Option<usize>,
    /// Commands in source order
    pub commands: Vec<Command>,
}

impl Script {
    /// Create a new empty script.
    pub fn new() -> Self {
        Self::default()
    }
}

/// One command with the line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub kind: CommandKind,
    /// Source line number for error reporting
    pub line: usize,
}

/// Commands understood by the script runner.
///
/// Names are script-local aliases; the runner maps them to generated ids.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandKind {
    /// `source <name>`
    Source { name: String },
    /// `gate <name> <type>`
    Gate { name: String, gate_type: GateType },
    /// `toggle <name>`
    Toggle { name: String },
    /// `connect <from> <gate> <terminal>`
    Connect {
        from: String,
        gate: String,
        terminal: usize,
    },
    /// `disconnect <gate> <terminal>`
    Disconnect { gate: String, terminal: usize },
    /// `move <name> <x> <y>`
    Move { name: String, x: f64, y: f64 },
    /// `delete <name>`
    Delete { name: String },
    /// `expect <name> <0|1>`
    Expect { name: String, value: bool },
    /// `show`
    Show,
}

impl CommandKind {
    /// The keyword introducing this command.
    pub fn keyword(&self) -> &'static str {
        match self {
            CommandKind::Source { .. } => "source",
            CommandKind::Gate { .. } => "gate",
            CommandKind::Toggle { .. } => "toggle",
            CommandKind::Connect { .. } => "connect",
            CommandKind::Disconnect { .. } => "disconnect",
            CommandKind::Move { .. } => "move",
            CommandKind::Delete { .. } => "delete",
            CommandKind::Expect { .. } => "expect",
            CommandKind::Show => "show",
        }
    }
}
