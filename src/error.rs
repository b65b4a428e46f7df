//! Error types for the Gateboard core.
//!
//! This module provides a unified error type [`BoardError`] that covers
//! strict board edits, command-script parsing and execution, structural
//! checks and CLI I/O.
//!
//! Lenient editing operations on [`Circuit`](crate::circuit::Circuit) never
//! surface these errors: a rejected edit simply returns the unmodified
//! snapshot. The `try_*` editing methods return them instead.

use thiserror::Error;

/// Result type alias using [`BoardError`].
pub type Result<T> = std::result::Result<T, BoardError>;

/// Unified error type for all Gateboard operations.
#[derive(Error, Debug)]
pub enum BoardError {
    // ============ Editing Errors ============
    /// No source, gate or connection has this id
    #[error("Unknown entity '{id}'")]
    UnknownEntity { id: String },

    /// The target input terminal already has a driver
    #[error("Input {terminal} of gate '{gate}' is already driven")]
    DuplicateTerminalBinding { gate: String, terminal: usize },

    /// The target input terminal does not exist on the gate
    #[error("Gate '{gate}' has {inputs_count} input(s), terminal {terminal} is out of range")]
    TerminalIndexOutOfRange {
        gate: String,
        terminal: usize,
        inputs_count: usize,
    },

    // ============ Structural Errors ============
    /// Snapshot violates a structural invariant
    #[error("Invalid circuit topology: {message}")]
    InvalidTopology { message: String },

    // ============ Script Errors ============
    /// Error during lexical analysis
    #[error("Lexer error at line {line}, column {column}: {message}")]
    LexerError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Error during parsing
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Unknown gate type keyword
    #[error("Unknown gate type '{name}' at line {line}")]
    UnknownGateType { name: String, line: usize },

    /// Script refers to a name it never declared
    #[error("Unknown name '{name}' at line {line}")]
    UnknownAlias { name: String, line: usize },

    /// Script declares the same name twice
    #[error("Name '{name}' declared again at line {line}")]
    DuplicateAlias { name: String, line: usize },

    /// An `expect` command saw a different signal
    #[error("Expectation failed at line {line}: '{name}' is {actual}, expected {expected}")]
    ExpectationFailed {
        name: String,
        line: usize,
        expected: bool,
        actual: bool,
    },

    // ============ I/O Errors ============
    /// Error reading a script file
    #[error("Failed to read script file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error writing the board report
    #[error("Output error: {message}")]
    OutputError { message: String },

    // ============ WASM Errors ============
    /// WASM-specific error
    #[cfg(feature = "wasm")]
    #[error("WASM error: {message}")]
    WasmError { message: String },
}

impl BoardError {
    /// Create an unknown entity error
    pub fn unknown(id: impl Into<String>) -> Self {
        Self::UnknownEntity { id: id.into() }
    }

    /// Create a lexer error
    pub fn lexer(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::LexerError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid topology error
    pub fn topology(message: impl Into<String>) -> Self {
        Self::InvalidTopology {
            message: message.into(),
        }
    }

    /// Whether this error is one of the three edit rejections that the
    /// lenient editing API turns into a silent no-op.
    pub fn is_edit_rejection(&self) -> bool {
        matches!(
            self,
            Self::UnknownEntity { .. }
                | Self::DuplicateTerminalBinding { .. }
                | Self::TerminalIndexOutOfRange { .. }
        )
    }
}
