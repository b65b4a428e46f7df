//! Command script for driving a board session.
//!
//! Scripts replay a sequence of editing operations against a
//! [`Session`](crate::engine::Session). They exist for the CLI, for demos and for
//! tests; they describe edits, not a saved board.
//!
//! # Grammar Overview
//!
//! ```text
//! script     = { line }
//! line       = comment | directive | command | empty
//! comment    = ('#' | ';') { any_char }
//! directive  = ".rounds" integer | ".passes" integer
//! command    = "source" name
//!            | "gate" name gate_type
//!            | "toggle" name
//!            | "connect" name name integer
//!            | "disconnect" name integer
//!            | "move" name number number
//!            | "delete" name
//!            | "expect" name level
//!            | "show"
//!
//! gate_type  = "AND" | "OR" | "NAND" | "XOR" | "NOT"   (any case)
//! level      = "0" | "1" | "true" | "false" | "on" | "off" | "high" | "low"
//! name       = (letter | '_') { letter | digit | '_' }
//! number     = ['-' | '+'] digit+ ['.' digit+]
//! ```
//!
//! Directives must precede the first command.
//!
//! # Example
//!
//! ```text
//! # Half adder
//! source a
//! source b
//! gate sum XOR
//! gate carry AND
//! connect a sum 0
//! connect b sum 1
//! connect a carry 0
//! connect b carry 1
//! toggle a
//! expect sum 1
//! expect carry 0
//! show
//! ```

mod ast;
mod lexer;
mod parser;
mod runner;

pub use ast::*;
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;
pub use runner::{RunLog, Runner};

use crate::error::Result;

/// Parse a script string into an AST.
pub fn parse(input: &str) -> Result<Script> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer)?;
    parser.parse()
}

/// Parse a script file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<Script> {
    let content =
        std::fs::read_to_string(path).map_err(|e| crate::error::BoardError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
    parse(&content)
}
