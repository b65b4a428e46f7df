//! # Gateboard Core
//!
//! Core of an interactive logic-gate board.
//!
//! This library provides:
//! - An immutable circuit snapshot of input sources, gates and wires
//! - A lenient editing API that ignores invalid edits, and a strict `try_*` API
//! - Bounded signal propagation with hold semantics for undetermined inputs
//! - A session that owns the board and reports which gates changed
//! - Board geometry and hit testing for a view layer
//! - A small command script for replaying edits from the CLI or tests
//!
//! ## Architecture
//!
//! - [`circuit`] - Snapshot data model, editing and structural checks
//! - [`engine`] - Propagation and the editing session
//! - [`layout`] - Default placement, terminal positions, hit testing
//! - [`script`] - Lexer, parser and runner for command scripts
//! - [`report`] - Plain-text board readout
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! gateboard half_adder.gb -v
//! ```
//!
//! ### Library
//!
//! ```
//! use gateboard_core::{circuit::GateType, Session};
//!
//! let mut session = Session::new();
//! let a = session.add_input_source();
//! let g = session.add_gate(GateType::Not);
//! session.create_connection(a.as_str(), g.as_str(), 0);
//! assert_eq!(session.output_of(g.as_str()), Some(true));
//!
//! session.toggle_input_source(a.as_str());
//! assert_eq!(session.output_of(g.as_str()), Some(false));
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { WasmBoard } from 'gateboard_core';
//!
//! const board = new WasmBoard();
//! const a = board.add_input_source();
//! const g = board.add_gate("NOT");
//! board.create_connection(a, g, 0);
//! board.output_of(g); // true
//! ```

pub mod circuit;
pub mod engine;
pub mod error;
pub mod layout;
pub mod report;
pub mod script;

// Re-export main types for convenience
pub use circuit::Circuit;
pub use engine::{Session, SessionConfig, Update};
pub use error::{BoardError, Result};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmBoard;
