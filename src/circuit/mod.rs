//! Board graph representation and editing.
//!
//! This module provides the graph model: input sources, gates and the
//! connections between them, held in an immutable-by-convention
//! [`Circuit`] snapshot. Editing operations are methods on `Circuit` that produce new
//! snapshots; [`validate_circuit`] checks a snapshot's structure.

mod edit;
mod graph;
mod types;
mod validate;

pub use graph::{Circuit, Connection, Gate, InputSource};
pub use types::*;
pub use validate::validate_circuit;
