//! Editing operations.
//!
//! Every edit comes in two flavours:
//!
//! - **Lenient** (`add_gate`, `create_connection`, ...): takes `&self` and
//!   returns a new snapshot. Invalid edits (unknown id, already-driven
//!   terminal, terminal out of range) return an unmodified copy. This is the
//!   contract an interactive editor relies on: bad gestures are ignored.
//! - **Strict** (`try_create_connection`, `try_delete_component`, ...):
//!   mutates in place and reports why an edit was rejected. A rejected strict
//!   edit leaves the circuit unchanged. Adding components cannot fail, so
//!   those are plain `insert_*` methods returning the new id.
//!
//! The lenient form is always "clone, apply strict, keep the original on
//! error", so the two cannot disagree.

use super::graph::{Circuit, Connection, Gate, InputSource};
use super::types::{ConnectionId, Driver, GateId, GateType, Point, SourceId};
use crate::error::{BoardError, Result};
use crate::layout;

impl Circuit {
    fn edited<T>(&self, op: &str, edit: impl FnOnce(&mut Circuit) -> Result<T>) -> Circuit {
        let mut next = self.clone();
        match edit(&mut next) {
            Ok(_) => next,
            Err(e) => {
                tracing::debug!("ignoring {op}: {e}");
                self.clone()
            }
        }
    }

    // ============ Lenient snapshot API ============

    /// Append a new source below the existing ones, initially `false`.
    pub fn add_input_source(&self) -> Circuit {
        let mut next = self.clone();
        next.insert_input_source();
        next
    }

    /// Append a new gate of the given type below the existing gates.
    pub fn add_gate(&self, gate_type: GateType) -> Circuit {
        let mut next = self.clone();
        next.insert_gate(gate_type);
        next
    }

    /// Flip the value of a source. Unknown ids are ignored.
    pub fn toggle_input_source(&self, id: &str) -> Circuit {
        self.edited("toggle_input_source", |c| c.try_toggle_input_source(id))
    }

    /// Wire `from_id` (a source or gate) to input `to_terminal` of `to_gate`.
    ///
    /// Ignored when the terminal already has a driver, when either id is
    /// unknown, or when the terminal does not exist. A gate may drive its
    /// own input.
    pub fn create_connection(&self, from_id: &str, to_gate: &str, to_terminal: usize) -> Circuit {
        self.edited("create_connection", |c| {
            c.try_create_connection(from_id, to_gate, to_terminal)
        })
    }

    /// Remove a connection. Unknown ids are ignored.
    pub fn delete_connection(&self, id: &str) -> Circuit {
        self.edited("delete_connection", |c| c.try_delete_connection(id))
    }

    /// Move the source or gate with this id. Unknown ids are ignored.
    pub fn update_component_position(&self, id: &str, position: Point) -> Circuit {
        self.edited("update_component_position", |c| {
            c.try_update_component_position(id, position)
        })
    }

    /// Remove a source or gate together with every connection touching it.
    /// Unknown ids are ignored.
    pub fn delete_component(&self, id: &str) -> Circuit {
        self.edited("delete_component", |c| c.try_delete_component(id))
    }

    // ============ Strict in-place API ============

    /// Append a new source and return its id.
    pub fn insert_input_source(&mut self) -> SourceId {
        let id = SourceId(self.mint_id("source"));
        let position = layout::default_source_position(self.sources().len());
        self.sources_mut().push(InputSource {
            id: id.clone(),
            position,
            value: false,
        });
        id
    }

    /// Append a new gate and return its id.
    pub fn insert_gate(&mut self, gate_type: GateType) -> GateId {
        let id = GateId(self.mint_id(gate_type.label()));
        let position = layout::default_gate_position(self.gates().len());
        self.gates_mut().push(Gate::new(id.clone(), gate_type, position));
        id
    }

    /// Flip a source and return its new value.
    pub fn try_toggle_input_source(&mut self, id: &str) -> Result<bool> {
        let source = self.source_mut(id).ok_or_else(|| BoardError::unknown(id))?;
        source.value = !source.value;
        Ok(source.value)
    }

    /// Create a connection and return its id.
    pub fn try_create_connection(
        &mut self,
        from_id: &str,
        to_gate: &str,
        to_terminal: usize,
    ) -> Result<ConnectionId> {
        let gate = self.gate(to_gate).ok_or_else(|| BoardError::unknown(to_gate))?;
        if to_terminal >= gate.inputs_count {
            return Err(BoardError::TerminalIndexOutOfRange {
                gate: to_gate.to_string(),
                terminal: to_terminal,
                inputs_count: gate.inputs_count,
            });
        }
        let to_gate = gate.id.clone();

        if self.connection_at(to_gate.as_str(), to_terminal).is_some() {
            return Err(BoardError::DuplicateTerminalBinding {
                gate: to_gate.0,
                terminal: to_terminal,
            });
        }

        let from: Driver = self
            .resolve_driver(from_id)
            .ok_or_else(|| BoardError::unknown(from_id))?;

        let id = ConnectionId(self.mint_id("conn"));
        self.connections_mut().push(Connection {
            id: id.clone(),
            from,
            to_gate,
            to_terminal,
        });
        Ok(id)
    }

    /// Remove a connection and return it.
    pub fn try_delete_connection(&mut self, id: &str) -> Result<Connection> {
        let idx = self
            .connections()
            .iter()
            .position(|c| c.id.as_str() == id)
            .ok_or_else(|| BoardError::unknown(id))?;
        Ok(self.connections_mut().remove(idx))
    }

    /// Move a source or gate.
    pub fn try_update_component_position(&mut self, id: &str, position: Point) -> Result<()> {
        if let Some(source) = self.source_mut(id) {
            source.position = position;
            return Ok(());
        }
        let gate = self.gate_mut(id).ok_or_else(|| BoardError::unknown(id))?;
        gate.position = position;
        Ok(())
    }

    /// Remove a source or gate and its connections. Returns how many
    /// connections were removed with it.
    pub fn try_delete_component(&mut self, id: &str) -> Result<usize> {
        if let Some(idx) = self.sources().iter().position(|s| s.id.as_str() == id) {
            self.sources_mut().remove(idx);
        } else if let Some(idx) = self.gates().iter().position(|g| g.id.as_str() == id) {
            self.gates_mut().remove(idx);
        } else {
            return Err(BoardError::unknown(id));
        }

        let before = self.connections().len();
        self.connections_mut().retain(|c| !c.touches(id));
        Ok(before - self.connections().len())
    }
}
