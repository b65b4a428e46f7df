//! Interactive editing session.

use std::collections::BTreeSet;

use crate::circuit::{Circuit, Connection, Driver, GateId, GateType, Point, SourceId};
use crate::error::Result;

use super::propagate::{changed_gates, propagate_rounds, GateLogic, GateLogics};
use super::{DEFAULT_MAX_PASSES, PROPAGATION_ROUNDS};

/// Configuration for a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Rounds per propagation pass.
    pub rounds: usize,
    /// Passes run after each edit. Passes stop early once a pass changes
    /// nothing.
    pub max_passes: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rounds: PROPAGATION_ROUNDS,
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}

impl SessionConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of rounds per pass.
    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    /// Set how many passes may run after an edit (at least one).
    ///
    /// More than one pass lets deep or reverse-declared chains settle
    /// completely after a single edit, at the cost of extra work on
    /// oscillating feedback.
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes.max(1);
        self
    }
}

/// Outcome of one session edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Update {
    /// Whether the board accepted the edit (false for ignored edits).
    pub applied: bool,
    /// Gates whose logic changed, sorted by id.
    pub changed: Vec<GateId>,
}

impl Update {
    /// Whether anything visible changed: a redraw is needed.
    pub fn needs_redraw(&self) -> bool {
        self.applied || !self.changed.is_empty()
    }
}

/// Single owner of the current board snapshot and its derived logic.
///
/// Every edit is applied to a copy of the snapshot with the strict `try_*`
/// API of [`Circuit`]. A rejected edit keeps the current snapshot, matching
/// the lenient contract. Propagation re-runs either way; the logic table is
/// only replaced when a pass actually changed something.
#[derive(Debug, Clone)]
pub struct Session {
    circuit: Circuit,
    logics: GateLogics,
    config: SessionConfig,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create an empty session with default configuration.
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    /// Create an empty session with custom configuration.
    pub fn with_config(config: SessionConfig) -> Self {
        Self::from_circuit(Circuit::new(), config)
    }

    /// Start a session from an existing snapshot and propagate it once.
    pub fn from_circuit(circuit: Circuit, config: SessionConfig) -> Self {
        let mut session = Self {
            circuit,
            logics: GateLogics::new(),
            config,
        };
        session.refresh(false);
        session
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Change the rounds per pass for subsequent edits.
    pub fn set_rounds(&mut self, rounds: usize) {
        self.config.rounds = rounds;
    }

    /// Change the passes per edit (at least one) for subsequent edits.
    pub fn set_max_passes(&mut self, max_passes: usize) {
        self.config.max_passes = max_passes.max(1);
    }

    /// The current snapshot.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// The current logic table.
    pub fn logics(&self) -> &GateLogics {
        &self.logics
    }

    /// Logic of a single gate.
    pub fn logic(&self, gate_id: &str) -> Option<&GateLogic> {
        self.logics.get(gate_id)
    }

    /// What a component drives: a source's value or a gate's output.
    pub fn output_of(&self, id: &str) -> Option<bool> {
        if let Some(source) = self.circuit.source(id) {
            return Some(source.value);
        }
        self.circuit.gate(id)?;
        Some(self.logics.get(id).map_or(false, |l| l.output))
    }

    /// Signal carried by a wire, for colouring it. Missing drivers read low.
    pub fn signal_of(&self, connection: &Connection) -> bool {
        match &connection.from {
            Driver::Source(id) => self.circuit.source(id.as_str()).map_or(false, |s| s.value),
            Driver::Gate(id) => self.logics.get(id.as_str()).map_or(false, |l| l.output),
        }
    }

    // ============ Edits ============

    /// Add a source and return its id.
    pub fn add_input_source(&mut self) -> SourceId {
        let id = self.circuit.insert_input_source();
        self.refresh(true);
        id
    }

    /// Add a gate and return its id.
    pub fn add_gate(&mut self, gate_type: GateType) -> GateId {
        let id = self.circuit.insert_gate(gate_type);
        self.refresh(true);
        id
    }

    pub fn toggle_input_source(&mut self, id: &str) -> Update {
        self.commit("toggle_input_source", |c| c.try_toggle_input_source(id))
    }

    pub fn create_connection(
        &mut self,
        from_id: &str,
        to_gate: &str,
        to_terminal: usize,
    ) -> Update {
        self.commit("create_connection", |c| {
            c.try_create_connection(from_id, to_gate, to_terminal)
        })
    }

    pub fn delete_connection(&mut self, id: &str) -> Update {
        self.commit("delete_connection", |c| c.try_delete_connection(id))
    }

    pub fn update_component_position(&mut self, id: &str, position: Point) -> Update {
        self.commit("update_component_position", |c| {
            c.try_update_component_position(id, position)
        })
    }

    pub fn delete_component(&mut self, id: &str) -> Update {
        self.commit("delete_component", |c| c.try_delete_component(id))
    }

    /// Run propagation again without editing.
    pub fn step(&mut self) -> Update {
        self.refresh(false)
    }

    fn commit<T>(&mut self, op: &str, edit: impl FnOnce(&mut Circuit) -> Result<T>) -> Update {
        let mut next = self.circuit.clone();
        let applied = match edit(&mut next) {
            Ok(_) => {
                self.circuit = next;
                true
            }
            Err(e) => {
                tracing::debug!("ignoring {op}: {e}");
                false
            }
        };
        self.refresh(applied)
    }

    fn refresh(&mut self, applied: bool) -> Update {
        let mut changed = BTreeSet::new();
        for pass in 0..self.config.max_passes.max(1) {
            let next = propagate_rounds(&self.circuit, &self.logics, self.config.rounds);
            let diff = changed_gates(&self.logics, &next);
            if diff.is_empty() {
                break;
            }
            tracing::debug!(pass, changed = diff.len(), "gate logic updated");
            changed.extend(diff);
            self.logics = next;
        }

        Update {
            applied,
            changed: changed.into_iter().collect(),
        }
    }
}
