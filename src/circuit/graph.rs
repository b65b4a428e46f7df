//! Circuit graph structure.

use super::types::{ConnectionId, Driver, GateId, GateType, Point, SourceId};

/// A boolean leaf toggled directly by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct InputSource {
    pub id: SourceId,
    pub position: Point,
    pub value: bool,
}

/// A logic gate with a fixed number of input terminals and one output.
#[derive(Debug, Clone, PartialEq)]
pub struct Gate {
    pub id: GateId,
    pub gate_type: GateType,
    pub position: Point,
    /// Fixed at creation from `gate_type`
    pub inputs_count: usize,
}

impl Gate {
    pub(crate) fn new(id: GateId, gate_type: GateType, position: Point) -> Self {
        Self {
            id,
            gate_type,
            position,
            inputs_count: gate_type.inputs_count(),
        }
    }
}

/// A directed wire from a driver to one gate input terminal.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub id: ConnectionId,
    pub from: Driver,
    pub to_gate: GateId,
    pub to_terminal: usize,
}

impl Connection {
    /// Raw id of the driving source or gate.
    pub fn from_id(&self) -> &str {
        self.from.id()
    }

    /// Whether this connection touches the entity with the given id on
    /// either end.
    pub fn touches(&self, id: &str) -> bool {
        self.from_id() == id || self.to_gate.as_str() == id
    }
}

/// One snapshot of the board: sources, gates and the wires between them.
///
/// Snapshots are plain values. Editing operations (see the `edit` module)
/// return a new `Circuit` and leave the receiver untouched, so a snapshot
/// handed to the propagation engine never changes underneath it.
///
/// The only structural rule enforced is that an input terminal has at most
/// one driver; it is checked when a connection is created.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Circuit {
    /// Input sources in creation order
    sources: Vec<InputSource>,

    /// Gates in creation order (also the propagation visiting order)
    gates: Vec<Gate>,

    /// Connections in creation order
    connections: Vec<Connection>,

    /// Counter shared by every id minted in this editing history
    next_id: u64,
}

impl Circuit {
    /// Create an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// All input sources.
    pub fn sources(&self) -> &[InputSource] {
        &self.sources
    }

    /// All gates.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// All connections.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Whether the board has no sources and no gates.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty() && self.gates.is_empty()
    }

    /// Find a source by id.
    pub fn source(&self, id: &str) -> Option<&InputSource> {
        self.sources.iter().find(|s| s.id.as_str() == id)
    }

    /// Find a gate by id.
    pub fn gate(&self, id: &str) -> Option<&Gate> {
        self.gates.iter().find(|g| g.id.as_str() == id)
    }

    /// Find a connection by id.
    pub fn connection(&self, id: &str) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id.as_str() == id)
    }

    /// Connections whose target is the given gate.
    pub fn connections_to<'a, 'b>(
        &'a self,
        gate_id: &'b str,
    ) -> impl Iterator<Item = &'a Connection> + 'b
    where
        'a: 'b,
    {
        self.connections
            .iter()
            .filter(move |c| c.to_gate.as_str() == gate_id)
    }

    /// The connection driving a specific input terminal, if any.
    pub fn connection_at(&self, gate_id: &str, terminal: usize) -> Option<&Connection> {
        self.connections
            .iter()
            .find(|c| c.to_gate.as_str() == gate_id && c.to_terminal == terminal)
    }

    /// Classify an id as a source or gate driver.
    pub fn resolve_driver(&self, id: &str) -> Option<Driver> {
        if let Some(source) = self.source(id) {
            return Some(Driver::Source(source.id.clone()));
        }
        self.gate(id).map(|g| Driver::Gate(g.id.clone()))
    }

    /// Whether any source, gate or connection has this id.
    pub fn contains(&self, id: &str) -> bool {
        self.source(id).is_some() || self.gate(id).is_some() || self.connection(id).is_some()
    }

    // ---- crate-internal mutation, used by the editing operations ----

    /// Mint a fresh id of the form `<prefix>_<n>`.
    pub(crate) fn mint_id(&mut self, prefix: &str) -> String {
        let id = format!("{}_{}", prefix, self.next_id);
        self.next_id += 1;
        id
    }

    pub(crate) fn sources_mut(&mut self) -> &mut Vec<InputSource> {
        &mut self.sources
    }

    pub(crate) fn gates_mut(&mut self) -> &mut Vec<Gate> {
        &mut self.gates
    }

    pub(crate) fn connections_mut(&mut self) -> &mut Vec<Connection> {
        &mut self.connections
    }

    pub(crate) fn source_mut(&mut self, id: &str) -> Option<&mut InputSource> {
        self.sources.iter_mut().find(|s| s.id.as_str() == id)
    }

    pub(crate) fn gate_mut(&mut self, id: &str) -> Option<&mut Gate> {
        self.gates.iter_mut().find(|g| g.id.as_str() == id)
    }
}
