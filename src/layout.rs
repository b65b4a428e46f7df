//! Board geometry shared with the view layer.
//!
//! Positions never influence propagation. This module only answers layout
//! questions a renderer or pointer handler needs: where new components are
//! placed, where their terminals sit, and what lies under a point.

use crate::circuit::{Circuit, Gate, GateId, InputSource, Point, SourceId};

/// Gate body width
pub const GATE_WIDTH: f64 = 120.0;
/// Gate body height
pub const GATE_HEIGHT: f64 = 60.0;
/// Side of the square source body
pub const INPUT_SOURCE_SIZE: f64 = 50.0;
/// Radius a terminal is drawn with
pub const TERMINAL_RADIUS: f64 = 8.0;
/// Distance under which a point snaps to a terminal
pub const SNAP_RADIUS: f64 = 15.0;

/// X coordinate of newly added sources
pub const SOURCE_COLUMN_X: f64 = 50.0;
/// X coordinate of newly added gates
pub const GATE_COLUMN_X: f64 = 250.0;
/// Y coordinate of the first component in each column
pub const FIRST_ROW_Y: f64 = 50.0;
/// Vertical step between successive new sources
pub const SOURCE_ROW_SPACING: f64 = 70.0;
/// Vertical step between successive new gates
pub const GATE_ROW_SPACING: f64 = 80.0;

/// Where the `index`-th source is placed when added.
pub fn default_source_position(index: usize) -> Point {
    Point::new(SOURCE_COLUMN_X, FIRST_ROW_Y + index as f64 * SOURCE_ROW_SPACING)
}

/// Where the `index`-th gate is placed when added.
pub fn default_gate_position(index: usize) -> Point {
    Point::new(GATE_COLUMN_X, FIRST_ROW_Y + index as f64 * GATE_ROW_SPACING)
}

/// Position of input terminal `index` on a gate's left edge.
///
/// Inputs are spread evenly: a one-input gate has its terminal at half
/// height, a two-input gate at one and two thirds.
pub fn gate_input_pos(gate: &Gate, index: usize) -> Point {
    let step = GATE_HEIGHT / (gate.inputs_count + 1) as f64;
    Point::new(gate.position.x, gate.position.y + step * (index + 1) as f64)
}

/// Position of a gate's output terminal, centred on its right edge.
pub fn gate_output_pos(gate: &Gate) -> Point {
    Point::new(gate.position.x + GATE_WIDTH, gate.position.y + GATE_HEIGHT / 2.0)
}

/// Position of a source's output terminal, centred on its right edge.
pub fn source_output_pos(source: &InputSource) -> Point {
    Point::new(
        source.position.x + INPUT_SOURCE_SIZE,
        source.position.y + INPUT_SOURCE_SIZE / 2.0,
    )
}

/// A terminal found under a point.
#[derive(Debug, Clone, PartialEq)]
pub enum Terminal {
    SourceOutput { id: SourceId, position: Point },
    GateOutput { id: GateId, position: Point },
    GateInput { id: GateId, index: usize, position: Point },
}

impl Terminal {
    /// Id of the component owning the terminal.
    pub fn owner(&self) -> &str {
        match self {
            Terminal::SourceOutput { id, .. } => id.as_str(),
            Terminal::GateOutput { id, .. } | Terminal::GateInput { id, .. } => id.as_str(),
        }
    }

    pub fn position(&self) -> Point {
        match self {
            Terminal::SourceOutput { position, .. }
            | Terminal::GateOutput { position, .. }
            | Terminal::GateInput { position, .. } => *position,
        }
    }

    /// Whether a wire can start here.
    pub fn is_output(&self) -> bool {
        !matches!(self, Terminal::GateInput { .. })
    }
}

/// Find the terminal within [`SNAP_RADIUS`] of `point`.
///
/// Source outputs are checked first, then each gate's output followed by its
/// inputs, in creation order. The first hit wins.
pub fn terminal_at(circuit: &Circuit, point: Point) -> Option<Terminal> {
    let near = |pos: Point| point.distance(pos) < SNAP_RADIUS;

    for source in circuit.sources() {
        let pos = source_output_pos(source);
        if near(pos) {
            return Some(Terminal::SourceOutput {
                id: source.id.clone(),
                position: pos,
            });
        }
    }

    for gate in circuit.gates() {
        let pos = gate_output_pos(gate);
        if near(pos) {
            return Some(Terminal::GateOutput {
                id: gate.id.clone(),
                position: pos,
            });
        }
        for index in 0..gate.inputs_count {
            let pos = gate_input_pos(gate, index);
            if near(pos) {
                return Some(Terminal::GateInput {
                    id: gate.id.clone(),
                    index,
                    position: pos,
                });
            }
        }
    }

    None
}

/// Id of the component whose body contains `point` (strictly inside).
///
/// Sources take priority over gates; within each kind the most recently
/// added one is on top.
pub fn component_at(circuit: &Circuit, point: Point) -> Option<&str> {
    let inside = |origin: Point, w: f64, h: f64| {
        point.x > origin.x && point.x < origin.x + w && point.y > origin.y && point.y < origin.y + h
    };

    if let Some(source) = circuit
        .sources()
        .iter()
        .rev()
        .find(|s| inside(s.position, INPUT_SOURCE_SIZE, INPUT_SOURCE_SIZE))
    {
        return Some(source.id.as_str());
    }

    circuit
        .gates()
        .iter()
        .rev()
        .find(|g| inside(g.position, GATE_WIDTH, GATE_HEIGHT))
        .map(|g| g.id.as_str())
}
