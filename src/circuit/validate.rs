//! Structural consistency checks.

use std::collections::HashSet;

use crate::error::{BoardError, Result};

use super::{Circuit, Driver};

/// Check a snapshot for structural consistency.
///
/// Checks:
/// - Every connection targets an existing gate, on a terminal it has
/// - Every connection's driver still exists with the kind it was resolved as
/// - No input terminal has more than one driver
///
/// Snapshots built only through the editing operations always pass. This is
/// a diagnostic for hosts and tests; editing never depends on it.
pub fn validate_circuit(circuit: &Circuit) -> Result<()> {
    let mut bound = HashSet::new();

    for conn in circuit.connections() {
        let gate = circuit.gate(conn.to_gate.as_str()).ok_or_else(|| {
            BoardError::topology(format!(
                "connection '{}' targets missing gate '{}'",
                conn.id, conn.to_gate
            ))
        })?;

        if conn.to_terminal >= gate.inputs_count {
            return Err(BoardError::topology(format!(
                "connection '{}' targets input {} of '{}', which has {}",
                conn.id, conn.to_terminal, gate.id, gate.inputs_count
            )));
        }

        let driver_exists = match &conn.from {
            Driver::Source(id) => circuit.source(id.as_str()).is_some(),
            Driver::Gate(id) => circuit.gate(id.as_str()).is_some(),
        };
        if !driver_exists {
            return Err(BoardError::topology(format!(
                "connection '{}' is driven by missing '{}'",
                conn.id, conn.from
            )));
        }

        if !bound.insert((conn.to_gate.as_str(), conn.to_terminal)) {
            return Err(BoardError::topology(format!(
                "input {} of '{}' has more than one driver",
                conn.to_terminal, conn.to_gate
            )));
        }
    }

    Ok(())
}
