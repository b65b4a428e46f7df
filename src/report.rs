//! Plain-text board readout for the CLI and scripts.
//!
//! Shows every source value, every gate's terminal signals and output, and
//! every wire with the level it carries. Ids are replaced by script names
//! where a name is known.

use std::collections::HashMap;
use std::fmt;

use crate::circuit::Driver;
use crate::engine::{Session, Signal};

/// Display adapter over a session.
pub struct BoardReport<'a> {
    session: &'a Session,
    /// Id -> display name
    names: HashMap<&'a str, &'a str>,
}

impl<'a> BoardReport<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self {
            session,
            names: HashMap::new(),
        }
    }

    /// Show script names instead of ids. `aliases` maps name to id.
    pub fn with_aliases(mut self, aliases: &'a HashMap<String, String>) -> Self {
        self.names = aliases
            .iter()
            .map(|(name, id)| (id.as_str(), name.as_str()))
            .collect();
        self
    }

    fn name<'b>(&'b self, id: &'b str) -> &'b str {
        self.names.get(id).copied().unwrap_or(id)
    }
}

fn level(value: bool) -> char {
    if value {
        '1'
    } else {
        '0'
    }
}

fn signal(value: &Signal) -> char {
    match value {
        Some(v) => level(*v),
        None => '-',
    }
}

impl fmt::Display for BoardReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let circuit = self.session.circuit();

        writeln!(f, "sources:")?;
        for source in circuit.sources() {
            writeln!(f, "  {} = {}", self.name(source.id.as_str()), level(source.value))?;
        }

        writeln!(f, "gates:")?;
        for gate in circuit.gates() {
            let id = gate.id.as_str();
            let inputs: String = match self.session.logic(id) {
                Some(logic) => logic.inputs.iter().map(signal).collect(),
                None => "-".repeat(gate.inputs_count),
            };
            let output = self.session.output_of(id).unwrap_or(false);
            writeln!(
                f,
                "  {} {} [{}] -> {}",
                self.name(id),
                gate.gate_type,
                inputs,
                level(output)
            )?;
        }

        writeln!(f, "connections:")?;
        for wire in circuit.connections() {
            let arrow = match wire.from {
                Driver::Source(_) => "=>",
                Driver::Gate(_) => "->",
            };
            writeln!(
                f,
                "  {} {} {}.{} ({})",
                self.name(wire.from_id()),
                arrow,
                self.name(wire.to_gate.as_str()),
                wire.to_terminal,
                level(self.session.signal_of(wire))
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::GateType;

    #[test]
    fn test_report_uses_ids_without_aliases() {
        let mut session = Session::new();
        let s = session.add_input_source();
        let g = session.add_gate(GateType::Xor);
        session.create_connection(s.as_str(), g.as_str(), 1);

        let text = BoardReport::new(&session).to_string();
        assert!(text.contains(&format!("  {} = 0", s)));
        assert!(text.contains(&format!("  {} XOR [-0] -> 0", g)));
        assert!(text.contains(&format!("  {} => {}.1 (0)", s, g)));
    }

    #[test]
    fn test_report_with_aliases() {
        let mut session = Session::new();
        let s = session.add_input_source();
        let n = session.add_gate(GateType::Not);
        let a = session.add_gate(GateType::And);
        session.create_connection(s.as_str(), n.as_str(), 0);
        session.create_connection(n.as_str(), a.as_str(), 0);
        session.toggle_input_source(s.as_str());

        let mut aliases = HashMap::new();
        aliases.insert("in".to_string(), s.0.clone());
        aliases.insert("inv".to_string(), n.0.clone());

        let text = BoardReport::new(&session).with_aliases(&aliases).to_string();
        let expected = [
            "sources:".to_string(),
            "  in = 1".to_string(),
            "gates:".to_string(),
            "  inv NOT [1] -> 0".to_string(),
            format!("  {} AND [0-] -> 0", a),
            "connections:".to_string(),
            "  in => inv.0 (1)".to_string(),
            format!("  inv -> {}.0 (0)", a),
            String::new(),
        ]
        .join("\n");
        assert_eq!(text, expected);
    }

    #[test]
    fn test_empty_report() {
        let session = Session::new();
        assert_eq!(
            BoardReport::new(&session).to_string(),
            "sources:\ngates:\nconnections:\n"
        );
    }
}
