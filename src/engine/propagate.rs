//! Bounded round-robin signal propagation.

use std::collections::{BTreeSet, HashMap};

use crate::circuit::{Circuit, Driver, GateId, GateType};

use super::PROPAGATION_ROUNDS;

/// Value on a gate input: `None` when no driver is connected.
pub type Signal = Option<bool>;

/// Derived per-gate state: what each input sees and what the output drives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateLogic {
    pub inputs: Vec<Signal>,
    pub output: bool,
}

impl GateLogic {
    /// All inputs undetermined, output low.
    pub fn new(inputs_count: usize) -> Self {
        Self {
            inputs: vec![None; inputs_count],
            output: false,
        }
    }
}

/// Logic side table keyed by gate id.
pub type GateLogics = HashMap<GateId, GateLogic>;

/// Compute a gate's output from its inputs.
///
/// Returns `None` when the gate holds its previous output instead, which
/// NAND and XOR do whenever an input is undetermined. AND, OR and NOT always
/// produce a value: undetermined inputs read as not-true.
pub fn evaluate(gate_type: GateType, inputs: &[Signal]) -> Option<bool> {
    let is_true = |s: &Signal| *s == Some(true);
    let all_driven = inputs.iter().all(Option::is_some);

    match gate_type {
        GateType::And => Some(inputs.iter().all(is_true)),
        GateType::Or => Some(inputs.iter().any(is_true)),
        GateType::Not => Some(!inputs.first().copied().flatten().unwrap_or(false)),
        GateType::Nand => all_driven.then(|| !inputs.iter().all(is_true)),
        GateType::Xor => {
            all_driven.then(|| inputs.iter().filter(|s| is_true(s)).count() % 2 == 1)
        }
    }
}

/// Where an input terminal gets its value during a pass.
enum Feed {
    /// Source values cannot change mid-pass
    Source(bool),
    /// Index into the working logic
    Gate(usize),
}

/// Run [`PROPAGATION_ROUNDS`] rounds over `circuit`, starting from `previous`.
pub fn propagate(circuit: &Circuit, previous: &GateLogics) -> GateLogics {
    propagate_rounds(circuit, previous, PROPAGATION_ROUNDS)
}

/// Propagate signals through `circuit` for exactly `rounds` rounds.
///
/// The working copy starts from `previous` (gates without usable previous
/// logic start all-undetermined with a low output). Each round visits gates
/// in creation order and writes each result back immediately, so a gate sees
/// outputs already updated earlier in the same round. There is no
/// convergence test: feedback loops that have not settled, or oscillate,
/// keep whatever the last round left.
///
/// Neither argument is modified. The returned table has exactly one entry
/// per gate in `circuit`.
pub fn propagate_rounds(circuit: &Circuit, previous: &GateLogics, rounds: usize) -> GateLogics {
    let gates = circuit.gates();
    let index: HashMap<&str, usize> = gates
        .iter()
        .enumerate()
        .map(|(i, g)| (g.id.as_str(), i))
        .collect();

    let mut working: Vec<GateLogic> = gates
        .iter()
        .map(|g| match previous.get(g.id.as_str()) {
            Some(logic) if logic.inputs.len() == g.inputs_count => logic.clone(),
            _ => GateLogic::new(g.inputs_count),
        })
        .collect();

    // Group wires by target gate once instead of scanning every connection
    // for every gate on every round.
    let mut feeds: Vec<Vec<(usize, Feed)>> = gates.iter().map(|_| Vec::new()).collect();
    for conn in circuit.connections() {
        let Some(&target) = index.get(conn.to_gate.as_str()) else {
            continue;
        };
        if conn.to_terminal >= gates[target].inputs_count {
            continue;
        }
        let feed = match &conn.from {
            Driver::Source(id) => match circuit.source(id.as_str()) {
                Some(source) => Feed::Source(source.value),
                None => continue,
            },
            Driver::Gate(id) => match index.get(id.as_str()) {
                Some(&driver) => Feed::Gate(driver),
                None => continue,
            },
        };
        feeds[target].push((conn.to_terminal, feed));
    }

    for round in 0..rounds {
        for (i, gate) in gates.iter().enumerate() {
            let mut inputs = vec![None; gate.inputs_count];
            for (terminal, feed) in &feeds[i] {
                inputs[*terminal] = Some(match feed {
                    Feed::Source(value) => *value,
                    Feed::Gate(driver) => working[*driver].output,
                });
            }
            let output = evaluate(gate.gate_type, &inputs).unwrap_or(working[i].output);
            working[i] = GateLogic { inputs, output };
        }
        tracing::trace!(round, gates = gates.len(), "propagation round complete");
    }

    gates
        .iter()
        .zip(working)
        .map(|(gate, logic)| (gate.id.clone(), logic))
        .collect()
}

/// Gates whose logic differs between two tables, including gates present in
/// only one of them. Sorted by id.
pub fn changed_gates(old: &GateLogics, new: &GateLogics) -> Vec<GateId> {
    let mut changed = BTreeSet::new();
    for (id, logic) in new {
        if old.get(id) != Some(logic) {
            changed.insert(id.clone());
        }
    }
    for id in old.keys() {
        if !new.contains_key(id) {
            changed.insert(id.clone());
        }
    }
    changed.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logic_of<'a>(logics: &'a GateLogics, id: &GateId) -> &'a GateLogic {
        &logics[id.as_str()]
    }

    /// A gate of `gate_type` with both inputs wired to fresh sources set to
    /// `a` and `b`.
    fn two_input_board(gate_type: GateType, a: bool, b: bool) -> (Circuit, GateId) {
        let mut circuit = Circuit::new();
        let sa = circuit.insert_input_source();
        let sb = circuit.insert_input_source();
        let g = circuit.insert_gate(gate_type);
        circuit.try_create_connection(sa.as_str(), g.as_str(), 0).unwrap();
        circuit.try_create_connection(sb.as_str(), g.as_str(), 1).unwrap();
        if a {
            circuit.try_toggle_input_source(sa.as_str()).unwrap();
        }
        if b {
            circuit.try_toggle_input_source(sb.as_str()).unwrap();
        }
        (circuit, g)
    }

    #[test]
    fn test_truth_tables() {
        let cases = [(false, false), (false, true), (true, false), (true, true)];
        for (a, b) in cases {
            for (ty, expected) in [
                (GateType::And, a && b),
                (GateType::Or, a || b),
                (GateType::Nand, !(a && b)),
                (GateType::Xor, a ^ b),
            ] {
                let (circuit, g) = two_input_board(ty, a, b);
                let logics = propagate(&circuit, &GateLogics::new());
                let logic = logic_of(&logics, &g);
                assert_eq!(logic.output, expected, "{} {} {}", ty, a, b);
                assert_eq!(logic.inputs, vec![Some(a), Some(b)]);
            }
        }
    }

    #[test]
    fn test_unconnected_not_outputs_true() {
        let mut circuit = Circuit::new();
        let n = circuit.insert_gate(GateType::Not);
        let logics = propagate(&circuit, &GateLogics::new());
        assert!(logic_of(&logics, &n).output);
        assert_eq!(logic_of(&logics, &n).inputs, vec![None]);
    }

    #[test]
    fn test_and_or_with_undetermined_input() {
        let mut circuit = Circuit::new();
        let s = circuit.insert_input_source();
        let and = circuit.insert_gate(GateType::And);
        let or = circuit.insert_gate(GateType::Or);
        circuit.try_create_connection(s.as_str(), and.as_str(), 0).unwrap();
        circuit.try_create_connection(s.as_str(), or.as_str(), 1).unwrap();
        circuit.try_toggle_input_source(s.as_str()).unwrap();

        let logics = propagate(&circuit, &GateLogics::new());
        assert!(!logic_of(&logics, &and).output);
        assert!(logic_of(&logics, &or).output);
        assert_eq!(logic_of(&logics, &or).inputs, vec![None, Some(true)]);
    }

    #[test]
    fn test_nand_xor_hold_on_undetermined() {
        for ty in [GateType::Nand, GateType::Xor] {
            let mut circuit = Circuit::new();
            let s = circuit.insert_input_source();
            let g = circuit.insert_gate(ty);
            circuit.try_create_connection(s.as_str(), g.as_str(), 0).unwrap();

            let first = propagate(&circuit, &GateLogics::new());
            assert!(!logic_of(&first, &g).output, "{} starts low", ty);
            assert_eq!(logic_of(&first, &g).inputs, vec![Some(false), None]);

            // A previous output of true is held as well.
            let mut seeded = first.clone();
            seeded.get_mut(g.as_str()).unwrap().output = true;
            circuit.try_toggle_input_source(s.as_str()).unwrap();
            let second = propagate(&circuit, &seeded);
            assert!(logic_of(&second, &g).output, "{} holds high", ty);
            assert_eq!(logic_of(&second, &g).inputs, vec![Some(true), None]);
        }
    }

    #[test]
    fn test_chain_settles_within_one_pass() {
        // Declared in signal order, so each round already sees fresh outputs.
        let mut circuit = Circuit::new();
        let s = circuit.insert_input_source();
        let n1 = circuit.insert_gate(GateType::Not);
        let n2 = circuit.insert_gate(GateType::Not);
        let n3 = circuit.insert_gate(GateType::Not);
        circuit.try_create_connection(s.as_str(), n1.as_str(), 0).unwrap();
        circuit.try_create_connection(n1.as_str(), n2.as_str(), 0).unwrap();
        circuit.try_create_connection(n2.as_str(), n3.as_str(), 0).unwrap();

        let logics = propagate_rounds(&circuit, &GateLogics::new(), 1);
        assert!(logic_of(&logics, &n1).output);
        assert!(!logic_of(&logics, &n2).output);
        assert!(logic_of(&logics, &n3).output);
    }

    #[test]
    fn test_reverse_declared_chain_needs_rounds() {
        // Declared against signal order: each round moves the signal one hop.
        let mut circuit = Circuit::new();
        let s = circuit.insert_input_source();
        let last = circuit.insert_gate(GateType::Or);
        let mid = circuit.insert_gate(GateType::Or);
        let first = circuit.insert_gate(GateType::Or);
        circuit.try_create_connection(s.as_str(), first.as_str(), 0).unwrap();
        circuit.try_create_connection(first.as_str(), mid.as_str(), 0).unwrap();
        circuit.try_create_connection(mid.as_str(), last.as_str(), 0).unwrap();
        circuit.try_toggle_input_source(s.as_str()).unwrap();

        let one = propagate_rounds(&circuit, &GateLogics::new(), 1);
        assert!(logic_of(&one, &first).output);
        assert!(!logic_of(&one, &mid).output);
        assert!(!logic_of(&one, &last).output);

        let full = propagate(&circuit, &GateLogics::new());
        assert!(logic_of(&full, &last).output);
    }

    #[test]
    fn test_self_loop_is_deterministic() {
        let mut circuit = Circuit::new();
        let n = circuit.insert_gate(GateType::Not);
        circuit.try_create_connection(n.as_str(), n.as_str(), 0).unwrap();

        // Oscillates every round: false -> true -> false ... five rounds ends high.
        let a = propagate(&circuit, &GateLogics::new());
        let b = propagate(&circuit, &GateLogics::new());
        assert_eq!(a, b);
        assert!(logic_of(&a, &n).output);
        assert_eq!(logic_of(&a, &n).inputs, vec![Some(false)]);

        let mut circuit = Circuit::new();
        let x = circuit.insert_gate(GateType::Xor);
        circuit.try_create_connection(x.as_str(), x.as_str(), 0).unwrap();
        circuit.try_create_connection(x.as_str(), x.as_str(), 1).unwrap();
        let logics = propagate(&circuit, &GateLogics::new());
        assert!(!logic_of(&logics, &x).output);
    }

    #[test]
    fn test_determinism_and_purity() {
        let (circuit, _) = two_input_board(GateType::Xor, true, false);
        let before = circuit.clone();
        let previous = GateLogics::new();
        let a = propagate(&circuit, &previous);
        let b = propagate(&circuit, &previous);
        assert_eq!(a, b);
        assert_eq!(circuit, before);
        assert!(previous.is_empty());
    }

    #[test]
    fn test_table_tracks_gate_set() {
        let mut circuit = Circuit::new();
        let a = circuit.insert_gate(GateType::And);
        let b = circuit.insert_gate(GateType::Or);
        let first = propagate(&circuit, &GateLogics::new());
        assert_eq!(first.len(), 2);

        circuit.try_delete_component(a.as_str()).unwrap();
        let second = propagate(&circuit, &first);
        assert_eq!(second.len(), 1);
        assert!(second.contains_key(b.as_str()));
        assert_eq!(changed_gates(&first, &second), vec![a]);
    }

    #[test]
    fn test_changed_gates() {
        let (circuit, g) = two_input_board(GateType::And, true, true);
        let empty = GateLogics::new();
        let logics = propagate(&circuit, &empty);
        assert_eq!(changed_gates(&empty, &logics), vec![g.clone()]);
        assert!(changed_gates(&logics, &propagate(&circuit, &logics)).is_empty());
    }
}
