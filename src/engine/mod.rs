//! Signal propagation engine.
//!
//! This module turns a [`Circuit`](crate::circuit::Circuit) snapshot into
//! per-gate logic values.
//!
//! ## Propagation
//!
//! [`propagate`] runs a fixed number of rounds over the gates in creation
//! order. Within a round, each gate reads its drivers' outputs as they stand
//! at that moment, so outputs computed earlier in the round are already
//! visible (Gauss–Seidel rather than Jacobi relaxation):
//!
//! ```text
//! for round in 0..PROPAGATION_ROUNDS:
//!     for gate in gates:
//!         inputs = [driver value or undetermined per terminal]
//!         output = evaluate(type, inputs) or hold previous output
//! ```
//!
//! The bound is not a convergence test. Acyclic circuits a few hops deep
//! settle; oscillating feedback freezes at whatever the last round leaves.
//!
//! ## Sessions
//!
//! [`Session`] owns the current snapshot and its logic table, re-runs
//! propagation after every edit and reports which gates changed so a
//! renderer can skip redundant redraws.

mod propagate;
mod session;

pub use propagate::{
    changed_gates, evaluate, propagate, propagate_rounds, GateLogic, GateLogics, Signal,
};
pub use session::{Session, SessionConfig, Update};

/// Rounds per propagation pass.
pub const PROPAGATION_ROUNDS: usize = 5;

/// Propagation passes per edit. One pass matches a single engine invocation
/// per change.
pub const DEFAULT_MAX_PASSES: usize = 1;
