//! MNA (Modified Nodal Analysis) solver.
//!
//! This module turns a circuit snapshot into node voltages and element
//! currents.
//!
//! ## Modified Nodal Analysis
//!
//! The unknowns are one voltage per node plus one current per battery and per
//! zero-resistance wire. The equations are:
//! - one reference equation `V(ref) = 0` per connected component
//! - one current conservation (KCL) equation per node
//! - one branch equation per battery and per wire
//!
//! Each equation is a list of `(coefficient, unknown)` terms; stamping places
//! the coefficients into a dense matrix `A` and the right-hand sides into `z`,
//! and the solver finds `x` with `Ax = z`:
//!
//! ```text
//! [ G   B ] [ v ]   [ i ]
//! [ C   0 ] [ j ] = [ e ]
//! ```
//!
//! where:
//! - G holds resistor conductances and the reference rows
//! - B, C connect battery and wire currents to nodes
//! - v is the vector of node voltages
//! - j is the vector of battery and wire currents
//! - i is the net current-source current at each node
//! - e is the vector of battery voltages (zero for wires)

mod equations;
mod mna;
mod simulator;
mod solution;
mod unknowns;

#[cfg(test)]
mod tests;

pub use equations::{
    battery_equations, build_equations, conservation_equation, conservation_equations,
    reference_equations, wire_equations, Equation, EquationSet, Term,
};
pub use mna::MnaMatrix;
pub use simulator::{solve, solve_with, FailurePolicy, Simulator, SolverConfig};
pub use solution::Solution;
pub use unknowns::{current_unknowns, voltage_unknowns, Unknown, UnknownRegistry};

/// Pivot magnitude, relative to the largest entry of its column, at or below
/// which the system is treated as singular.
pub const DEFAULT_PIVOT_TOLERANCE: f64 = 1e-12;

/// Largest accepted residual `max|Ax - z|`, relative to `1 + max|z|`.
pub const DEFAULT_RESIDUAL_TOLERANCE: f64 = 1e-6;
