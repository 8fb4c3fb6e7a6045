//! # Voltaic Core
//!
//! A DC circuit solver kernel for interactive circuit simulations.
//!
//! This library provides:
//! - Modified Nodal Analysis (MNA) for ideal batteries, resistors, wires and
//!   current sources
//! - Connectivity analysis with one reference (ground) node per component
//! - A per-tick [`Simulator`] with configurable recovery from unsolvable
//!   circuits
//! - A small netlist format for describing circuits as text
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`circuit`] - Circuit snapshots, connectivity analysis and validation
//! - [`elements`] - Battery, resistor and current source models
//! - [`solver`] - Unknown registry, equation assembly, linear solve, solution
//! - [`dsl`] - Parser for the netlist format
//!
//! ## Usage
//!
//! ### Library
//!
//! ```
//! use voltaic_core::circuit::{Circuit, ElementId, NodeId};
//! use voltaic_core::elements::{Battery, Resistor};
//!
//! let circuit = Circuit::new(
//!     vec![Battery::new(ElementId(0), NodeId(0), NodeId(1), 5.0)],
//!     vec![Resistor::new(ElementId(1), NodeId(1), NodeId(0), 10.0)],
//!     vec![],
//! );
//!
//! let solution = voltaic_core::solve(&circuit).unwrap();
//! assert_eq!(solution.voltage_at(NodeId(1)), Some(5.0));
//! ```
//!
//! ### Native CLI
//!
//! ```bash
//! voltaic divider.net
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { WasmCircuitSolver } from 'voltaic_core';
//!
//! const solver = new WasmCircuitSolver();
//! solver.add_battery(0, 0, 1, 5.0);
//! solver.add_resistor(1, 1, 0, 10.0);
//! solver.step();
//! solver.voltage_at(1); // 5
//! ```
//!
//! ## Solution Method
//!
//! Every call solves the snapshot from scratch:
//!
//! 1. Find the node set, connected components and reference nodes
//! 2. Register the unknowns (node voltages, battery and wire currents)
//! 3. Build the reference, conservation and branch equations
//! 4. Stamp them into a dense matrix and solve by LU decomposition (or by
//!    Householder QR when every conservation row is kept)
//! 5. Map the solved vector back to node voltages and element currents

pub mod circuit;
pub mod dsl;
pub mod elements;
pub mod error;
pub mod solver;

// Re-export main types for convenience
pub use circuit::Circuit;
pub use error::{Result, VoltaicError};
pub use solver::{solve, solve_with, Simulator, Solution, SolverConfig};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmCircuitSolver;
