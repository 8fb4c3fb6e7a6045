//! WASM bindings for Voltaic Core.
//!
//! This module provides JavaScript-friendly bindings for browser-based
//! circuit simulations that rebuild their circuit every animation frame.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmCircuitSolver } from 'voltaic_core';
//!
//! await init();
//!
//! const solver = new WasmCircuitSolver();
//!
//! // Once per frame, after the user edited the circuit:
//! solver.clear();
//! solver.add_battery(0, 0, 1, 9.0);
//! solver.add_resistor(1, 1, 2, 100.0);
//! solver.add_resistor(2, 2, 0, 0.0); // wire
//! solver.step();
//!
//! const volts = solver.voltage_at(2);
//! const amps = solver.current_of(1);
//! ```

use wasm_bindgen::prelude::*;

use crate::circuit::{Circuit, ElementId, NodeId};
use crate::dsl;
use crate::elements::{Battery, CurrentSource, Resistor};
use crate::error::VoltaicError;
use crate::solver::{Simulator, SolverConfig};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(err: VoltaicError) -> JsValue {
    let err = VoltaicError::WasmError {
        message: err.to_string(),
    };
    JsValue::from_str(&err.to_string())
}

/// WASM-compatible per-frame circuit solver.
///
/// This struct wraps the native [`Simulator`] together with the circuit
/// snapshot the host fills in each frame.
#[wasm_bindgen]
pub struct WasmCircuitSolver {
    simulator: Simulator,
    circuit: Circuit,
}

impl Default for WasmCircuitSolver {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WasmCircuitSolver {
    /// Create a new solver that holds the previous frame's solution when a
    /// frame cannot be solved.
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmCircuitSolver {
        Self {
            simulator: Simulator::with_config(SolverConfig::default()),
            circuit: Circuit::default(),
        }
    }

    /// Remove every element, ready for the next frame's topology.
    pub fn clear(&mut self) {
        self.circuit.clear();
    }

    /// Add a battery holding `node1` at `voltage` above `node0`.
    pub fn add_battery(&mut self, id: u32, node0: u32, node1: u32, voltage: f64) {
        self.circuit.push(Battery::new(
            ElementId(id as usize),
            NodeId(node0 as usize),
            NodeId(node1 as usize),
            voltage,
        ));
    }

    /// Add a resistor; a resistance of exactly 0 makes it a wire.
    pub fn add_resistor(&mut self, id: u32, node0: u32, node1: u32, resistance: f64) {
        self.circuit.push(Resistor::new(
            ElementId(id as usize),
            NodeId(node0 as usize),
            NodeId(node1 as usize),
            resistance,
        ));
    }

    /// Add a current source driving `current` out of `node0`.
    pub fn add_current_source(&mut self, id: u32, node0: u32, node1: u32, current: f64) {
        self.circuit.push(CurrentSource::new(
            ElementId(id as usize),
            NodeId(node0 as usize),
            NodeId(node1 as usize),
            current,
        ));
    }

    /// Replace the circuit with one described in the netlist format.
    pub fn load_netlist(&mut self, netlist: &str) -> Result<(), JsValue> {
        let ast = dsl::parse(netlist).map_err(to_js)?;
        self.circuit = Circuit::from_ast(ast).map_err(to_js)?;
        Ok(())
    }

    /// Solve the current circuit.
    pub fn step(&mut self) -> Result<(), JsValue> {
        self.simulator.step(&self.circuit).map_err(to_js)?;
        Ok(())
    }

    /// Voltage at a node, or `undefined` if no element touches it.
    pub fn voltage_at(&self, node: u32) -> Option<f64> {
        self.simulator.solution().voltage_at(NodeId(node as usize))
    }

    /// Current through an element (positive from node0 to node1).
    pub fn current_of(&self, id: u32) -> Option<f64> {
        self.simulator.solution().current_of(ElementId(id as usize))
    }

    /// Whether the last step showed a fallback solution.
    pub fn is_degraded(&self) -> bool {
        self.simulator.is_degraded()
    }
}
