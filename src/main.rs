//! Voltaic - DC Circuit Solver
//!
//! Solves a netlist once and prints node voltages and element currents.
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=voltaic_core=debug voltaic divider.net
//! ```

use std::path::PathBuf;

use clap::Parser;
use voltaic_core::{
    circuit::Circuit,
    dsl,
    error::Result,
    solver::{EquationSet, SolverConfig, DEFAULT_PIVOT_TOLERANCE},
    Simulator,
};

/// DC circuit solver for batteries, resistors, wires and current sources
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the netlist file
    #[arg(value_name = "NETLIST")]
    netlist: PathBuf,

    /// Keep every conservation equation and solve by least squares
    #[arg(long)]
    overdetermined: bool,

    /// Accept negative resistances and skip element validation
    #[arg(long)]
    no_validate: bool,

    /// Pivot tolerance, relative to the largest entry of each column
    #[arg(long, default_value_t = DEFAULT_PIVOT_TOLERANCE)]
    pivot_tolerance: f64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Parse the netlist
    let ast = dsl::parse_file(&args.netlist)?;

    // Build the circuit
    let circuit = Circuit::from_ast(ast)?;

    let equation_set = if args.overdetermined {
        EquationSet::Overdetermined
    } else {
        EquationSet::Square
    };
    let config = SolverConfig::new()
        .with_equation_set(equation_set)
        .with_validation(!args.no_validate)
        .with_pivot_tolerance(args.pivot_tolerance);

    // A one-shot run reports failures instead of falling back
    let mut simulator = Simulator::with_config(config);
    let solution = simulator.solve(&circuit)?;

    println!("Node voltages:");
    for (node, voltage) in solution.voltages() {
        println!("  {:<8} {:>14.6} V", node.to_string(), voltage);
    }

    println!("Element currents:");
    for (element, current) in solution.currents() {
        let name = circuit
            .label(element)
            .map(str::to_string)
            .unwrap_or_else(|| element.to_string());
        println!("  {:<8} {:>14.6} A", name, current);
    }

    Ok(())
}
