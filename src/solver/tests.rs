//! End-to-end checks of the solve pipeline on small circuits.

use approx::{assert_abs_diff_eq, assert_relative_eq};

use super::*;
use crate::circuit::{Circuit, Connectivity, ElementId, NodeId};
use crate::dsl;
use crate::elements::{Battery, CurrentSource, Resistor};
use crate::error::VoltaicError;

fn netlist(source: &str) -> Circuit {
    Circuit::from_ast(dsl::parse(source).unwrap()).unwrap()
}

fn two_loops(second_resistance: f64) -> Circuit {
    Circuit::new(
        vec![
            Battery::new(ElementId(0), NodeId(0), NodeId(1), 5.0),
            Battery::new(ElementId(1), NodeId(2), NodeId(3), 3.0),
        ],
        vec![
            Resistor::new(ElementId(2), NodeId(1), NodeId(0), 10.0),
            Resistor::new(ElementId(3), NodeId(3), NodeId(2), second_resistance),
        ],
        vec![],
    )
}

#[test]
fn test_single_loop() {
    let circuit = Circuit::new(
        vec![Battery::new(ElementId(0), NodeId(0), NodeId(1), 5.0)],
        vec![Resistor::new(ElementId(1), NodeId(1), NodeId(0), 10.0)],
        vec![],
    );
    let solution = solve(&circuit).unwrap();

    assert_eq!(solution.voltage_at(NodeId(0)), Some(0.0));
    assert_relative_eq!(solution.voltage_at(NodeId(1)).unwrap(), 5.0, epsilon = 1e-12);
    assert_relative_eq!(solution.current_of(ElementId(1)).unwrap(), 0.5, epsilon = 1e-12);
    assert_relative_eq!(solution.current_of(ElementId(0)).unwrap(), 0.5, epsilon = 1e-12);
}

#[test]
fn test_battery_current_sign() {
    // Reversed battery: node 0 is now the + terminal, so V1 = -5 and the
    // resistor carries current from node 0 to node 1. Inside the battery the
    // current still runs from its node0 (node 1) to its node1 (node 0).
    let reversed = Circuit::new(
        vec![Battery::new(ElementId(0), NodeId(1), NodeId(0), 5.0)],
        vec![Resistor::new(ElementId(1), NodeId(1), NodeId(0), 10.0)],
        vec![],
    );
    let solution = solve(&reversed).unwrap();
    assert_relative_eq!(solution.voltage_at(NodeId(1)).unwrap(), -5.0, epsilon = 1e-12);
    assert_relative_eq!(solution.current_of(ElementId(1)).unwrap(), -0.5, epsilon = 1e-12);
    assert_relative_eq!(solution.current_of(ElementId(0)).unwrap(), 0.5, epsilon = 1e-12);

    // A 1 A source pushed into the + terminal charges the battery: 0.5 A
    // leaves through the resistor and 0.5 A runs backwards through the battery.
    let charging = Circuit::new(
        vec![Battery::new(ElementId(0), NodeId(0), NodeId(1), 5.0)],
        vec![Resistor::new(ElementId(1), NodeId(1), NodeId(0), 10.0)],
        vec![CurrentSource::new(ElementId(2), NodeId(1), NodeId(0), 1.0)],
    );
    let solution = solve(&charging).unwrap();
    assert_relative_eq!(solution.voltage_at(NodeId(1)).unwrap(), 5.0, epsilon = 1e-12);
    assert_relative_eq!(solution.current_of(ElementId(1)).unwrap(), 0.5, epsilon = 1e-12);
    assert_relative_eq!(solution.current_of(ElementId(0)).unwrap(), -0.5, epsilon = 1e-12);
}

#[test]
fn test_series_divider() {
    let circuit = netlist(include_str!("../../demos/divider.net"));
    let solution = solve(&circuit).unwrap();

    assert_eq!(solution.voltage_at(NodeId(0)), Some(0.0));
    assert_relative_eq!(solution.voltage_at(NodeId(1)).unwrap(), 3.0, epsilon = 1e-12);
    assert_relative_eq!(solution.voltage_at(NodeId(2)).unwrap(), 2.0, epsilon = 1e-12);
    assert_relative_eq!(solution.current_of(ElementId(1)).unwrap(), 0.1, epsilon = 1e-12);
    assert_relative_eq!(solution.current_of(ElementId(2)).unwrap(), 0.1, epsilon = 1e-12);
}

#[test]
fn test_wire_equalizes_voltages() {
    let circuit = Circuit::new(
        vec![Battery::new(ElementId(0), NodeId(0), NodeId(1), 6.0)],
        vec![
            Resistor::new(ElementId(1), NodeId(1), NodeId(2), 10.0),
            Resistor::wire(ElementId(2), NodeId(2), NodeId(3)),
            Resistor::new(ElementId(3), NodeId(3), NodeId(0), 20.0),
        ],
        vec![],
    );
    let solution = solve(&circuit).unwrap();

    let v2 = solution.voltage_at(NodeId(2)).unwrap();
    let v3 = solution.voltage_at(NodeId(3)).unwrap();
    assert_abs_diff_eq!(v2, v3, epsilon = 1e-12);
    assert_relative_eq!(v3, 4.0, epsilon = 1e-12);
    assert_relative_eq!(solution.current_of(ElementId(2)).unwrap(), 0.2, epsilon = 1e-12);
}

#[test]
fn test_bridge_and_current_loop() {
    let circuit = netlist(include_str!("../../demos/bridge.net"));
    let connectivity = Connectivity::analyze(&circuit);
    assert_eq!(connectivity.reference_nodes(), &[NodeId(0), NodeId(4)]);

    let solution = solve(&circuit).unwrap();

    // Balanced bridge
    assert_relative_eq!(solution.voltage_at(NodeId(2)).unwrap(), 5.0, epsilon = 1e-9);
    assert_relative_eq!(solution.voltage_at(NodeId(3)).unwrap(), 5.0, epsilon = 1e-9);
    assert_abs_diff_eq!(solution.current_of(ElementId(5)).unwrap(), 0.0, epsilon = 1e-12);

    // Current source loop: 2 mA through 1 kOhm, returned by the wire
    assert_eq!(solution.voltage_at(NodeId(4)), Some(0.0));
    assert_relative_eq!(solution.voltage_at(NodeId(5)).unwrap(), 2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(solution.voltage_at(NodeId(6)).unwrap(), 0.0, epsilon = 1e-12);
    assert_relative_eq!(solution.current_of(ElementId(6)).unwrap(), -0.002, epsilon = 1e-12);
    assert_relative_eq!(solution.current_of(ElementId(7)).unwrap(), 0.002, epsilon = 1e-12);
    assert_relative_eq!(solution.current_of(ElementId(8)).unwrap(), 0.002, epsilon = 1e-12);
}

#[test]
fn test_disjoint_loops_are_independent() {
    let circuit = two_loops(6.0);
    let connectivity = Connectivity::analyze(&circuit);
    assert_eq!(connectivity.reference_nodes(), &[NodeId(0), NodeId(2)]);

    let before = solve(&circuit).unwrap();
    let after = solve(&two_loops(12.0)).unwrap();

    for node in [NodeId(0), NodeId(1)] {
        assert_abs_diff_eq!(
            before.voltage_at(node).unwrap(),
            after.voltage_at(node).unwrap(),
            epsilon = 1e-12
        );
    }
    for element in [ElementId(0), ElementId(2)] {
        assert_abs_diff_eq!(
            before.current_of(element).unwrap(),
            after.current_of(element).unwrap(),
            epsilon = 1e-12
        );
    }

    assert_relative_eq!(before.current_of(ElementId(3)).unwrap(), 0.5, epsilon = 1e-12);
    assert_relative_eq!(after.current_of(ElementId(3)).unwrap(), 0.25, epsilon = 1e-12);
}

#[test]
fn test_isolated_self_loop_gets_reference() {
    let circuit = Circuit::new(
        vec![],
        vec![Resistor::new(ElementId(0), NodeId(7), NodeId(7), 5.0)],
        vec![],
    );
    let solution = solve(&circuit).unwrap();
    assert_eq!(solution.voltage_at(NodeId(7)), Some(0.0));
    assert_eq!(solution.current_of(ElementId(0)), Some(0.0));
}

#[test]
fn test_repeated_solves_are_bit_identical() {
    let circuit = netlist(include_str!("../../demos/bridge.net"));
    let first = solve(&circuit).unwrap();

    let mut sim = Simulator::new();
    sim.solve(&two_loops(6.0)).unwrap();
    let second = sim.solve(&circuit).unwrap();

    let bits = |s: &Solution| {
        let v: Vec<_> = s.voltages().map(|(n, v)| (n, v.to_bits())).collect();
        let i: Vec<_> = s.currents().map(|(e, i)| (e, i.to_bits())).collect();
        (v, i)
    };
    assert_eq!(bits(&first), bits(&second));
}

#[test]
fn test_empty_circuit() {
    let solution = solve(&Circuit::default()).unwrap();
    assert!(solution.is_empty());
    assert_eq!(solution.voltages().count(), 0);
    assert_eq!(solution.currents().count(), 0);
}

#[test]
fn test_overdetermined_matches_square() {
    let circuit = netlist(include_str!("../../demos/bridge.net"));
    let square = solve(&circuit).unwrap();
    let config = SolverConfig::new().with_equation_set(EquationSet::Overdetermined);
    let least_squares = solve_with(&circuit, &config).unwrap();

    for (node, voltage) in square.voltages() {
        assert_abs_diff_eq!(least_squares.voltage_at(node).unwrap(), voltage, epsilon = 1e-9);
    }
    for (element, current) in square.currents() {
        assert_abs_diff_eq!(least_squares.current_of(element).unwrap(), current, epsilon = 1e-9);
    }
}

#[test]
fn test_undetermined_circuits_fail_numerically() {
    // Open current source: nothing carries its current
    let open_source = Circuit::new(
        vec![],
        vec![],
        vec![CurrentSource::new(ElementId(0), NodeId(0), NodeId(1), 1.0)],
    );
    assert!(solve(&open_source).unwrap_err().is_numerical());

    // Two wires in parallel split their current arbitrarily
    let wire_loop = Circuit::new(
        vec![Battery::new(ElementId(0), NodeId(0), NodeId(1), 1.0)],
        vec![
            Resistor::new(ElementId(1), NodeId(1), NodeId(2), 1.0),
            Resistor::wire(ElementId(2), NodeId(2), NodeId(0)),
            Resistor::wire(ElementId(3), NodeId(2), NodeId(0)),
        ],
        vec![],
    );
    assert!(solve(&wire_loop).unwrap_err().is_numerical());
}

#[test]
fn test_shorted_battery_fails_numerically() {
    let circuit = Circuit::new(
        vec![Battery::new(ElementId(0), NodeId(0), NodeId(1), 5.0)],
        vec![Resistor::wire(ElementId(1), NodeId(1), NodeId(0))],
        vec![],
    );
    assert!(solve(&circuit).unwrap_err().is_numerical());
}

#[test]
fn test_large_resistances_solve_in_both_modes() {
    let modes = [EquationSet::Square, EquationSet::Overdetermined];

    // 1 uA into 100 MOhm
    let source_into_resistor = Circuit::new(
        vec![],
        vec![Resistor::new(ElementId(1), NodeId(0), NodeId(1), 1e8)],
        vec![CurrentSource::new(ElementId(0), NodeId(1), NodeId(0), 1e-6)],
    );
    for mode in modes {
        let config = SolverConfig::new().with_equation_set(mode);
        let solution = solve_with(&source_into_resistor, &config).unwrap();
        assert_relative_eq!(solution.voltage_at(NodeId(1)).unwrap(), 100.0, max_relative = 1e-9);
    }

    // 5 V across two equal resistors far beyond any fixed pivot cutoff
    for resistance in [1e15, 1e16, 1e20] {
        let divider = Circuit::new(
            vec![Battery::new(ElementId(0), NodeId(0), NodeId(1), 5.0)],
            vec![
                Resistor::new(ElementId(1), NodeId(1), NodeId(2), resistance),
                Resistor::new(ElementId(2), NodeId(2), NodeId(0), resistance),
            ],
            vec![],
        );
        for mode in modes {
            let config = SolverConfig::new().with_equation_set(mode);
            let solution = solve_with(&divider, &config).unwrap();
            assert_relative_eq!(solution.voltage_at(NodeId(2)).unwrap(), 2.5, max_relative = 1e-9);
            assert_relative_eq!(
                solution.current_of(ElementId(1)).unwrap(),
                2.5 / resistance,
                max_relative = 1e-9
            );
        }
    }
}

#[test]
fn test_duplicate_ids_rejected_without_validation() {
    let circuit = Circuit::new(
        vec![Battery::new(ElementId(0), NodeId(0), NodeId(1), 5.0)],
        vec![
            Resistor::new(ElementId(1), NodeId(1), NodeId(2), 10.0),
            Resistor::wire(ElementId(0), NodeId(2), NodeId(0)),
        ],
        vec![],
    );
    let lenient = SolverConfig::new().with_validation(false);
    assert!(matches!(
        solve_with(&circuit, &lenient),
        Err(VoltaicError::DuplicateElement { element: ElementId(0) })
    ));
}
