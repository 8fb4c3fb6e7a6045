//! Symbolic assembly of the circuit equations.
//!
//! Equations are produced in a fixed order:
//!
//! 1. Reference equations: `V(ref) = 0`, one per component
//! 2. Conservation (KCL) equations, in node-set order
//! 3. Battery branch equations: `V(node1) - V(node0) = voltage`
//! 4. Wire branch equations: `V(node0) - V(node1) = 0`
//!
//! Row `i` of the system matrix is equation `i`.
//!
//! ## Row redundancy
//!
//! Within one component the conservation equations always sum to zero, so one
//! of them carries no information. With [`EquationSet::Square`] the
//! conservation equation of each reference node is left out, which gives as
//! many rows as unknowns. [`EquationSet::Overdetermined`] keeps every row and
//! relies on a least-squares solve.

use crate::circuit::{Circuit, Connectivity, NodeId};

use super::unknowns::Unknown;

/// One summand of an equation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Term {
    pub coefficient: f64,
    pub unknown: Unknown,
}

impl Term {
    pub fn new(coefficient: f64, unknown: Unknown) -> Self {
        Self {
            coefficient,
            unknown,
        }
    }
}

/// A linear equation `sum(terms) = rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct Equation {
    pub rhs: f64,
    pub terms: Vec<Term>,
}

impl Equation {
    pub fn new(rhs: f64, terms: Vec<Term>) -> Self {
        Self { rhs, terms }
    }
}

/// Which equations make up the system handed to the linear solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EquationSet {
    /// Drop the reference node's conservation equation in each component.
    #[default]
    Square,
    /// Keep every equation; the system has one extra row per component.
    Overdetermined,
}

/// Build every equation of the circuit, in row order.
pub fn build_equations(
    circuit: &Circuit,
    connectivity: &Connectivity,
    equation_set: EquationSet,
) -> Vec<Equation> {
    let mut equations = reference_equations(connectivity);
    equations.extend(conservation_equations(circuit, connectivity, equation_set));
    equations.extend(battery_equations(circuit));
    equations.extend(wire_equations(circuit));
    equations
}

/// `V(ref) = 0` for each reference node.
pub fn reference_equations(connectivity: &Connectivity) -> Vec<Equation> {
    connectivity
        .reference_nodes()
        .iter()
        .map(|&node| Equation::new(0.0, vec![Term::new(1.0, Unknown::Voltage(node))]))
        .collect()
}

/// Current conservation equations, one per node in node-set order.
pub fn conservation_equations(
    circuit: &Circuit,
    connectivity: &Connectivity,
    equation_set: EquationSet,
) -> Vec<Equation> {
    connectivity
        .node_set()
        .iter()
        .filter(|&&node| {
            equation_set == EquationSet::Overdetermined || !connectivity.is_reference(node)
        })
        .map(|&node| conservation_equation(circuit, node))
        .collect()
}

/// Kirchhoff current conservation at `node`.
///
/// The left side sums the current leaving `node` through every incident
/// battery and resistor. Current unknowns count `+1` where the node is the
/// element's `node0` and `-1` where it is `node1`; ordinary resistors
/// contribute their current as `±1/R` voltage terms. The right side is the
/// net current of the ideal current sources at `node`.
pub fn conservation_equation(circuit: &Circuit, node: NodeId) -> Equation {
    let mut terms = Vec::new();

    for battery in &circuit.batteries {
        let current = Unknown::Current(battery.id);
        if battery.nodes[1] == node {
            terms.push(Term::new(-1.0, current));
        }
        if battery.nodes[0] == node {
            terms.push(Term::new(1.0, current));
        }
    }

    for resistor in &circuit.resistors {
        let [n0, n1] = resistor.nodes;
        if resistor.is_wire() {
            let current = Unknown::Current(resistor.id);
            if n1 == node {
                terms.push(Term::new(-1.0, current));
            }
            if n0 == node {
                terms.push(Term::new(1.0, current));
            }
        } else {
            let g = resistor.conductance();
            if n1 == node {
                terms.push(Term::new(g, Unknown::Voltage(n1)));
                terms.push(Term::new(-g, Unknown::Voltage(n0)));
            }
            if n0 == node {
                terms.push(Term::new(-g, Unknown::Voltage(n1)));
                terms.push(Term::new(g, Unknown::Voltage(n0)));
            }
        }
    }

    let rhs = circuit
        .current_sources
        .iter()
        .map(|source| source.injection_at(node))
        .sum();

    Equation::new(rhs, terms)
}

/// `V(node1) - V(node0) = voltage` for each battery.
pub fn battery_equations(circuit: &Circuit) -> Vec<Equation> {
    circuit
        .batteries
        .iter()
        .map(|battery| {
            Equation::new(
                battery.voltage,
                vec![
                    Term::new(1.0, Unknown::Voltage(battery.nodes[1])),
                    Term::new(-1.0, Unknown::Voltage(battery.nodes[0])),
                ],
            )
        })
        .collect()
}

/// `V(node0) - V(node1) = 0` for each zero-resistance resistor.
pub fn wire_equations(circuit: &Circuit) -> Vec<Equation> {
    circuit
        .wires()
        .map(|wire| {
            Equation::new(
                0.0,
                vec![
                    Term::new(1.0, Unknown::Voltage(wire.nodes[0])),
                    Term::new(-1.0, Unknown::Voltage(wire.nodes[1])),
                ],
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::ElementId;
    use crate::elements::{Battery, CurrentSource, Resistor};

    fn divider() -> Circuit {
        Circuit::new(
            vec![Battery::new(ElementId(0), NodeId(0), NodeId(1), 3.0)],
            vec![
                Resistor::new(ElementId(1), NodeId(1), NodeId(2), 10.0),
                Resistor::new(ElementId(2), NodeId(2), NodeId(0), 20.0),
                Resistor::wire(ElementId(3), NodeId(2), NodeId(3)),
            ],
            vec![CurrentSource::new(ElementId(4), NodeId(3), NodeId(0), 0.5)],
        )
    }

    #[test]
    fn test_equation_counts() {
        let circuit = divider();
        let connectivity = Connectivity::analyze(&circuit);

        // 1 reference + 4 conservation + 1 battery + 1 wire
        let all = build_equations(&circuit, &connectivity, EquationSet::Overdetermined);
        assert_eq!(all.len(), 7);

        // Square drops one conservation row per component
        let square = build_equations(&circuit, &connectivity, EquationSet::Square);
        assert_eq!(square.len(), 6);
    }

    #[test]
    fn test_reference_equation_first() {
        let circuit = divider();
        let connectivity = Connectivity::analyze(&circuit);
        let equations = build_equations(&circuit, &connectivity, EquationSet::Square);

        assert_eq!(
            equations[0],
            Equation::new(0.0, vec![Term::new(1.0, Unknown::Voltage(NodeId(0)))])
        );
    }

    #[test]
    fn test_conservation_terms() {
        let circuit = divider();
        let equation = conservation_equation(&circuit, NodeId(2));

        // R1 ends at node 2, R2 starts there, wire starts there
        assert_eq!(
            equation.terms,
            vec![
                Term::new(0.1, Unknown::Voltage(NodeId(2))),
                Term::new(-0.1, Unknown::Voltage(NodeId(1))),
                Term::new(-0.05, Unknown::Voltage(NodeId(0))),
                Term::new(0.05, Unknown::Voltage(NodeId(2))),
                Term::new(1.0, Unknown::Current(ElementId(3))),
            ]
        );
        assert_eq!(equation.rhs, 0.0);
    }

    #[test]
    fn test_conservation_battery_and_source() {
        let circuit = divider();

        let at_one = conservation_equation(&circuit, NodeId(1));
        assert_eq!(at_one.terms[0], Term::new(-1.0, Unknown::Current(ElementId(0))));

        let at_three = conservation_equation(&circuit, NodeId(3));
        assert_eq!(at_three.rhs, 0.5);
        assert_eq!(at_three.terms, vec![Term::new(-1.0, Unknown::Current(ElementId(3)))]);

        let at_zero = conservation_equation(&circuit, NodeId(0));
        assert_eq!(at_zero.rhs, -0.5);
    }

    #[test]
    fn test_branch_equations() {
        let circuit = divider();

        let batteries = battery_equations(&circuit);
        assert_eq!(batteries.len(), 1);
        assert_eq!(batteries[0].rhs, 3.0);
        assert_eq!(batteries[0].terms[0], Term::new(1.0, Unknown::Voltage(NodeId(1))));

        let wires = wire_equations(&circuit);
        assert_eq!(wires.len(), 1);
        assert_eq!(wires[0].rhs, 0.0);
        assert_eq!(wires[0].terms[1], Term::new(-1.0, Unknown::Voltage(NodeId(3))));
    }

    #[test]
    fn test_square_skips_reference_rows_only() {
        let circuit = divider();
        let connectivity = Connectivity::analyze(&circuit);
        let rows = conservation_equations(&circuit, &connectivity, EquationSet::Square);
        let all = conservation_equations(&circuit, &connectivity, EquationSet::Overdetermined);

        // Node set order is 0, 1, 2, 3 and node 0 is the reference
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[..], all[1..]);
    }
}
