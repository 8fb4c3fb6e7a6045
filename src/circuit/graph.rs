//! Circuit snapshot structure.

use std::collections::HashMap;

use super::types::{ElementId, NodeId};
use crate::dsl::CircuitAst;
use crate::elements::{Battery, CurrentSource, Element, Resistor};
use crate::error::{Result, VoltaicError};

/// A circuit topology snapshot, ready to be solved.
///
/// The host rebuilds this once per tick from the editing state. It holds the
/// three element collections in their given order; that order fixes the node
/// set order and therefore the layout of the linear system.
#[derive(Debug, Clone, Default)]
pub struct Circuit {
    /// All batteries, in input order
    pub batteries: Vec<Battery>,

    /// All resistors (including zero-resistance wires), in input order
    pub resistors: Vec<Resistor>,

    /// All current sources, in input order
    pub current_sources: Vec<CurrentSource>,

    /// Optional display names for elements (netlist names)
    pub labels: HashMap<ElementId, String>,
}

impl Circuit {
    /// Create a circuit from the three element collections.
    pub fn new(
        batteries: Vec<Battery>,
        resistors: Vec<Resistor>,
        current_sources: Vec<CurrentSource>,
    ) -> Self {
        Self {
            batteries,
            resistors,
            current_sources,
            labels: HashMap::new(),
        }
    }

    /// Build a circuit from a parsed netlist.
    ///
    /// Elements are numbered in line order unless the netlist gives an
    /// explicit `id=` parameter.
    pub fn from_ast(ast: CircuitAst) -> Result<Self> {
        let mut circuit = Circuit::default();

        for (idx, def) in ast.elements.iter().enumerate() {
            let id = match def.params.get("id") {
                Some(&raw) => {
                    if !raw.is_finite() || raw < 0.0 || raw.fract() != 0.0 {
                        return Err(VoltaicError::invalid_element(
                            &def.name,
                            def.line,
                            format!("element id must be a non-negative integer, got {}", raw),
                        ));
                    }
                    ElementId(raw as usize)
                }
                None => ElementId(idx),
            };

            let element = Element::from_def(id, def)?;
            circuit.push(element);
            circuit.labels.insert(id, def.name.clone());
        }

        Ok(circuit)
    }

    /// Add an element to the collection of its kind.
    pub fn push(&mut self, element: impl Into<Element>) {
        match element.into() {
            Element::Battery(b) => self.batteries.push(b),
            Element::Resistor(r) => self.resistors.push(r),
            Element::CurrentSource(i) => self.current_sources.push(i),
        }
    }

    /// Remove every element, keeping allocated capacity for the next tick.
    pub fn clear(&mut self) {
        self.batteries.clear();
        self.resistors.clear();
        self.current_sources.clear();
        self.labels.clear();
    }

    /// Check whether the circuit has no elements.
    pub fn is_empty(&self) -> bool {
        self.element_count() == 0
    }

    /// Total number of elements of all kinds.
    pub fn element_count(&self) -> usize {
        self.batteries.len() + self.resistors.len() + self.current_sources.len()
    }

    /// Iterate over all elements: batteries, then resistors, then current sources.
    pub fn elements(&self) -> impl Iterator<Item = Element> + '_ {
        self.batteries
            .iter()
            .copied()
            .map(Element::Battery)
            .chain(self.resistors.iter().copied().map(Element::Resistor))
            .chain(self.current_sources.iter().copied().map(Element::CurrentSource))
    }

    /// Iterate over the `(node0, node1)` endpoints of every element.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.elements().map(|e| {
            let [n0, n1] = e.nodes();
            (n0, n1)
        })
    }

    /// Zero-resistance resistors, in input order.
    pub fn wires(&self) -> impl Iterator<Item = &Resistor> + '_ {
        self.resistors.iter().filter(|r| r.is_wire())
    }

    /// Find an element by id.
    pub fn element(&self, id: ElementId) -> Option<Element> {
        self.elements().find(|e| e.id() == id)
    }

    /// Get the display name of an element, if it has one.
    pub fn label(&self, id: ElementId) -> Option<&str> {
        self.labels.get(&id).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl;
    use crate::elements::ElementKind;

    #[test]
    fn test_from_ast_numbering() {
        let ast = dsl::parse("B1 0 1 5\nR1 1 0 10\nI1 0 1 2m id=9").unwrap();
        let circuit = Circuit::from_ast(ast).unwrap();

        assert_eq!(circuit.batteries[0].id, ElementId(0));
        assert_eq!(circuit.resistors[0].id, ElementId(1));
        assert_eq!(circuit.current_sources[0].id, ElementId(9));
        assert_eq!(circuit.label(ElementId(9)), Some("I1"));
    }

    #[test]
    fn test_from_ast_rejects_fractional_id() {
        let ast = dsl::parse("R1 1 0 10 id=1.5").unwrap();
        assert!(matches!(
            Circuit::from_ast(ast),
            Err(VoltaicError::InvalidElement { .. })
        ));
    }

    #[test]
    fn test_element_iteration_order() {
        let mut circuit = Circuit::default();
        circuit.push(CurrentSource::new(ElementId(0), NodeId(0), NodeId(1), 1.0));
        circuit.push(Resistor::new(ElementId(1), NodeId(1), NodeId(2), 1.0));
        circuit.push(Battery::new(ElementId(2), NodeId(2), NodeId(0), 1.0));

        let kinds: Vec<_> = circuit.elements().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            vec![ElementKind::Battery, ElementKind::Resistor, ElementKind::CurrentSource]
        );
        assert_eq!(circuit.element_count(), 3);
        assert!(circuit.element(ElementId(1)).is_some());
        assert!(circuit.element(ElementId(7)).is_none());

        circuit.clear();
        assert!(circuit.is_empty());
    }
}
