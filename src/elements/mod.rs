//! Element models for circuit solving.
//!
//! This module provides the three ideal element kinds the kernel supports:
//! - Sources: Battery, Current Source
//! - Linear: Resistor (zero resistance acts as an ideal wire)
//!
//! Every element is a branch between exactly two nodes.

mod linear;
mod sources;

pub use linear::Resistor;
pub use sources::{Battery, CurrentSource};

use crate::circuit::{ElementId, NodeId};
use crate::dsl::{ElementDef, ElementType};
use crate::error::{Result, VoltaicError};

/// The kind of an element, without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Battery,
    Resistor,
    CurrentSource,
}

/// A circuit element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Element {
    Battery(Battery),
    Resistor(Resistor),
    CurrentSource(CurrentSource),
}

impl Element {
    /// Create an element from a netlist definition.
    pub fn from_def(id: ElementId, def: &ElementDef) -> Result<Self> {
        let [n0, n1] = def.nodes;
        let (node0, node1) = (NodeId(n0), NodeId(n1));

        match def.element_type {
            ElementType::Battery => {
                let voltage = def.value.ok_or_else(|| {
                    VoltaicError::invalid_element(&def.name, def.line, "battery requires a voltage")
                })?;
                Ok(Element::Battery(Battery::new(id, node0, node1, voltage)))
            }

            ElementType::Resistor => {
                let resistance = def.value.ok_or_else(|| {
                    VoltaicError::invalid_element(&def.name, def.line, "resistor requires a value")
                })?;
                Ok(Element::Resistor(Resistor::new(id, node0, node1, resistance)))
            }

            ElementType::Wire => {
                if def.value.is_some() {
                    return Err(VoltaicError::invalid_element(
                        &def.name,
                        def.line,
                        "wire does not take a value",
                    ));
                }
                Ok(Element::Resistor(Resistor::wire(id, node0, node1)))
            }

            ElementType::CurrentSource => {
                let current = def.value.ok_or_else(|| {
                    VoltaicError::invalid_element(&def.name, def.line, "current source requires a value")
                })?;
                Ok(Element::CurrentSource(CurrentSource::new(id, node0, node1, current)))
            }
        }
    }

    /// Get the element ID.
    pub fn id(&self) -> ElementId {
        match self {
            Element::Battery(b) => b.id,
            Element::Resistor(r) => r.id,
            Element::CurrentSource(i) => i.id,
        }
    }

    /// Get the `[node0, node1]` endpoints.
    pub fn nodes(&self) -> [NodeId; 2] {
        match self {
            Element::Battery(b) => b.nodes,
            Element::Resistor(r) => r.nodes,
            Element::CurrentSource(i) => i.nodes,
        }
    }

    /// Get the element kind.
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Battery(_) => ElementKind::Battery,
            Element::Resistor(_) => ElementKind::Resistor,
            Element::CurrentSource(_) => ElementKind::CurrentSource,
        }
    }

    /// The element's defining scalar and its name, for diagnostics.
    pub fn value(&self) -> (&'static str, f64) {
        match self {
            Element::Battery(b) => ("voltage", b.voltage),
            Element::Resistor(r) => ("resistance", r.resistance),
            Element::CurrentSource(i) => ("current", i.current),
        }
    }

    /// Check whether this element's current is an unknown of the system.
    ///
    /// True for every battery, whose current an ideal voltage constraint
    /// leaves free, and for zero-resistance resistors, which have no `1/R`
    /// to express their current through node voltages.
    pub fn has_current_unknown(&self) -> bool {
        match self {
            Element::Battery(_) => true,
            Element::Resistor(r) => r.is_wire(),
            Element::CurrentSource(_) => false,
        }
    }
}

impl From<Battery> for Element {
    fn from(battery: Battery) -> Self {
        Element::Battery(battery)
    }
}

impl From<Resistor> for Element {
    fn from(resistor: Resistor) -> Self {
        Element::Resistor(resistor)
    }
}

impl From<CurrentSource> for Element {
    fn from(source: CurrentSource) -> Self {
        Element::CurrentSource(source)
    }
}
