//! Abstract Syntax Tree types for the netlist format.

use std::collections::HashMap;

/// Complete AST representation of a parsed netlist.
#[derive(Debug, Clone, Default)]
pub struct CircuitAst {
    /// All element definitions, in file order
    pub elements: Vec<ElementDef>,
}

impl CircuitAst {
    /// Create a new empty netlist AST.
    pub fn new() -> Self {
        Self::default()
    }
}

/// An element definition from the netlist.
#[derive(Debug, Clone)]
pub struct ElementDef {
    /// Element type (B/V, R, W, I)
    pub element_type: ElementType,
    /// Element name as written
    pub name: String,
    /// `[node0, node1]`
    pub nodes: [usize; 2],
    /// Voltage, resistance or current
    pub value: Option<f64>,
    /// Additional `key=value` parameters
    pub params: HashMap<String, f64>,
    /// Source line number for error reporting
    pub line: usize,
}

/// Element types supported by the netlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    /// Ideal battery
    Battery,
    /// Resistor
    Resistor,
    /// Zero-resistance wire
    Wire,
    /// Ideal current source
    CurrentSource,
}

impl ElementType {
    /// Parse an element type from the first letter of its name.
    pub fn from_prefix(prefix: char) -> Option<Self> {
        match prefix.to_ascii_uppercase() {
            'B' | 'V' => Some(Self::Battery),
            'R' => Some(Self::Resistor),
            'W' => Some(Self::Wire),
            'I' => Some(Self::CurrentSource),
            _ => None,
        }
    }

    /// Whether a value is required after the nodes.
    pub fn takes_value(&self) -> bool {
        !matches!(self, Self::Wire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_prefix() {
        assert_eq!(ElementType::from_prefix('b'), Some(ElementType::Battery));
        assert_eq!(ElementType::from_prefix('V'), Some(ElementType::Battery));
        assert_eq!(ElementType::from_prefix('w'), Some(ElementType::Wire));
        assert_eq!(ElementType::from_prefix('C'), None);
        assert!(!ElementType::Wire.takes_value());
    }
}
