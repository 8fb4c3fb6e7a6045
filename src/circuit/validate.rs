//! Circuit validation.

use std::collections::HashSet;

use crate::error::{Result, VoltaicError};

use super::Circuit;

/// Validate element data before solving.
///
/// Checks:
/// - Element ids are unique across all kinds
/// - Every voltage, resistance and current is finite
/// - No resistance is negative
///
/// Disconnected nodes and isolated components are not errors; each component
/// simply gets its own reference node.
pub fn validate_circuit(circuit: &Circuit) -> Result<()> {
    check_unique_ids(circuit)?;

    for element in circuit.elements() {
        let (quantity, value) = element.value();
        if !value.is_finite() {
            return Err(VoltaicError::non_finite(element.id(), quantity, value));
        }
    }

    for resistor in &circuit.resistors {
        if resistor.resistance < 0.0 {
            return Err(VoltaicError::NegativeResistance {
                element: resistor.id,
                resistance: resistor.resistance,
            });
        }
    }

    Ok(())
}

/// Reject element ids shared by two elements of any kinds.
///
/// Runs even when validation is disabled: each id keys one current unknown.
pub fn check_unique_ids(circuit: &Circuit) -> Result<()> {
    let mut ids = HashSet::with_capacity(circuit.element_count());
    for element in circuit.elements() {
        if !ids.insert(element.id()) {
            return Err(VoltaicError::DuplicateElement {
                element: element.id(),
            });
        }
    }
    Ok(())
}
