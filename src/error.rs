//! Error types for the Voltaic circuit solver.
//!
//! This module provides a unified error type [`VoltaicError`] that covers
//! malformed element data, numerical failures of the linear solve, and
//! netlist parsing.

use thiserror::Error;

use crate::circuit::ElementId;

/// Result type alias using [`VoltaicError`].
pub type Result<T> = std::result::Result<T, VoltaicError>;

/// Unified error type for all Voltaic operations.
#[derive(Error, Debug)]
pub enum VoltaicError {
    // ============ Configuration Errors ============
    /// Resistor with a resistance below zero
    #[error("Element {element} has negative resistance ({resistance})")]
    NegativeResistance { element: ElementId, resistance: f64 },

    /// Element value is NaN or infinite
    #[error("Element {element} has non-finite {quantity} ({value})")]
    NonFiniteValue {
        element: ElementId,
        quantity: &'static str,
        value: f64,
    },

    /// Two elements share the same id
    #[error("Duplicate element id {element}")]
    DuplicateElement { element: ElementId },

    // ============ Numerical Errors ============
    /// Matrix is singular and cannot be solved
    #[error("Singular matrix - circuit may contain a loop of ideal sources or wires, or an open current source")]
    SingularMatrix,

    /// Solved vector does not satisfy the assembled equations
    #[error("Inconsistent circuit equations (residual: {residual:.2e})")]
    InconsistentSystem { residual: f64 },

    /// Solved vector contains NaN or infinity
    #[error("Non-finite value in solution at unknown {index}")]
    NonFiniteSolution { index: usize },

    // ============ Netlist Errors ============
    /// Error during lexical analysis
    #[error("Lexer error at line {line}, column {column}: {message}")]
    LexerError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Error during parsing
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Invalid element definition
    #[error("Invalid element '{name}' at line {line}: {message}")]
    InvalidElement {
        name: String,
        line: usize,
        message: String,
    },

    /// Unknown element type
    #[error("Unknown element type '{element_type}' at line {line}")]
    UnknownElementType { element_type: String, line: usize },

    // ============ I/O Errors ============
    /// Error reading netlist file
    #[error("Failed to read netlist file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ============ WASM Errors ============
    /// WASM-specific error
    #[cfg(feature = "wasm")]
    #[error("WASM error: {message}")]
    WasmError { message: String },
}

impl VoltaicError {
    /// Create a lexer error
    pub fn lexer(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::LexerError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid element error
    pub fn invalid_element(name: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::InvalidElement {
            name: name.into(),
            line,
            message: message.into(),
        }
    }

    /// Create a non-finite value error
    pub fn non_finite(element: ElementId, quantity: &'static str, value: f64) -> Self {
        Self::NonFiniteValue {
            element,
            quantity,
            value,
        }
    }

    /// True for malformed element data.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::NegativeResistance { .. } | Self::NonFiniteValue { .. } | Self::DuplicateElement { .. }
        )
    }

    /// True when the assembled system had no usable solution.
    pub fn is_numerical(&self) -> bool {
        matches!(
            self,
            Self::SingularMatrix | Self::InconsistentSystem { .. } | Self::NonFiniteSolution { .. }
        )
    }
}
