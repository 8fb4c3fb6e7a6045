//! Netlist parser for circuit descriptions.
//!
//! This module provides a small SPICE-inspired text format for writing down
//! a circuit snapshot. It is line-oriented and human-editable; the CLI, the
//! WASM binding and the tests use it to build [`crate::Circuit`] values.
//!
//! # Grammar Overview
//!
//! ```text
//! netlist     = { line }
//! line        = comment | directive | element | empty
//! comment     = ('#' | ';') { any_char }
//! directive   = ".end"
//! element     = name node node [value] { param }
//! param       = identifier '=' number
//!
//! name        = ('B' | 'V' | 'R' | 'W' | 'I') { letter | digit | '_' }
//! node        = digit+ | "GND"
//! value       = number [unit_suffix]
//!
//! number      = ['-'] digit+ ['.' digit+] [('e'|'E') ['-'|'+'] digit+]
//! unit_suffix = 'p' | 'n' | 'u' | 'm' | 'k' | 'M' | 'G'
//! ```
//!
//! # Element Types
//!
//! | Prefix | Description | Syntax |
//! |--------|-------------|--------|
//! | B, V | Battery | `B<name> <node0> <node1> <voltage>` |
//! | R | Resistor | `R<name> <node0> <node1> <resistance>` |
//! | W | Wire | `W<name> <node0> <node1>` |
//! | I | Current Source | `I<name> <node0> <node1> <current>` |
//!
//! A battery holds `node1` at `voltage` above `node0`. Every element accepts
//! `id=<n>` to set its element id; otherwise ids follow line order.
//!
//! # Example
//!
//! ```text
//! # Voltage divider
//! B1  0  1  3
//! R1  1  2  10
//! R2  2  0  20
//! ```

mod ast;
mod lexer;
mod parser;

pub use ast::*;
pub use lexer::{parse_value, Lexer, Token, TokenKind};
pub use parser::Parser;

use crate::error::Result;

/// Parse a netlist string into an AST.
pub fn parse(input: &str) -> Result<CircuitAst> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer);
    parser.parse()
}

/// Parse a netlist file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<CircuitAst> {
    let content = std::fs::read_to_string(path).map_err(|e| crate::error::VoltaicError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}
