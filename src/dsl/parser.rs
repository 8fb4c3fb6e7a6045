//! Parser for the netlist format.

use std::collections::HashMap;

use super::ast::*;
use super::lexer::{parse_value, Lexer, Token, TokenKind};
use crate::error::{Result, VoltaicError};

/// Parser for netlists.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(lexer: Lexer<'a>) -> Self {
        Self {
            lexer,
            current: Token {
                kind: TokenKind::Newline,
                text: String::new(),
                line: 1,
                column: 1,
            },
        }
    }

    /// Parse the entire netlist.
    pub fn parse(&mut self) -> Result<CircuitAst> {
        let mut ast = CircuitAst::new();
        self.advance()?;

        loop {
            match self.current.kind {
                TokenKind::Newline => {
                    self.advance()?;
                    continue;
                }
                TokenKind::Eof => break,
                TokenKind::Directive if self.current.text.eq_ignore_ascii_case(".end") => break,
                TokenKind::Directive => {
                    return Err(VoltaicError::parse(
                        self.current.line,
                        format!("unknown directive: {}", self.current.text),
                    ));
                }
                TokenKind::Identifier => {
                    let element = self.parse_element()?;
                    ast.elements.push(element);
                }
                TokenKind::Number | TokenKind::Equals => {
                    return Err(VoltaicError::parse(
                        self.current.line,
                        format!("unexpected token: {:?}", self.current.text),
                    ));
                }
            }

            self.end_of_line()?;
        }

        Ok(ast)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    /// Require the current line to be finished.
    fn end_of_line(&mut self) -> Result<()> {
        match self.current.kind {
            TokenKind::Newline => self.advance(),
            TokenKind::Eof => Ok(()),
            _ => Err(VoltaicError::parse(
                self.current.line,
                format!("unexpected token at end of line: {:?}", self.current.text),
            )),
        }
    }

    fn parse_element(&mut self) -> Result<ElementDef> {
        let name = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;

        let first_char = name.chars().next().unwrap_or('?');
        let element_type = ElementType::from_prefix(first_char).ok_or_else(|| {
            VoltaicError::UnknownElementType {
                element_type: name.clone(),
                line,
            }
        })?;

        let nodes = [self.parse_node(&name)?, self.parse_node(&name)?];
        let mut value = None;
        let mut params = HashMap::new();

        // Value and key=value parameters until end of line
        while !matches!(self.current.kind, TokenKind::Newline | TokenKind::Eof) {
            let token = self.current.clone();
            self.advance()?;

            match token.kind {
                TokenKind::Identifier if self.current.kind == TokenKind::Equals => {
                    self.advance()?; // consume '='
                    let raw = self.current.clone();
                    if raw.kind != TokenKind::Number {
                        return Err(VoltaicError::invalid_element(
                            &name,
                            line,
                            format!("expected a number after '{}='", token.text),
                        ));
                    }
                    self.advance()?;
                    let v = self.number(&name, line, &raw.text)?;
                    params.insert(token.text.to_lowercase(), v);
                }
                TokenKind::Number if value.is_none() => {
                    value = Some(self.number(&name, line, &token.text)?);
                }
                _ => {
                    return Err(VoltaicError::invalid_element(
                        &name,
                        line,
                        format!("unexpected '{}'", token.text),
                    ));
                }
            }
        }

        if element_type.takes_value() && value.is_none() {
            return Err(VoltaicError::invalid_element(&name, line, "missing value"));
        }

        Ok(ElementDef {
            element_type,
            name,
            nodes,
            value,
            params,
            line,
        })
    }

    /// A node is a non-negative integer, or `GND` for node 0.
    fn parse_node(&mut self, element: &str) -> Result<usize> {
        let token = self.current.clone();
        let node = match token.kind {
            TokenKind::Number if token.text.chars().all(|c| c.is_ascii_digit()) => {
                token.text.parse::<usize>().ok()
            }
            TokenKind::Identifier if token.text.eq_ignore_ascii_case("GND") => Some(0),
            _ => None,
        };

        let node = node.ok_or_else(|| {
            VoltaicError::invalid_element(
                element,
                token.line,
                format!("expected a node number, got {:?}", token.text),
            )
        })?;
        self.advance()?;
        Ok(node)
    }

    fn number(&self, element: &str, line: usize, text: &str) -> Result<f64> {
        parse_value(text).ok_or_else(|| {
            VoltaicError::invalid_element(element, line, format!("invalid number: {}", text))
        })
    }
}
