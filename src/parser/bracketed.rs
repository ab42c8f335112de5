use tracing::{debug, trace};

use super::{ParseOptions, leaf, tokenize};
use crate::error::{ExprError, Result};
use crate::expr::{Expr, Operator, TREE_VARIABLE_COUNT};

/// A fully parenthesized notation, seen as `open operator operand* close`.
///
/// Postfix text is read backwards, which turns it into this shape with the
/// brackets swapped and the operands in reverse order.
#[derive(Debug, Clone, Copy)]
pub(super) struct Notation {
    name: &'static str,
    open: &'static str,
    close: &'static str,
    reversed: bool,
}

pub(super) const PREFIX: Notation = Notation {
    name: "prefix",
    open: "(",
    close: ")",
    reversed: false,
};

pub(super) const POSTFIX: Notation = Notation {
    name: "postfix",
    open: ")",
    close: "(",
    reversed: true,
};

pub(super) fn parse(input: &str, notation: Notation, options: &ParseOptions) -> Result<Expr> {
    let mut tokens = tokenize(input);
    if notation.reversed {
        tokens.reverse();
    }
    debug!(notation = notation.name, tokens = tokens.len(), "parsing bracketed expression");

    let mut cursor = Cursor {
        tokens,
        index: 0,
        notation,
        max_depth: options.max_depth,
    };
    let result = cursor.expression(0).and_then(|expr| cursor.finish(expr));
    if let Err(err) = &result {
        debug!(notation = notation.name, error = %err, "parse failed");
    }
    result
}

struct Cursor<'a> {
    tokens: Vec<&'a str>,
    index: usize,
    notation: Notation,
    max_depth: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<&'a str> {
        self.tokens.get(self.index).copied()
    }

    fn next(&mut self) -> Option<&'a str> {
        let token = self.peek()?;
        self.index += 1;
        Some(token)
    }

    /// Maps an index in the scanned stream back to the token's place in the input.
    fn position(&self, index: usize) -> usize {
        if self.notation.reversed {
            self.tokens.len() - 1 - index
        } else {
            index
        }
    }

    /// `depth` is the number of groups enclosing this expression.
    fn expression(&mut self, depth: usize) -> Result<Expr> {
        let index = self.index;
        let token = self.next().ok_or(ExprError::UnexpectedEnd)?;
        if token == self.notation.open {
            if depth >= self.max_depth {
                return Err(ExprError::DepthExceeded {
                    limit: self.max_depth,
                });
            }
            self.group(index, depth + 1)
        } else if token == self.notation.close {
            Err(ExprError::BracketMismatch {
                position: self.position(index),
                reason: "unexpected closing bracket",
            })
        } else if Operator::from_symbol(token).is_some() {
            Err(ExprError::BracketMismatch {
                position: self.position(index),
                reason: "operator outside a group",
            })
        } else {
            leaf(token, TREE_VARIABLE_COUNT, self.position(index))
        }
    }

    fn group(&mut self, open_index: usize, depth: usize) -> Result<Expr> {
        let symbol_index = self.index;
        let symbol = self.next().ok_or(ExprError::UnexpectedEnd)?;
        let operator = Operator::from_symbol(symbol).ok_or_else(|| ExprError::UnknownToken {
            token: symbol.to_string(),
            position: self.position(symbol_index),
        })?;

        let mut operands = Vec::new();
        loop {
            match self.peek() {
                None => {
                    return Err(ExprError::BracketMismatch {
                        position: self.position(open_index),
                        reason: "bracket is never closed",
                    });
                }
                Some(token) if token == self.notation.close => {
                    self.index += 1;
                    break;
                }
                Some(_) => operands.push(self.expression(depth)?),
            }
        }

        if self.notation.reversed {
            operands.reverse();
        }
        trace!(operator = operator.symbol(), operands = operands.len(), "reduced operator");
        operator.build(operands)
    }

    fn finish(&self, expr: Expr) -> Result<Expr> {
        match self.peek() {
            None => Ok(expr),
            Some(token) if token == self.notation.close => Err(ExprError::BracketMismatch {
                position: self.position(self.index),
                reason: "unexpected closing bracket",
            }),
            Some(_) => Err(ExprError::InvalidExpression),
        }
    }
}
