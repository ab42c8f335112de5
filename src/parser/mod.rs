//! Text front-ends: a flat reverse-Polish stack parser and recursive-descent
//! parsers for fully parenthesized prefix and postfix notation.

mod bracketed;
mod functional;
mod tokenize;

use crate::error::{ExprError, Result};
use crate::expr::{Expr, Variable};

pub use tokenize::tokenize;

pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Limits applied while building trees from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Deepest operator nesting a parsed tree may have.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Parser {
    options: ParseOptions,
}

impl Parser {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    /// Parses whitespace-separated reverse-Polish text such as `x 2 *`.
    pub fn functional(&self, input: &str) -> Result<Expr> {
        functional::parse(input, &self.options)
    }

    /// Parses fully parenthesized prefix text such as `(* x 2)`.
    pub fn prefix(&self, input: &str) -> Result<Expr> {
        bracketed::parse(input, bracketed::PREFIX, &self.options)
    }

    /// Parses fully parenthesized postfix text such as `(x 2 *)`.
    pub fn postfix(&self, input: &str) -> Result<Expr> {
        bracketed::parse(input, bracketed::POSTFIX, &self.options)
    }
}

pub fn parse_functional(input: &str) -> Result<Expr> {
    Parser::default().functional(input)
}

pub fn parse_prefix(input: &str) -> Result<Expr> {
    Parser::default().prefix(input)
}

pub fn parse_postfix(input: &str) -> Result<Expr> {
    Parser::default().postfix(input)
}

/// Resolves a non-operator token: a named constant, one of the first
/// `variable_count` variables, or a number.
fn leaf(token: &str, variable_count: usize, position: usize) -> Result<Expr> {
    if let Some(constant) = Expr::named_constant(token) {
        return Ok(constant);
    }
    if let Some(variable) = Variable::from_name(token).filter(|v| v.index() < variable_count) {
        return Ok(Expr::Variable(variable));
    }
    tokenize::number(token)
        .map(Expr::Constant)
        .ok_or_else(|| ExprError::UnknownToken {
            token: token.to_string(),
            position,
        })
}
