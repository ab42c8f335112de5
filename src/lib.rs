//! Symbolic arithmetic expressions: parsing from reverse-Polish, prefix and postfix
//! text, numeric evaluation, differentiation, simplification and re-serialization.

pub mod calculus;
pub mod error;
pub mod evaluate;
pub mod expr;
pub mod format;
pub mod parser;
pub mod simplify;

pub use calculus::{differentiate, differentiate_simplified};
pub use error::{ExprError, Result};
pub use evaluate::Bindings;
pub use expr::{
    Arity, BinaryOp, Dimension, Expr, NAMED_CONSTANTS, OPERATORS, Operator, UnaryOp, VARIABLES,
    Variable, VariadicNode, VariadicOp, add, constant, div, mul, neg, one, pow, sub, zero,
};
pub use format::{infix, postfix, prefix, rpn};
pub use parser::{ParseOptions, Parser, parse_functional, parse_postfix, parse_prefix, tokenize};
pub use simplify::simplify;
