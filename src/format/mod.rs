//! Rendering expressions as infix, prefix, postfix and flat RPN text.

pub mod expr;

pub use expr::{infix, postfix, prefix, rpn};
