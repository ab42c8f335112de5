//! Bottom-up simplification with constant folding and a fixed identity table.

mod rules;

pub use rules::{
    simplify, simplify_add, simplify_binary, simplify_div, simplify_mul, simplify_neg,
    simplify_pow, simplify_sub, simplify_variadic,
};
