//! Numeric evaluation against positional or name-keyed variable bindings.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::error::{ExprError, Result};
use crate::expr::{Expr, Variable};

/// A source of variable values.
///
/// Slices, arrays and vectors bind by position in [`crate::expr::VARIABLES`]
/// order; maps bind by variable name.
pub trait Bindings {
    fn value_of(&self, variable: Variable) -> Option<f64>;
}

impl Bindings for [f64] {
    fn value_of(&self, variable: Variable) -> Option<f64> {
        self.get(variable.index()).copied()
    }
}

impl<const N: usize> Bindings for [f64; N] {
    fn value_of(&self, variable: Variable) -> Option<f64> {
        self.as_slice().value_of(variable)
    }
}

impl Bindings for Vec<f64> {
    fn value_of(&self, variable: Variable) -> Option<f64> {
        self.as_slice().value_of(variable)
    }
}

impl<S: BuildHasher> Bindings for HashMap<String, f64, S> {
    fn value_of(&self, variable: Variable) -> Option<f64> {
        self.get(variable.name()).copied()
    }
}

impl<S: BuildHasher> Bindings for HashMap<&str, f64, S> {
    fn value_of(&self, variable: Variable) -> Option<f64> {
        self.get(variable.name()).copied()
    }
}

impl Bindings for BTreeMap<String, f64> {
    fn value_of(&self, variable: Variable) -> Option<f64> {
        self.get(variable.name()).copied()
    }
}

impl<B: Bindings + ?Sized> Bindings for &B {
    fn value_of(&self, variable: Variable) -> Option<f64> {
        (**self).value_of(variable)
    }
}

impl Expr {
    /// Evaluates the tree with IEEE double arithmetic.
    ///
    /// Division by zero and invalid powers produce infinities or NaN; the only
    /// error is a variable the bindings do not cover.
    pub fn evaluate<B: Bindings + ?Sized>(&self, bindings: &B) -> Result<f64> {
        match self {
            Expr::Constant(value) => Ok(*value),
            Expr::Variable(variable) => bindings
                .value_of(*variable)
                .ok_or(ExprError::UnboundVariable(variable.name())),
            Expr::Unary(op, a) => Ok(op.apply(a.evaluate(bindings)?)),
            Expr::Binary(op, a, b) => Ok(op.apply(a.evaluate(bindings)?, b.evaluate(bindings)?)),
            Expr::Variadic(node) => {
                let values = node
                    .operands()
                    .iter()
                    .map(|operand| operand.evaluate(bindings))
                    .collect::<Result<Vec<_>>>()?;
                Ok(node.op().apply(&values))
            }
        }
    }
}
