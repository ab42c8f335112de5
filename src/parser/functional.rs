use tracing::{debug, trace};

use super::{ParseOptions, leaf};
use crate::error::{ExprError, Result};
use crate::expr::{Arity, Expr, Operator, VARIABLES};

/// Single left-to-right pass with an explicit value stack. Each entry keeps
/// the depth of its subtree so nesting is bounded without recursion.
///
/// Fixed-arity operators pop exactly their arity; variadic operators take
/// everything left on the stack.
pub(super) fn parse(input: &str, options: &ParseOptions) -> Result<Expr> {
    let tokens: Vec<&str> = input.split_whitespace().collect();
    debug!(tokens = tokens.len(), "parsing functional expression");

    let mut stack: Vec<(Expr, usize)> = Vec::new();
    for (position, &token) in tokens.iter().enumerate() {
        let Some(operator) = Operator::from_symbol(token) else {
            stack.push((leaf(token, VARIABLES.len(), position)?, 0));
            continue;
        };

        let wanted = match operator.arity() {
            Arity::Exact(n) => n,
            Arity::AtLeastOne => stack.len(),
        };
        if wanted == 0 || wanted > stack.len() {
            debug!(
                operator = operator.symbol(),
                available = stack.len(),
                "stack underflow"
            );
            return Err(ExprError::InvalidExpression);
        }

        let (operands, depths): (Vec<Expr>, Vec<usize>) =
            stack.split_off(stack.len() - wanted).into_iter().unzip();
        let depth = depths.into_iter().max().unwrap_or(0) + 1;
        if depth > options.max_depth {
            return Err(ExprError::DepthExceeded {
                limit: options.max_depth,
            });
        }

        trace!(operator = operator.symbol(), operands = wanted, "reduced operator");
        stack.push((operator.build(operands)?, depth));
    }

    match <[(Expr, usize); 1]>::try_from(stack) {
        Ok([(expr, _)]) => Ok(expr),
        Err(rest) => {
            debug!(remaining = rest.len(), "functional expression did not reduce to one value");
            Err(ExprError::InvalidExpression)
        }
    }
}
