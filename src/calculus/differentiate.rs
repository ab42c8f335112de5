use tracing::trace;

use crate::expr::{
    BinaryOp, Expr, UnaryOp, VariadicNode, VariadicOp, add, constant, div, mul, neg, one, pow,
    sub, zero,
};
use crate::simplify::{
    simplify, simplify_add, simplify_div, simplify_mul, simplify_neg, simplify_pow, simplify_sub,
    simplify_variadic,
};

/// Symbolic derivative of `expr` with respect to the variable named `var`.
///
/// The result is left unsimplified, except that every quotient-rule result is
/// simplified before it is returned.
pub fn differentiate(var: &str, expr: &Expr) -> Expr {
    Differentiator::raw(var).derive(expr)
}

/// `simplify(&differentiate(var, expr))`, built in one pass through the
/// simplifier's smart constructors.
pub fn differentiate_simplified(var: &str, expr: &Expr) -> Expr {
    Differentiator::simplifying(var).derive(expr)
}

impl Expr {
    pub fn differentiate(&self, var: &str) -> Expr {
        differentiate(var, self)
    }
}

/// In simplifying mode every node is assembled with a `simplify_*`
/// constructor and every copied input subtree is simplified, so the result
/// equals simplifying the raw derivative.
struct Differentiator<'a> {
    var: &'a str,
    simplifying: bool,
}

impl<'a> Differentiator<'a> {
    fn raw(var: &'a str) -> Self {
        Differentiator {
            var,
            simplifying: false,
        }
    }

    fn simplifying(var: &'a str) -> Self {
        Differentiator {
            var,
            simplifying: true,
        }
    }

    fn derive(&self, expr: &Expr) -> Expr {
        match expr {
            Expr::Constant(_) => zero(),
            Expr::Variable(v) if v.name() == self.var => one(),
            Expr::Variable(_) => zero(),

            Expr::Unary(UnaryOp::Negate, a) => self.neg(self.derive(a)),

            Expr::Binary(BinaryOp::Add, a, b) => self.add(self.derive(a), self.derive(b)),
            Expr::Binary(BinaryOp::Sub, a, b) => self.sub(self.derive(a), self.derive(b)),
            Expr::Binary(BinaryOp::Mul, a, b) => self.product_rule(a, b),
            Expr::Binary(BinaryOp::Div, a, b) => self.quotient_rule(a, b),
            Expr::Binary(BinaryOp::Pow, a, b) => self.power_rule(a, b),

            Expr::Variadic(node) => match node.op() {
                VariadicOp::SumCb => self.sum_of_cubes(node.operands()),
                VariadicOp::Rmc => self.root_mean_cube(node),
                VariadicOp::Normal(_) => self.normal_density(node),
                VariadicOp::Less3 | VariadicOp::Greater4 => zero(),
            },
        }
    }

    fn product_rule(&self, a: &Expr, b: &Expr) -> Expr {
        self.add(
            self.mul(self.derive(a), self.copy(b)),
            self.mul(self.copy(a), self.derive(b)),
        )
    }

    /// Always simplified. Nested quotients are derived once, in simplifying
    /// mode, instead of re-simplifying their results at every level.
    fn quotient_rule(&self, a: &Expr, b: &Expr) -> Expr {
        let s = Differentiator::simplifying(self.var);
        let denominator = simplify(b);
        simplify_div(
            simplify_sub(
                simplify_mul(s.derive(a), denominator.clone()),
                simplify_mul(simplify(a), s.derive(b)),
            ),
            simplify_mul(denominator.clone(), denominator),
        )
    }

    // The exponent is treated as independent of `var`.
    fn power_rule(&self, base: &Expr, exp: &Expr) -> Expr {
        let exp = self.copy(exp);
        self.mul(
            self.mul(
                exp.clone(),
                self.pow(self.copy(base), self.sub(exp, one())),
            ),
            self.derive(base),
        )
    }

    fn sum_of_cubes(&self, operands: &[Expr]) -> Expr {
        operands.iter().fold(zero(), |acc, operand| {
            let operand_copy = self.copy(operand);
            let square = self.mul(operand_copy.clone(), operand_copy);
            self.add(
                acc,
                self.mul(constant(3.0), self.mul(square, self.derive(operand))),
            )
        })
    }

    /// d/dv cbrt(m) = m' / (3 * cbrt(m)^2) with m the mean cube.
    fn root_mean_cube(&self, node: &VariadicNode) -> Expr {
        let operands = node.operands();
        let count = constant(operands.len() as f64);
        let mean = div(Expr::Variadic(node.with_op(VariadicOp::SumCb)), count.clone());
        if simplify(&mean).is_zero() {
            trace!(operands = operands.len(), "rmc derivative short-circuits on zero mean");
            return zero();
        }

        let d_mean = self.div(self.sum_of_cubes(operands), count);
        let root = self.variadic(node);
        self.mul(
            self.div(one(), constant(3.0)),
            self.mul(self.pow(root, constant(-2.0)), d_mean),
        )
    }

    fn normal_density(&self, node: &VariadicNode) -> Expr {
        let density = self.variadic(node);
        node.operands()
            .iter()
            .filter_map(|operand| {
                let d_operand = self.derive(operand);
                if self.is_zero_derivative(&d_operand) {
                    trace!(operator = node.op().symbol(), "skipping operand with zero derivative");
                    return None;
                }
                Some(self.mul(
                    self.neg(self.copy(operand)),
                    self.mul(d_operand, density.clone()),
                ))
            })
            .reduce(|acc, term| self.add(acc, term))
            .unwrap_or_else(zero)
    }

    fn is_zero_derivative(&self, derivative: &Expr) -> bool {
        if self.simplifying {
            derivative.is_zero()
        } else {
            simplify(derivative).is_zero()
        }
    }

    /// A subtree of the input placed unchanged into the derivative.
    fn copy(&self, expr: &Expr) -> Expr {
        if self.simplifying {
            simplify(expr)
        } else {
            expr.clone()
        }
    }

    fn variadic(&self, node: &VariadicNode) -> Expr {
        if self.simplifying {
            simplify_variadic(node.map_operands(simplify))
        } else {
            Expr::Variadic(node.clone())
        }
    }

    fn add(&self, a: Expr, b: Expr) -> Expr {
        if self.simplifying { simplify_add(a, b) } else { add(a, b) }
    }

    fn sub(&self, a: Expr, b: Expr) -> Expr {
        if self.simplifying { simplify_sub(a, b) } else { sub(a, b) }
    }

    fn mul(&self, a: Expr, b: Expr) -> Expr {
        if self.simplifying { simplify_mul(a, b) } else { mul(a, b) }
    }

    fn div(&self, a: Expr, b: Expr) -> Expr {
        if self.simplifying { simplify_div(a, b) } else { div(a, b) }
    }

    fn pow(&self, base: Expr, exp: Expr) -> Expr {
        if self.simplifying { simplify_pow(base, exp) } else { pow(base, exp) }
    }

    fn neg(&self, a: Expr) -> Expr {
        if self.simplifying { simplify_neg(a) } else { neg(a) }
    }
}
