use tracing::trace;

use crate::expr::{
    BinaryOp, Expr, UnaryOp, VariadicNode, VariadicOp, add, div, mul, neg, one, pow, sub, zero,
};

/// Simplifies operands first, then applies the identity table of the enclosing operator.
pub fn simplify(expr: &Expr) -> Expr {
    match expr {
        Expr::Constant(_) | Expr::Variable(_) => expr.clone(),
        Expr::Unary(UnaryOp::Negate, a) => simplify_neg(simplify(a)),
        Expr::Binary(op, a, b) => simplify_binary(*op, simplify(a), simplify(b)),
        Expr::Variadic(node) => simplify_variadic(node.map_operands(simplify)),
    }
}

impl Expr {
    pub fn simplify(&self) -> Expr {
        simplify(self)
    }
}

/// Combines two already simplified operands.
pub fn simplify_binary(op: BinaryOp, x: Expr, y: Expr) -> Expr {
    match op {
        BinaryOp::Add => simplify_add(x, y),
        BinaryOp::Sub => simplify_sub(x, y),
        BinaryOp::Mul => simplify_mul(x, y),
        BinaryOp::Div => simplify_div(x, y),
        BinaryOp::Pow => simplify_pow(x, y),
    }
}

pub fn simplify_add(x: Expr, y: Expr) -> Expr {
    match (x, y) {
        (Expr::Constant(a), Expr::Constant(b)) => Expr::Constant(BinaryOp::Add.apply(a, b)),
        (x, y) if x.is_zero() => y,
        (x, y) if y.is_zero() => x,
        (x, y) => add(x, y),
    }
}

pub fn simplify_sub(x: Expr, y: Expr) -> Expr {
    match (x, y) {
        (Expr::Constant(a), Expr::Constant(b)) => Expr::Constant(BinaryOp::Sub.apply(a, b)),
        (x, y) if y.is_zero() => x,
        (x, y) => sub(x, y),
    }
}

pub fn simplify_mul(x: Expr, y: Expr) -> Expr {
    match (x, y) {
        (Expr::Unary(UnaryOp::Negate, a), Expr::Unary(UnaryOp::Negate, b)) => simplify_mul(*a, *b),
        (Expr::Unary(UnaryOp::Negate, a), y) => simplify_neg(simplify_mul(*a, y)),
        (x, Expr::Unary(UnaryOp::Negate, b)) => simplify_neg(simplify_mul(x, *b)),
        (Expr::Constant(a), Expr::Constant(b)) => Expr::Constant(BinaryOp::Mul.apply(a, b)),
        (x, _) if x.is_zero() => zero(),
        (x, y) if x.is_one() => y,
        (_, y) if y.is_zero() => zero(),
        (x, y) if y.is_one() => x,
        (x, y) => mul(x, y),
    }
}

/// A zero numerator folds to zero even over a literal zero denominator; any
/// other constant over zero is kept as a quotient.
pub fn simplify_div(x: Expr, y: Expr) -> Expr {
    match (x, y) {
        (Expr::Constant(n), Expr::Constant(d)) if d == 0.0 => {
            if n == 0.0 {
                zero()
            } else {
                div(Expr::Constant(n), Expr::Constant(d))
            }
        }
        (Expr::Constant(n), Expr::Constant(d)) => Expr::Constant(BinaryOp::Div.apply(n, d)),
        (x, _) if x.is_zero() => zero(),
        (x, y) if y.is_one() => x,
        (x, Expr::Binary(BinaryOp::Mul, p, q)) => cancel_common_factor(x, *p, *q),
        (x, y) => div(x, y),
    }
}

/// `a / (a * q)` becomes `1 / q`. Factors cancel only when they would print
/// the same, so equal values spelled differently are not cancelled.
fn cancel_common_factor(numerator: Expr, p: Expr, q: Expr) -> Expr {
    if same_text(&numerator, &p) {
        trace!(factor = %numerator, "cancelled common factor");
        simplify_div(one(), q)
    } else if same_text(&numerator, &q) {
        trace!(factor = %numerator, "cancelled common factor");
        simplify_div(one(), p)
    } else {
        div(numerator, mul(p, q))
    }
}

/// Structural equality that agrees with comparing `to_prefix()` output:
/// constants match when they print alike, so `0` and `-0` differ and all
/// NaNs are equal.
fn same_text(a: &Expr, b: &Expr) -> bool {
    match (a, b) {
        (Expr::Constant(x), Expr::Constant(y)) => {
            x.to_bits() == y.to_bits() || (x.is_nan() && y.is_nan())
        }
        (Expr::Variable(x), Expr::Variable(y)) => x == y,
        (Expr::Unary(f, x), Expr::Unary(g, y)) => f == g && same_text(x, y),
        (Expr::Binary(f, x1, x2), Expr::Binary(g, y1, y2)) => {
            f == g && same_text(x1, y1) && same_text(x2, y2)
        }
        (Expr::Variadic(x), Expr::Variadic(y)) => {
            x.op() == y.op()
                && x.operands().len() == y.operands().len()
                && x.operands().iter().zip(y.operands()).all(|(x, y)| same_text(x, y))
        }
        _ => false,
    }
}

pub fn simplify_pow(x: Expr, y: Expr) -> Expr {
    match (x, y) {
        (Expr::Constant(b), Expr::Constant(e)) => Expr::Constant(BinaryOp::Pow.apply(b, e)),
        (x, y) => pow(x, y),
    }
}

pub fn simplify_neg(expr: Expr) -> Expr {
    match expr {
        Expr::Constant(v) => Expr::Constant(UnaryOp::Negate.apply(v)),
        Expr::Unary(UnaryOp::Negate, inner) => *inner,
        other => neg(other),
    }
}

/// Folds a variadic node whose operands are all constants.
///
/// Only `normalN` drops a negation wrapped around an operand: its operands are
/// squared, so the sign cannot matter. Cubing operators keep it.
pub fn simplify_variadic(node: VariadicNode) -> Expr {
    let node = match node.op() {
        VariadicOp::Normal(_) => node.into_map_operands(strip_negation),
        _ => node,
    };
    match constant_values(node.operands()) {
        Some(values) => Expr::Constant(node.op().apply(&values)),
        None => Expr::Variadic(node),
    }
}

fn strip_negation(expr: Expr) -> Expr {
    match expr {
        Expr::Unary(UnaryOp::Negate, inner) => *inner,
        other => other,
    }
}

fn constant_values(operands: &[Expr]) -> Option<Vec<f64>> {
    operands.iter().map(Expr::as_constant).collect()
}
