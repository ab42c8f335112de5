//! Property-based checks over randomly generated expression trees.

use proptest::prelude::*;
use rexpr::expr::{BinaryOp, VariadicOp};
use rexpr::{
    Expr, constant, differentiate, differentiate_simplified, neg, parse_postfix, parse_prefix,
    simplify,
};

fn leaf() -> impl Strategy<Value = Expr> {
    prop_oneof![
        (-3i32..=3).prop_map(|v| constant(f64::from(v))),
        prop::sample::select(vec!["x", "y", "z"])
            .prop_map(|name| Expr::variable(name).expect("tree variable")),
    ]
}

/// Trees over every operator of the bracketed parsers.
fn any_expr() -> impl Strategy<Value = Expr> {
    leaf().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            (
                prop::sample::select(vec![
                    BinaryOp::Add,
                    BinaryOp::Sub,
                    BinaryOp::Mul,
                    BinaryOp::Div,
                    BinaryOp::Pow,
                ]),
                inner.clone(),
                inner.clone()
            )
                .prop_map(|(op, a, b)| Expr::Binary(op, a.boxed(), b.boxed())),
            inner.clone().prop_map(neg),
            prop::collection::vec(inner.clone(), 1..4).prop_map(|ops| {
                Expr::variadic(VariadicOp::SumCb, ops).expect("non-empty sumCb")
            }),
            prop::collection::vec(inner.clone(), 1..4)
                .prop_map(|ops| Expr::variadic(VariadicOp::Rmc, ops).expect("non-empty rmc")),
            prop::collection::vec(inner, 1..=5)
                .prop_map(|ops| Expr::normal(ops.len(), ops).expect("matching dimension")),
        ]
    })
}

/// Trees without division or powers, so every intermediate value stays finite.
fn ring_expr() -> impl Strategy<Value = Expr> {
    leaf().prop_recursive(3, 16, 3, |inner| {
        prop_oneof![
            (
                prop::sample::select(vec![BinaryOp::Add, BinaryOp::Sub, BinaryOp::Mul]),
                inner.clone(),
                inner.clone()
            )
                .prop_map(|(op, a, b)| Expr::Binary(op, a.boxed(), b.boxed())),
            inner.clone().prop_map(neg),
            prop::collection::vec(inner.clone(), 1..3).prop_map(|ops| {
                Expr::variadic(VariadicOp::SumCb, ops).expect("non-empty sumCb")
            }),
            prop::collection::vec(inner, 1..=3)
                .prop_map(|ops| Expr::normal(ops.len(), ops).expect("matching dimension")),
        ]
    })
}

/// Shallow polynomial-like trees, small enough for finite differences.
fn smooth_expr() -> impl Strategy<Value = Expr> {
    leaf().prop_recursive(2, 12, 3, |inner| {
        prop_oneof![
            (
                prop::sample::select(vec![BinaryOp::Add, BinaryOp::Sub, BinaryOp::Mul]),
                inner.clone(),
                inner.clone()
            )
                .prop_map(|(op, a, b)| Expr::Binary(op, a.boxed(), b.boxed())),
            inner.clone().prop_map(neg),
            prop::collection::vec(inner.clone(), 1..3).prop_map(|ops| {
                Expr::variadic(VariadicOp::SumCb, ops).expect("non-empty sumCb")
            }),
            prop::collection::vec(inner, 1..=2)
                .prop_map(|ops| Expr::normal(ops.len(), ops).expect("matching dimension")),
        ]
    })
}

fn bindings() -> impl Strategy<Value = [f64; 3]> {
    [-4.0f64..4.0, -4.0f64..4.0, -4.0f64..4.0]
}

fn same_value(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a == b || (a - b).abs() <= 1e-9 * a.abs().max(b.abs())
}

proptest! {
    #[test]
    fn prefix_text_round_trips(expr in any_expr()) {
        let reparsed = parse_prefix(&expr.to_prefix()).expect("reparse prefix");
        prop_assert_eq!(reparsed, expr);
    }

    #[test]
    fn postfix_text_round_trips(expr in any_expr()) {
        let reparsed = parse_postfix(&expr.to_postfix()).expect("reparse postfix");
        prop_assert_eq!(reparsed, expr);
    }

    #[test]
    fn prefix_and_postfix_evaluate_alike(expr in any_expr(), at in bindings()) {
        let pre = parse_prefix(&expr.to_prefix()).expect("prefix");
        let post = parse_postfix(&expr.to_postfix()).expect("postfix");
        let a = pre.evaluate(&at).expect("bound");
        let b = post.evaluate(&at).expect("bound");
        prop_assert!(same_value(a, b), "{} vs {}", a, b);
    }

    #[test]
    fn simplify_is_idempotent(expr in any_expr()) {
        let once = simplify(&expr);
        let twice = simplify(&once);
        prop_assert_eq!(twice.to_prefix(), once.to_prefix());
    }

    #[test]
    fn simplify_preserves_finite_values(expr in ring_expr(), at in bindings()) {
        let original = expr.evaluate(&at).expect("bound");
        prop_assume!(original.is_finite());
        let simplified = simplify(&expr).evaluate(&at).expect("bound");
        prop_assert!(same_value(original, simplified), "{} vs {}", original, simplified);
    }

    #[test]
    fn rmc_is_the_signed_cube_root_of_the_mean_cube(a in -10.0f64..10.0, b in -10.0f64..10.0, c in -10.0f64..10.0) {
        let expr = parse_prefix("(rmc x y z)").expect("parse");
        let got = expr.evaluate(&[a, b, c]).expect("bound");
        let mean = (a.powi(3) + b.powi(3) + c.powi(3)) / 3.0;
        prop_assert!((got - mean.cbrt()).abs() <= 1e-12 * mean.cbrt().abs().max(1.0));
        prop_assert!(got == 0.0 || got.signum() == mean.signum());
    }

    #[test]
    fn simplified_derivative_is_the_simplified_derivative(expr in any_expr()) {
        let direct = differentiate_simplified("x", &expr);
        let afterwards = simplify(&differentiate("x", &expr));
        prop_assert_eq!(direct.to_prefix(), afterwards.to_prefix());
    }

    #[test]
    fn derivative_matches_finite_difference(expr in smooth_expr(), x in -2.0f64..2.0) {
        let at = [x, 0.5, -1.5];
        let h = 1e-5;
        let value = |v: f64| expr.evaluate(&[v, at[1], at[2]]).expect("bound");
        let numeric = (value(x + h) - value(x - h)) / (2.0 * h);
        let symbolic = expr.differentiate("x").evaluate(&at).expect("bound");
        prop_assume!(numeric.is_finite() && symbolic.is_finite());
        let tolerance = 1e-4 * numeric.abs().max(symbolic.abs()).max(1.0);
        prop_assert!((numeric - symbolic).abs() <= tolerance, "{} vs {}", numeric, symbolic);
    }
}
