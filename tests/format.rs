use rexpr::{
    Expr, add, constant, neg, parse_functional, parse_postfix, parse_prefix, pow, simplify, sub,
};

fn var(name: &str) -> Expr {
    Expr::variable(name).expect("known variable")
}

#[test]
fn prefix_round_trips_text() {
    for input in [
        "(+ x (* 2 y))",
        "(negate (pow x 0.5))",
        "(sumCb x y (rmc z 1))",
        "(normal2 (/ x 3) -1.25)",
        "(greater4 x y z 0)",
    ] {
        assert_eq!(parse_prefix(input).expect("parse").to_prefix(), input);
    }
}

#[test]
fn postfix_round_trips_text() {
    for input in ["(x (2 y *) +)", "((x y -) negate)", "(x y z 1 normal4)"] {
        assert_eq!(parse_postfix(input).expect("parse").to_postfix(), input);
    }
}

#[test]
fn renders_all_notations() {
    let expr = parse_prefix("(+ x (* 2 y))").expect("parse");
    assert_eq!(expr.to_prefix(), "(+ x (* 2 y))");
    assert_eq!(expr.to_postfix(), "(x (2 y *) +)");
    assert_eq!(expr.to_rpn(), "x 2 y * +");
    assert_eq!(expr.to_infix(), "x + 2 * y");
    assert_eq!(expr.to_string(), "x + 2 * y");
}

#[test]
fn infix_brackets_only_where_needed() {
    let cases = [
        ("(* (+ x 1) y)", "(x + 1) * y"),
        ("(- x (- y z))", "x - (y - z)"),
        ("(- (- x y) z)", "x - y - z"),
        ("(/ x (* y z))", "x / (y * z)"),
        ("(pow x 2)", "x^2"),
        ("(pow (negate x) 2)", "(-x)^2"),
        ("(negate (pow x 2))", "-(x^2)"),
        ("(negate (negate x))", "-(-x)"),
        ("(+ x -3)", "x + (-3)"),
        ("-3", "-3"),
        ("(sumCb x (+ y 1))", "sumCb(x, y + 1)"),
        ("(* 2 (normal1 x))", "2 * normal1(x)"),
    ];
    for (input, expected) in cases {
        assert_eq!(parse_prefix(input).expect("parse").to_infix(), expected, "{input}");
    }
}

#[test]
fn numbers_use_shortest_form() {
    assert_eq!(constant(5.0).to_prefix(), "5");
    assert_eq!(constant(0.5).to_prefix(), "0.5");
    assert_eq!(constant(-2.25).to_rpn(), "-2.25");
    assert_eq!(sub(var("x"), constant(1e-3)).to_prefix(), "(- x 0.001)");
}

#[test]
fn rpn_feeds_the_functional_parser() {
    let expr = add(pow(var("x"), constant(2.0)), neg(var("y")));
    let text = expr.to_rpn();
    assert_eq!(text, "x 2 pow y negate +");
    assert_eq!(parse_functional(&text).expect("parse"), expr);
}

#[test]
fn infinities_print_in_a_readable_form() {
    let folded = simplify(&parse_prefix("(negate (pow 10 400))").expect("parse"));
    assert_eq!(folded.to_prefix(), "-Infinity");
    assert_eq!(parse_prefix(&folded.to_prefix()).expect("reparse"), folded);

    let expr = add(var("x"), constant(f64::INFINITY));
    assert_eq!(expr.to_postfix(), "(x Infinity +)");
    assert_eq!(parse_postfix(&expr.to_postfix()).expect("reparse"), expr);
    assert_eq!(expr.to_infix(), "x + Infinity");
}
