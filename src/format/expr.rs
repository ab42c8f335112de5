use crate::expr::{BinaryOp, Expr, UnaryOp};

/// Infix rendering with the fewest parentheses that keep the tree unambiguous.
/// Variadic operators print as calls, e.g. `sumCb(x, 2)`.
pub fn infix(expr: &Expr) -> String {
    fn pp(ctx: u8, expr: &Expr) -> String {
        match expr {
            Expr::Constant(v) => {
                let s = show_number(*v);
                if s.starts_with('-') && ctx > 1 {
                    format!("({s})")
                } else {
                    s
                }
            }
            Expr::Variable(v) => v.name().to_string(),

            Expr::Unary(UnaryOp::Negate, a) => bracket(ctx, 4, format!("-{}", pp(5, a))),

            Expr::Binary(op, a, b) => match op {
                BinaryOp::Add => bracket(ctx, 1, format!("{} + {}", pp(1, a), pp(2, b))),
                BinaryOp::Sub => bracket(ctx, 1, format!("{} - {}", pp(1, a), pp(2, b))),
                BinaryOp::Mul => bracket(ctx, 2, format!("{} * {}", pp(2, a), pp(2, b))),
                BinaryOp::Div => bracket(ctx, 2, format!("{} / {}", pp(2, a), pp(3, b))),
                BinaryOp::Pow => bracket(ctx, 3, format!("{}^{}", pp(5, a), pp(3, b))),
            },

            Expr::Variadic(node) => {
                let args: Vec<String> = node.operands().iter().map(|o| pp(0, o)).collect();
                format!("{}({})", node.op().symbol(), args.join(", "))
            }
        }
    }

    pp(0, expr)
}

/// Fully parenthesized prefix form, e.g. `(+ x (* 2 y))`.
pub fn prefix(expr: &Expr) -> String {
    let mut out = String::new();
    write_prefix(expr, &mut out);
    out
}

/// Fully parenthesized postfix form, e.g. `(x (2 y *) +)`.
pub fn postfix(expr: &Expr) -> String {
    let mut out = String::new();
    write_postfix(expr, &mut out);
    out
}

/// Flat reverse-Polish form without parentheses, e.g. `x 2 y * +`.
pub fn rpn(expr: &Expr) -> String {
    let mut out = String::new();
    write_rpn(expr, &mut out);
    out
}

impl Expr {
    pub fn to_infix(&self) -> String {
        infix(self)
    }

    pub fn to_prefix(&self) -> String {
        prefix(self)
    }

    pub fn to_postfix(&self) -> String {
        postfix(self)
    }

    pub fn to_rpn(&self) -> String {
        rpn(self)
    }
}

enum Node<'a> {
    Leaf(String),
    Operator(&'static str, Vec<&'a Expr>),
}

fn node(expr: &Expr) -> Node<'_> {
    match expr {
        Expr::Constant(v) => Node::Leaf(show_number(*v)),
        Expr::Variable(v) => Node::Leaf(v.name().to_string()),
        Expr::Unary(op, a) => Node::Operator(op.symbol(), vec![&**a]),
        Expr::Binary(op, a, b) => Node::Operator(op.symbol(), vec![&**a, &**b]),
        Expr::Variadic(node) => {
            Node::Operator(node.op().symbol(), node.operands().iter().collect())
        }
    }
}

fn write_prefix(expr: &Expr, out: &mut String) {
    match node(expr) {
        Node::Leaf(text) => out.push_str(&text),
        Node::Operator(symbol, operands) => {
            out.push('(');
            out.push_str(symbol);
            for operand in operands {
                out.push(' ');
                write_prefix(operand, out);
            }
            out.push(')');
        }
    }
}

fn write_postfix(expr: &Expr, out: &mut String) {
    match node(expr) {
        Node::Leaf(text) => out.push_str(&text),
        Node::Operator(symbol, operands) => {
            out.push('(');
            for operand in operands {
                write_postfix(operand, out);
                out.push(' ');
            }
            out.push_str(symbol);
            out.push(')');
        }
    }
}

fn write_rpn(expr: &Expr, out: &mut String) {
    match node(expr) {
        Node::Leaf(text) => out.push_str(&text),
        Node::Operator(symbol, operands) => {
            for operand in operands {
                write_rpn(operand, out);
                out.push(' ');
            }
            out.push_str(symbol);
        }
    }
}

/// Shortest round-trip text; infinities use the spelling the parsers read back.
fn show_number(value: f64) -> String {
    if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        format!("{value}")
    }
}

fn bracket(ctx: u8, prec: u8, body: String) -> String {
    if prec < ctx {
        format!("({body})")
    } else {
        body
    }
}
