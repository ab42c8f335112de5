//! Expression tree definitions and helpers.

use std::f64::consts::{PI, TAU};
use std::fmt;

use num_traits::{One, Zero};

use crate::error::{ExprError, Result};

/// Every variable name, in binding order.
pub const VARIABLES: [&str; 4] = ["x", "y", "z", "t"];

/// The bracketed parsers only know the first three variables; `t` is functional-only.
pub const TREE_VARIABLE_COUNT: usize = 3;

pub const NAMED_CONSTANTS: [(&str, f64); 3] = [
    ("pi", PI),
    ("tau", TAU),
    ("phi", 1.618_033_988_749_895),
];

const NORMAL_SYMBOLS: [&str; Dimension::MAX] = ["normal1", "normal2", "normal3", "normal4", "normal5"];

/// A variable from [`VARIABLES`], stored by position.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Variable(u8);

impl Variable {
    pub fn new(index: usize) -> Option<Self> {
        (index < VARIABLES.len()).then_some(Variable(index as u8))
    }

    pub fn from_name(name: &str) -> Option<Self> {
        VARIABLES
            .iter()
            .position(|known| *known == name)
            .and_then(Variable::new)
    }

    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    pub fn name(self) -> &'static str {
        VARIABLES[self.index()]
    }
}

/// Dimension of a `normalN` density, always within `1..=5`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Dimension(u8);

impl Dimension {
    pub const MAX: usize = 5;

    pub fn new(n: usize) -> Option<Self> {
        (1..=Self::MAX).contains(&n).then_some(Dimension(n as u8))
    }

    pub fn get(self) -> usize {
        usize::from(self.0)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum UnaryOp {
    Negate,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum VariadicOp {
    /// Sum of cubes.
    SumCb,
    /// Signed cube root of the mean cube.
    Rmc,
    /// Standard normal density over `n` coordinates.
    Normal(Dimension),
    /// 1 when the three operands strictly increase, else 0.
    Less3,
    /// 1 when the four operands strictly decrease, else 0.
    Greater4,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Negate => "negate",
        }
    }

    pub fn apply(self, value: f64) -> f64 {
        match self {
            UnaryOp::Negate => -value,
        }
    }
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "pow",
        }
    }

    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
            BinaryOp::Mul => a * b,
            BinaryOp::Div => a / b,
            BinaryOp::Pow => a.powf(b),
        }
    }
}

impl VariadicOp {
    pub fn symbol(self) -> &'static str {
        match self {
            VariadicOp::SumCb => "sumCb",
            VariadicOp::Rmc => "rmc",
            VariadicOp::Normal(n) => NORMAL_SYMBOLS[n.get() - 1],
            VariadicOp::Less3 => "less3",
            VariadicOp::Greater4 => "greater4",
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            VariadicOp::SumCb | VariadicOp::Rmc => Arity::AtLeastOne,
            VariadicOp::Normal(n) => Arity::Exact(n.get()),
            VariadicOp::Less3 => Arity::Exact(3),
            VariadicOp::Greater4 => Arity::Exact(4),
        }
    }

    pub fn apply(self, values: &[f64]) -> f64 {
        match self {
            VariadicOp::SumCb => sum_of_cubes(values),
            VariadicOp::Rmc => (sum_of_cubes(values) / values.len() as f64).cbrt(),
            VariadicOp::Normal(n) => {
                let squares: f64 = values.iter().map(|v| v * v).sum();
                (-squares / 2.0).exp() / TAU.powf(n.get() as f64 / 2.0)
            }
            VariadicOp::Less3 => indicator(values.windows(2).all(|w| w[0] < w[1])),
            VariadicOp::Greater4 => indicator(values.windows(2).all(|w| w[0] > w[1])),
        }
    }
}

fn sum_of_cubes(values: &[f64]) -> f64 {
    values.iter().map(|v| v.powi(3)).sum()
}

fn indicator(holds: bool) -> f64 {
    if holds { 1.0 } else { 0.0 }
}

/// How many operands an operator takes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Arity {
    Exact(usize),
    AtLeastOne,
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == n,
            Arity::AtLeastOne => count >= 1,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "{n}"),
            Arity::AtLeastOne => write!(f, "at least 1"),
        }
    }
}

/// An entry of the operator table shared by all parsers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Operator {
    Unary(UnaryOp),
    Binary(BinaryOp),
    Variadic(VariadicOp),
}

pub const OPERATORS: [Operator; 15] = [
    Operator::Binary(BinaryOp::Add),
    Operator::Binary(BinaryOp::Sub),
    Operator::Binary(BinaryOp::Mul),
    Operator::Binary(BinaryOp::Div),
    Operator::Binary(BinaryOp::Pow),
    Operator::Unary(UnaryOp::Negate),
    Operator::Variadic(VariadicOp::SumCb),
    Operator::Variadic(VariadicOp::Rmc),
    Operator::Variadic(VariadicOp::Normal(Dimension(1))),
    Operator::Variadic(VariadicOp::Normal(Dimension(2))),
    Operator::Variadic(VariadicOp::Normal(Dimension(3))),
    Operator::Variadic(VariadicOp::Normal(Dimension(4))),
    Operator::Variadic(VariadicOp::Normal(Dimension(5))),
    Operator::Variadic(VariadicOp::Less3),
    Operator::Variadic(VariadicOp::Greater4),
];

impl Operator {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        OPERATORS.iter().copied().find(|op| op.symbol() == symbol)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Unary(op) => op.symbol(),
            Operator::Binary(op) => op.symbol(),
            Operator::Variadic(op) => op.symbol(),
        }
    }

    /// The operand count a node needs. Parsers consume exactly this many operands,
    /// so a node always receives the operands its numeric transform expects.
    pub fn arity(self) -> Arity {
        match self {
            Operator::Unary(_) => Arity::Exact(1),
            Operator::Binary(_) => Arity::Exact(2),
            Operator::Variadic(op) => op.arity(),
        }
    }

    /// Builds a node, rejecting operand counts the arity does not accept.
    pub fn build(self, operands: Vec<Expr>) -> Result<Expr> {
        let arity = self.arity();
        let found = operands.len();
        let mismatch = || ExprError::ArityMismatch {
            operator: self.symbol(),
            expected: arity.to_string(),
            found,
        };
        if !arity.accepts(found) {
            return Err(mismatch());
        }
        match self {
            Operator::Unary(op) => {
                let [a]: [Expr; 1] = operands.try_into().map_err(|_| mismatch())?;
                Ok(Expr::Unary(op, a.boxed()))
            }
            Operator::Binary(op) => {
                let [a, b]: [Expr; 2] = operands.try_into().map_err(|_| mismatch())?;
                Ok(Expr::Binary(op, a.boxed(), b.boxed()))
            }
            Operator::Variadic(op) => Ok(Expr::Variadic(VariadicNode { op, operands })),
        }
    }
}

/// A variadic operator together with its operands.
///
/// Fields are private: the only public way in is [`Operator::build`] (or
/// [`Expr::variadic`] / [`Expr::normal`]), so the operand count always
/// satisfies the operator's arity.
#[derive(Clone, PartialEq, Debug)]
pub struct VariadicNode {
    op: VariadicOp,
    operands: Vec<Expr>,
}

impl VariadicNode {
    pub fn op(&self) -> VariadicOp {
        self.op
    }

    pub fn operands(&self) -> &[Expr] {
        &self.operands
    }

    /// Same operator, each operand replaced by `f(operand)`.
    pub(crate) fn map_operands(&self, f: impl FnMut(&Expr) -> Expr) -> Self {
        VariadicNode {
            op: self.op,
            operands: self.operands.iter().map(f).collect(),
        }
    }

    pub(crate) fn into_map_operands(self, f: impl FnMut(Expr) -> Expr) -> Self {
        VariadicNode {
            op: self.op,
            operands: self.operands.into_iter().map(f).collect(),
        }
    }

    /// Same operands under another operator of the same arity.
    pub(crate) fn with_op(&self, op: VariadicOp) -> Self {
        debug_assert_eq!(op.arity(), self.op.arity());
        VariadicNode {
            op,
            operands: self.operands.clone(),
        }
    }
}

/// Immutable expression tree. Transformations always build new trees.
///
/// Variadic nodes wrap a [`VariadicNode`], which can only be built with a
/// valid operand count.
#[derive(Clone, PartialEq, Debug)]
pub enum Expr {
    Constant(f64),
    Variable(Variable),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    Variadic(VariadicNode),
}

impl Expr {
    pub fn constant(value: f64) -> Self {
        Expr::Constant(value)
    }

    pub fn variable(name: &str) -> Option<Self> {
        Variable::from_name(name).map(Expr::Variable)
    }

    pub fn named_constant(name: &str) -> Option<Self> {
        NAMED_CONSTANTS
            .iter()
            .find(|(known, _)| *known == name)
            .map(|&(_, value)| Expr::Constant(value))
    }

    pub fn variadic(op: VariadicOp, operands: Vec<Expr>) -> Result<Self> {
        Operator::Variadic(op).build(operands)
    }

    pub fn normal(dimension: usize, operands: Vec<Expr>) -> Result<Self> {
        let n = Dimension::new(dimension).ok_or(ExprError::ArityMismatch {
            operator: "normal",
            expected: format!("1..={}", Dimension::MAX),
            found: dimension,
        })?;
        Expr::variadic(VariadicOp::Normal(n), operands)
    }

    pub fn as_constant(&self) -> Option<f64> {
        if let Expr::Constant(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Expr::Constant(v) if v.is_zero())
    }

    pub fn is_one(&self) -> bool {
        matches!(self, Expr::Constant(v) if v.is_one())
    }

    /// Nesting depth: leaves are 0, every operator node adds one level.
    pub fn depth(&self) -> usize {
        match self {
            Expr::Constant(_) | Expr::Variable(_) => 0,
            Expr::Unary(_, a) => a.depth() + 1,
            Expr::Binary(_, a, b) => a.depth().max(b.depth()) + 1,
            Expr::Variadic(node) => {
                node.operands().iter().map(Expr::depth).max().unwrap_or(0) + 1
            }
        }
    }

    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::format::infix(self))
    }
}

pub fn zero() -> Expr {
    Expr::Constant(0.0)
}

pub fn one() -> Expr {
    Expr::Constant(1.0)
}

pub fn constant(value: f64) -> Expr {
    Expr::Constant(value)
}

pub fn add(a: Expr, b: Expr) -> Expr {
    Expr::Binary(BinaryOp::Add, a.boxed(), b.boxed())
}

pub fn sub(a: Expr, b: Expr) -> Expr {
    Expr::Binary(BinaryOp::Sub, a.boxed(), b.boxed())
}

pub fn mul(a: Expr, b: Expr) -> Expr {
    Expr::Binary(BinaryOp::Mul, a.boxed(), b.boxed())
}

pub fn div(a: Expr, b: Expr) -> Expr {
    Expr::Binary(BinaryOp::Div, a.boxed(), b.boxed())
}

pub fn pow(base: Expr, exp: Expr) -> Expr {
    Expr::Binary(BinaryOp::Pow, base.boxed(), exp.boxed())
}

pub fn neg(a: Expr) -> Expr {
    Expr::Unary(UnaryOp::Negate, a.boxed())
}
