use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExprError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprError {
    #[error("unknown token `{token}` at position {position}")]
    UnknownToken { token: String, position: usize },
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("bracket mismatch at position {position}: {reason}")]
    BracketMismatch { position: usize, reason: &'static str },
    #[error("invalid number of arguments for {operator}: expected {expected}, found {found}")]
    ArityMismatch {
        operator: &'static str,
        expected: String,
        found: usize,
    },
    #[error("invalid expression")]
    InvalidExpression,
    #[error("expression nested deeper than {limit} levels")]
    DepthExceeded { limit: usize },
    #[error("no binding for variable {0}")]
    UnboundVariable(&'static str),
}
