//! Single-variable formula interpreter.
//!
//! Users type formulas such as `exp(-x)*sin(2*x)` or `x**3 - x - 2`. They are
//! parsed into an [`Expr`] tree and evaluated directly; nothing outside this
//! grammar can run:
//!
//! ```text
//! sum     := product (('+' | '-') product)*
//! product := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | power
//! power   := atom (('^' | '**') unary)?
//! atom    := number | x | pi | e | func '(' sum ')' | '(' sum ')'
//! func    := sin | cos | tan | exp | log | sqrt | abs
//! ```

mod parser;
mod sample;
mod token;

use thiserror::Error;

pub use parser::{BinOp, Expr, Func};
pub use sample::{SampledFunction, has_valid_data, linspace, sample, sample_or_nan};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    #[error("unexpected character '{ch}' at {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("invalid number '{text}' at {pos}")]
    InvalidNumber { text: String, pos: usize },

    #[error("unexpected '{found}' at {pos}")]
    UnexpectedToken { found: String, pos: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unknown name '{name}' at {pos}")]
    UnknownIdentifier { name: String, pos: usize },
}
