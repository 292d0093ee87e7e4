//! Operator tokens as they appear in arithmetic expressions.

use core::fmt;
use core::str::FromStr;

use crate::kind::Kind;

use super::{BinaryFloatOp, UnaryFloatOp};

/// Every operator this crate evaluates.
///
/// Tokens are the lower-case names used in postfix expressions: `not`,
/// `where`, `sqrt`, `log`, `log10`, `pow`, `atan2`, and one cast token per
/// kind name (`uint8`, `int32`, `float64`, ...). Packed bits have no cast
/// token since no operation accepts them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Not,
    Where,
    Cast(Kind),
    Unary(UnaryFloatOp),
    Binary(BinaryFloatOp),
}

impl Operator {
    pub fn name(self) -> &'static str {
        match self {
            Operator::Not => "not",
            Operator::Where => "where",
            Operator::Cast(kind) => kind.name(),
            Operator::Unary(f) => f.name(),
            Operator::Binary(f) => f.name(),
        }
    }

    /// Number of operands popped from the expression stack.
    pub fn arity(self) -> usize {
        match self {
            Operator::Not | Operator::Cast(_) | Operator::Unary(_) => 1,
            Operator::Binary(_) => 2,
            Operator::Where => 3,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a token names no operator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{0}` is not a recognized operator")]
pub struct ParseOperatorError(pub String);

impl FromStr for Operator {
    type Err = ParseOperatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "not" => Operator::Not,
            "where" => Operator::Where,
            "sqrt" => Operator::Unary(UnaryFloatOp::Sqrt),
            "log" => Operator::Unary(UnaryFloatOp::Log),
            "log10" => Operator::Unary(UnaryFloatOp::Log10),
            "pow" => Operator::Binary(BinaryFloatOp::Pow),
            "atan2" => Operator::Binary(BinaryFloatOp::Atan2),
            other => match other.parse::<Kind>() {
                Ok(Kind::Bit) | Err(_) => return Err(ParseOperatorError(other.to_owned())),
                Ok(kind) => Operator::Cast(kind),
            },
        })
    }
}
