use std::fmt::Display;
use std::str::FromStr;

use super::UnknownOpError;

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
    Plus,
}

impl FromStr for UnaryOp {
    type Err = UnknownOpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "-" => Ok(UnaryOp::Neg),
            "!" => Ok(UnaryOp::Not),
            "+" => Ok(UnaryOp::Plus),
            _ => Err(UnknownOpError(format!("Unexpected unary operator '{s}'"))),
        }
    }
}

impl Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
            UnaryOp::Plus => "+",
        })
    }
}
