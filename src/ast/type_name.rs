use std::fmt::Display;
use std::str::FromStr;

use pest::iterators::Pair;

use super::{ParseError, ParseResult, Rule};

/// The spellable Mini-C types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeName {
    Int,
    Bool,
    Char,
    Str,
    Void,
}

#[derive(Debug)]
pub struct UnknownTypeError(pub(crate) String);

impl TypeName {
    pub fn from_pair(pair: Pair<Rule>) -> ParseResult<TypeName> {
        pair.as_str()
            .parse()
            .map_err(|UnknownTypeError(message)| ParseError::new(message, &pair))
    }
}

impl FromStr for TypeName {
    type Err = UnknownTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int" => Ok(TypeName::Int),
            "bool" => Ok(TypeName::Bool),
            "char" => Ok(TypeName::Char),
            "string" => Ok(TypeName::Str),
            "void" => Ok(TypeName::Void),
            _ => Err(UnknownTypeError(format!("Unknown type '{s}'"))),
        }
    }
}

impl Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TypeName::Int => "int",
            TypeName::Bool => "bool",
            TypeName::Char => "char",
            TypeName::Str => "string",
            TypeName::Void => "void",
        })
    }
}
