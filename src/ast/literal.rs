use pest::iterators::Pair;
use unescape::unescape;

use super::{ParseError, ParseResult, Rule};

/// Literal constants. Char and string literals are stored unescaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Int(i64),
    Bool(bool),
    Char(char),
    Str(String),
}

impl Literal {
    pub fn from_pair(pair: Pair<Rule>) -> ParseResult<Literal> {
        let Some(inner) = pair.clone().into_inner().next() else {
            return Err(ParseError::new("Empty literal", &pair));
        };

        match inner.as_rule() {
            Rule::number => inner.as_str().parse::<i64>().map(Literal::Int).map_err(|_| {
                ParseError::new(format!("Invalid integer '{}'", inner.as_str()), &inner)
            }),
            Rule::boolean => Ok(Literal::Bool(inner.as_str() == "true")),
            Rule::charLit => {
                let body = unescape_quoted(&inner)?;
                match body.chars().next() {
                    Some(c) => Ok(Literal::Char(c)),
                    None => Err(ParseError::new("Empty character literal", &inner)),
                }
            }
            Rule::string => Ok(Literal::Str(unescape_quoted(&inner)?)),
            rule => Err(ParseError::new(
                format!("Unexpected literal rule {rule:?}"),
                &inner,
            )),
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Literal::Int(value) => Some(*value),
            _ => None,
        }
    }
}

/// Strip the surrounding quotes of a char or string literal and resolve its
/// escape sequences.
pub(crate) fn unescape_quoted(pair: &Pair<Rule>) -> ParseResult<String> {
    let raw = pair.as_str();
    let body = &raw[1..raw.len() - 1];

    unescape(body).ok_or_else(|| ParseError::new(format!("Invalid escape in {raw}"), pair))
}
