use pest::iterators::Pair;

use super::literal::unescape_quoted;
use super::{Expression, ParseError, ParseResult, Rule};

/// A `printf` statement. The format string is stored unescaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Print {
    pub format: String,
    pub args: Vec<Expression>,
}

impl Print {
    pub fn from_pair(pair: Pair<Rule>) -> ParseResult<Print> {
        let mut inner = pair.clone().into_inner();

        let Some(format) = inner.next() else {
            return Err(ParseError::new("printf without a format string", &pair));
        };
        let format = unescape_quoted(&format)?;

        let mut args = vec![];
        for arg in inner {
            args.push(Expression::from_pair(arg)?);
        }

        Ok(Print { format, args })
    }
}
