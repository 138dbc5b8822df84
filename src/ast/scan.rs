use pest::iterators::Pair;

use super::literal::unescape_quoted;
use super::{ParseError, ParseResult, Rule};

/// A `scanf` statement. Targets are stored as bare names, without the
/// address-of sigil.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scan {
    pub format: String,
    pub targets: Vec<String>,
}

impl Scan {
    pub fn from_pair(pair: Pair<Rule>) -> ParseResult<Scan> {
        let mut inner = pair.clone().into_inner();

        let Some(format) = inner.next() else {
            return Err(ParseError::new("scanf without a format string", &pair));
        };
        let format = unescape_quoted(&format)?;

        let targets = inner.map(|target| target.as_str().to_owned()).collect();

        Ok(Scan { format, targets })
    }
}
