use pest::iterators::Pair;

use super::{ParseError, ParseResult, Rule};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Goto {
    pub label: String,
}

impl Goto {
    pub fn new(label: impl Into<String>) -> Goto {
        Goto {
            label: label.into(),
        }
    }

    pub fn from_pair(pair: Pair<Rule>) -> ParseResult<Goto> {
        let Some(label) = pair.clone().into_inner().next() else {
            return Err(ParseError::new("Goto without a target", &pair));
        };

        Ok(Goto {
            label: label.as_str().to_owned(),
        })
    }
}
