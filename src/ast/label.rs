use pest::iterators::Pair;

use super::{ParseError, ParseResult, Rule};

/// A jump target. Referenced by name from [`super::Goto`] and
/// [`super::SwitchCase`], never by pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub name: String,
}

impl Label {
    pub fn new(name: impl Into<String>) -> Label {
        Label { name: name.into() }
    }

    pub fn from_pair(pair: Pair<Rule>) -> ParseResult<Label> {
        let Some(name) = pair.clone().into_inner().next() else {
            return Err(ParseError::new("Label without a name", &pair));
        };

        Ok(Label {
            name: name.as_str().to_owned(),
        })
    }
}
