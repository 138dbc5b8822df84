use pest::iterators::Pair;

use super::{ParseError, ParseResult, Rule, TypeName};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub param_type: TypeName,
    pub name: String,
}

impl Param {
    pub fn from_pair(pair: Pair<Rule>) -> ParseResult<Param> {
        let mut inner = pair.clone().into_inner();

        let Some(param_type) = inner.next() else {
            return Err(ParseError::new("Parameter without a type", &pair));
        };
        let Some(name) = inner.next() else {
            return Err(ParseError::new("Parameter without a name", &pair));
        };

        Ok(Param {
            param_type: TypeName::from_pair(param_type)?,
            name: name.as_str().to_owned(),
        })
    }
}
