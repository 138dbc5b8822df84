use pest::iterators::Pair;

use super::{Expression, ParseResult, Rule};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Return {
    pub value: Option<Expression>,
}

impl Return {
    pub fn from_pair(pair: Pair<Rule>) -> ParseResult<Return> {
        let value = match pair.into_inner().next() {
            Some(inner) => Some(Expression::from_pair(inner)?),
            None => None,
        };

        Ok(Return { value })
    }
}
