use pest::iterators::Pair;

use super::{Expression, ParseError, ParseResult, Rule};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FnCall {
    pub name: String,
    pub args: Vec<Expression>,
}

impl FnCall {
    pub fn from_pair(pair: Pair<Rule>) -> ParseResult<FnCall> {
        let mut inner = pair.clone().into_inner();

        let Some(name) = inner.next() else {
            return Err(ParseError::new("Call without a callee", &pair));
        };

        let mut args = vec![];
        if let Some(arg_list) = inner.next() {
            for arg in arg_list.into_inner() {
                args.push(Expression::from_pair(arg)?);
            }
        }

        Ok(FnCall {
            name: name.as_str().to_owned(),
            args,
        })
    }
}
