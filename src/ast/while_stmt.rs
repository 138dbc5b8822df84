use pest::iterators::Pair;

use super::{Expression, ParseError, ParseResult, Rule, Statement};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhileStmt {
    pub condition: Expression,
    pub body: Box<Statement>,
}

impl WhileStmt {
    pub fn from_pair(pair: Pair<Rule>) -> ParseResult<WhileStmt> {
        let mut inner = pair.clone().into_inner();

        let Some(condition) = inner.next() else {
            return Err(ParseError::new("While without a condition", &pair));
        };
        let Some(body) = inner.next() else {
            return Err(ParseError::new("While without a body", &pair));
        };

        Ok(WhileStmt {
            condition: Expression::from_pair(condition)?,
            body: Box::new(Statement::from_pair(body)?),
        })
    }
}
