use pest::iterators::Pair;

use super::{Expression, ParseError, ParseResult, Rule, Statement};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForStmt {
    pub init: Option<Expression>,
    pub cond: Option<Expression>,
    pub update: Option<Expression>,
    pub body: Box<Statement>,
}

impl ForStmt {
    pub fn from_pair(pair: Pair<Rule>) -> ParseResult<ForStmt> {
        let mut inner = pair.clone().into_inner();

        let init = Self::slot(inner.next(), &pair)?;
        let cond = Self::slot(inner.next(), &pair)?;
        let update = Self::slot(inner.next(), &pair)?;

        let Some(body) = inner.next() else {
            return Err(ParseError::new("For without a body", &pair));
        };

        Ok(ForStmt {
            init,
            cond,
            update,
            body: Box::new(Statement::from_pair(body)?),
        })
    }

    fn slot(pair: Option<Pair<Rule>>, parent: &Pair<Rule>) -> ParseResult<Option<Expression>> {
        let Some(pair) = pair else {
            return Err(ParseError::new("Malformed for header", parent));
        };

        match pair.into_inner().next() {
            Some(inner) => Ok(Some(Expression::from_pair(inner)?)),
            None => Ok(None),
        }
    }
}
