use pest::iterators::Pair;

use super::{Expression, ParseError, ParseResult, Rule, Statement};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfStmt {
    pub condition: Expression,
    pub then_branch: Box<Statement>,
    pub else_branch: Option<Box<Statement>>,
}

impl IfStmt {
    pub fn from_pair(pair: Pair<Rule>) -> ParseResult<IfStmt> {
        let mut inner = pair.clone().into_inner();

        let Some(condition) = inner.next() else {
            return Err(ParseError::new("If without a condition", &pair));
        };
        let Some(then_branch) = inner.next() else {
            return Err(ParseError::new("If without a body", &pair));
        };

        let condition = Expression::from_pair(condition)?;
        let then_branch = Box::new(Statement::from_pair(then_branch)?);
        let else_branch = match inner.next() {
            Some(branch) => Some(Box::new(Statement::from_pair(branch)?)),
            None => None,
        };

        Ok(IfStmt {
            condition,
            then_branch,
            else_branch,
        })
    }
}
