use pest::iterators::Pair;

use super::{ParseResult, Rule, Statement};

/// A brace-delimited scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub items: Vec<Statement>,
}

impl Block {
    pub fn new(items: Vec<Statement>) -> Block {
        Block { items }
    }

    pub fn from_pair(pair: Pair<Rule>) -> ParseResult<Block> {
        let mut items = vec![];

        for statement in pair.into_inner() {
            Statement::append_from_pair(statement, &mut items)?;
        }

        Ok(Block { items })
    }
}
