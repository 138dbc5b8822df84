use pest::iterators::Pair;

use super::{Block, ParseError, ParseResult, Param, Rule, Statement, TypeName};

/// A function definition. The body is the statement list of the top-level
/// block; parameters are positional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub return_type: TypeName,
    pub name: String,
    pub params: Vec<Param>,
    pub body: Vec<Statement>,
}

impl Function {
    pub fn from_pair(pair: Pair<Rule>) -> ParseResult<Function> {
        let mut inner = pair.clone().into_inner();

        let Some(type_pair) = inner.next() else {
            return Err(ParseError::new("Function without a return type", &pair));
        };
        let return_type = TypeName::from_pair(type_pair)?;

        let Some(name) = inner.next() else {
            return Err(ParseError::new("Function without a name", &pair));
        };
        let name = name.as_str().to_owned();

        let Some(mut next) = inner.next() else {
            return Err(ParseError::new("Function without a body", &pair));
        };

        let mut params = vec![];
        if next.as_rule() == Rule::paramList {
            for param in next.into_inner() {
                params.push(Param::from_pair(param)?);
            }

            let Some(block) = inner.next() else {
                return Err(ParseError::new("Function without a body", &pair));
            };
            next = block;
        }

        Ok(Function {
            return_type,
            name,
            params,
            body: Block::from_pair(next)?.items,
        })
    }
}
