use pest::iterators::Pair;

use super::{Expression, ParseError, ParseResult, Rule, Statement, TypeName};

/// A single local declaration. `int a = 1, b;` parses into one node per
/// declarator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDecl {
    pub var_type: TypeName,
    pub name: String,
    pub init: Option<Expression>,
}

impl VariableDecl {
    pub(crate) fn append_from_pair(pair: Pair<Rule>, out: &mut Vec<Statement>) -> ParseResult<()> {
        let mut inner = pair.clone().into_inner();

        let Some(type_pair) = inner.next() else {
            return Err(ParseError::new("Declaration without a type", &pair));
        };
        let var_type = TypeName::from_pair(type_pair)?;

        for declarator in inner {
            let mut parts = declarator.clone().into_inner();

            let Some(name) = parts.next() else {
                return Err(ParseError::new("Declarator without a name", &declarator));
            };
            let init = match parts.next() {
                Some(expr) => Some(Expression::from_pair(expr)?),
                None => None,
            };

            out.push(Statement::VarDecl(VariableDecl {
                var_type,
                name: name.as_str().to_owned(),
                init,
            }));
        }

        Ok(())
    }
}
