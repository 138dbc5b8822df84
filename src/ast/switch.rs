use pest::iterators::Pair;

use super::{Block, Expression, Literal, ParseError, ParseResult, Rule, Statement};

/// One `case` arm. The label records the jump target when the body is a
/// single goto (the dispatcher shape); otherwise it is synthesized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchCase {
    pub value: Literal,
    pub label: String,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Switch {
    pub scrutinee: Expression,
    pub cases: Vec<SwitchCase>,
    pub default: Option<Block>,
}

impl Switch {
    pub fn from_pair(pair: Pair<Rule>) -> ParseResult<Switch> {
        let mut inner = pair.clone().into_inner();

        let Some(scrutinee) = inner.next() else {
            return Err(ParseError::new("Switch without a scrutinee", &pair));
        };
        let scrutinee = Expression::from_pair(scrutinee)?;

        let mut cases = vec![];
        let mut default = None;

        for arm in inner {
            match arm.as_rule() {
                Rule::caseArm => {
                    let case = SwitchCase::from_pair(arm, cases.len())?;
                    cases.push(case);
                }
                Rule::defaultArm => {
                    let mut items = vec![];
                    for statement in arm.into_inner() {
                        Statement::append_from_pair(statement, &mut items)?;
                    }
                    default = Some(Block::new(items));
                }
                rule => {
                    return Err(ParseError::new(
                        format!("Unexpected switch arm {rule:?}"),
                        &arm,
                    ))
                }
            }
        }

        Ok(Switch {
            scrutinee,
            cases,
            default,
        })
    }
}

impl SwitchCase {
    fn from_pair(pair: Pair<Rule>, index: usize) -> ParseResult<SwitchCase> {
        let mut inner = pair.clone().into_inner();

        let Some(value) = inner.next() else {
            return Err(ParseError::new("Case without a value", &pair));
        };
        let value = Literal::from_pair(value)?;

        let mut items = vec![];
        for statement in inner {
            Statement::append_from_pair(statement, &mut items)?;
        }

        let label = match items.first() {
            Some(Statement::Goto(goto)) => goto.label.clone(),
            _ => format!("case_{index}"),
        };

        Ok(SwitchCase {
            value,
            label,
            body: Block::new(items),
        })
    }
}
