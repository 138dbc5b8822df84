use pest::iterators::Pair;

use super::{
    Assignment, BinaryExpr, BinaryOp, FnCall, Literal, ParseError, ParseResult, Rule, UnaryExpr,
    UnaryOp, UnknownOpError, Variable,
};

/// Expression variants of the Mini-C AST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Literal(Literal),
    Variable(Variable),
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Call(FnCall),
    Assign(Box<Assignment>),
}

impl Expression {
    pub fn from_pair(pair: Pair<Rule>) -> ParseResult<Expression> {
        match pair.as_rule() {
            Rule::assignExpr => {
                let mut inner = pair.clone().into_inner();
                match (inner.next(), inner.next()) {
                    (Some(only), None) => Expression::from_pair(only),
                    (Some(target), Some(value)) => Ok(Expression::Assign(Box::new(Assignment {
                        target: Variable::from_pair(target),
                        value: Expression::from_pair(value)?,
                    }))),
                    _ => Err(ParseError::new("Empty assignment expression", &pair)),
                }
            }
            Rule::orExpr
            | Rule::andExpr
            | Rule::eqExpr
            | Rule::relExpr
            | Rule::addExpr
            | Rule::mulExpr => Self::fold_binary(pair),
            Rule::unaryExpr => {
                let mut inner = pair.clone().into_inner();
                match (inner.next(), inner.next()) {
                    (Some(only), None) => Expression::from_pair(only),
                    (Some(op), Some(operand)) => {
                        let op = op
                            .as_str()
                            .parse::<UnaryOp>()
                            .map_err(|UnknownOpError(message)| ParseError::new(message, &pair))?;
                        Ok(Expression::Unary(UnaryExpr::new(
                            op,
                            Expression::from_pair(operand)?,
                        )))
                    }
                    _ => Err(ParseError::new("Empty unary expression", &pair)),
                }
            }
            Rule::primary => {
                let Some(inner) = pair.clone().into_inner().next() else {
                    return Err(ParseError::new("Empty primary expression", &pair));
                };
                Expression::from_pair(inner)
            }
            Rule::funcCall => Ok(Expression::Call(FnCall::from_pair(pair)?)),
            Rule::literal => Ok(Expression::Literal(Literal::from_pair(pair)?)),
            Rule::ident => Ok(Expression::Variable(Variable::from_pair(pair))),
            rule => Err(ParseError::new(
                format!("Unexpected expression rule {rule:?}"),
                &pair,
            )),
        }
    }

    /// Left-fold one layer of the precedence climb: `operand (op operand)*`.
    fn fold_binary(pair: Pair<Rule>) -> ParseResult<Expression> {
        let mut inner = pair.clone().into_inner();

        let Some(first) = inner.next() else {
            return Err(ParseError::new("Empty binary expression", &pair));
        };
        let mut expr = Expression::from_pair(first)?;

        while let Some(op_pair) = inner.next() {
            let Some(rhs_pair) = inner.next() else {
                return Err(ParseError::new("Operator without right operand", &pair));
            };

            let op = op_pair
                .as_str()
                .parse::<BinaryOp>()
                .map_err(|UnknownOpError(message)| ParseError::new(message, &op_pair))?;
            expr = Expression::Binary(BinaryExpr::new(op, expr, Expression::from_pair(rhs_pair)?));
        }

        Ok(expr)
    }

    pub fn int(value: i64) -> Expression {
        Expression::Literal(Literal::Int(value))
    }

    pub fn var(name: impl Into<String>) -> Expression {
        Expression::Variable(Variable::new(name))
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Expression::Literal(literal) => literal.as_int(),
            _ => None,
        }
    }
}
