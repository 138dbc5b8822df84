use super::Expression;

/// An expression evaluated for its side effect, or the empty statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionStmt {
    pub expr: Option<Expression>,
}
