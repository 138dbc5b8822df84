use pest::iterators::Pair;

use super::{
    Assignment, Block, Expression, ExpressionStmt, ForStmt, Goto, IfStmt, Label, ParseError,
    ParseResult, Print, Return, Rule, Scan, Switch, VariableDecl, WhileStmt,
};

/// Statement variants of the Mini-C AST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    VarDecl(VariableDecl),
    Assignment(Assignment),
    Expression(ExpressionStmt),
    Return(Return),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Block(Block),
    Print(Print),
    Scan(Scan),
    Label(Label),
    Goto(Goto),
    Switch(Switch),
}

impl Statement {
    /// Build a single statement. A declaration with several declarators
    /// becomes a block so that statement positions stay single.
    pub fn from_pair(pair: Pair<Rule>) -> ParseResult<Statement> {
        let mut items = vec![];
        Self::append_from_pair(pair, &mut items)?;

        if items.len() == 1 {
            Ok(items.remove(0))
        } else {
            Ok(Statement::Block(Block::new(items)))
        }
    }

    /// Build the statements of one statement-level pair into `out`.
    /// Multi-declarator declarations expand into several statements.
    pub(crate) fn append_from_pair(pair: Pair<Rule>, out: &mut Vec<Statement>) -> ParseResult<()> {
        match pair.as_rule() {
            Rule::varDecl => VariableDecl::append_from_pair(pair, out)?,
            Rule::printStmt => out.push(Statement::Print(Print::from_pair(pair)?)),
            Rule::scanStmt => out.push(Statement::Scan(Scan::from_pair(pair)?)),
            Rule::returnStmt => out.push(Statement::Return(Return::from_pair(pair)?)),
            Rule::ifStmt => out.push(Statement::If(IfStmt::from_pair(pair)?)),
            Rule::whileStmt => out.push(Statement::While(WhileStmt::from_pair(pair)?)),
            Rule::forStmt => out.push(Statement::For(ForStmt::from_pair(pair)?)),
            Rule::switchStmt => out.push(Statement::Switch(Switch::from_pair(pair)?)),
            Rule::gotoStmt => out.push(Statement::Goto(Goto::from_pair(pair)?)),
            Rule::labelStmt => out.push(Statement::Label(Label::from_pair(pair)?)),
            Rule::block => out.push(Statement::Block(Block::from_pair(pair)?)),
            Rule::exprStmt => {
                let statement = match pair.into_inner().next() {
                    Some(inner) => Statement::from_expr(Expression::from_pair(inner)?),
                    None => Statement::Expression(ExpressionStmt { expr: None }),
                };
                out.push(statement);
            }
            rule => {
                return Err(ParseError::new(
                    format!("Unexpected statement rule {rule:?}"),
                    &pair,
                ))
            }
        }

        Ok(())
    }

    /// Statement-ify an expression; a top-level assignment becomes the
    /// dedicated assignment statement.
    pub fn from_expr(expr: Expression) -> Statement {
        match expr {
            Expression::Assign(assign) => Statement::Assignment(*assign),
            expr => Statement::Expression(ExpressionStmt { expr: Some(expr) }),
        }
    }
}
