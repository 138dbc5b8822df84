//! Dead-code removal: the inverse of the insertion pass.
use log::debug;

use crate::ast::{Block, Expression, ExpressionStmt, Program, Statement};
use crate::error::PassError;
use crate::pipeline::Pass;

use super::ExpressionSimplifier;

const UNUSED_PREFIX: &str = "unused_";
const UNREACHABLE_MARKER: &str = "Unreachable";

/// Removes `unused_*` declarations and assignments, whole `if (0)`
/// constructs, inert expression statements and unreachable prints.
/// Surviving expressions are simplified on the way through, and emptied
/// blocks are elided.
#[derive(Debug, Default)]
pub struct DeadCodeRemover {
    simplifier: ExpressionSimplifier,
}

impl DeadCodeRemover {
    pub fn new() -> DeadCodeRemover {
        DeadCodeRemover::default()
    }

    fn clean_block(&self, stmts: Vec<Statement>) -> Vec<Statement> {
        let mut out = vec![];

        for stmt in stmts {
            match stmt {
                Statement::If(mut stmt) => {
                    if stmt.condition.as_int() == Some(0) {
                        debug!("removing if (0) construct");
                        continue;
                    }
                    stmt.condition = self.simplifier.simplify_expr(stmt.condition);
                    stmt.then_branch = Box::new(self.clean_branch(*stmt.then_branch));
                    if let Some(else_branch) = stmt.else_branch.take() {
                        stmt.else_branch = Some(Box::new(self.clean_branch(*else_branch)));
                    }
                    out.push(Statement::If(stmt));
                }
                Statement::VarDecl(mut decl) => {
                    if decl.name.starts_with(UNUSED_PREFIX) {
                        debug!("removing declaration of '{}'", decl.name);
                        continue;
                    }
                    if let Some(init) = decl.init.take() {
                        decl.init = Some(self.simplifier.simplify_expr(init));
                    }
                    out.push(Statement::VarDecl(decl));
                }
                Statement::Assignment(mut assign) => {
                    if assign.target.name.starts_with(UNUSED_PREFIX) {
                        debug!("removing assignment to '{}'", assign.target.name);
                        continue;
                    }
                    assign.value = self.simplifier.simplify_expr(assign.value);
                    out.push(Statement::Assignment(assign));
                }
                Statement::Block(block) => {
                    let items = self.clean_block(block.items);
                    if !items.is_empty() {
                        out.push(Statement::Block(Block::new(items)));
                    }
                }
                Statement::Expression(stmt) => {
                    let Some(expr) = stmt.expr else {
                        continue;
                    };
                    let expr = self.simplifier.simplify_expr(expr);
                    if matches!(expr, Expression::Literal(_)) {
                        continue;
                    }
                    if references_only_unused(&expr) {
                        continue;
                    }
                    out.push(Statement::Expression(ExpressionStmt { expr: Some(expr) }));
                }
                Statement::While(mut stmt) => {
                    stmt.condition = self.simplifier.simplify_expr(stmt.condition);
                    stmt.body = Box::new(self.clean_branch(*stmt.body));
                    out.push(Statement::While(stmt));
                }
                Statement::For(mut stmt) => {
                    for slot in [&mut stmt.init, &mut stmt.cond, &mut stmt.update] {
                        if let Some(expr) = slot.take() {
                            *slot = Some(self.simplifier.simplify_expr(expr));
                        }
                    }
                    stmt.body = Box::new(self.clean_branch(*stmt.body));
                    out.push(Statement::For(stmt));
                }
                Statement::Print(print) => {
                    if print.format.contains(UNREACHABLE_MARKER) {
                        debug!("removing unreachable print");
                        continue;
                    }
                    out.push(Statement::Print(print));
                }
                Statement::Switch(mut switch) => {
                    switch.scrutinee = self.simplifier.simplify_expr(switch.scrutinee);
                    for case in &mut switch.cases {
                        let items = std::mem::take(&mut case.body.items);
                        case.body.items = self.clean_block(items);
                    }
                    if let Some(default) = &mut switch.default {
                        let items = std::mem::take(&mut default.items);
                        default.items = self.clean_block(items);
                    }
                    out.push(Statement::Switch(switch));
                }
                stmt => out.push(stmt),
            }
        }

        out
    }

    /// Branch statements are cleaned as a one-element block, mirroring how
    /// the cleanup recurses everywhere else.
    fn clean_branch(&self, stmt: Statement) -> Statement {
        match stmt {
            Statement::Block(block) => Statement::Block(Block::new(self.clean_block(block.items))),
            stmt => Statement::Block(Block::new(self.clean_block(vec![stmt]))),
        }
    }
}

/// True when the expression touches at least one name and every touched
/// name carries the unused prefix. Calls disqualify removal.
fn references_only_unused(expr: &Expression) -> bool {
    let mut any = false;
    let mut all_unused = true;

    expr.for_each(&mut |e| {
        let name = match e {
            Expression::Variable(variable) => Some(variable.name.as_str()),
            Expression::Assign(assign) => Some(assign.target.name.as_str()),
            _ => None,
        };
        if let Some(name) = name {
            any = true;
            if !name.starts_with(UNUSED_PREFIX) {
                all_unused = false;
            }
        }
        if matches!(e, Expression::Call(_)) {
            all_unused = false;
        }
    });

    any && all_unused
}

impl Pass for DeadCodeRemover {
    fn name(&self) -> &'static str {
        "dead"
    }

    fn run(&mut self, program: &mut Program) -> Result<(), PassError> {
        for function in &mut program.functions {
            let body = std::mem::take(&mut function.body);
            function.body = self.clean_block(body);
        }
        Ok(())
    }
}
