//! Dead-code insertion: semantically inert declarations, branches and
//! expression statements.
//!
//! The `unused_` prefix and the `Unreachable` marker string are the
//! contract consumed by the symmetric removal pass.
use std::collections::HashSet;

use log::debug;

use crate::ast::{
    Assignment, Block, Expression, ExpressionStmt, Function, IfStmt, Print, Program, Statement,
    TypeName, VariableDecl,
};
use crate::error::PassError;
use crate::pipeline::Pass;

const UNUSED_PREFIX: &str = "unused_";
const UNREACHABLE_MARKER: &str = "Unreachable code";

#[derive(Debug, Default)]
pub struct DeadCodeInserter {
    counter: usize,
}

impl DeadCodeInserter {
    pub fn new() -> DeadCodeInserter {
        DeadCodeInserter::default()
    }

    /// Draw a fresh name that collides with nothing already in scope.
    fn fresh_unused(&mut self, taken: &mut HashSet<String>) -> String {
        loop {
            let name = format!("{UNUSED_PREFIX}{}", self.counter);
            self.counter += 1;
            if taken.insert(name.clone()) {
                return name;
            }
        }
    }

    fn insert_into(&mut self, function: &mut Function) {
        let mut taken: HashSet<String> = crate::ast::visit::declared_names(&function.body)
            .into_iter()
            .chain(crate::ast::visit::used_names(&function.body))
            .chain(function.params.iter().map(|param| param.name.clone()))
            .collect();

        let first = self.fresh_unused(&mut taken);
        let second = self.fresh_unused(&mut taken);
        let filler = (self.counter as i64 * 7 + 13) % 100;

        debug!("inserting dead code into function '{}'", function.name);

        let body = std::mem::take(&mut function.body);
        let half = body.len() / 2;
        let mut mid_inserted = false;
        let mut new_body = vec![
            Statement::VarDecl(VariableDecl {
                var_type: TypeName::Int,
                name: first,
                init: Some(Expression::int(filler)),
            }),
            Statement::VarDecl(VariableDecl {
                var_type: TypeName::Int,
                name: second.clone(),
                init: None,
            }),
        ];

        for (index, statement) in body.into_iter().enumerate() {
            if index == half {
                mid_inserted = true;
                new_body.push(Statement::Assignment(Assignment::new(
                    second.clone(),
                    Expression::int(filler + 1),
                )));
                new_body.push(Statement::If(IfStmt {
                    condition: Expression::int(0),
                    then_branch: Box::new(Statement::Block(Block::new(vec![Statement::Print(
                        Print {
                            format: UNREACHABLE_MARKER.to_owned(),
                            args: vec![],
                        },
                    )]))),
                    else_branch: None,
                }));
            }
            new_body.push(statement);
        }

        if !mid_inserted {
            new_body.push(Statement::Assignment(Assignment::new(
                second,
                Expression::int(filler + 1),
            )));
        }

        new_body.push(Statement::Expression(ExpressionStmt {
            expr: Some(Expression::int(0)),
        }));

        function.body = new_body;
    }
}

impl Pass for DeadCodeInserter {
    fn name(&self) -> &'static str {
        "dead"
    }

    fn run(&mut self, program: &mut Program) -> Result<(), PassError> {
        for function in &mut program.functions {
            self.insert_into(function);
        }
        Ok(())
    }
}
