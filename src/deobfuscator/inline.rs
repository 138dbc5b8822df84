//! Heuristic reconstruction of calls that the inliner expanded.
//!
//! Matching is structural: a run of initialized declarations whose last one
//! feeds the following assignment is traded for a call to a program
//! function of matching arity and `decl; return decl;` body shape. When no
//! candidate exists the sequence is left intact.
use std::collections::{HashSet, VecDeque};

use log::debug;

use crate::ast::{
    Assignment, Expression, FnCall, Function, Program, Statement, VariableDecl,
};
use crate::error::PassError;
use crate::pipeline::Pass;

const MAX_PARAM_DECLS: usize = 6;

pub struct InlineReconstructor;

/// What the matcher needs to know about a candidate callee.
#[derive(Debug, Clone)]
struct Candidate {
    name: String,
    arity: usize,
}

impl Pass for InlineReconstructor {
    fn name(&self) -> &'static str {
        "inline"
    }

    fn run(&mut self, program: &mut Program) -> Result<(), PassError> {
        let candidates: Vec<Candidate> = program
            .functions
            .iter()
            .filter_map(candidate_shape)
            .collect();
        if candidates.is_empty() {
            return Ok(());
        }

        for function in &mut program.functions {
            let body = std::mem::take(&mut function.body);
            function.body = process_block(body, &candidates);
        }

        Ok(())
    }
}

fn process_block(stmts: Vec<Statement>, candidates: &[Candidate]) -> Vec<Statement> {
    let mut queue = VecDeque::from(stmts);
    let mut out = vec![];

    while !queue.is_empty() {
        if let Some((length, replacement)) = match_sequence(queue.make_contiguous(), candidates) {
            out.push(replacement);
            queue.drain(..length);
            continue;
        }

        if let Some(stmt) = queue.pop_front() {
            out.push(descend(stmt, candidates));
        }
    }

    out
}

fn descend(stmt: Statement, candidates: &[Candidate]) -> Statement {
    match stmt {
        Statement::Block(mut block) => {
            block.items = process_block(block.items, candidates);
            Statement::Block(block)
        }
        Statement::If(mut stmt) => {
            stmt.then_branch = Box::new(descend(*stmt.then_branch, candidates));
            if let Some(else_branch) = stmt.else_branch.take() {
                stmt.else_branch = Some(Box::new(descend(*else_branch, candidates)));
            }
            Statement::If(stmt)
        }
        Statement::While(mut stmt) => {
            stmt.body = Box::new(descend(*stmt.body, candidates));
            Statement::While(stmt)
        }
        Statement::For(mut stmt) => {
            stmt.body = Box::new(descend(*stmt.body, candidates));
            Statement::For(stmt)
        }
        Statement::Switch(mut switch) => {
            for case in &mut switch.cases {
                let items = std::mem::take(&mut case.body.items);
                case.body.items = process_block(items, candidates);
            }
            if let Some(default) = &mut switch.default {
                let items = std::mem::take(&mut default.items);
                default.items = process_block(items, candidates);
            }
            Statement::Switch(switch)
        }
        stmt => stmt,
    }
}

/// Try to recognize `p0 = A0; …; r = expr; target = r;` at the head of
/// `stmts` and fold it back into `target = f(A0, …);`.
fn match_sequence(stmts: &[Statement], candidates: &[Candidate]) -> Option<(usize, Statement)> {
    let mut decls: Vec<&VariableDecl> = vec![];

    for stmt in stmts {
        let Statement::VarDecl(decl) = stmt else {
            break;
        };
        if decl.init.is_none() {
            break;
        }
        decls.push(decl);
        if decls.len() > MAX_PARAM_DECLS + 1 {
            return None;
        }
    }

    // at least one parameter temp plus the result temp
    if decls.len() < 2 {
        return None;
    }

    let Some(Statement::Assignment(assign)) = stmts.get(decls.len()) else {
        return None;
    };
    let result = decls[decls.len() - 1];
    let Expression::Variable(value) = &assign.value else {
        return None;
    };
    if value.name != result.name {
        return None;
    }

    let params = &decls[..decls.len() - 1];
    let candidate = candidates
        .iter()
        .find(|candidate| candidate.arity == params.len())?;

    let args: Vec<Expression> = params
        .iter()
        .map(|decl| decl.init.clone())
        .collect::<Option<_>>()?;

    debug!("reconstructing call to '{}'", candidate.name);

    let replacement = Statement::Assignment(Assignment {
        target: assign.target.clone(),
        value: Expression::Call(FnCall {
            name: candidate.name.clone(),
            args,
        }),
    });

    Some((decls.len() + 1, replacement))
}

/// A candidate has a `decl; return decl;` pair somewhere in its body and an
/// initializer that actually mentions its parameters.
fn candidate_shape(function: &Function) -> Option<Candidate> {
    let param_names: HashSet<&str> = function
        .params
        .iter()
        .map(|param| param.name.as_str())
        .collect();
    if param_names.is_empty() {
        return None;
    }

    for window in function.body.windows(2) {
        let [Statement::VarDecl(decl), Statement::Return(ret)] = window else {
            continue;
        };
        let Some(init) = &decl.init else {
            continue;
        };
        let Some(Expression::Variable(returned)) = &ret.value else {
            continue;
        };
        if returned.name != decl.name {
            continue;
        }

        let mut uses_param = false;
        init.for_each(&mut |expr| {
            if let Expression::Variable(variable) = expr {
                if param_names.contains(variable.name.as_str()) {
                    uses_param = true;
                }
            }
        });

        if uses_param {
            return Some(Candidate {
                name: function.name.clone(),
                arity: function.params.len(),
            });
        }
    }

    None
}
