//! Inlining of trivially small callees.
//!
//! A callee qualifies when its body is exactly `decl; return decl;`, its
//! arity is small and it cannot reach itself through the call graph. Call
//! sites bind every argument to a fresh temporary in order, so
//! side-effecting arguments are evaluated exactly once.
use std::collections::{HashMap, HashSet};

use log::debug;

use crate::ast::{
    visit, Assignment, Block, Expression, ExpressionStmt, FnCall, Function, Param, Program, Return,
    Statement, TypeName, VariableDecl,
};
use crate::error::PassError;
use crate::pipeline::Pass;

const MAX_INLINE_ARITY: usize = 6;

#[derive(Debug, Default)]
pub struct FunctionInliner {
    counter: usize,
}

#[derive(Debug, Clone)]
struct InlineTarget {
    params: Vec<Param>,
    result_type: TypeName,
    init: Expression,
}

impl FunctionInliner {
    pub fn new() -> FunctionInliner {
        FunctionInliner::default()
    }

    fn targets(program: &Program) -> HashMap<String, InlineTarget> {
        let calls: HashMap<String, HashSet<String>> = program
            .functions
            .iter()
            .map(|function| {
                (
                    function.name.clone(),
                    visit::called_names(&function.body).into_iter().collect(),
                )
            })
            .collect();

        program
            .functions
            .iter()
            .filter(|function| {
                function.params.len() <= MAX_INLINE_ARITY && !is_recursive(&calls, &function.name)
            })
            .filter_map(|function| {
                callee_shape(function).map(|target| (function.name.clone(), target))
            })
            .collect()
    }

    fn process_block(
        &mut self,
        stmts: Vec<Statement>,
        targets: &HashMap<String, InlineTarget>,
    ) -> Result<Vec<Statement>, PassError> {
        let mut out = vec![];

        for stmt in stmts {
            match stmt {
                Statement::Assignment(assign) => match assign.value {
                    Expression::Call(call) if targets.contains_key(call.name.as_str()) => {
                        let target = &targets[call.name.as_str()];
                        let result = self.expand_call(call, target, &mut out)?;
                        out.push(Statement::Assignment(Assignment {
                            target: assign.target,
                            value: Expression::var(result),
                        }));
                    }
                    value => out.push(Statement::Assignment(Assignment {
                        target: assign.target,
                        value,
                    })),
                },
                Statement::VarDecl(decl) => match decl.init {
                    Some(Expression::Call(call)) if targets.contains_key(call.name.as_str()) => {
                        let target = &targets[call.name.as_str()];
                        out.push(Statement::VarDecl(VariableDecl {
                            var_type: decl.var_type,
                            name: decl.name.clone(),
                            init: None,
                        }));
                        let result = self.expand_call(call, target, &mut out)?;
                        out.push(Statement::Assignment(Assignment::new(
                            decl.name,
                            Expression::var(result),
                        )));
                    }
                    init => out.push(Statement::VarDecl(VariableDecl {
                        var_type: decl.var_type,
                        name: decl.name,
                        init,
                    })),
                },
                Statement::Expression(stmt) => match stmt.expr {
                    Some(Expression::Call(call)) if targets.contains_key(call.name.as_str()) => {
                        let target = &targets[call.name.as_str()];
                        // the result temp is simply never read
                        self.expand_call(call, target, &mut out)?;
                    }
                    expr => out.push(Statement::Expression(ExpressionStmt { expr })),
                },
                Statement::Return(ret) => match ret.value {
                    Some(Expression::Call(call)) if targets.contains_key(call.name.as_str()) => {
                        let target = &targets[call.name.as_str()];
                        let result = self.expand_call(call, target, &mut out)?;
                        out.push(Statement::Return(Return {
                            value: Some(Expression::var(result)),
                        }));
                    }
                    value => out.push(Statement::Return(Return { value })),
                },
                Statement::Block(block) => out.push(Statement::Block(Block::new(
                    self.process_block(block.items, targets)?,
                ))),
                Statement::If(mut stmt) => {
                    self.process_branch(&mut stmt.then_branch, targets)?;
                    if let Some(else_branch) = &mut stmt.else_branch {
                        self.process_branch(else_branch, targets)?;
                    }
                    out.push(Statement::If(stmt));
                }
                Statement::While(mut stmt) => {
                    self.process_branch(&mut stmt.body, targets)?;
                    out.push(Statement::While(stmt));
                }
                Statement::For(mut stmt) => {
                    self.process_branch(&mut stmt.body, targets)?;
                    out.push(Statement::For(stmt));
                }
                Statement::Switch(mut switch) => {
                    for case in &mut switch.cases {
                        let items = std::mem::take(&mut case.body.items);
                        case.body.items = self.process_block(items, targets)?;
                    }
                    if let Some(default) = &mut switch.default {
                        let items = std::mem::take(&mut default.items);
                        default.items = self.process_block(items, targets)?;
                    }
                    out.push(Statement::Switch(switch));
                }
                stmt => out.push(stmt),
            }
        }

        Ok(out)
    }

    fn process_branch(
        &mut self,
        stmt: &mut Statement,
        targets: &HashMap<String, InlineTarget>,
    ) -> Result<(), PassError> {
        match stmt {
            Statement::Block(block) => {
                let items = std::mem::take(&mut block.items);
                block.items = self.process_block(items, targets)?;
            }
            Statement::If(stmt) => {
                self.process_branch(&mut stmt.then_branch, targets)?;
                if let Some(else_branch) = &mut stmt.else_branch {
                    self.process_branch(else_branch, targets)?;
                }
            }
            Statement::While(stmt) => self.process_branch(&mut stmt.body, targets)?,
            Statement::For(stmt) => self.process_branch(&mut stmt.body, targets)?,
            _ => {}
        }
        Ok(())
    }

    /// Materialize the callee at the call site and return the name of the
    /// result temporary.
    fn expand_call(
        &mut self,
        call: FnCall,
        target: &InlineTarget,
        out: &mut Vec<Statement>,
    ) -> Result<String, PassError> {
        if call.args.len() != target.params.len() {
            return Err(PassError::new(
                "inline",
                format!(
                    "call to '{}' passes {} arguments, callee takes {}",
                    call.name,
                    call.args.len(),
                    target.params.len()
                ),
            ));
        }

        let k = self.counter;
        self.counter += 1;

        let mut subst: HashMap<String, String> = HashMap::new();
        for (param, arg) in target.params.iter().zip(call.args) {
            let fresh = format!("{}_{k}", param.name);
            out.push(Statement::VarDecl(VariableDecl {
                var_type: param.param_type,
                name: fresh.clone(),
                init: Some(arg),
            }));
            subst.insert(param.name.clone(), fresh);
        }

        let result = format!("r{k}");
        out.push(Statement::VarDecl(VariableDecl {
            var_type: target.result_type,
            name: result.clone(),
            init: Some(visit::rename_expr(target.init.clone(), &subst)),
        }));

        debug!("inlined call to '{}'", call.name);
        Ok(result)
    }
}

/// `decl; return decl;`, nothing else.
fn callee_shape(function: &Function) -> Option<InlineTarget> {
    let [Statement::VarDecl(decl), Statement::Return(ret)] = function.body.as_slice() else {
        return None;
    };
    let init = decl.init.clone()?;
    let Some(Expression::Variable(variable)) = &ret.value else {
        return None;
    };
    if variable.name != decl.name {
        return None;
    }

    Some(InlineTarget {
        params: function.params.clone(),
        result_type: decl.var_type,
        init,
    })
}

/// True when `name` can reach itself through the call graph.
fn is_recursive(calls: &HashMap<String, HashSet<String>>, name: &str) -> bool {
    let mut stack: Vec<String> = calls
        .get(name)
        .map(|callees| callees.iter().cloned().collect())
        .unwrap_or_default();
    let mut visited = HashSet::new();

    while let Some(next) = stack.pop() {
        if next == name {
            return true;
        }
        if !visited.insert(next.clone()) {
            continue;
        }
        if let Some(callees) = calls.get(&next) {
            stack.extend(callees.iter().cloned());
        }
    }

    false
}

impl Pass for FunctionInliner {
    fn name(&self) -> &'static str {
        "inline"
    }

    fn run(&mut self, program: &mut Program) -> Result<(), PassError> {
        let targets = Self::targets(program);
        if targets.is_empty() {
            return Ok(());
        }

        for function in &mut program.functions {
            let body = std::mem::take(&mut function.body);
            function.body = self.process_block(body, &targets)?;
        }

        Ok(())
    }
}
