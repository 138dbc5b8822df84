//! Control-flow flattening: rewrite a function body into a state-machine
//! dispatcher over its basic blocks.
//!
//! The identifier substrings `state`, `dispatcher` and `end` are the
//! contract recognized by the inverse pass.
use std::collections::HashSet;

use log::debug;

use crate::ast::{
    visit, Assignment, Block, Expression, ExpressionStmt, ForStmt, Function, Goto, IfStmt, Label,
    Literal, Program, Statement, Switch, SwitchCase, TypeName, VariableDecl, WhileStmt,
};
use crate::error::PassError;
use crate::pipeline::Pass;

const STATE_VAR: &str = "state";
const DISPATCHER_LABEL: &str = "dispatcher";
const END_LABEL: &str = "L_end";

pub struct ControlFlowFlattener;

impl Pass for ControlFlowFlattener {
    fn name(&self) -> &'static str {
        "flatten"
    }

    fn run(&mut self, program: &mut Program) -> Result<(), PassError> {
        for function in &mut program.functions {
            flatten_function(function);
        }
        Ok(())
    }
}

fn flatten_function(function: &mut Function) {
    if !supports(function) {
        debug!("not flattening function '{}'", function.name);
        return;
    }

    debug!("flattening function '{}'", function.name);

    let mut hoisted = vec![];
    let mut body = std::mem::take(&mut function.body);
    hoist_decls(&mut body, &mut hoisted);

    let mut builder = BlockBuilder::default();
    let entry = builder.new_block();
    let exit = builder.lower_sequence(body, entry);
    let end_state = builder.new_block();
    builder.set_next(exit, end_state);

    let labels: Vec<String> = (0..builder.blocks.len())
        .map(|id| {
            if id == end_state {
                END_LABEL.to_owned()
            } else {
                format!("L_{id}")
            }
        })
        .collect();

    let cases = labels
        .iter()
        .enumerate()
        .map(|(id, label)| SwitchCase {
            value: Literal::Int(id as i64),
            label: label.clone(),
            body: Block::new(vec![Statement::Goto(Goto::new(label.clone()))]),
        })
        .collect();

    let mut new_body = hoisted;
    new_body.push(Statement::VarDecl(VariableDecl {
        var_type: TypeName::Int,
        name: STATE_VAR.to_owned(),
        init: Some(Expression::int(0)),
    }));
    new_body.push(Statement::Label(Label::new(DISPATCHER_LABEL)));
    new_body.push(Statement::While(WhileStmt {
        condition: Expression::int(1),
        body: Box::new(Statement::Block(Block::new(vec![Statement::Switch(
            Switch {
                scrutinee: Expression::var(STATE_VAR),
                cases,
                default: None,
            },
        )]))),
    }));

    for (id, stmts) in builder.blocks.into_iter().enumerate() {
        new_body.push(Statement::Label(Label::new(labels[id].clone())));
        if id == end_state {
            // a label needs a statement to attach to
            new_body.push(Statement::Expression(ExpressionStmt { expr: None }));
        } else {
            new_body.extend(stmts);
        }
    }

    function.body = new_body;
}

/// Flattening covers structured bodies only: no labels, gotos or switches,
/// no local already named `state`, and no declaration name that would
/// collide once block scopes are merged.
fn supports(function: &Function) -> bool {
    if !function.body.iter().all(is_structured) {
        return false;
    }

    let declared = visit::declared_names(&function.body);
    let mut seen = HashSet::new();
    for name in &declared {
        if !seen.insert(name.clone()) {
            return false;
        }
    }

    !seen.contains(STATE_VAR)
        && !visit::used_names(&function.body)
            .iter()
            .any(|name| name.as_str() == STATE_VAR)
        && !function.params.iter().any(|param| param.name == STATE_VAR)
}

fn is_structured(stmt: &Statement) -> bool {
    match stmt {
        Statement::Label(_) | Statement::Goto(_) | Statement::Switch(_) => false,
        Statement::Block(block) => block.items.iter().all(is_structured),
        Statement::If(stmt) => {
            is_structured(&stmt.then_branch)
                && stmt
                    .else_branch
                    .as_ref()
                    .map_or(true, |branch| is_structured(branch))
        }
        Statement::While(stmt) => is_structured(&stmt.body),
        Statement::For(stmt) => is_structured(&stmt.body),
        _ => true,
    }
}

/// Move every declaration to the top of the function; initializers stay in
/// place as plain assignments.
fn hoist_decls(stmts: &mut Vec<Statement>, hoisted: &mut Vec<Statement>) {
    let mut i = 0;
    while i < stmts.len() {
        if matches!(stmts[i], Statement::VarDecl(_)) {
            let Statement::VarDecl(decl) = stmts.remove(i) else {
                unreachable!()
            };
            hoisted.push(Statement::VarDecl(VariableDecl {
                var_type: decl.var_type,
                name: decl.name.clone(),
                init: None,
            }));
            if let Some(init) = decl.init {
                stmts.insert(i, Statement::Assignment(Assignment::new(decl.name, init)));
                i += 1;
            }
            continue;
        }

        match &mut stmts[i] {
            Statement::Block(block) => hoist_decls(&mut block.items, hoisted),
            Statement::If(stmt) => {
                hoist_in_branch(&mut stmt.then_branch, hoisted);
                if let Some(else_branch) = &mut stmt.else_branch {
                    hoist_in_branch(else_branch, hoisted);
                }
            }
            Statement::While(stmt) => hoist_in_branch(&mut stmt.body, hoisted),
            Statement::For(stmt) => hoist_in_branch(&mut stmt.body, hoisted),
            _ => {}
        }
        i += 1;
    }
}

fn hoist_in_branch(stmt: &mut Statement, hoisted: &mut Vec<Statement>) {
    if matches!(stmt, Statement::VarDecl(_)) {
        let empty = Statement::Expression(ExpressionStmt { expr: None });
        let Statement::VarDecl(decl) = std::mem::replace(stmt, empty) else {
            unreachable!()
        };
        hoisted.push(Statement::VarDecl(VariableDecl {
            var_type: decl.var_type,
            name: decl.name.clone(),
            init: None,
        }));
        if let Some(init) = decl.init {
            *stmt = Statement::Assignment(Assignment::new(decl.name, init));
        }
        return;
    }

    match stmt {
        Statement::Block(block) => hoist_decls(&mut block.items, hoisted),
        Statement::If(stmt) => {
            hoist_in_branch(&mut stmt.then_branch, hoisted);
            if let Some(else_branch) = &mut stmt.else_branch {
                hoist_in_branch(else_branch, hoisted);
            }
        }
        Statement::While(stmt) => hoist_in_branch(&mut stmt.body, hoisted),
        Statement::For(stmt) => hoist_in_branch(&mut stmt.body, hoisted),
        _ => {}
    }
}

#[derive(Default)]
struct BlockBuilder {
    blocks: Vec<Vec<Statement>>,
}

impl BlockBuilder {
    fn new_block(&mut self) -> usize {
        self.blocks.push(vec![]);
        self.blocks.len() - 1
    }

    fn push(&mut self, block: usize, stmt: Statement) {
        self.blocks[block].push(stmt);
    }

    /// Terminate `block` with an unconditional transfer to `next`.
    fn set_next(&mut self, block: usize, next: usize) {
        self.push(block, state_update(next));
        self.push(block, Statement::Goto(Goto::new(DISPATCHER_LABEL)));
    }

    /// Terminate `block` with a conditional transfer. Constant conditions
    /// collapse to an unconditional one; the untaken side becomes an
    /// unreferenced state.
    fn set_branch(
        &mut self,
        block: usize,
        condition: Expression,
        then_state: usize,
        else_state: usize,
    ) {
        match &condition {
            Expression::Literal(Literal::Int(0)) | Expression::Literal(Literal::Bool(false)) => {
                self.set_next(block, else_state);
                return;
            }
            Expression::Literal(Literal::Int(_)) | Expression::Literal(Literal::Bool(true)) => {
                self.set_next(block, then_state);
                return;
            }
            _ => {}
        }

        self.push(
            block,
            Statement::If(IfStmt {
                condition,
                then_branch: Box::new(Statement::Block(Block::new(vec![state_update(
                    then_state,
                )]))),
                else_branch: Some(Box::new(Statement::Block(Block::new(vec![state_update(
                    else_state,
                )])))),
            }),
        );
        self.push(block, Statement::Goto(Goto::new(DISPATCHER_LABEL)));
    }

    fn lower_sequence(&mut self, stmts: Vec<Statement>, entry: usize) -> usize {
        let mut current = entry;
        for stmt in stmts {
            current = self.lower_statement(stmt, current);
        }
        current
    }

    fn lower_statement(&mut self, stmt: Statement, current: usize) -> usize {
        match stmt {
            Statement::Block(block) => self.lower_sequence(block.items, current),
            Statement::If(stmt) => {
                let IfStmt {
                    condition,
                    then_branch,
                    else_branch,
                } = stmt;

                let then_entry = self.new_block();
                match else_branch {
                    Some(else_branch) => {
                        let else_entry = self.new_block();
                        let join = self.new_block();
                        self.set_branch(current, condition, then_entry, else_entry);

                        let then_exit = self.lower_statement(*then_branch, then_entry);
                        self.set_next(then_exit, join);
                        let else_exit = self.lower_statement(*else_branch, else_entry);
                        self.set_next(else_exit, join);
                        join
                    }
                    None => {
                        let join = self.new_block();
                        self.set_branch(current, condition, then_entry, join);

                        let then_exit = self.lower_statement(*then_branch, then_entry);
                        self.set_next(then_exit, join);
                        join
                    }
                }
            }
            Statement::While(stmt) => {
                let WhileStmt { condition, body } = stmt;

                let cond_block = self.new_block();
                let body_entry = self.new_block();
                let join = self.new_block();

                self.set_next(current, cond_block);
                self.set_branch(cond_block, condition, body_entry, join);

                let body_exit = self.lower_statement(*body, body_entry);
                self.set_next(body_exit, cond_block);
                join
            }
            Statement::For(stmt) => {
                let ForStmt {
                    init,
                    cond,
                    update,
                    body,
                } = stmt;

                if let Some(init) = init {
                    self.push(current, Statement::from_expr(init));
                }

                let cond_block = self.new_block();
                let body_entry = self.new_block();
                let join = self.new_block();

                self.set_next(current, cond_block);
                let condition = cond.unwrap_or_else(|| Expression::int(1));
                self.set_branch(cond_block, condition, body_entry, join);

                let body_exit = self.lower_statement(*body, body_entry);
                if let Some(update) = update {
                    self.push(body_exit, Statement::from_expr(update));
                }
                self.set_next(body_exit, cond_block);
                join
            }
            stmt => {
                self.push(current, stmt);
                current
            }
        }
    }
}

fn state_update(next: usize) -> Statement {
    Statement::Assignment(Assignment::new(STATE_VAR, Expression::int(next as i64)))
}
