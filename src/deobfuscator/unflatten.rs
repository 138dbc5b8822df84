//! Dispatcher recognition and reconstruction of sequential control flow.
//!
//! Inverse of the flattening pass: a switch over a plain variable names the
//! state variable, case gotos give the state-to-label map, and the chain of
//! state updates is followed from state zero. Cycles, conditional state
//! updates and broken chains abort the reconstruction for that function;
//! the flattened form is retained.
use std::collections::{HashMap, HashSet};

use log::debug;

use crate::ast::{Expression, Function, Literal, Program, Statement, Switch};
use crate::error::PassError;
use crate::pipeline::Pass;

pub struct ControlFlowSimplifier;

impl Pass for ControlFlowSimplifier {
    fn name(&self) -> &'static str {
        "control"
    }

    fn run(&mut self, program: &mut Program) -> Result<(), PassError> {
        for function in &mut program.functions {
            simplify_function(function);
        }
        Ok(())
    }
}

fn simplify_function(function: &mut Function) {
    let flat = flatten_body(function.body.clone());

    let Some((state_var, switch)) = find_dispatcher(&flat) else {
        return;
    };

    debug!(
        "control-flow flattening detected in function '{}'",
        function.name
    );

    let blocks = extract_blocks(&flat);
    let Some(reordered) = reorder_blocks(switch, &blocks, state_var) else {
        debug!(
            "dispatcher in '{}' is not a linear chain; leaving it flattened",
            function.name
        );
        return;
    };

    // keep the declarations preceding the dispatcher, minus the state
    // variable itself
    let mut new_body: Vec<Statement> = vec![];
    for stmt in &flat {
        if matches!(stmt, Statement::Label(_) | Statement::Switch(_)) {
            break;
        }
        if let Statement::VarDecl(decl) = stmt {
            if decl.name != state_var {
                new_body.push(stmt.clone());
            }
        }
    }
    new_body.extend(reordered);

    function.body = new_body;
}

/// Splice nested blocks so labels, blocks and the dispatcher skeleton are
/// all siblings.
fn flatten_body(stmts: Vec<Statement>) -> Vec<Statement> {
    let mut flat = vec![];
    for stmt in stmts {
        match stmt {
            Statement::Block(block) => flat.extend(flatten_body(block.items)),
            stmt => flat.push(stmt),
        }
    }
    flat
}

fn is_const_true(expr: &Expression) -> bool {
    match expr {
        Expression::Literal(Literal::Bool(value)) => *value,
        Expression::Literal(Literal::Int(value)) => *value != 0,
        _ => false,
    }
}

/// A switch over a plain variable names the dispatcher and its state
/// variable. The endless loop the flattener wraps around the switch is
/// looked through.
fn find_dispatcher(flat: &[Statement]) -> Option<(&str, &Switch)> {
    fn scrutinee_var(switch: &Switch) -> Option<&str> {
        match &switch.scrutinee {
            Expression::Variable(variable) => Some(&variable.name),
            _ => None,
        }
    }

    for stmt in flat {
        match stmt {
            Statement::Switch(switch) => {
                if let Some(name) = scrutinee_var(switch) {
                    return Some((name, switch));
                }
            }
            Statement::While(while_stmt) if is_const_true(&while_stmt.condition) => {
                let inner: &[Statement] = match while_stmt.body.as_ref() {
                    Statement::Block(block) => &block.items,
                    stmt => std::slice::from_ref(stmt),
                };
                for stmt in inner {
                    if let Statement::Switch(switch) = stmt {
                        if let Some(name) = scrutinee_var(switch) {
                            return Some((name, switch));
                        }
                    }
                }
            }
            _ => {}
        }
    }

    None
}

/// Index the statements following each label. Jumps back to the dispatcher
/// are skeleton, not code, and are dropped.
fn extract_blocks(flat: &[Statement]) -> HashMap<String, Vec<&Statement>> {
    let mut blocks: HashMap<String, Vec<&Statement>> = HashMap::new();
    let mut current: Option<String> = None;

    for stmt in flat {
        match stmt {
            Statement::Label(label) => {
                current = Some(label.name.clone());
                blocks.insert(label.name.clone(), vec![]);
            }
            stmt => {
                let Some(label) = &current else {
                    continue;
                };
                if let Statement::Goto(goto) = stmt {
                    if goto.label.contains("dispatcher") {
                        continue;
                    }
                }
                if let Some(block) = blocks.get_mut(label) {
                    block.push(stmt);
                }
            }
        }
    }

    blocks
}

/// Follow the state chain from zero, dropping the state updates. `None`
/// aborts the whole reconstruction.
fn reorder_blocks(
    switch: &Switch,
    blocks: &HashMap<String, Vec<&Statement>>,
    state_var: &str,
) -> Option<Vec<Statement>> {
    let mut state_to_label: HashMap<i64, String> = HashMap::new();
    for case in &switch.cases {
        let Some(value) = case.value.as_int() else {
            continue;
        };
        if let Some(Statement::Goto(goto)) = case.body.items.first() {
            state_to_label.insert(value, goto.label.clone());
        }
    }

    let mut current: i64 = 0;
    let mut visited: HashSet<i64> = HashSet::new();
    let mut reordered: Vec<Statement> = vec![];

    loop {
        if !visited.insert(current) {
            return None;
        }

        let label = state_to_label.get(&current)?;
        if label.contains("end") {
            return Some(reordered);
        }

        let stmts = blocks.get(label)?;
        let mut next = None;
        let mut returned = false;

        for stmt in stmts.iter().copied() {
            if let Some(target) = state_update_target(stmt, state_var) {
                // a non-literal update leaves the next state unknowable
                next = Some(target?);
                continue;
            }
            if references_name(stmt, state_var) {
                // conditional dispatch; a linear chain would lose paths
                return None;
            }
            reordered.push(stmt.clone());
            if matches!(stmt, Statement::Return(_)) {
                returned = true;
            }
        }

        match next {
            Some(next_state) => current = next_state,
            None if returned => return Some(reordered),
            None => return None,
        }
    }
}

/// `Some(Some(k))` for `state = k`, `Some(None)` for a non-literal update,
/// `None` when the statement is no state update at all.
fn state_update_target(stmt: &Statement, state_var: &str) -> Option<Option<i64>> {
    match stmt {
        Statement::Assignment(assign) if assign.target.name == state_var => {
            Some(assign.value.as_int())
        }
        Statement::Expression(stmt) => match &stmt.expr {
            Some(Expression::Assign(assign)) if assign.target.name == state_var => {
                Some(assign.value.as_int())
            }
            _ => None,
        },
        _ => None,
    }
}

fn references_name(stmt: &Statement, name: &str) -> bool {
    let mut found = false;
    stmt.for_each_expr(&mut |expr| match expr {
        Expression::Variable(variable) => {
            if variable.name == name {
                found = true;
            }
        }
        Expression::Assign(assign) => {
            if assign.target.name == name {
                found = true;
            }
        }
        _ => {}
    });
    found
}
