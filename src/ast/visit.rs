//! Traversal helpers shared by the transformation passes.
//!
//! Two idioms are provided: the `map_*` family rebuilds expression trees
//! bottom-up and the collectors walk subtrees read-only. Statements are
//! always rewritten in place; expression slots are moved out, rebuilt and
//! moved back.

use std::collections::{HashMap, HashSet};

use super::{
    Assignment, BinaryExpr, Expression, FnCall, Statement, UnaryExpr,
};

impl Expression {
    /// Rebuild this expression bottom-up. `f` sees every node after its
    /// children have been rebuilt and returns the replacement.
    pub fn map(self, f: &mut dyn FnMut(Expression) -> Expression) -> Expression {
        let rebuilt = match self {
            Expression::Binary(binary) => Expression::Binary(BinaryExpr {
                op: binary.op,
                lhs: Box::new((*binary.lhs).map(f)),
                rhs: Box::new((*binary.rhs).map(f)),
            }),
            Expression::Unary(unary) => Expression::Unary(UnaryExpr {
                op: unary.op,
                operand: Box::new((*unary.operand).map(f)),
            }),
            Expression::Call(call) => Expression::Call(FnCall {
                name: call.name,
                args: call.args.into_iter().map(|arg| arg.map(f)).collect(),
            }),
            Expression::Assign(assign) => {
                let Assignment { target, value } = *assign;
                Expression::Assign(Box::new(Assignment {
                    target,
                    value: value.map(f),
                }))
            }
            leaf => leaf,
        };

        f(rebuilt)
    }

    /// Walk this expression read-only, parents before children.
    pub fn for_each(&self, f: &mut dyn FnMut(&Expression)) {
        f(self);

        match self {
            Expression::Binary(binary) => {
                binary.lhs.for_each(f);
                binary.rhs.for_each(f);
            }
            Expression::Unary(unary) => unary.operand.for_each(f),
            Expression::Call(call) => {
                for arg in &call.args {
                    arg.for_each(f);
                }
            }
            Expression::Assign(assign) => assign.value.for_each(f),
            Expression::Literal(_) | Expression::Variable(_) => {}
        }
    }

    /// True when evaluating the expression cannot observe or change state:
    /// no calls and no embedded assignments.
    pub fn is_pure(&self) -> bool {
        let mut pure = true;
        self.for_each(&mut |expr| {
            if matches!(expr, Expression::Call(_) | Expression::Assign(_)) {
                pure = false;
            }
        });
        pure
    }
}

impl Statement {
    /// Apply `f` once to every expression slot this statement owns,
    /// recursing through nested statements.
    pub fn map_expr_slots(&mut self, f: &mut dyn FnMut(Expression) -> Expression) {
        match self {
            Statement::VarDecl(decl) => map_opt(&mut decl.init, f),
            Statement::Assignment(assign) => map_slot(&mut assign.value, f),
            Statement::Expression(stmt) => map_opt(&mut stmt.expr, f),
            Statement::Return(ret) => map_opt(&mut ret.value, f),
            Statement::If(stmt) => {
                map_slot(&mut stmt.condition, f);
                stmt.then_branch.map_expr_slots(f);
                if let Some(else_branch) = &mut stmt.else_branch {
                    else_branch.map_expr_slots(f);
                }
            }
            Statement::While(stmt) => {
                map_slot(&mut stmt.condition, f);
                stmt.body.map_expr_slots(f);
            }
            Statement::For(stmt) => {
                map_opt(&mut stmt.init, f);
                map_opt(&mut stmt.cond, f);
                map_opt(&mut stmt.update, f);
                stmt.body.map_expr_slots(f);
            }
            Statement::Block(block) => {
                for item in &mut block.items {
                    item.map_expr_slots(f);
                }
            }
            Statement::Print(print) => {
                for arg in &mut print.args {
                    map_slot(arg, f);
                }
            }
            Statement::Switch(switch) => {
                map_slot(&mut switch.scrutinee, f);
                for case in &mut switch.cases {
                    for item in &mut case.body.items {
                        item.map_expr_slots(f);
                    }
                }
                if let Some(default) = &mut switch.default {
                    for item in &mut default.items {
                        item.map_expr_slots(f);
                    }
                }
            }
            Statement::Scan(_) | Statement::Label(_) | Statement::Goto(_) => {}
        }
    }

    /// Apply `f` bottom-up to every expression node under this statement.
    pub fn map_exprs(&mut self, f: &mut dyn FnMut(Expression) -> Expression) {
        self.map_expr_slots(&mut |expr| expr.map(f));
    }

    /// Apply `f` to every boolean context: the conditions of `if`, `while`
    /// and `for`.
    pub fn map_conditions(&mut self, f: &mut dyn FnMut(Expression) -> Expression) {
        match self {
            Statement::If(stmt) => {
                map_slot(&mut stmt.condition, f);
                stmt.then_branch.map_conditions(f);
                if let Some(else_branch) = &mut stmt.else_branch {
                    else_branch.map_conditions(f);
                }
            }
            Statement::While(stmt) => {
                map_slot(&mut stmt.condition, f);
                stmt.body.map_conditions(f);
            }
            Statement::For(stmt) => {
                map_opt(&mut stmt.cond, f);
                stmt.body.map_conditions(f);
            }
            Statement::Block(block) => {
                for item in &mut block.items {
                    item.map_conditions(f);
                }
            }
            Statement::Switch(switch) => {
                for case in &mut switch.cases {
                    for item in &mut case.body.items {
                        item.map_conditions(f);
                    }
                }
                if let Some(default) = &mut switch.default {
                    for item in &mut default.items {
                        item.map_conditions(f);
                    }
                }
            }
            _ => {}
        }
    }

    /// Walk every expression owned by this statement read-only, recursing
    /// through nested statements.
    pub fn for_each_expr(&self, f: &mut dyn FnMut(&Expression)) {
        match self {
            Statement::VarDecl(decl) => {
                if let Some(init) = &decl.init {
                    init.for_each(f);
                }
            }
            Statement::Assignment(assign) => assign.value.for_each(f),
            Statement::Expression(stmt) => {
                if let Some(expr) = &stmt.expr {
                    expr.for_each(f);
                }
            }
            Statement::Return(ret) => {
                if let Some(value) = &ret.value {
                    value.for_each(f);
                }
            }
            Statement::If(stmt) => {
                stmt.condition.for_each(f);
                stmt.then_branch.for_each_expr(f);
                if let Some(else_branch) = &stmt.else_branch {
                    else_branch.for_each_expr(f);
                }
            }
            Statement::While(stmt) => {
                stmt.condition.for_each(f);
                stmt.body.for_each_expr(f);
            }
            Statement::For(stmt) => {
                for slot in [&stmt.init, &stmt.cond, &stmt.update] {
                    if let Some(expr) = slot {
                        expr.for_each(f);
                    }
                }
                stmt.body.for_each_expr(f);
            }
            Statement::Block(block) => {
                for item in &block.items {
                    item.for_each_expr(f);
                }
            }
            Statement::Print(print) => {
                for arg in &print.args {
                    arg.for_each(f);
                }
            }
            Statement::Switch(switch) => {
                switch.scrutinee.for_each(f);
                for case in &switch.cases {
                    for item in &case.body.items {
                        item.for_each_expr(f);
                    }
                }
                if let Some(default) = &switch.default {
                    for item in &default.items {
                        item.for_each_expr(f);
                    }
                }
            }
            Statement::Scan(_) | Statement::Label(_) | Statement::Goto(_) => {}
        }
    }
}

fn map_slot(slot: &mut Expression, f: &mut dyn FnMut(Expression) -> Expression) {
    let expr = std::mem::replace(slot, Expression::int(0));
    *slot = f(expr);
}

fn map_opt(slot: &mut Option<Expression>, f: &mut dyn FnMut(Expression) -> Expression) {
    if let Some(expr) = slot.take() {
        *slot = Some(f(expr));
    }
}

/// Declaration names in source order, recursing into nested statements.
pub fn declared_names(stmts: &[Statement]) -> Vec<String> {
    let mut names = vec![];
    collect_declared(stmts, &mut names);
    names
}

fn collect_declared(stmts: &[Statement], out: &mut Vec<String>) {
    for stmt in stmts {
        collect_declared_stmt(stmt, out);
    }
}

fn collect_declared_stmt(stmt: &Statement, out: &mut Vec<String>) {
    match stmt {
        Statement::VarDecl(decl) => out.push(decl.name.clone()),
        Statement::Block(block) => collect_declared(&block.items, out),
        Statement::If(stmt) => {
            collect_declared_stmt(&stmt.then_branch, out);
            if let Some(else_branch) = &stmt.else_branch {
                collect_declared_stmt(else_branch, out);
            }
        }
        Statement::While(stmt) => collect_declared_stmt(&stmt.body, out),
        Statement::For(stmt) => collect_declared_stmt(&stmt.body, out),
        Statement::Switch(switch) => {
            for case in &switch.cases {
                collect_declared(&case.body.items, out);
            }
            if let Some(default) = &switch.default {
                collect_declared(&default.items, out);
            }
        }
        _ => {}
    }
}

/// Identifier uses in first-appearance order: variable reads, assignment
/// targets and scan targets. Function call names are not included.
pub fn used_names(stmts: &[Statement]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut order = vec![];
    collect_used(stmts, &mut seen, &mut order);
    order
}

fn collect_used(stmts: &[Statement], seen: &mut HashSet<String>, order: &mut Vec<String>) {
    for stmt in stmts {
        collect_used_stmt(stmt, seen, order);
    }
}

fn add_exprs(expr: &Expression, seen: &mut HashSet<String>, order: &mut Vec<String>) {
    expr.for_each(&mut |e| match e {
        Expression::Variable(variable) => add_name(&variable.name, seen, order),
        Expression::Assign(assign) => add_name(&assign.target.name, seen, order),
        _ => {}
    });
}

fn collect_used_stmt(stmt: &Statement, seen: &mut HashSet<String>, order: &mut Vec<String>) {
    match stmt {
        Statement::Assignment(assign) => {
            add_name(&assign.target.name, seen, order);
            add_exprs(&assign.value, seen, order);
        }
        Statement::Scan(scan) => {
            for target in &scan.targets {
                add_name(target, seen, order);
            }
        }
        Statement::If(stmt) => {
            add_exprs(&stmt.condition, seen, order);
            collect_used_stmt(&stmt.then_branch, seen, order);
            if let Some(else_branch) = &stmt.else_branch {
                collect_used_stmt(else_branch, seen, order);
            }
        }
        Statement::While(stmt) => {
            add_exprs(&stmt.condition, seen, order);
            collect_used_stmt(&stmt.body, seen, order);
        }
        Statement::For(stmt) => {
            for slot in [&stmt.init, &stmt.cond, &stmt.update] {
                if let Some(expr) = slot {
                    add_exprs(expr, seen, order);
                }
            }
            collect_used_stmt(&stmt.body, seen, order);
        }
        Statement::Block(block) => collect_used(&block.items, seen, order),
        Statement::Switch(switch) => {
            add_exprs(&switch.scrutinee, seen, order);
            for case in &switch.cases {
                collect_used(&case.body.items, seen, order);
            }
            if let Some(default) = &switch.default {
                collect_used(&default.items, seen, order);
            }
        }
        stmt => stmt.for_each_expr(&mut |e| match e {
            Expression::Variable(variable) => add_name(&variable.name, seen, order),
            Expression::Assign(assign) => add_name(&assign.target.name, seen, order),
            _ => {}
        }),
    }
}

fn add_name(name: &str, seen: &mut HashSet<String>, order: &mut Vec<String>) {
    if seen.insert(name.to_owned()) {
        order.push(name.to_owned());
    }
}

/// Every function name called anywhere below `stmts`, with duplicates.
pub fn called_names(stmts: &[Statement]) -> Vec<String> {
    let mut names = vec![];
    for stmt in stmts {
        stmt.for_each_expr(&mut |expr| {
            if let Expression::Call(call) = expr {
                names.push(call.name.clone());
            }
        });
    }
    names
}

/// Rewrite every identifier occurrence (declarations, assignment targets,
/// variable reads and scan targets) according to `map`. Function call names
/// and labels are left alone.
pub fn rename_in_stmts(stmts: &mut [Statement], map: &HashMap<String, String>) {
    for stmt in stmts {
        rename_in_stmt(stmt, map);
    }
}

fn rename_in_stmt(stmt: &mut Statement, map: &HashMap<String, String>) {
    match stmt {
        Statement::VarDecl(decl) => {
            rename_name(&mut decl.name, map);
            if let Some(init) = &mut decl.init {
                rename_expr_in_place(init, map);
            }
        }
        Statement::Assignment(assign) => {
            rename_name(&mut assign.target.name, map);
            rename_expr_in_place(&mut assign.value, map);
        }
        Statement::Expression(stmt) => {
            if let Some(expr) = &mut stmt.expr {
                rename_expr_in_place(expr, map);
            }
        }
        Statement::Return(ret) => {
            if let Some(value) = &mut ret.value {
                rename_expr_in_place(value, map);
            }
        }
        Statement::If(stmt) => {
            rename_expr_in_place(&mut stmt.condition, map);
            rename_in_stmt(&mut stmt.then_branch, map);
            if let Some(else_branch) = &mut stmt.else_branch {
                rename_in_stmt(else_branch, map);
            }
        }
        Statement::While(stmt) => {
            rename_expr_in_place(&mut stmt.condition, map);
            rename_in_stmt(&mut stmt.body, map);
        }
        Statement::For(stmt) => {
            for slot in [&mut stmt.init, &mut stmt.cond, &mut stmt.update] {
                if let Some(expr) = slot {
                    rename_expr_in_place(expr, map);
                }
            }
            rename_in_stmt(&mut stmt.body, map);
        }
        Statement::Block(block) => rename_in_stmts(&mut block.items, map),
        Statement::Print(print) => {
            for arg in &mut print.args {
                rename_expr_in_place(arg, map);
            }
        }
        Statement::Scan(scan) => {
            for target in &mut scan.targets {
                rename_name(target, map);
            }
        }
        Statement::Label(_) | Statement::Goto(_) => {}
        Statement::Switch(switch) => {
            rename_expr_in_place(&mut switch.scrutinee, map);
            for case in &mut switch.cases {
                rename_in_stmts(&mut case.body.items, map);
            }
            if let Some(default) = &mut switch.default {
                rename_in_stmts(&mut default.items, map);
            }
        }
    }
}

/// Rewrite variable reads and embedded assignment targets in an expression.
pub fn rename_expr(expr: Expression, map: &HashMap<String, String>) -> Expression {
    expr.map(&mut |e| match e {
        Expression::Variable(mut variable) => {
            rename_name(&mut variable.name, map);
            Expression::Variable(variable)
        }
        Expression::Assign(mut assign) => {
            rename_name(&mut assign.target.name, map);
            Expression::Assign(assign)
        }
        other => other,
    })
}

fn rename_expr_in_place(slot: &mut Expression, map: &HashMap<String, String>) {
    let expr = std::mem::replace(slot, Expression::int(0));
    *slot = rename_expr(expr, map);
}

fn rename_name(name: &mut String, map: &HashMap<String, String>) {
    if let Some(new) = map.get(name.as_str()) {
        *name = new.clone();
    }
}

/// Rewrite function call names according to `map`.
pub fn rename_calls_in_stmts(stmts: &mut [Statement], map: &HashMap<String, String>) {
    for stmt in stmts {
        stmt.map_exprs(&mut |expr| match expr {
            Expression::Call(mut call) => {
                if let Some(new) = map.get(call.name.as_str()) {
                    call.name = new.clone();
                }
                Expression::Call(call)
            }
            other => other,
        });
    }
}
