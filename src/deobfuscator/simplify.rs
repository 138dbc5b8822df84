//! Expression simplification by algebraic identity and constant folding.
use log::debug;

use crate::ast::{BinaryExpr, BinaryOp, Expression, Program, UnaryExpr, UnaryOp};
use crate::error::PassError;
use crate::pipeline::Pass;

/// Applies the identity table bottom-up, iterated to a fixed point within
/// a single pass. Literal-literal integer arithmetic is constant-folded
/// with two's-complement wraparound, matching the external compiler
/// target.
#[derive(Debug, Default)]
pub struct ExpressionSimplifier;

impl ExpressionSimplifier {
    pub fn new() -> ExpressionSimplifier {
        ExpressionSimplifier
    }

    /// Simplify one expression tree to a fixed point.
    pub fn simplify_expr(&self, expr: Expression) -> Expression {
        let mut current = expr;

        loop {
            let mut changed = false;
            current = current.map(&mut |node| {
                let (node, did_rewrite) = rewrite(node);
                if did_rewrite {
                    changed = true;
                }
                node
            });
            if !changed {
                return current;
            }
        }
    }
}

impl Pass for ExpressionSimplifier {
    fn name(&self) -> &'static str {
        "expr"
    }

    fn run(&mut self, program: &mut Program) -> Result<(), PassError> {
        for function in &mut program.functions {
            for statement in &mut function.body {
                statement.map_expr_slots(&mut |expr| self.simplify_expr(expr));
            }
        }
        Ok(())
    }
}

fn rewrite(expr: Expression) -> (Expression, bool) {
    match expr {
        Expression::Binary(binary) => rewrite_binary(binary),
        Expression::Unary(unary) => rewrite_unary(unary),
        expr => (expr, false),
    }
}

fn rewrite_binary(binary: BinaryExpr) -> (Expression, bool) {
    let BinaryExpr { op, lhs, rhs } = binary;
    let lhs = *lhs;
    let mut rhs = *rhs;

    if let (Some(a), Some(b)) = (lhs.as_int(), rhs.as_int()) {
        if let Some(folded) = fold(op, a, b) {
            debug!("folding {a} {op} {b} to {folded}");
            return (Expression::int(folded), true);
        }
    }

    match op {
        BinaryOp::Add if rhs.as_int() == Some(0) => {
            debug!("simplifying a + 0 to a");
            return (lhs, true);
        }
        BinaryOp::Add if lhs.as_int() == Some(0) => {
            debug!("simplifying 0 + a to a");
            return (rhs, true);
        }
        BinaryOp::Sub if rhs.as_int() == Some(0) => {
            debug!("simplifying a - 0 to a");
            return (lhs, true);
        }
        BinaryOp::Mul if rhs.as_int() == Some(1) => {
            debug!("simplifying a * 1 to a");
            return (lhs, true);
        }
        BinaryOp::Mul if lhs.as_int() == Some(1) => {
            debug!("simplifying 1 * a to a");
            return (rhs, true);
        }
        // an impure operand must keep running for its effects
        BinaryOp::Mul if rhs.as_int() == Some(0) && lhs.is_pure() => {
            debug!("simplifying a * 0 to 0");
            return (Expression::int(0), true);
        }
        BinaryOp::Mul if lhs.as_int() == Some(0) && rhs.is_pure() => {
            debug!("simplifying 0 * a to 0");
            return (Expression::int(0), true);
        }
        _ => {}
    }

    if op == BinaryOp::Sub {
        if let Expression::Unary(unary) = rhs {
            if unary.op == UnaryOp::Neg {
                debug!("simplifying a - (-b) to a + b");
                return (
                    Expression::Binary(BinaryExpr {
                        op: BinaryOp::Add,
                        lhs: Box::new(lhs),
                        rhs: unary.operand,
                    }),
                    true,
                );
            }
            rhs = Expression::Unary(unary);
        }
    }

    (Expression::Binary(BinaryExpr::new(op, lhs, rhs)), false)
}

fn rewrite_unary(unary: UnaryExpr) -> (Expression, bool) {
    let UnaryExpr { op, operand } = unary;
    let operand = *operand;

    if op == UnaryOp::Not {
        if let Expression::Unary(inner) = operand {
            if inner.op == UnaryOp::Not {
                debug!("simplifying !!a to a");
                return (*inner.operand, true);
            }
            return (
                Expression::Unary(UnaryExpr {
                    op,
                    operand: Box::new(Expression::Unary(inner)),
                }),
                false,
            );
        }
        return (Expression::Unary(UnaryExpr { op, operand: Box::new(operand) }), false);
    }

    (Expression::Unary(UnaryExpr { op, operand: Box::new(operand) }), false)
}

fn fold(op: BinaryOp, a: i64, b: i64) -> Option<i64> {
    match op {
        BinaryOp::Add => Some(a.wrapping_add(b)),
        BinaryOp::Sub => Some(a.wrapping_sub(b)),
        BinaryOp::Mul => Some(a.wrapping_mul(b)),
        BinaryOp::Div => a.checked_div(b),
        BinaryOp::Mod => a.checked_rem(b),
        _ => None,
    }
}
