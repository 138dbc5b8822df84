//! Expression obfuscation: wrap values in algebraic identities that leave
//! their meaning untouched.
use log::debug;

use crate::ast::{BinaryExpr, BinaryOp, Expression, Literal, Program, UnaryExpr, UnaryOp};
use crate::error::PassError;
use crate::pipeline::Pass;

/// Rewrites integer-valued leaves bottom-up, cycling through `x + 0`,
/// `x * 1` and `x - (-x) - x`, and double-negates every branch condition.
/// A counter keeps the choice deterministic; there is no randomness.
#[derive(Debug, Default)]
pub struct ExpressionTransformer {
    counter: usize,
}

impl ExpressionTransformer {
    pub fn new() -> ExpressionTransformer {
        ExpressionTransformer::default()
    }

    fn transform(&mut self, expr: Expression) -> Expression {
        match &expr {
            // the zero literal is left alone: `if (0)` is the dead-code
            // contract and must survive verbatim
            Expression::Literal(Literal::Int(0)) => expr,
            Expression::Literal(Literal::Int(_)) | Expression::Variable(_) => {
                let choice = self.counter % 3;
                self.counter += 1;

                match choice {
                    0 => Expression::Binary(BinaryExpr::new(
                        BinaryOp::Add,
                        expr,
                        Expression::int(0),
                    )),
                    1 => Expression::Binary(BinaryExpr::new(
                        BinaryOp::Mul,
                        expr,
                        Expression::int(1),
                    )),
                    // x - (-x) - x keeps the value under two's-complement
                    // wraparound; leaves are free of side effects, so the
                    // duplication is sound
                    _ => {
                        let negated = Expression::Unary(UnaryExpr::new(UnaryOp::Neg, expr.clone()));
                        Expression::Binary(BinaryExpr::new(
                            BinaryOp::Sub,
                            Expression::Binary(BinaryExpr::new(BinaryOp::Sub, expr.clone(), negated)),
                            expr,
                        ))
                    }
                }
            }
            _ => expr,
        }
    }
}

fn double_negate(cond: Expression) -> Expression {
    if matches!(cond, Expression::Literal(_)) {
        return cond;
    }

    Expression::Unary(UnaryExpr::new(
        UnaryOp::Not,
        Expression::Unary(UnaryExpr::new(UnaryOp::Not, cond)),
    ))
}

impl Pass for ExpressionTransformer {
    fn name(&self) -> &'static str {
        "expr"
    }

    fn run(&mut self, program: &mut Program) -> Result<(), PassError> {
        for function in &mut program.functions {
            debug!("transforming expressions in function '{}'", function.name);
            for statement in &mut function.body {
                statement.map_exprs(&mut |expr| self.transform(expr));
                statement.map_conditions(&mut double_negate);
            }
        }
        Ok(())
    }
}
