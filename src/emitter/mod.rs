//! Pretty-printer turning an AST back into Mini-C source.
//!
//! Every node implements [`Emit`] and writes itself into an
//! [`EmitterContext`] which tracks the indentation level. Binary and unary
//! expressions are always fully parenthesized, so the output re-parses to
//! the same tree regardless of precedence.
mod context;
mod expression;
mod statement;

pub use self::context::EmitterContext;

use crate::ast::Program;

/// Trait implemented by every AST node that can be written back out.
pub trait Emit {
    fn emit(&self, ctx: &mut EmitterContext) -> std::fmt::Result;
}

impl Emit for Program {
    fn emit(&self, ctx: &mut EmitterContext) -> std::fmt::Result {
        for function in &self.functions {
            function.emit(ctx)?;
        }
        Ok(())
    }
}

/// Render a whole program with four-space indentation.
pub fn emit_program(program: &Program) -> String {
    let mut ctx = EmitterContext::new();

    // writing into a string buffer cannot fail
    let _ = program.emit(&mut ctx);

    ctx.finish()
}
