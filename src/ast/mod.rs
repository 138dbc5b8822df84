//! Internal representation of Mini-C programs.
//!
//! Every node variant lives in its own file and knows how to build itself
//! from the matching pest pair. Traversal helpers shared by the
//! transformation passes live in [`visit`].
mod assignment;
mod binary_expr;
mod binary_op;
mod block;
mod expression;
mod expression_stmt;
mod fn_call;
mod for_stmt;
mod function;
mod goto_stmt;
mod if_stmt;
mod label;
mod literal;
mod param;
mod parse_error;
mod parser;
mod print;
mod return_stmt;
mod scan;
mod statement;
mod switch;
mod type_name;
mod unary_expr;
mod unary_op;
mod var_decl;
mod variable;
pub mod visit;
mod while_stmt;

pub use self::assignment::*;
pub use self::binary_expr::*;
pub use self::binary_op::*;
pub use self::block::*;
pub use self::expression::*;
pub use self::expression_stmt::*;
pub use self::fn_call::*;
pub use self::for_stmt::*;
pub use self::function::*;
pub use self::goto_stmt::*;
pub use self::if_stmt::*;
pub use self::label::*;
pub use self::literal::*;
pub use self::param::*;
pub use self::parse_error::*;
pub use self::parser::*;
pub use self::print::*;
pub use self::return_stmt::*;
pub use self::scan::*;
pub use self::statement::*;
pub use self::switch::*;
pub use self::type_name::*;
pub use self::unary_expr::*;
pub use self::unary_op::*;
pub use self::var_decl::*;
pub use self::variable::*;
pub use self::while_stmt::*;

use std::collections::HashSet;

use once_cell::sync::Lazy;
use pest::iterators::Pairs;

/// Identifiers naming the entry point or C library functions. No pass ever
/// renames these or treats them as function-local names.
pub static RESERVED_NAMES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "main", "printf", "scanf", "puts", "putchar", "strlen", "malloc", "free", "NULL",
    ]
    .into_iter()
    .collect()
});

/// A whole compilation unit: the ordered list of function definitions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub functions: Vec<Function>,
}

impl Program {
    /// Parse Mini-C source text into a program.
    pub fn parse(source: &str) -> ParseResult<Program> {
        let pairs = MiniCParser::parse_program(source)?;
        Self::from_pairs(pairs)
    }

    /// Build a program from the top-level pairs of a parse.
    pub fn from_pairs(pairs: Pairs<Rule>) -> ParseResult<Program> {
        let mut functions = vec![];

        for pair in pairs {
            if pair.as_rule() != Rule::EOI {
                functions.push(Function::from_pair(pair)?);
            }
        }

        Ok(Program { functions })
    }

    /// Look up a function definition by name.
    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|function| function.name == name)
    }
}
