//! Semantics-preserving passes that degrade readability.
//!
//! Each pass consumes the whole program and rewrites it in place; the
//! nominal application order is rename, dead, expr, flatten, inline.
mod dead_code;
mod expression;
mod flatten;
mod inline;
mod rename;

pub use self::dead_code::DeadCodeInserter;
pub use self::expression::ExpressionTransformer;
pub use self::flatten::ControlFlowFlattener;
pub use self::inline::FunctionInliner;
pub use self::rename::NameObfuscator;
