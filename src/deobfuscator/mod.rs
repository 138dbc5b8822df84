//! Normalizing passes that restore readability.
//!
//! Each pass is the inverse (or neutralizer) of one obfuscation pass; the
//! nominal application order is dead, expr, rename, control, inline.
mod dead_code;
mod inline;
mod rename;
mod simplify;
mod unflatten;

pub use self::dead_code::DeadCodeRemover;
pub use self::inline::InlineReconstructor;
pub use self::rename::SemanticNameRecoverer;
pub use self::simplify::ExpressionSimplifier;
pub use self::unflatten::ControlFlowSimplifier;
