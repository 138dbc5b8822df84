//! Source-to-source transformation toolkit for the Mini-C language.
//!
//! The crate is split into the AST model (with its pest-based parser), the
//! emitter that turns an AST back into source text, and the two symmetric
//! pass collections wired together by the pipeline module.
pub mod ast;
pub mod deobfuscator;
pub mod emitter;
pub mod equivalence;
pub mod error;
pub mod obfuscator;
pub mod pipeline;
