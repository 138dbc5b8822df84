//! Ordered application of the transformation passes.
//!
//! Pass selection is enumerated by [`StageConfig`]; the application order
//! within each pipeline is fixed.
use log::debug;

use crate::ast::Program;
use crate::deobfuscator::{
    ControlFlowSimplifier, DeadCodeRemover, ExpressionSimplifier, InlineReconstructor,
    SemanticNameRecoverer,
};
use crate::error::PassError;
use crate::obfuscator::{
    ControlFlowFlattener, DeadCodeInserter, ExpressionTransformer, FunctionInliner, NameObfuscator,
};

/// A single whole-program transformation.
pub trait Pass {
    fn name(&self) -> &'static str;
    fn run(&mut self, program: &mut Program) -> Result<(), PassError>;
}

/// Which passes of a pipeline run. The `control` flag covers flattening in
/// one direction and un-flattening in the other.
#[derive(Debug, Clone, Copy, Default)]
pub struct StageConfig {
    pub rename: bool,
    pub dead: bool,
    pub expr: bool,
    pub control: bool,
    pub inline: bool,
}

impl StageConfig {
    pub fn all() -> StageConfig {
        StageConfig {
            rename: true,
            dead: true,
            expr: true,
            control: true,
            inline: true,
        }
    }
}

/// Apply the selected obfuscation passes in their nominal order:
/// rename, dead, expr, flatten, inline.
pub fn obfuscate(program: &mut Program, stages: &StageConfig) -> Result<(), PassError> {
    let mut passes: Vec<Box<dyn Pass>> = vec![];

    if stages.rename {
        passes.push(Box::new(NameObfuscator::new()));
    }
    if stages.dead {
        passes.push(Box::new(DeadCodeInserter::new()));
    }
    if stages.expr {
        passes.push(Box::new(ExpressionTransformer::new()));
    }
    if stages.control {
        passes.push(Box::new(ControlFlowFlattener));
    }
    if stages.inline {
        passes.push(Box::new(FunctionInliner::new()));
    }

    run_passes(program, passes)
}

/// Apply the selected deobfuscation passes in their nominal order:
/// dead, expr, rename, control, inline.
pub fn deobfuscate(program: &mut Program, stages: &StageConfig) -> Result<(), PassError> {
    let mut passes: Vec<Box<dyn Pass>> = vec![];

    if stages.dead {
        passes.push(Box::new(DeadCodeRemover::new()));
    }
    if stages.expr {
        passes.push(Box::new(ExpressionSimplifier::new()));
    }
    if stages.rename {
        passes.push(Box::new(SemanticNameRecoverer::new()));
    }
    if stages.control {
        passes.push(Box::new(ControlFlowSimplifier));
    }
    if stages.inline {
        passes.push(Box::new(InlineReconstructor));
    }

    run_passes(program, passes)
}

fn run_passes(program: &mut Program, passes: Vec<Box<dyn Pass>>) -> Result<(), PassError> {
    for mut pass in passes {
        debug!("running pass '{}'", pass.name());
        pass.run(program)?;
    }
    Ok(())
}
