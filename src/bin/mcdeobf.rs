use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use minic_obfuscator::ast::Program;
use minic_obfuscator::emitter;
use minic_obfuscator::equivalence::{self, CheckOutcome};
use minic_obfuscator::pipeline::{self, StageConfig};

/// Mini-C source deobfuscator.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Path to the input .mc file
    input: PathBuf,

    /// Output file path
    #[arg(short, long, default_value = "output/output_clean.mc")]
    output: PathBuf,

    /// Recover readable identifiers
    #[arg(long)]
    rename: bool,

    /// Remove dead code
    #[arg(long)]
    dead: bool,

    /// Simplify expressions
    #[arg(long)]
    expr: bool,

    /// Reconstruct flattened control flow
    #[arg(long)]
    control: bool,

    /// Reconstruct inlined function calls
    #[arg(long)]
    inline: bool,

    /// Apply every pass
    #[arg(long)]
    all: bool,

    /// Compile input and output and compare their runtime output
    #[arg(long)]
    check: bool,
}

fn main() -> Result<ExitCode> {
    simple_logger::init_with_level(log::Level::Warn)?;
    let args = Cli::parse();

    let stages = if args.all {
        StageConfig::all()
    } else {
        StageConfig {
            rename: args.rename,
            dead: args.dead,
            expr: args.expr,
            control: args.control,
            inline: args.inline,
        }
    };

    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("could not read '{}'", args.input.display()))?;

    let mut program = Program::parse(&source)?;
    pipeline::deobfuscate(&mut program, &stages)?;
    let code = emitter::emit_program(&program);

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("could not create '{}'", parent.display()))?;
        }
    }
    fs::write(&args.output, code)
        .with_context(|| format!("could not write '{}'", args.output.display()))?;
    println!("[✓] Cleaned code saved to {}", args.output.display());

    if args.check {
        println!("[*] Checking runtime equivalence...");
        match equivalence::check(&args.input, &args.output) {
            CheckOutcome::Match => {
                println!("[✓] Runtime outputs match. Equivalence confirmed.");
            }
            CheckOutcome::Mismatch {
                original,
                transformed,
            } => {
                println!("[✗] Output mismatch!");
                println!("Original: {original}");
                println!("Cleaned: {transformed}");
                return Ok(ExitCode::FAILURE);
            }
            CheckOutcome::ToolFailure(message) => {
                println!("[✗] Error: {message}");
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
