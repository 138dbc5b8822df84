//! External-compiler equivalence check.
//!
//! Compiles the original and the transformed source with the host C
//! compiler, runs both with empty stdin and compares what they print. Each
//! external process is bounded by a timeout; a timeout or tool failure is
//! reported but never destroys the already-written output file.
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use log::debug;

const PROCESS_TIMEOUT: Duration = Duration::from_secs(30);

/// What the comparison found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Match,
    Mismatch {
        original: String,
        transformed: String,
    },
    ToolFailure(String),
}

/// Compile and run both files, then compare their trimmed stdout.
pub fn check(original: &Path, transformed: &Path) -> CheckOutcome {
    let original_out = match compile_and_run(original) {
        Ok(stdout) => stdout,
        Err(message) => return CheckOutcome::ToolFailure(message),
    };
    let transformed_out = match compile_and_run(transformed) {
        Ok(stdout) => stdout,
        Err(message) => return CheckOutcome::ToolFailure(message),
    };

    if original_out.trim() == transformed_out.trim() {
        CheckOutcome::Match
    } else {
        CheckOutcome::Mismatch {
            original: original_out.trim().to_owned(),
            transformed: transformed_out.trim().to_owned(),
        }
    }
}

fn compile_and_run(source: &Path) -> Result<String, String> {
    let compiler = std::env::var("CC").unwrap_or_else(|_| "cc".to_owned());
    let binary: PathBuf = source.with_extension("out");

    debug!("compiling '{}' with {compiler}", source.display());

    // the sources are C with `bool` spelled out; force the language since
    // the compiler does not know the .mc extension
    let compile = run_with_timeout(
        Command::new(&compiler)
            .args(["-x", "c", "-include", "stdbool.h"])
            .arg(source)
            .arg("-o")
            .arg(&binary),
    )?;
    if !compile.success {
        return Err(format!(
            "compiling '{}' failed: {}",
            source.display(),
            compile.stderr.trim()
        ));
    }

    let run = run_with_timeout(&mut Command::new(&binary))?;
    if !run.success {
        return Err(format!(
            "running '{}' failed: {}",
            binary.display(),
            run.stderr.trim()
        ));
    }

    Ok(run.stdout)
}

struct RunOutput {
    success: bool,
    stdout: String,
    stderr: String,
}

fn run_with_timeout(command: &mut Command) -> Result<RunOutput, String> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|error| format!("failed to spawn {:?}: {error}", command.get_program()))?;

    let start = Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                let (stdout, stderr) = drain(&mut child)?;
                return Ok(RunOutput {
                    success: status.success(),
                    stdout,
                    stderr,
                });
            }
            Ok(None) => {
                if start.elapsed() > PROCESS_TIMEOUT {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(format!(
                        "process timed out after {}s",
                        PROCESS_TIMEOUT.as_secs()
                    ));
                }
                std::thread::sleep(Duration::from_millis(50));
            }
            Err(error) => return Err(format!("failed to wait for process: {error}")),
        }
    }
}

fn drain(child: &mut Child) -> Result<(String, String), String> {
    let mut stdout = String::new();
    let mut stderr = String::new();

    if let Some(mut pipe) = child.stdout.take() {
        pipe.read_to_string(&mut stdout)
            .map_err(|error| format!("failed to read stdout: {error}"))?;
    }
    if let Some(mut pipe) = child.stderr.take() {
        pipe.read_to_string(&mut stderr)
            .map_err(|error| format!("failed to read stderr: {error}"))?;
    }

    Ok((stdout, stderr))
}
