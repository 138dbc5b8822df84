use std::{error::Error, fmt::Display};

/// Raised when a pass meets an AST that violates one of the inter-pass
/// invariants, e.g. a call whose arity disagrees with the callee.
#[derive(Debug)]
pub struct PassError {
    pub pass: &'static str,
    pub message: String,
}

impl PassError {
    pub fn new(pass: &'static str, message: impl Into<String>) -> PassError {
        PassError {
            pass,
            message: message.into(),
        }
    }
}

impl Display for PassError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format!("pass '{}': {}", self.pass, self.message))
    }
}

impl Error for PassError {}
