use std::fmt::Display;

use pest::error::{Error, LineColLocation};
use pest::iterators::Pair;

use super::Rule;

/// Error raised while parsing Mini-C source or building the AST from the
/// parse tree.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub col: usize,
}

impl ParseError {
    pub(crate) fn from_pest(error: Error<Rule>) -> ParseError {
        let (line, col) = match error.line_col {
            LineColLocation::Pos(pos) => pos,
            LineColLocation::Span(start, _) => start,
        };

        ParseError {
            message: error.variant.message().to_string(),
            line,
            col,
        }
    }

    pub(crate) fn new(message: impl Into<String>, pair: &Pair<Rule>) -> ParseError {
        let (line, col) = pair.line_col();

        ParseError {
            message: message.into(),
            line,
            col,
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format!("{} ({}:{})", self.message, self.line, self.col))
    }
}

impl std::error::Error for ParseError {}

/// The result of building an AST node from a pair.
pub type ParseResult<T> = Result<T, ParseError>;
