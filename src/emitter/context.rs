use std::fmt::Write;

const INDENT: &str = "    ";

/// Accumulates emitted source and tracks the current indentation.
#[derive(Debug, Default)]
pub struct EmitterContext {
    output: String,
    indent_level: usize,
}

impl EmitterContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&mut self, text: &str) -> std::fmt::Result {
        self.output.write_str(text)
    }

    pub fn write_indent(&mut self) -> std::fmt::Result {
        for _ in 0..self.indent_level {
            self.output.write_str(INDENT)?;
        }
        Ok(())
    }

    pub fn write_newline(&mut self) -> std::fmt::Result {
        self.output.write_char('\n')
    }

    /// Write a full, indented line.
    pub fn write_line(&mut self, text: &str) -> std::fmt::Result {
        self.write_indent()?;
        self.write(text)?;
        self.write_newline()
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    pub fn finish(self) -> String {
        self.output
    }
}
