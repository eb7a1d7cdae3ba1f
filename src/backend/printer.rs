//! Pseudocode Printer - renders classified lines as indented pseudocode

use crate::middle::{ClassifiedLine, Tag};

/// Indent emitted per nesting level
pub const INDENT_UNIT: &str = "  ";

/// Pretty printer for classified lines
pub struct PseudocodePrinter {
    output: String,
}

impl PseudocodePrinter {
    pub fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    /// Print every line, one per output line, without a trailing newline
    pub fn print(&mut self, lines: &[ClassifiedLine]) -> String {
        self.output.clear();

        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                self.output.push('\n');
            }
            self.print_line(line);
        }

        std::mem::take(&mut self.output)
    }

    fn print_line(&mut self, line: &ClassifiedLine) {
        for _ in 0..line.depth {
            self.output.push_str(INDENT_UNIT);
        }
        self.output.push_str(line.tag.keyword());
        if !line.content.is_empty() {
            self.output.push(' ');
            self.output.push_str(&line.content);
        }
        if line.tag.opens_block() {
            self.output.push(':');
        }
    }
}

/// Whether anything beyond plain statements was recognized
pub fn has_constructs(lines: &[ClassifiedLine]) -> bool {
    lines.iter().any(|l| l.tag != Tag::Statement)
}
