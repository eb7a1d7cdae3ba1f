//! Line Normalizer
//!
//! Splits raw source text into `SourceLine`s: one per physical line, order
//! preserved, with the leading whitespace measured and comment/blank lines
//! marked (but kept, so width comparisons between neighbours stay contiguous).

use serde::Serialize;

/// Columns a leading tab is worth. Every other whitespace character is 1.
pub const TAB_WIDTH: usize = 4;

/// One physical line of input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLine {
    /// 1-based line number
    pub number: usize,
    /// The line exactly as it appeared (without the line terminator)
    pub raw: String,
    /// Trimmed text with any trailing block comment removed
    pub stripped: String,
    /// Leading whitespace width in columns
    pub width: usize,
    pub is_blank: bool,
    pub is_comment: bool,
}

impl SourceLine {
    /// Whether a classification strategy should look at this line at all
    pub fn is_code(&self) -> bool {
        !self.is_blank && !self.is_comment
    }
}

/// Split `text` into normalized lines.
///
/// Empty input yields an empty vector. Both `\n` and `\r\n` terminate a line.
pub fn normalize(text: &str) -> Vec<SourceLine> {
    let mut lines = Vec::new();
    let mut in_block_comment = false;

    for (idx, raw) in text.lines().enumerate() {
        let trimmed = raw.trim();
        let is_blank = trimmed.is_empty();

        let is_comment = if in_block_comment {
            if trimmed.contains("*/") {
                in_block_comment = false;
            }
            true
        } else if is_comment_start(trimmed) {
            if trimmed.starts_with("/*") && !trimmed[2..].contains("*/") {
                in_block_comment = true;
            }
            true
        } else {
            false
        };

        let stripped = if is_comment {
            trimmed.to_string()
        } else {
            strip_trailing_block_comment(trimmed).to_string()
        };

        lines.push(SourceLine {
            number: idx + 1,
            raw: raw.to_string(),
            stripped,
            width: leading_width(raw),
            is_blank,
            is_comment: !is_blank && is_comment,
        });
    }

    lines
}

/// Leading whitespace width, tabs expanded to `TAB_WIDTH` columns
pub fn leading_width(raw: &str) -> usize {
    raw.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { TAB_WIDTH } else { 1 })
        .sum()
}

fn is_comment_start(trimmed: &str) -> bool {
    trimmed.starts_with('#') || trimmed.starts_with("//") || trimmed.starts_with("/*")
}

/// Drop a trailing `/* ... */` comment, or a dangling `*/` token.
fn strip_trailing_block_comment(trimmed: &str) -> &str {
    let Some(body) = trimmed.strip_suffix("*/") else {
        return trimmed;
    };
    match body.rfind("/*") {
        Some(open) => body[..open].trim_end(),
        None => body.trim_end(),
    }
}
