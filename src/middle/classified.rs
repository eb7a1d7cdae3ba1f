//! Classified lines - the output of both classification strategies

use serde::Serialize;

/// What a line was recognized as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tag {
    Function,
    Class,
    If,
    ElseIf,
    Else,
    For,
    While,
    Return,
    Assign,
    Call,
    Statement,
    BlockEnd,
}

impl Tag {
    /// Pseudocode keyword printed for this tag
    pub fn keyword(self) -> &'static str {
        match self {
            Tag::Function => "FUNCTION",
            Tag::Class => "CLASS",
            Tag::If => "IF",
            Tag::ElseIf => "ELSE IF",
            Tag::Else => "ELSE",
            Tag::For => "FOR",
            Tag::While => "WHILE",
            Tag::Return => "RETURN",
            Tag::Assign => "SET",
            Tag::Call => "CALL",
            Tag::Statement => "STATEMENT",
            Tag::BlockEnd => "END BLOCK",
        }
    }

    /// Tags that open a nested block
    pub fn opens_block(self) -> bool {
        matches!(
            self,
            Tag::Function | Tag::Class | Tag::If | Tag::ElseIf | Tag::Else | Tag::For | Tag::While
        )
    }
}

/// One emitted line: depth at emission, tag, rendered content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedLine {
    pub depth: usize,
    pub tag: Tag,
    pub content: String,
    /// Source line this was classified from (1-based)
    pub line: usize,
}

impl ClassifiedLine {
    pub fn new(depth: usize, tag: Tag, content: impl Into<String>, line: usize) -> Self {
        Self {
            depth,
            tag,
            content: content.into(),
            line,
        }
    }
}
