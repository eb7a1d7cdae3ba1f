//! Indentation Strategy
//!
//! Classifier for indentation-delimited source. Depth is driven by two
//! things at once: block keywords open a level, and measured whitespace
//! closes levels. Every block opener records its own width on a stack; a
//! later line at the same width or shallower closes that block, so a single
//! line can close several blocks at once.
//!
//! Inconsistent indentation never fails. Widths that match no opener simply
//! pop until every remaining opener sits strictly shallower than the line.
#![allow(dead_code)]

use crate::frontend::SourceLine;

use super::classified::{ClassifiedLine, Tag};
use super::scan;

/// Nesting state for indentation-delimited source
#[derive(Debug, Default)]
pub struct IndentationClassifier {
    depth: usize,
    /// Widths of the lines that opened the currently open blocks
    opener_widths: Vec<usize>,
    output: Vec<ClassifiedLine>,
}

impl IndentationClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify every code line, in order. Consumes the classifier.
    pub fn classify(mut self, lines: &[SourceLine]) -> Vec<ClassifiedLine> {
        for line in lines.iter().filter(|l| l.is_code()) {
            self.classify_line(line);
        }
        log::debug!(
            "indentation strategy: {} lines classified, {} blocks left open",
            self.output.len(),
            self.opener_widths.len()
        );
        self.output
    }

    /// Current nesting depth
    pub fn depth(&self) -> usize {
        self.depth
    }

    fn classify_line(&mut self, line: &SourceLine) {
        let popped = self.dedent_to(line.width);
        let text = line.stripped.as_str();

        if let Some(rest) = scan::strip_keyword(text, "class") {
            self.open(line, Tag::Class, scan::colon_header(rest));
        } else if let Some(rest) = function_header(text) {
            self.open(line, Tag::Function, scan::signature(rest));
        } else if let Some(rest) = scan::strip_keyword(text, "if") {
            self.open(line, Tag::If, scan::colon_header(rest));
        } else if let Some(rest) = scan::strip_keyword(text, "elif") {
            self.sit_beside_prior_clause(popped);
            self.open(line, Tag::ElseIf, scan::colon_header(rest));
        } else if let Some(rest) = scan::strip_keyword(text, "else") {
            self.sit_beside_prior_clause(popped);
            self.open(line, Tag::Else, scan::colon_header(rest));
        } else if let Some(rest) = for_header(text) {
            self.open(line, Tag::For, scan::colon_header(rest));
        } else if let Some(rest) = scan::strip_keyword(text, "while") {
            self.open(line, Tag::While, scan::colon_header(rest));
        } else if let Some(rest) = scan::strip_keyword(text, "return") {
            self.emit(line, Tag::Return, rest);
        } else if scan::find_assignment(text).is_some() {
            self.emit(line, Tag::Assign, text);
        } else if scan::looks_like_call(text) {
            self.emit(line, Tag::Call, text);
        } else {
            self.emit(line, Tag::Statement, text);
        }
    }

    /// Close every block whose opener is at `width` or deeper.
    /// Returns how many levels were closed.
    fn dedent_to(&mut self, width: usize) -> usize {
        let mut popped = 0;
        while let Some(&top) = self.opener_widths.last() {
            if top < width {
                break;
            }
            self.opener_widths.pop();
            self.depth = self.depth.saturating_sub(1);
            popped += 1;
        }
        if popped > 0 {
            log::trace!("dedent to width {}: closed {} block(s), depth {}", width, popped, self.depth);
        }
        popped
    }

    /// `elif`/`else` belong beside the clause they continue. If the line's
    /// indentation did not already close that clause, close it explicitly.
    fn sit_beside_prior_clause(&mut self, popped: usize) {
        if popped == 0 && self.opener_widths.pop().is_some() {
            self.depth = self.depth.saturating_sub(1);
        }
    }

    fn open(&mut self, line: &SourceLine, tag: Tag, content: impl Into<String>) {
        self.emit(line, tag, content);
        self.opener_widths.push(line.width);
        self.depth += 1;
    }

    fn emit(&mut self, line: &SourceLine, tag: Tag, content: impl Into<String>) {
        self.output
            .push(ClassifiedLine::new(self.depth, tag, content, line.number));
    }
}

fn function_header(text: &str) -> Option<&str> {
    scan::strip_keyword(text, "def")
        .or_else(|| scan::strip_keyword(text, "async def"))
}

fn for_header(text: &str) -> Option<&str> {
    scan::strip_keyword(text, "for")
        .or_else(|| scan::strip_keyword(text, "async for"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::normalize;

    fn classify(src: &str) -> Vec<ClassifiedLine> {
        IndentationClassifier::new().classify(&normalize(src))
    }

    fn shape(src: &str) -> Vec<(usize, Tag, String)> {
        classify(src)
            .into_iter()
            .map(|l| (l.depth, l.tag, l.content))
            .collect()
    }

    #[test]
    fn test_function_with_nested_if() {
        let got = shape("def f(x):\n    if x:\n        return 1\n    return 0\n");
        assert_eq!(
            got,
            vec![
                (0, Tag::Function, "f(x)".to_string()),
                (1, Tag::If, "x".to_string()),
                (2, Tag::Return, "1".to_string()),
                (1, Tag::Return, "0".to_string()),
            ]
        );
    }

    #[test]
    fn test_multi_level_dedent_in_one_line() {
        let src = "def f(x):\n    if x:\n        y = 1\nz = 2\n";
        let lines = normalize(src);
        let mut classifier = IndentationClassifier::new();
        for line in &lines[..3] {
            classifier.classify_line(line);
        }
        assert_eq!(classifier.depth(), 2);

        let popped = classifier.dedent_to(lines[3].width);
        assert_eq!(popped, 2);
        assert_eq!(classifier.depth(), 0);

        let got = shape(src);
        assert_eq!(got[3], (0, Tag::Assign, "z = 2".to_string()));
    }

    #[test]
    fn test_elif_and_else_sit_beside_if() {
        let src = "\
if a:
    x = 1
elif b:
    x = 2
else:
    x = 3
done()
";
        let tags: Vec<(usize, Tag)> = classify(src).iter().map(|l| (l.depth, l.tag)).collect();
        assert_eq!(
            tags,
            vec![
                (0, Tag::If),
                (1, Tag::Assign),
                (0, Tag::ElseIf),
                (1, Tag::Assign),
                (0, Tag::Else),
                (1, Tag::Assign),
                (0, Tag::Call),
            ]
        );
    }

    #[test]
    fn test_misindented_else_still_dedents() {
        let src = "if a:\n    x = 1\n  else:\n    x = 2\n";
        let tags: Vec<(usize, Tag)> = classify(src).iter().map(|l| (l.depth, l.tag)).collect();
        assert_eq!(tags[2], (0, Tag::Else));
        assert_eq!(tags[3], (1, Tag::Assign));
    }

    #[test]
    fn test_class_with_methods() {
        let src = "\
class Stack(Base):
    def push(self, item):
        self.items.append(item)

    def pop(self):
        return self.items.pop()
";
        let got = shape(src);
        assert_eq!(got[0], (0, Tag::Class, "Stack(Base)".to_string()));
        assert_eq!(got[1], (1, Tag::Function, "push(self, item)".to_string()));
        assert_eq!(got[2], (2, Tag::Call, "self.items.append(item)".to_string()));
        assert_eq!(got[3], (1, Tag::Function, "pop(self)".to_string()));
        assert_eq!(got[4], (2, Tag::Return, "self.items.pop()".to_string()));
    }

    #[test]
    fn test_loops_and_one_liners() {
        let src = "for i in range(3): print(i)\nwhile busy:\n    tick()\nasync def run(): pass\n";
        let got = shape(src);
        assert_eq!(got[0], (0, Tag::For, "i in range(3)".to_string()));
        assert_eq!(got[1], (0, Tag::While, "busy".to_string()));
        assert_eq!(got[2], (1, Tag::Call, "tick()".to_string()));
        assert_eq!(got[3], (0, Tag::Function, "run()".to_string()));
    }

    #[test]
    fn test_blank_and_comment_lines_are_dropped() {
        let got = classify("# header\n\nx = 1\n    # indented comment\ny = 2\n");
        assert_eq!(got.len(), 2);
        assert!(got.iter().all(|l| l.depth == 0));
        assert_eq!(got[1].line, 5);
    }

    #[test]
    fn test_inconsistent_widths_never_underflow() {
        let src = "        deep = 1\nif a:\n      b()\n   c()\n d()\n";
        let got = classify(src);
        assert_eq!(got.len(), 5);
        assert_eq!(got[0].depth, 0);
        assert_eq!(got[2].depth, 1);
        assert_eq!(got[3].depth, 1);
        assert_eq!(got[4].depth, 1);
    }

    #[test]
    fn test_keyword_prefixes_need_word_boundary() {
        let got = shape("class_name = 1\nreturned = f()\nformat(x)\n");
        assert_eq!(got[0].1, Tag::Assign);
        assert_eq!(got[1].1, Tag::Assign);
        assert_eq!(got[2].1, Tag::Call);
    }

    #[test]
    fn test_comparisons_are_not_assignments() {
        let got = shape("x == y\nok = a <= b\n");
        assert_eq!(got[0].1, Tag::Statement);
        assert_eq!(got[1].1, Tag::Assign);
    }
}
