//! Source statistics used by the reports
//!
//! Everything here is counting and substring checks over normalized lines.
//! Structure (classes, functions) comes from the classifiers, so reports and
//! pseudocode agree on what a function is.

use crate::frontend::{normalize, SourceLine, Strategy};
use crate::middle::{classify_lines, Tag};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineCounts {
    pub total: usize,
    pub code: usize,
    pub comment: usize,
    pub blank: usize,
}

impl LineCounts {
    pub fn of(lines: &[SourceLine]) -> Self {
        let mut counts = LineCounts {
            total: lines.len(),
            ..Default::default()
        };
        for line in lines {
            if line.is_blank {
                counts.blank += 1;
            } else if line.is_comment {
                counts.comment += 1;
            } else {
                counts.code += 1;
            }
        }
        counts
    }

    pub fn non_blank(&self) -> usize {
        self.total - self.blank
    }
}

/// Imports, classes and functions found in a file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outline {
    pub imports: Vec<String>,
    pub classes: Vec<String>,
    pub functions: Vec<String>,
}

impl Outline {
    pub fn of(lines: &[SourceLine], strategy: Strategy) -> Self {
        let imports = lines
            .iter()
            .filter(|l| l.is_code() && is_import(&l.stripped))
            .map(|l| l.stripped.clone())
            .collect();

        let mut outline = Outline {
            imports,
            ..Default::default()
        };
        for line in classify_lines(lines, strategy) {
            match line.tag {
                Tag::Class => outline.classes.push(leading_name(&line.content)),
                Tag::Function => outline.functions.push(leading_name(&line.content)),
                _ => {}
            }
        }
        outline
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty() && self.classes.is_empty() && self.functions.is_empty()
    }
}

fn is_import(stripped: &str) -> bool {
    ["import ", "from ", "use ", "using ", "require "]
        .iter()
        .any(|kw| stripped.starts_with(kw))
        || stripped.contains("require(")
}

/// `Stack(Base)` → `Stack`, `A extends B` → `A`
fn leading_name(content: &str) -> String {
    content
        .split(|c: char| c == '(' || c == '<' || c.is_whitespace())
        .next()
        .unwrap_or(content)
        .to_string()
}

/// Heuristic code smells, one markdown bullet each
pub fn potential_issues(text: &str) -> Vec<&'static str> {
    let mut issues = Vec::new();
    if has_bare_except(text) {
        issues.push("- Bare except clause could catch unexpected exceptions");
    }
    if text.contains("print(") {
        issues.push("- Contains print statements which might be left from debugging");
    }
    if text.contains("TODO") || text.contains("FIXME") {
        issues.push("- Contains TODO or FIXME comments indicating incomplete work");
    }
    if !has_comments(text) {
        issues.push("- Limited or no comments/documentation");
    }
    issues
}

/// Improvement hints matching `potential_issues`
pub fn improvement_suggestions(text: &str, counts: &LineCounts) -> Vec<&'static str> {
    let mut suggestions = Vec::new();
    if !has_comments(text) {
        suggestions.push("- Add comments or docstrings to improve code readability");
    }
    if text.contains("print(") {
        suggestions.push("- Consider replacing print statements with proper logging");
    }
    if has_bare_except(text) {
        suggestions.push("- Specify exception types in except clauses");
    }
    if counts.total > 200 {
        suggestions.push("- Consider breaking down large files into smaller modules");
    }
    suggestions
}

fn has_bare_except(text: &str) -> bool {
    text.contains("except:") && !text.contains("except Exception:")
}

fn has_comments(text: &str) -> bool {
    text.contains("# ")
        || text.contains("// ")
        || text.contains("/*")
        || text.contains("\"\"\"")
        || text.contains("'''")
}

/// Case-insensitive substring search; `(line number, trimmed line)` per hit
pub fn search(text: &str, term: &str) -> Vec<(usize, String)> {
    let needle = term.to_lowercase();
    normalize(text)
        .into_iter()
        .filter(|l| l.raw.to_lowercase().contains(&needle))
        .map(|l| (l.number, l.raw.trim().to_string()))
        .collect()
}
