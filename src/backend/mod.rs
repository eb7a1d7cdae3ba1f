//! Backend module - Pseudocode rendering
//!
//! `render` is the whole transcompiler behind one total call: any text in,
//! some deterministic pseudocode out.
#![allow(dead_code)]

pub mod printer;

pub use printer::PseudocodePrinter;

use serde::Serialize;

use crate::frontend::{normalize, select_strategy, Strategy};
use crate::middle::{classify_lines, ClassifiedLine};

/// Returned for whitespace-only input
pub const EMPTY_INPUT: &str = "The file is empty or contains only whitespace.";

/// Returned when nothing but plain statements (or nothing at all) was found
pub const NO_CONSTRUCTS: &str = "No classifiable constructs found.";

/// Full result of one transcompiler run
#[derive(Debug, Clone, Serialize)]
pub struct Rendering {
    pub strategy: Strategy,
    pub lines: Vec<ClassifiedLine>,
    pub pseudocode: String,
}

/// Render `raw_text` as pseudocode, guessing the strategy from `path_hint`
/// and the content.
pub fn render(raw_text: &str, path_hint: Option<&str>) -> String {
    transcompile(raw_text, path_hint, None).pseudocode
}

/// Like `render`, but keeps the classified lines and lets the caller force
/// a strategy.
pub fn transcompile(raw_text: &str, path_hint: Option<&str>, forced: Option<Strategy>) -> Rendering {
    let strategy = forced.unwrap_or_else(|| select_strategy(path_hint, raw_text));

    if raw_text.trim().is_empty() {
        return Rendering {
            strategy,
            lines: Vec::new(),
            pseudocode: EMPTY_INPUT.to_string(),
        };
    }

    let lines = classify_lines(&normalize(raw_text), strategy);
    let pseudocode = if printer::has_constructs(&lines) {
        PseudocodePrinter::new().print(&lines)
    } else {
        NO_CONSTRUCTS.to_string()
    };

    Rendering {
        strategy,
        lines,
        pseudocode,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_input_sentinel() {
        assert_eq!(render("", None), EMPTY_INPUT);
        assert_eq!(render("  \n\t\n   ", Some("x.py")), EMPTY_INPUT);
    }

    #[test]
    fn test_no_constructs_sentinel() {
        assert_eq!(render("# only a comment\n", Some("a.py")), NO_CONSTRUCTS);
        assert_eq!(render("pass\nbreak\n", Some("a.py")), NO_CONSTRUCTS);
    }

    #[test]
    fn test_render_python() {
        let src = "def f(x):\n    if x:\n        return 1\n    return 0\n";
        assert_eq!(
            render(src, Some("f.py")),
            "FUNCTION f(x):\n  IF x:\n    RETURN 1\n  RETURN 0"
        );
    }

    #[test]
    fn test_render_sniffs_python_without_hint() {
        let src = "class A:\n    def go(self):\n        run()\n";
        assert_eq!(
            render(src, None),
            "CLASS A:\n  FUNCTION go(self):\n    CALL run()"
        );
    }

    #[test]
    fn test_render_braces() {
        let src = "class C {\n  if (x) {\n    return 1;\n  }\n}\n";
        assert_eq!(
            render(src, Some("C.java")),
            "CLASS C:\n  IF x:\n    RETURN 1\n  END BLOCK\nEND BLOCK"
        );
    }

    #[test]
    fn test_forced_strategy() {
        let src = "if x:\n    y()\n";
        let generic = transcompile(src, Some("a.py"), Some(Strategy::Generic));
        assert_eq!(generic.strategy, Strategy::Generic);
        assert_eq!(generic.pseudocode, "IF x:\nCALL y()");
    }

    #[test]
    fn test_malformed_input_is_total() {
        let inputs = [
            "}}}}\n{{{\n)))(((\n",
            "\t\t  if\n else:\n\x00\n",
            "def (:\n  elif\nreturn",
            "\"unterminated string = (\n",
        ];
        for input in inputs {
            for strategy in [Strategy::Indentation, Strategy::Generic] {
                let result = transcompile(input, None, Some(strategy));
                assert!(!result.pseudocode.is_empty());
            }
        }
    }
}
