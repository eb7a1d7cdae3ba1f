//! Language Strategy Selector
//!
//! Best-effort guess of the source language and of the classification
//! strategy to run. Nothing here can fail: anything unrecognized resolves to
//! `Language::Unknown` and, in the end, to `Strategy::Generic`.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Which classifier drives the nesting depth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Blocks are delimited by indentation (Python and friends)
    Indentation,
    /// Blocks are delimited by braces
    Generic,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Indentation => write!(f, "indentation"),
            Strategy::Generic => write!(f, "generic"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    Java,
    C,
    Cpp,
    CSharp,
    Go,
    Ruby,
    Php,
    Swift,
    Kotlin,
    Rust,
    Html,
    Css,
    Json,
    Markdown,
    Yaml,
    Xml,
    /// Sniffed only: `class` plus `public`, could be either
    JavaOrCSharp,
    /// Sniffed only: braces and semicolons
    CFamily,
    Unknown,
}

impl Language {
    /// Map a file extension (without the dot, any case)
    pub fn from_extension(ext: &str) -> Option<Self> {
        let lang = match ext.to_ascii_lowercase().as_str() {
            "py" | "pyw" | "pyi" => Language::Python,
            "js" | "jsx" | "mjs" | "cjs" => Language::JavaScript,
            "ts" | "tsx" => Language::TypeScript,
            "java" => Language::Java,
            "c" | "h" => Language::C,
            "cpp" | "cc" | "cxx" | "hpp" => Language::Cpp,
            "cs" => Language::CSharp,
            "go" => Language::Go,
            "rb" => Language::Ruby,
            "php" => Language::Php,
            "swift" => Language::Swift,
            "kt" => Language::Kotlin,
            "rs" => Language::Rust,
            "html" | "htm" => Language::Html,
            "css" => Language::Css,
            "json" => Language::Json,
            "md" => Language::Markdown,
            "yaml" | "yml" => Language::Yaml,
            "xml" => Language::Xml,
            _ => return None,
        };
        Some(lang)
    }

    /// Guess from content alone
    pub fn sniff(text: &str) -> Self {
        let lower = text.to_lowercase();
        if text.contains("def ") && text.contains("import ") {
            Language::Python
        } else if text.contains("function ")
            && (text.contains("var ") || text.contains("let ") || text.contains("const "))
        {
            Language::JavaScript
        } else if text.contains("class ") && text.contains("public ") {
            Language::JavaOrCSharp
        } else if lower.contains("<html>") && lower.contains("</html>") {
            Language::Html
        } else if text.contains('{') && text.contains('}') && text.contains(';') {
            Language::CFamily
        } else {
            Language::Unknown
        }
    }

    /// Extension first, content second
    pub fn detect(path_hint: Option<&str>, text: &str) -> Self {
        path_hint
            .and_then(extension_of)
            .and_then(|ext| Language::from_extension(&ext))
            .unwrap_or_else(|| Language::sniff(text))
    }

    /// Strategy implied by the language, if it implies one
    pub fn strategy(self) -> Option<Strategy> {
        match self {
            Language::Python => Some(Strategy::Indentation),
            Language::Unknown => None,
            _ => Some(Strategy::Generic),
        }
    }

    /// Human-readable name used in reports
    pub fn name(self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::Java => "Java",
            Language::C => "C",
            Language::Cpp => "C++",
            Language::CSharp => "C#",
            Language::Go => "Go",
            Language::Ruby => "Ruby",
            Language::Php => "PHP",
            Language::Swift => "Swift",
            Language::Kotlin => "Kotlin",
            Language::Rust => "Rust",
            Language::Html => "HTML",
            Language::Css => "CSS",
            Language::Json => "JSON",
            Language::Markdown => "Markdown",
            Language::Yaml => "YAML",
            Language::Xml => "XML",
            Language::JavaOrCSharp => "Java or C#",
            Language::CFamily => "a C-family language (C, C++, Java, JavaScript, etc.)",
            Language::Unknown => "an unidentified programming language",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pick a strategy for `text`. Never fails; the fallback is `Generic`.
pub fn select_strategy(path_hint: Option<&str>, text: &str) -> Strategy {
    let by_extension = path_hint
        .and_then(extension_of)
        .and_then(|ext| Language::from_extension(&ext))
        .and_then(Language::strategy);

    let strategy = by_extension.unwrap_or_else(|| sniff_strategy(text));
    log::debug!("selected {} strategy (path hint: {:?})", strategy, path_hint);
    strategy
}

/// Content sniffing: `def`/`class` headers without heavy brace usage.
///
/// Braces count as heavy once lines opening a brace block (ending in `{`) or
/// closing one (exactly `}`) outnumber lines ending in `:`. Braces that open
/// a dict, object or set literal are not blocks.
pub fn sniff_strategy(text: &str) -> Strategy {
    let mut has_headers = false;
    let mut colon_blocks = 0usize;
    let mut brace_blocks = 0usize;
    // One entry per open `{` line: does it open a code block (not a literal)?
    let mut openers: Vec<bool> = Vec::new();

    for line in text.lines() {
        let t = line.trim();
        if t.starts_with("def ") || t.starts_with("class ") || t.starts_with("async def ") {
            has_headers = true;
        }
        if t.ends_with(':') {
            colon_blocks += 1;
        }
        if let Some(head) = t.strip_suffix('{') {
            if t.starts_with('}') {
                openers.pop();
            }
            // `CONFIG = {`, `f({`, `[{`, `"key": {` open literals
            let block = !matches!(head.trim_end().chars().next_back(), Some('=' | '(' | '[' | ',' | ':'));
            if block {
                brace_blocks += 1;
            }
            openers.push(block);
        } else if t.starts_with('}') {
            let block = openers.pop().unwrap_or(true);
            if block && t == "}" {
                brace_blocks += 1;
            }
        }
    }

    if has_headers && brace_blocks <= colon_blocks {
        Strategy::Indentation
    } else {
        Strategy::Generic
    }
}

fn extension_of(path: &str) -> Option<String> {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_string())
}

/// Final path component, for report headings
pub fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_selects_strategy() {
        assert_eq!(select_strategy(Some("src/app.py"), ""), Strategy::Indentation);
        assert_eq!(select_strategy(Some("Main.JAVA"), "def x"), Strategy::Generic);
        assert_eq!(select_strategy(Some("lib.rs"), "class A:\n  pass"), Strategy::Generic);
    }

    #[test]
    fn test_unknown_extension_sniffs_content() {
        let py = "class A:\n    def f(self):\n        return 1\n";
        assert_eq!(select_strategy(Some("notes.txt"), py), Strategy::Indentation);
        assert_eq!(select_strategy(None, py), Strategy::Indentation);
    }

    #[test]
    fn test_brace_heavy_content_is_generic() {
        let js = "class A {\n  def() {\n  }\n}\n";
        assert_eq!(sniff_strategy(js), Strategy::Generic);
    }

    #[test]
    fn test_multiline_literals_are_not_brace_blocks() {
        let py = "\
CONFIG = {
    'name': 'demo',
    'limits': {
        'depth': 3,
    },
}

def main():
    run(CONFIG)
";
        assert_eq!(sniff_strategy(py), Strategy::Indentation);
        assert_eq!(select_strategy(Some("run_me"), py), Strategy::Indentation);
    }

    #[test]
    fn test_unrecognized_falls_back_to_generic() {
        assert_eq!(select_strategy(None, "hello world"), Strategy::Generic);
        assert_eq!(select_strategy(Some("Makefile"), ""), Strategy::Generic);
    }

    #[test]
    fn test_language_detection() {
        assert_eq!(Language::detect(Some("a.tsx"), ""), Language::TypeScript);
        assert_eq!(Language::detect(None, "import os\ndef f(): pass"), Language::Python);
        assert_eq!(Language::detect(None, "int main() { return 0; }"), Language::CFamily);
        assert_eq!(Language::detect(None, "plain words"), Language::Unknown);
        assert_eq!(Language::Cpp.name(), "C++");
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("a/b/c.py"), "c.py");
        assert_eq!(file_name("c.py"), "c.py");
    }
}
