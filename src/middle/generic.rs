//! Generic Strategy
//!
//! Classifier for brace-delimited source. Tags come from keyword sniffing;
//! depth comes only from counting braces. A line is emitted at the depth in
//! force when it starts, then its net `{`/`}` balance is applied.
#![allow(dead_code)]

use once_cell::sync::Lazy;
use regex::Regex;

use crate::frontend::SourceLine;

use super::classified::{ClassifiedLine, Tag};
use super::scan;

const MODIFIERS: &str = r"(?:(?:pub(?:\([^)]*\))?|public|private|protected|internal|static|final|virtual|override|inline|extern|abstract|async|synchronized|unsafe|const|constexpr|export|default)\s+)*";

static FUNCTION_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bfunction\b").unwrap());

static KEYWORD_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^{}(?:fn|func|def|sub)\s+(.*)$", MODIFIERS)).unwrap()
});

static TYPED_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^{}([A-Za-z_][\w:.<>,\[\]]*[*&]*)\s+[*&]*([A-Za-z_]\w*)\s*\(",
        MODIFIERS
    ))
    .unwrap()
});

static CLASS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(?:public|private|protected|internal|static|final|abstract|sealed|partial|export|default|data|open|pub(?:\([^)]*\))?)\s+)*(?:class|struct|interface|trait|enum)\s+(.*)$",
    )
    .unwrap()
});

/// Words that can sit in the "type" or "name" slot of a typed signature
/// without the line being a function definition.
const CONTROL_WORDS: &[&str] = &[
    "if", "else", "for", "foreach", "while", "switch", "catch", "return", "new", "throw",
    "case", "do", "await", "yield", "typeof", "delete", "sizeof", "not", "and", "or", "in",
    "echo", "print", "goto", "using", "import", "package", "var", "let",
];

/// Nesting state for brace-delimited source
#[derive(Debug, Default)]
pub struct GenericClassifier {
    brace_depth: usize,
    output: Vec<ClassifiedLine>,
}

impl GenericClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify every code line, in order. Consumes the classifier.
    pub fn classify(mut self, lines: &[SourceLine]) -> Vec<ClassifiedLine> {
        for line in lines.iter().filter(|l| l.is_code()) {
            self.classify_line(line);
        }
        log::debug!(
            "generic strategy: {} lines classified, final brace depth {}",
            self.output.len(),
            self.brace_depth
        );
        self.output
    }

    /// Current brace depth
    pub fn depth(&self) -> usize {
        self.brace_depth
    }

    fn classify_line(&mut self, line: &SourceLine) {
        let (closers, rest) = split_leading_closers(scan::strip_line_comment(&line.stripped));
        for _ in 0..closers {
            self.close();
        }

        if rest.trim_matches([';', ')', ',', ' ']).is_empty() {
            if closers > 0 {
                self.output
                    .push(ClassifiedLine::new(self.brace_depth, Tag::BlockEnd, "", line.number));
            }
            return;
        }

        if rest != "{" {
            let (tag, content) = sniff(rest);
            self.output
                .push(ClassifiedLine::new(self.brace_depth, tag, content, line.number));
        }

        let (opens, closes) = scan::count_braces(rest);
        self.brace_depth = (self.brace_depth + opens).saturating_sub(closes);
        if opens != closes {
            log::trace!("line {}: brace depth now {}", line.number, self.brace_depth);
        }
    }

    fn close(&mut self) {
        self.brace_depth = self.brace_depth.saturating_sub(1);
    }
}

/// Count `}` at the start of a line (`} else {`, `}}`), returning the rest.
fn split_leading_closers(text: &str) -> (usize, &str) {
    let mut closers = 0;
    let mut rest = text;
    while let Some(r) = rest.strip_prefix('}') {
        closers += 1;
        rest = r.trim_start();
    }
    (closers, rest)
}

/// Keyword sniffing, first match wins.
fn sniff(text: &str) -> (Tag, String) {
    if FUNCTION_WORD.is_match(&scan::code_text(text)) {
        return (Tag::Function, function_word_signature(text));
    }
    if let Some(caps) = KEYWORD_FUNCTION.captures(text) {
        return (Tag::Function, scan::signature(&caps[1]));
    }
    if let Some(caps) = TYPED_FUNCTION.captures(text) {
        let is_control = CONTROL_WORDS.contains(&&caps[1]) || CONTROL_WORDS.contains(&&caps[2]);
        if !is_control && !text.ends_with(';') {
            let name_start = caps.get(2).map_or(0, |m| m.start());
            return (Tag::Function, scan::signature(&text[name_start..]));
        }
    }
    if let Some(caps) = CLASS.captures(text) {
        return (Tag::Class, scan::block_header(&caps[1]).to_string());
    }
    if let Some(rest) = ["else if", "elseif", "elsif", "elif"]
        .iter()
        .find_map(|kw| scan::strip_keyword(text, kw))
    {
        return (Tag::ElseIf, scan::block_header(rest).to_string());
    }
    if let Some(rest) = scan::strip_keyword(text, "if") {
        return (Tag::If, scan::block_header(rest).to_string());
    }
    if let Some(rest) = scan::strip_keyword(text, "else") {
        return (Tag::Else, scan::block_header(rest).to_string());
    }
    if let Some(rest) = scan::strip_keyword(text, "for")
        .or_else(|| scan::strip_keyword(text, "foreach"))
    {
        return (Tag::For, scan::block_header(rest).to_string());
    }
    if let Some(rest) = scan::strip_keyword(text, "while") {
        return (Tag::While, scan::block_header(rest).to_string());
    }
    if let Some(rest) = scan::strip_keyword(text, "return") {
        return (Tag::Return, scan::without_semicolon(rest).to_string());
    }

    let content = scan::without_semicolon(text).to_string();
    if scan::find_assignment(text).is_some() {
        (Tag::Assign, content)
    } else if scan::looks_like_call(text) {
        (Tag::Call, content)
    } else {
        (Tag::Statement, content)
    }
}

/// `function name(a, b)` or `const name = function(a, b)`.
fn function_word_signature(text: &str) -> String {
    let Some(m) = FUNCTION_WORD.find(text) else {
        return scan::block_header(text).to_string();
    };
    let rest = text[m.end()..].trim_start().trim_start_matches('*').trim_start();
    let sig = scan::signature(rest);
    if !sig.starts_with('(') {
        return sig;
    }
    match scan::find_assignment(&text[..m.start()]) {
        Some(eq) => {
            let target = text[..eq].trim_end_matches([':', '+', ' ']);
            let name = target.rsplit(' ').next().unwrap_or(target);
            format!("{}{}", name, sig)
        }
        None => sig,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::normalize;

    fn classify(src: &str) -> Vec<ClassifiedLine> {
        GenericClassifier::new().classify(&normalize(src))
    }

    fn shape(src: &str) -> Vec<(usize, Tag, String)> {
        classify(src)
            .into_iter()
            .map(|l| (l.depth, l.tag, l.content))
            .collect()
    }

    #[test]
    fn test_brace_depth_sequence() {
        let lines = normalize("class C {\n  if (x) {\n    return 1;\n  }\n}\n");
        let mut classifier = GenericClassifier::new();
        let mut depths = vec![classifier.depth()];
        for line in &lines {
            classifier.classify_line(line);
            depths.push(classifier.depth());
        }
        assert_eq!(depths, vec![0, 1, 2, 2, 1, 0]);

        let got: Vec<(usize, Tag)> = classifier.output.iter().map(|l| (l.depth, l.tag)).collect();
        assert_eq!(
            got,
            vec![
                (0, Tag::Class),
                (1, Tag::If),
                (2, Tag::Return),
                (1, Tag::BlockEnd),
                (0, Tag::BlockEnd),
            ]
        );
    }

    #[test]
    fn test_extra_closers_clamp_at_zero() {
        let lines = normalize("}\n}\nfoo();\n");
        let mut classifier = GenericClassifier::new();
        for line in &lines {
            classifier.classify_line(line);
            assert_eq!(classifier.depth(), 0);
        }
        let got: Vec<(usize, Tag)> = classifier.output.iter().map(|l| (l.depth, l.tag)).collect();
        assert_eq!(got, vec![(0, Tag::BlockEnd), (0, Tag::BlockEnd), (0, Tag::Call)]);
    }

    #[test]
    fn test_balanced_braces_return_to_zero() {
        let src = "\
function add(a, b) {
  for (let i = 0; i < 3; i++) {
    while (busy) {
      tick();
    }
  }
  return a + b;
}
";
        let lines = normalize(src);
        let mut classifier = GenericClassifier::new();
        for line in &lines {
            classifier.classify_line(line);
        }
        assert_eq!(classifier.depth(), 0);
        assert_eq!(classifier.output[0].content, "add(a, b)");
        assert_eq!(classifier.output[1].tag, Tag::For);
        assert_eq!(classifier.output[1].content, "let i = 0; i < 3; i++");
        assert_eq!(classifier.output[2].tag, Tag::While);
        assert_eq!(classifier.output[3].depth, 3);
    }

    #[test]
    fn test_else_chains_on_closing_lines() {
        let src = "if (a) {\n  x = 1;\n} else if (b) {\n  x = 2;\n} else {\n  x = 3;\n}\n";
        let got = shape(src);
        assert_eq!(
            got,
            vec![
                (0, Tag::If, "a".to_string()),
                (1, Tag::Assign, "x = 1".to_string()),
                (0, Tag::ElseIf, "b".to_string()),
                (1, Tag::Assign, "x = 2".to_string()),
                (0, Tag::Else, String::new()),
                (1, Tag::Assign, "x = 3".to_string()),
                (0, Tag::BlockEnd, String::new()),
            ]
        );
    }

    #[test]
    fn test_typed_signatures() {
        let got = shape("public static void main(String[] args) {\n  System.out.println(args);\n}\n");
        assert_eq!(got[0], (0, Tag::Function, "main(String[] args)".to_string()));
        assert_eq!(got[1], (1, Tag::Call, "System.out.println(args)".to_string()));

        let got = shape("int total = sum(a, b);\nreturn compute(x);\nelse_value(1);\n");
        assert_eq!(got[0].1, Tag::Assign);
        assert_eq!(got[1].1, Tag::Return);
        assert_eq!(got[2].1, Tag::Call);
    }

    #[test]
    fn test_keyword_functions() {
        let got = shape("pub fn parse(input: &str) -> Result<()> {\n}\nfunc main() {\n}\n");
        assert_eq!(got[0], (0, Tag::Function, "parse(input: &str)".to_string()));
        assert_eq!(got[2], (0, Tag::Function, "main()".to_string()));
    }

    #[test]
    fn test_function_expressions() {
        let got = shape("const handler = function(req, res) {\n};\n");
        assert_eq!(got[0], (0, Tag::Function, "handler(req, res)".to_string()));
        assert_eq!(got[1], (0, Tag::BlockEnd, String::new()));

        let got = shape("log(\"function\");\n");
        assert_eq!(got[0].1, Tag::Call);
    }

    #[test]
    fn test_allman_braces() {
        let got = shape("void run()\n{\n    step();\n}\n");
        assert_eq!(got.len(), 3);
        assert_eq!(got[0], (0, Tag::Function, "run()".to_string()));
        assert_eq!(got[1], (1, Tag::Call, "step()".to_string()));
        assert_eq!(got[2], (0, Tag::BlockEnd, String::new()));
    }

    #[test]
    fn test_foreach_and_statements() {
        let got = shape("foreach ($items as $item) {\n  break;\n}\n");
        assert_eq!(got[0], (0, Tag::For, "$items as $item".to_string()));
        assert_eq!(got[1], (1, Tag::Statement, "break".to_string()));
    }

    #[test]
    fn test_closer_with_trailing_comment() {
        let got = shape("if (a) {\n  x(); // step\n} // end if\ny();\n");
        assert_eq!(
            got,
            vec![
                (0, Tag::If, "a".to_string()),
                (1, Tag::Call, "x()".to_string()),
                (0, Tag::BlockEnd, String::new()),
                (0, Tag::Call, "y()".to_string()),
            ]
        );
    }

    #[test]
    fn test_rust_lifetimes_keep_nesting() {
        let src = "\
fn name(x: &'static str) {
    let y = 1;
    y
}
impl<'a> Lines<'a> {
    fn next(&mut self) -> Option<&'a str> {
        None
    }
}
";
        let got = shape(src);
        assert_eq!(got[0], (0, Tag::Function, "name(x: &'static str)".to_string()));
        assert_eq!(got[1], (1, Tag::Assign, "let y = 1".to_string()));
        assert_eq!(got[2], (1, Tag::Statement, "y".to_string()));
        assert_eq!(got[3], (0, Tag::BlockEnd, String::new()));
        assert_eq!(got[5], (1, Tag::Function, "next(&mut self)".to_string()));
        assert_eq!(got[6], (2, Tag::Statement, "None".to_string()));
        assert_eq!(got[7], (1, Tag::BlockEnd, String::new()));
        assert_eq!(got[8], (0, Tag::BlockEnd, String::new()));
    }
}
