//! Text scanning helpers shared by the classifiers
//!
//! These work on a single stripped line. They know about string literals
//! (so `"a = b"` is not an assignment) but nothing else about syntax.

/// Iterator over the characters of a line that sit outside string literals.
///
/// Quote characters themselves are not yielded. An unterminated literal
/// swallows the rest of the line. A Rust lifetime or loop label (`&'a T`,
/// `'outer: loop`) is code, not the start of a literal.
pub struct CodeChars<'a> {
    text: &'a str,
    inner: std::str::CharIndices<'a>,
    quote: Option<char>,
}

impl<'a> CodeChars<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            inner: text.char_indices(),
            quote: None,
        }
    }
}

impl Iterator for CodeChars<'_> {
    type Item = (usize, char);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (idx, c) = self.inner.next()?;
            match self.quote {
                Some(q) => {
                    if c == '\\' {
                        self.inner.next();
                    } else if c == q {
                        self.quote = None;
                    }
                }
                None => {
                    if c == '\'' && is_lifetime(self.text, idx) {
                        return Some((idx, c));
                    }
                    if matches!(c, '"' | '\'' | '`') {
                        self.quote = Some(c);
                    } else {
                        return Some((idx, c));
                    }
                }
            }
        }
    }
}

/// Whether the `'` at `idx` starts a lifetime or label rather than a quote.
///
/// `'a'` and `'\n'` are literals. An identifier after the tick that is not
/// closed right away counts as a lifetime when it follows `&` or `<`, or
/// when it follows `,`, `+`, `:` or the line start and is itself followed by
/// punctuation (`T: 'static,`, `'outer: loop`).
fn is_lifetime(text: &str, idx: usize) -> bool {
    let rest = &text[idx + 1..];
    let ident_len: usize = rest
        .chars()
        .take_while(|&c| is_word_char(c))
        .map(char::len_utf8)
        .sum();
    if ident_len == 0 || rest[ident_len..].starts_with('\'') {
        return false;
    }
    let before = text[..idx].trim_end().chars().next_back();
    let after = rest[ident_len..].trim_start().chars().next();
    match before {
        Some('&' | '<') => true,
        None | Some(',' | '+' | ':') => {
            matches!(after, None | Some(',' | '>' | '+' | '{' | ')' | ';' | '=' | ':'))
        }
        _ => false,
    }
}

/// Cut a trailing `//` comment that sits outside string literals.
pub fn strip_line_comment(text: &str) -> &str {
    for (idx, c) in CodeChars::new(text) {
        if c == '/' && next_char(text, idx, c) == Some('/') {
            return text[..idx].trim_end();
        }
    }
    text
}

/// The line with every string literal removed.
pub fn code_text(text: &str) -> String {
    CodeChars::new(text).map(|(_, c)| c).collect()
}

fn prev_char(text: &str, idx: usize) -> Option<char> {
    text[..idx].chars().next_back()
}

fn next_char(text: &str, idx: usize, c: char) -> Option<char> {
    text[idx + c.len_utf8()..].chars().next()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// If `text` starts with the word `keyword`, return what follows it
/// (left-trimmed). `keyword` may itself contain spaces (`"else if"`).
pub fn strip_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(keyword)?;
    match rest.chars().next() {
        Some(c) if is_word_char(c) => None,
        _ => Some(rest.trim_start()),
    }
}

/// Byte offset of an assignment `=` outside strings and brackets.
///
/// Comparison operators (`==`, `!=`, `<=`, `>=`) and arrows (`=>`) do not
/// count. Compound assignments (`+=`, `:=`) do.
pub fn find_assignment(text: &str) -> Option<usize> {
    let mut depth = 0i32;
    for (idx, c) in CodeChars::new(text) {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            '=' if depth == 0 => {
                let prev = prev_char(text, idx);
                let next = next_char(text, idx, c);
                let comparison = matches!(prev, Some('=' | '!' | '<' | '>'))
                    || matches!(next, Some('=' | '>'));
                if !comparison {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

/// Something applied to balanced parentheses: `f(x)`, `obj.m()`, `g()(1)`.
pub fn looks_like_call(text: &str) -> bool {
    let mut depth = 0i32;
    let mut applied = false;
    for (idx, c) in CodeChars::new(text) {
        match c {
            '(' => {
                let callee = text[..idx].trim_end().chars().next_back();
                if matches!(callee, Some(p) if is_word_char(p) || p == ')' || p == ']') {
                    applied = true;
                }
                depth += 1;
            }
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    applied && depth == 0
}

/// Count `{` and `}` outside strings, stopping at a `//` comment.
pub fn count_braces(text: &str) -> (usize, usize) {
    let mut opens = 0;
    let mut closes = 0;
    for (idx, c) in CodeChars::new(text) {
        match c {
            '{' => opens += 1,
            '}' => closes += 1,
            '/' if next_char(text, idx, c) == Some('/') => break,
            _ => {}
        }
    }
    (opens, closes)
}

/// Index of the `)` matching the `(` at byte offset `open`.
fn matching_paren(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0i32;
    for (idx, c) in CodeChars::new(text) {
        if idx < open {
            continue;
        }
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

/// Drop one wrapping pair of parentheses: `(x > 0)` becomes `x > 0`.
pub fn unwrap_parens(text: &str) -> &str {
    let t = text.trim();
    if t.starts_with('(') && matching_paren(t, 0) == Some(t.len() - 1) {
        t[1..t.len() - 1].trim()
    } else {
        t
    }
}

/// Condition/header text of a block opener, minus its `:` or `{` terminator.
pub fn block_header(rest: &str) -> &str {
    let t = rest.trim();
    let t = t.strip_suffix('{').unwrap_or(t).trim_end();
    let t = t.strip_suffix(':').unwrap_or(t).trim_end();
    unwrap_parens(t)
}

/// Header of a colon-terminated block opener, cut at the block colon.
///
/// `x > 0: return 1` gives `x > 0`; colons inside brackets (`d[a:b]`) or
/// strings do not cut.
pub fn colon_header(rest: &str) -> &str {
    let mut depth = 0i32;
    for (idx, c) in CodeChars::new(rest) {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            ':' if depth == 0 => return unwrap_parens(&rest[..idx]),
            _ => {}
        }
    }
    unwrap_parens(rest)
}

/// `name(params)` from what follows a function keyword.
///
/// `f(x, y) -> int:` gives `f(x, y)`. Without parentheses the trimmed header
/// is returned as-is.
pub fn signature(rest: &str) -> String {
    let t = rest.trim();
    let Some(open) = t.find('(') else {
        return block_header(t).to_string();
    };
    let name = t[..open].trim();
    match matching_paren(t, open) {
        Some(close) => format!("{}({})", name, t[open + 1..close].trim()),
        None => format!("{}({})", name, t[open + 1..].trim_end_matches([':', '{', ')', ' '])),
    }
}

/// Strip a statement terminator.
pub fn without_semicolon(text: &str) -> &str {
    text.strip_suffix(';').unwrap_or(text).trim_end()
}
