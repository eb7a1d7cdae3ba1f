//! Commands module - the reports built around the transcompiler
//!
//! Every request, whether it comes from the CLI or a JSON envelope, becomes
//! one `Command` and runs through `execute`.

pub mod envelope;
pub mod report;
pub mod stats;

pub use envelope::Envelope;

use crate::frontend::Strategy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    PseudoCode,
    Explain,
    Summarize,
    CountLines,
    Search(String),
    /// Free text that names no known command
    Custom(String),
}

impl Command {
    /// Parse a command id. `custom` and unknown ids give `None` so the
    /// caller can fall back to free text.
    pub fn from_id(id: &str, free_text: &str) -> Option<Self> {
        let cmd = match id.trim().to_lowercase().as_str() {
            "pseudo_code" | "pseudocode" | "pseudo" => Command::PseudoCode,
            "explain" => Command::Explain,
            "summarize" | "summary" => Command::Summarize,
            "count_lines" | "count" => Command::CountLines,
            "search" | "find" => {
                let term = search_term(&free_text.to_lowercase())
                    .unwrap_or_else(|| free_text.trim().to_lowercase());
                Command::Search(term)
            }
            _ => return None,
        };
        Some(cmd)
    }

    /// Recognize a request written as free text
    pub fn from_text(text: &str) -> Self {
        let lower = text.trim().to_lowercase();
        if lower.starts_with("explain") {
            Command::Explain
        } else if lower.starts_with("pseudocode")
            || lower.starts_with("provide pseudo")
            || lower.contains("pseudo code")
        {
            Command::PseudoCode
        } else if lower.contains("summarize") || lower.contains("summary") {
            Command::Summarize
        } else if lower.contains("count") && lower.contains("lines") {
            Command::CountLines
        } else if let Some(term) = search_term(&lower) {
            Command::Search(term)
        } else {
            Command::Custom(text.trim().to_string())
        }
    }
}

/// `find foo in this code` → `foo`
fn search_term(lower: &str) -> Option<String> {
    let after = ["find", "search"]
        .iter()
        .find_map(|&kw| lower.find(kw).map(|idx| &lower[idx + kw.len()..]))?;

    let mut term = after.trim();
    term = term.strip_prefix("for ").unwrap_or(term);
    for suffix in [" in this code", " in this file", " in the code", " in the file"] {
        if let Some(t) = term.strip_suffix(suffix) {
            term = t;
            break;
        }
    }
    Some(term.trim().to_string())
}

/// Run one command against `source`
pub fn execute(command: &Command, source: &str, path: Option<&str>, forced: Option<Strategy>) -> String {
    log::debug!("executing {:?} (path hint: {:?})", command, path);
    match command {
        Command::PseudoCode => report::pseudo_code(source, path, forced),
        Command::Explain => report::explain(source, path),
        Command::Summarize => report::summary(source, path),
        Command::CountLines => report::line_count(source, path),
        Command::Search(term) => report::search(source, term, path),
        Command::Custom(text) => report::custom(text, source, path),
    }
}

/// Resolve and run whatever an envelope asks for
pub fn run_envelope(envelope: &Envelope) -> String {
    execute(&envelope.command(), &envelope.file_content, envelope.path(), None)
}
