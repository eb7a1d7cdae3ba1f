//! JSON input envelope
//!
//! Editor integrations hand over one JSON object describing the request.
//! Field names vary between integrations, so the common spellings are all
//! accepted.

use serde::Deserialize;

use super::Command;
use crate::utils::Result;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Envelope {
    /// Explicit command id (`pseudo_code`, `explain`, ...)
    #[serde(default)]
    pub command_type: Option<String>,

    /// Either a command id or free text, depending on the integration
    #[serde(default)]
    pub command: Option<String>,

    /// Free-text request
    #[serde(default, alias = "prompt")]
    pub content: Option<String>,

    #[serde(default, alias = "fileContent", alias = "input")]
    pub file_content: String,

    #[serde(default, alias = "filePath")]
    pub file_path: Option<String>,
}

impl Envelope {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Resolve what was asked for.
    ///
    /// An explicit `command_type` wins, then a `command` that is itself a
    /// command id, then prefixes of the free text.
    pub fn command(&self) -> Command {
        let free_text = self
            .content
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .or(self.command.as_deref())
            .unwrap_or("");

        if let Some(cmd) = self.command_type.as_deref().and_then(|id| Command::from_id(id, free_text)) {
            return cmd;
        }
        if let Some(cmd) = self.command.as_deref().and_then(|id| Command::from_id(id, free_text)) {
            return cmd;
        }
        Command::from_text(free_text)
    }

    /// Path hint, with the empty string treated as absent
    pub fn path(&self) -> Option<&str> {
        self.file_path.as_deref().filter(|p| !p.is_empty())
    }
}
