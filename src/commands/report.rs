//! Markdown report templates
//!
//! Each report is a plain string. Whitespace-only source short-circuits to
//! the empty-input sentinel so every report agrees with `render`.

use std::fmt::Write;

use crate::backend::{transcompile, EMPTY_INPUT};
use crate::frontend::{file_name, normalize, select_strategy, Language, Strategy};

use super::stats::{self, LineCounts, Outline};

fn display_name(path: Option<&str>) -> String {
    path.map(file_name).unwrap_or_else(|| "No file".to_string())
}

fn heading_suffix(preposition: &str, path: Option<&str>) -> String {
    match path {
        Some(p) => format!(" {} {}", preposition, file_name(p)),
        None => String::new(),
    }
}

/// Pseudocode wrapped in a report
pub fn pseudo_code(source: &str, path: Option<&str>, forced: Option<Strategy>) -> String {
    if source.trim().is_empty() {
        return EMPTY_INPUT.to_string();
    }
    let language = Language::detect(path, source);
    let rendering = transcompile(source, path, forced);

    let mut out = String::new();
    writeln!(out, "# Pseudo Code{}", heading_suffix("for", path)).unwrap();
    writeln!(out).unwrap();
    writeln!(out, "Language: {}", language).unwrap();
    writeln!(out, "Strategy: {}", rendering.strategy).unwrap();
    writeln!(out).unwrap();
    writeln!(out, "```").unwrap();
    writeln!(out, "{}", rendering.pseudocode).unwrap();
    writeln!(out, "```").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "## Explanation").unwrap();
    writeln!(
        out,
        "The pseudo code above represents the logical structure of the source code, \
with control structures and function definitions highlighted."
    ).unwrap();
    out
}

pub fn explain(source: &str, path: Option<&str>) -> String {
    if source.trim().is_empty() {
        return EMPTY_INPUT.to_string();
    }
    let language = Language::detect(path, source);
    let lines = normalize(source);
    let counts = LineCounts::of(&lines);
    let outline = Outline::of(&lines, select_strategy(path, source));

    let mut out = String::new();
    writeln!(out, "# Code Explanation{}", heading_suffix("for", path)).unwrap();
    writeln!(out).unwrap();
    writeln!(out, "## Overview").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "This is a {} file with {} lines of code.", language, counts.non_blank()).unwrap();
    writeln!(out).unwrap();

    if !outline.is_empty() {
        writeln!(out, "## Structure").unwrap();
        writeln!(out).unwrap();
        write_bullets(&mut out, "Imports", &outline.imports, 10);
        write_bullets(&mut out, "Classes", &outline.classes, usize::MAX);
        write_bullets(&mut out, "Functions", &outline.functions, usize::MAX);
    }

    writeln!(out, "## Purpose").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "Based on the code analysis, this file appears to {}.", purpose(source, &outline)).unwrap();
    writeln!(out).unwrap();

    writeln!(out, "## Potential Issues").unwrap();
    writeln!(out).unwrap();
    let issues = stats::potential_issues(source);
    if issues.is_empty() {
        writeln!(out, "No obvious issues detected in the code.").unwrap();
    } else {
        writeln!(out, "{}", issues.join("\n")).unwrap();
    }
    writeln!(out).unwrap();

    writeln!(out, "## Suggestions for Improvement").unwrap();
    writeln!(out).unwrap();
    let suggestions = stats::improvement_suggestions(source, &counts);
    if suggestions.is_empty() {
        writeln!(out, "The code appears well-structured. No specific improvements suggested.").unwrap();
    } else {
        writeln!(out, "{}", suggestions.join("\n")).unwrap();
    }
    out
}

fn write_bullets(out: &mut String, title: &str, items: &[String], limit: usize) {
    if items.is_empty() {
        return;
    }
    writeln!(out, "### {}", title).unwrap();
    writeln!(out).unwrap();
    for item in items.iter().take(limit) {
        writeln!(out, "- `{}`", item).unwrap();
    }
    if items.len() > limit {
        writeln!(out, "- ... and {} more", items.len() - limit).unwrap();
    }
    writeln!(out).unwrap();
}

fn purpose(source: &str, outline: &Outline) -> &'static str {
    if source.contains("def main") || source.contains("if __name__ == '__main__'") {
        "be a standalone script that can be executed directly"
    } else if !outline.classes.is_empty() && !outline.functions.is_empty() {
        "define classes with methods, implementing a specific component"
    } else if !outline.classes.is_empty() {
        "define data types used by other parts of the application"
    } else if !outline.functions.is_empty() {
        "contain utility functions or helpers for a specific purpose"
    } else if !outline.imports.is_empty() {
        "be a module that wires together functionality from elsewhere"
    } else {
        "be a script or simple program"
    }
}

pub fn summary(source: &str, path: Option<&str>) -> String {
    if source.trim().is_empty() {
        return EMPTY_INPUT.to_string();
    }
    let lines = normalize(source);
    let counts = LineCounts::of(&lines);
    let outline = Outline::of(&lines, select_strategy(path, source));

    let mut out = String::new();
    writeln!(out, "# Summary of {}", display_name(path)).unwrap();
    writeln!(out).unwrap();
    write_counts(&mut out, &counts);
    writeln!(out).unwrap();
    writeln!(out, "## Main Purpose").unwrap();
    writeln!(out).unwrap();
    if source.contains("def main") || source.contains("if __name__ == '__main__'") {
        writeln!(out, "This appears to be a standalone script that can be executed directly.").unwrap();
    } else if !outline.classes.is_empty() {
        writeln!(
            out,
            "This file defines {} class(es), likely implementing specific functionality or components.",
            outline.classes.len()
        ).unwrap();
    } else if !outline.functions.is_empty() {
        writeln!(
            out,
            "This file contains {} function(s), possibly providing utility or helper methods.",
            outline.functions.len()
        ).unwrap();
    } else if !outline.imports.is_empty() {
        writeln!(
            out,
            "This appears to be a module that provides functionality to other parts of the application."
        ).unwrap();
    } else {
        writeln!(out, "No functions or classes were recognized.").unwrap();
    }
    out
}

pub fn line_count(source: &str, path: Option<&str>) -> String {
    if source.trim().is_empty() {
        return EMPTY_INPUT.to_string();
    }
    let counts = LineCounts::of(&normalize(source));
    let mut out = String::new();
    writeln!(out, "# Line Count for {}", display_name(path)).unwrap();
    writeln!(out).unwrap();
    write_counts(&mut out, &counts);
    out
}

fn write_counts(out: &mut String, counts: &LineCounts) {
    writeln!(out, "- Total lines: {}", counts.total).unwrap();
    writeln!(out, "- Code lines: {}", counts.code).unwrap();
    writeln!(out, "- Comment lines: {}", counts.comment).unwrap();
    writeln!(out, "- Blank lines: {}", counts.blank).unwrap();
}

pub fn search(source: &str, term: &str, path: Option<&str>) -> String {
    if source.trim().is_empty() {
        return EMPTY_INPUT.to_string();
    }
    let term = term.trim();
    if term.is_empty() {
        return "No search term provided.".to_string();
    }

    let name = display_name(path);
    let hits = stats::search(source, term);
    if hits.is_empty() {
        return format!("No matches found for '{}' in {}.", term, name);
    }

    let mut out = String::new();
    writeln!(out, "# Search Results for '{}' in {}", term, name).unwrap();
    writeln!(out).unwrap();
    writeln!(out, "Found {} matches:", hits.len()).unwrap();
    writeln!(out).unwrap();
    for (number, text) in hits {
        writeln!(out, "Line {}: {}", number, text).unwrap();
    }
    out
}

/// Fallback for free text that names no known command
pub fn custom(command: &str, source: &str, path: Option<&str>) -> String {
    let extension = path
        .and_then(|p| std::path::Path::new(p).extension())
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default();

    let mut out = String::new();
    writeln!(out, "I received your command: '{}'", command).unwrap();
    writeln!(out).unwrap();
    writeln!(out, "File: {}", display_name(path)).unwrap();
    writeln!(out, "File type: {}", extension).unwrap();
    writeln!(out, "File size: {} characters", source.chars().count()).unwrap();
    writeln!(out).unwrap();
    writeln!(out, "To use this agent effectively, try commands like:").unwrap();
    writeln!(out, "- provide pseudo code to current file").unwrap();
    writeln!(out, "- explain this code").unwrap();
    writeln!(out, "- summarize this code").unwrap();
    writeln!(out, "- count lines in this file").unwrap();
    writeln!(out, "- find [term] in this code").unwrap();
    out
}
