//! Flow validation
//!
//! Opt-in checks over a block sequence. Mutators never run these; a host or
//! a session configured with `validate_edits` does. Produces a
//! `FlowValidationResult` with errors and warnings, each pointing at the
//! block it concerns.

use std::collections::HashSet;

use serde::Serialize;

use crate::core::{Block, BlockKind};

// ── Result types ────────────────────────────────────────────────────────────

/// What a finding is about, independent of the values involved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum IssueKind {
    DuplicateId,
    LengthRange,
    InvalidUrl,
    NoEntries,
    BlankEntry,
    RequiredScreen,
    MissingTask,
}

/// A single finding with optional location and suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub kind: IssueKind,
    /// Block id where the problem was found (if applicable).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
    /// Human-readable description.
    pub message: String,
    /// Optional suggestion for how to fix it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Overall validation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl FlowValidationResult {
    fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn add_error(
        &mut self,
        kind: IssueKind,
        block_id: Option<&str>,
        message: impl Into<String>,
        suggestion: Option<&str>,
    ) {
        self.valid = false;
        self.errors.push(ValidationIssue {
            kind,
            block_id: block_id.map(|s| s.to_string()),
            message: message.into(),
            suggestion: suggestion.map(|s| s.to_string()),
        });
    }

    fn add_warning(
        &mut self,
        kind: IssueKind,
        block_id: Option<&str>,
        message: impl Into<String>,
        suggestion: Option<&str>,
    ) {
        self.warnings.push(ValidationIssue {
            kind,
            block_id: block_id.map(|s| s.to_string()),
            message: message.into(),
            suggestion: suggestion.map(|s| s.to_string()),
        });
    }

    /// Merge another result into this one.
    fn merge(&mut self, other: FlowValidationResult) {
        if !other.valid {
            self.valid = false;
        }
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Errors that concern `block_id`
    pub fn errors_for<'a>(&'a self, block_id: &'a str) -> impl Iterator<Item = &'a ValidationIssue> {
        self.errors
            .iter()
            .filter(move |e| e.block_id.as_deref() == Some(block_id))
    }

    /// Errors in `self` whose kind `baseline` does not already report
    pub fn errors_not_in<'a>(
        &'a self,
        baseline: &'a FlowValidationResult,
    ) -> impl Iterator<Item = &'a ValidationIssue> {
        self.errors
            .iter()
            .filter(move |e| !baseline.errors.iter().any(|b| b.kind == e.kind))
    }
}

// ── Validator ───────────────────────────────────────────────────────────────

/// Validates an ordered block sequence.
pub struct FlowValidator;

impl FlowValidator {
    /// Run every check against `blocks`.
    pub fn validate(blocks: &[Block]) -> FlowValidationResult {
        let mut result = FlowValidationResult::ok();

        result.merge(Self::check_unique_ids(blocks));
        for block in blocks {
            result.merge(Self::validate_block(block));
        }

        result
    }

    /// Checks that only look at one block.
    pub fn validate_block(block: &Block) -> FlowValidationResult {
        let mut result = FlowValidationResult::ok();
        let id = block.id.as_str();

        if block.required && block.block_type().is_screen() {
            result.add_warning(
                IssueKind::RequiredScreen,
                Some(id),
                format!("{} block '{}' is marked required but collects no answer", block.block_type(), id),
                Some("Untick 'Required' on welcome and thank-you screens"),
            );
        }

        match &block.kind {
            BlockKind::ShortText(text) | BlockKind::LongText(text) => {
                if text.min_length > text.max_length {
                    result.add_error(
                        IssueKind::LengthRange,
                        Some(id),
                        format!(
                            "Minimum length {} exceeds maximum length {} on block '{}'",
                            text.min_length, text.max_length, id
                        ),
                        Some("Lower the minimum or raise the maximum length"),
                    );
                }
            }
            BlockKind::SingleChoice(choice) | BlockKind::MultipleChoice(choice) => {
                Self::check_entries(&mut result, id, "option", &choice.options);
            }
            BlockKind::Likert(likert) => {
                Self::check_entries(&mut result, id, "statement", &likert.statements);
            }
            BlockKind::Navigation(nav) => {
                if !is_web_url(&nav.navigation_url) {
                    result.add_error(
                        IssueKind::InvalidUrl,
                        Some(id),
                        format!("Navigation URL '{}' on block '{}' is not a web address", nav.navigation_url, id),
                        Some("Use a full address such as https://example.com"),
                    );
                }
                if nav.navigation_task.trim().is_empty() {
                    result.add_warning(
                        IssueKind::MissingTask,
                        Some(id),
                        format!("Navigation block '{}' has no task description", id),
                        Some("Tell participants what to do on the page"),
                    );
                }
            }
            BlockKind::Welcome
            | BlockKind::YesNo
            | BlockKind::Nps
            | BlockKind::Prototype
            | BlockKind::OpenQuestion
            | BlockKind::ThankYou => {}
        }

        result
    }

    // ── Individual checks ───────────────────────────────────────────────

    /// No two blocks may share an id.
    fn check_unique_ids(blocks: &[Block]) -> FlowValidationResult {
        let mut result = FlowValidationResult::ok();
        let mut seen = HashSet::new();
        for block in blocks {
            if !seen.insert(block.id.as_str()) {
                result.add_error(
                    IssueKind::DuplicateId,
                    Some(block.id.as_str()),
                    format!("Duplicate block id '{}'", block.id),
                    Some("Give every block its own id"),
                );
            }
        }
        result
    }

    fn check_entries(result: &mut FlowValidationResult, id: &str, noun: &str, entries: &[String]) {
        if entries.is_empty() {
            result.add_warning(
                IssueKind::NoEntries,
                Some(id),
                format!("Block '{}' has no {}s", id, noun),
                Some("Add at least one entry"),
            );
        }
        for (index, entry) in entries.iter().enumerate() {
            if entry.trim().is_empty() {
                result.add_warning(
                    IssueKind::BlankEntry,
                    Some(id),
                    format!("{} {} on block '{}' is blank", capitalize(noun), index + 1, id),
                    Some("Fill in or remove the blank entry"),
                );
            }
        }
    }
}

/// `http(s)://host[...]` with a non-empty host and no whitespace
fn is_web_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    match rest {
        Some(rest) => {
            let host = rest.split(['/', '?', '#']).next().unwrap_or("");
            !host.is_empty() && !url.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
