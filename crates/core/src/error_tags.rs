//! Store error tags and the normalizer that recovers them.
//!
//! The store embeds a machine tag in free text as `[TAG_NAME] human message`.
//! [`normalize_error`] only trusts a tag at the very start of the message or
//! right after one of [`TRUSTED_PREFIXES`], and only within the first
//! [`TAG_SCAN_WINDOW`] characters. Bracketed text anywhere else is left alone.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Runtime prefixes the invoking layer may put in front of a store message.
pub const TRUSTED_PREFIXES: &[&str] = &[
    "Error: ",
    "Command error: ",
    "Error invoking command: ",
    "InvokeError: ",
];

/// A tag must close within this many leading characters of the message.
pub const TAG_SCAN_WINDOW: usize = 80;

/// `[TAG] ` anchored at the start of the candidate slice.
static LEADING_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[([A-Z0-9_]+)\] ").expect("valid regex"));

// ---------------------------------------------------------------------------
// Tag vocabulary
// ---------------------------------------------------------------------------

/// Tags the store is known to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorTag {
    RecordNotFound,
    RestoreInvalidSqlite,
    RestoreFileNotFound,
    RestoreInvalidExtension,
    RestorePreBackupFailed,
    RestoreCopyFailed,
    RestoreRollbackFailed,
    ImportEmptyCsv,
    ImportInvalidDate,
    ImportParseFailed,
    ImportDatabaseFailed,
}

impl ErrorTag {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RecordNotFound => "RECORD_NOT_FOUND",
            Self::RestoreInvalidSqlite => "RESTORE_INVALID_SQLITE",
            Self::RestoreFileNotFound => "RESTORE_FILE_NOT_FOUND",
            Self::RestoreInvalidExtension => "RESTORE_INVALID_EXTENSION",
            Self::RestorePreBackupFailed => "RESTORE_PRE_BACKUP_FAILED",
            Self::RestoreCopyFailed => "RESTORE_COPY_FAILED",
            Self::RestoreRollbackFailed => "RESTORE_ROLLBACK_FAILED",
            Self::ImportEmptyCsv => "IMPORT_EMPTY_CSV",
            Self::ImportInvalidDate => "IMPORT_INVALID_DATE",
            Self::ImportParseFailed => "IMPORT_PARSE_FAILED",
            Self::ImportDatabaseFailed => "IMPORT_DATABASE_FAILED",
        }
    }
}

impl std::fmt::Display for ErrorTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render `message` in the store's tagged wire form: `[TAG] message`.
pub fn tagged_error(tag: ErrorTag, message: impl Into<String>) -> String {
    format!("[{}] {}", tag.as_str(), message.into())
}

/// Fallback tag for a failed command that carried no tag of its own.
///
/// `"update_lead"` → `"CMD_UPDATE_LEAD_FAILED"`.
pub fn default_command_tag(command: &str) -> String {
    let normalized: String = command
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() {
                ch.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("CMD_{normalized}_FAILED")
}

// ---------------------------------------------------------------------------
// Raw error input
// ---------------------------------------------------------------------------

/// Canonical form of whatever the store rejected a call with.
///
/// Plain strings, JSON strings, and JSON objects exposing a `message` field
/// all collapse into one message string here, so the normalizer never has
/// to branch on payload shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawError {
    message: String,
}

impl RawError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for RawError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for RawError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<serde_json::Value> for RawError {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(text) => Self::new(text),
            serde_json::Value::Object(ref map) => match map.get("message") {
                Some(serde_json::Value::String(text)) => Self::new(text.clone()),
                _ => Self::new(value.to_string()),
            },
            other => Self::new(other.to_string()),
        }
    }
}

impl std::fmt::Display for RawError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for RawError {}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// A store error split into its tag (if one was trusted) and display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedError {
    pub tag: Option<String>,
    pub friendly_message: String,
}

/// Extract a leading `[TAG]` from a store error.
///
/// ```
/// use leadbook_core::error_tags::{normalize_error, RawError};
///
/// let parsed = normalize_error(&RawError::from("[RESTORE_INVALID_SQLITE] arquivo inválido"));
/// assert_eq!(parsed.tag.as_deref(), Some("RESTORE_INVALID_SQLITE"));
/// assert_eq!(parsed.friendly_message, "arquivo inválido");
/// ```
pub fn normalize_error(raw: &RawError) -> NormalizedError {
    let text = raw.message();

    let offsets = std::iter::once(0).chain(
        TRUSTED_PREFIXES
            .iter()
            .filter(|prefix| text.starts_with(**prefix))
            .map(|prefix| prefix.len()),
    );

    for offset in offsets {
        let candidate = &text[offset..];
        let Some(caps) = LEADING_TAG_RE.captures(candidate) else {
            continue;
        };
        let (Some(whole), Some(tag)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        // Closing bracket sits right after the tag body.
        let tag_end = offset + tag.end() + 1;
        if text[..tag_end].chars().count() > TAG_SCAN_WINDOW {
            continue;
        }

        let rest = candidate[whole.end()..].trim();
        return NormalizedError {
            tag: Some(tag.as_str().to_string()),
            friendly_message: if rest.is_empty() {
                text.to_string()
            } else {
                rest.to_string()
            },
        };
    }

    NormalizedError {
        tag: None,
        friendly_message: text.to_string(),
    }
}

/// Whether `message` already starts with a well-formed `[TAG] `.
pub fn has_leading_tag(message: &str) -> bool {
    LEADING_TAG_RE.is_match(message)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
