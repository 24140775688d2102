//! Outcome shapes of the external bulk CSV import.
//!
//! The importer itself lives outside this workspace. Row-level failures are
//! returned as data in [`ImportResult::errors`], never as an `Err`.

use serde::{Deserialize, Serialize};

/// One rejected CSV row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportError {
    /// 1-based data row; `0` when the importer could not tell.
    pub row: usize,
    pub message: String,
    pub company: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received_value: Option<String>,
}

impl ImportError {
    pub fn new(
        row: usize,
        message: impl Into<String>,
        company: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            row,
            message: message.into(),
            company: company.into(),
            email: email.into(),
            column: None,
            received_value: None,
        }
    }

    /// Attach the offending column and the value received in it.
    pub fn with_column(mut self, column: impl Into<String>, received: Option<String>) -> Self {
        self.column = Some(column.into());
        self.received_value = received;
        self
    }

    /// One-line description: `row 4: invalid date · column: next_followup_at · value: 31/02 (a@b.co)`.
    pub fn describe(&self) -> String {
        let row = if self.row == 0 {
            "?".to_string()
        } else {
            self.row.to_string()
        };
        let mut out = format!("row {row}: {}", self.message);
        if let Some(column) = self.column.as_deref().filter(|c| !c.is_empty()) {
            out.push_str(&format!(" · column: {column}"));
        }
        if let Some(value) = self.received_value.as_deref().filter(|v| !v.is_empty()) {
            out.push_str(&format!(" · value: {value}"));
        }
        if !self.email.is_empty() {
            out.push_str(&format!(" ({})", self.email));
        }
        out
    }
}

/// Counts and row errors of one import run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    pub imported: usize,
    pub skipped: usize,
    #[serde(default)]
    pub errors: Vec<ImportError>,
}

impl ImportResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn summary_line(&self) -> String {
        format!(
            "imported {} · skipped {} · errors {}",
            self.imported,
            self.skipped,
            self.errors.len()
        )
    }
}
