use serde::Serialize;

use crate::types::DbId;

/// Tag reported for [`CoreError::NotFound`].
pub const TAG_NOT_FOUND: &str = "NOT_FOUND";
/// Tag reported for [`CoreError::Validation`].
pub const TAG_VALIDATION: &str = "VALIDATION_ERROR";
/// Tag reported for [`CoreError::PartialBatch`].
pub const TAG_PARTIAL_BATCH: &str = "PARTIAL_BATCH_FAILURE";

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A derived customer/contact (or any record) id is absent from the current snapshot.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Local shape or required-field checks failed before any store call.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The store rejected a call. `tag` is never empty: when the store did not
    /// embed one, it is synthesized from the command name.
    #[error("[{tag}] {message}")]
    Invocation {
        command: String,
        tag: String,
        message: String,
    },

    /// At least one write of a fan-out failed. Writes that succeeded stand.
    #[error("Partial batch failure: {0}")]
    PartialBatch(BatchFailure),
}

impl CoreError {
    /// Machine-readable tag for presentation layers.
    pub fn tag(&self) -> &str {
        match self {
            CoreError::NotFound { .. } => TAG_NOT_FOUND,
            CoreError::Validation(_) => TAG_VALIDATION,
            CoreError::Invocation { tag, .. } => tag,
            CoreError::PartialBatch(_) => TAG_PARTIAL_BATCH,
        }
    }

    /// Human-readable message without the tag.
    pub fn friendly_message(&self) -> String {
        match self {
            CoreError::NotFound { entity, id } => format!("{entity} with id {id} not found"),
            CoreError::Validation(msg) => msg.clone(),
            CoreError::Invocation { message, .. } => message.clone(),
            CoreError::PartialBatch(failure) => failure.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| match &err.message {
                    Some(message) => format!("{field}: {message}"),
                    None => format!("{field}: {}", err.code),
                })
            })
            .collect();
        details.sort();
        CoreError::Validation(details.join("; "))
    }
}

// ---------------------------------------------------------------------------
// Batch failures
// ---------------------------------------------------------------------------

/// One rejected write inside a fan-out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedWrite {
    pub id: DbId,
    pub tag: String,
    pub message: String,
}

/// Per-item outcome of a fan-out that had at least one rejected write.
///
/// `succeeded` lists ids whose write was applied and is not rolled back, so
/// callers can reconcile the group deterministically.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchFailure {
    pub operation: String,
    pub succeeded: Vec<DbId>,
    pub failed: Vec<FailedWrite>,
}

impl BatchFailure {
    /// Number of writes the fan-out attempted.
    pub fn attempted(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

impl std::fmt::Display for BatchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} of {} writes failed",
            self.operation,
            self.failed.len(),
            self.attempted()
        )?;
        if let Some(first) = self.failed.first() {
            write!(f, " (first: lead {} [{}] {})", first.id, first.tag, first.message)?;
        }
        Ok(())
    }
}
