//! Instrumented store calls.
//!
//! [`invoke`] is the only path from the services to the store: it records
//! start/finish timestamps for every call and turns rejections into
//! [`CoreError::Invocation`] with a trusted tag or a synthesized fallback.

use std::future::Future;
use std::time::{Duration, Instant};

use chrono::Utc;
use leadbook_core::error::CoreError;
use leadbook_core::error_tags::{default_command_tag, normalize_error};
use leadbook_core::log_redaction::build_payload_summary;
use leadbook_core::types::DbId;

use crate::store::StoreResult;

/// Log summary for calls that only carry a record id.
pub fn id_summary(id: DbId) -> String {
    build_payload_summary(&[("id", serde_json::json!(id))])
}

/// Await one store call and normalize its outcome.
///
/// `payload_summary` must already be redacted; it is logged verbatim.
pub async fn invoke<T, Fut>(
    command: &'static str,
    payload_summary: String,
    call: Fut,
) -> Result<T, CoreError>
where
    Fut: Future<Output = StoreResult<T>>,
{
    let started_at = Utc::now();
    let clock = Instant::now();
    tracing::debug!(command, payload = %payload_summary, %started_at, "store call started");

    let outcome = call.await;
    let finished_at = Utc::now();
    let duration_ms = elapsed_ms(clock.elapsed());

    match outcome {
        Ok(value) => {
            tracing::info!(
                command,
                %started_at,
                %finished_at,
                duration_ms,
                "store call finished"
            );
            Ok(value)
        }
        Err(raw) => {
            let normalized = normalize_error(&raw);
            let tag = normalized
                .tag
                .unwrap_or_else(|| default_command_tag(command));
            tracing::warn!(
                command,
                %tag,
                %started_at,
                %finished_at,
                duration_ms,
                error = %raw,
                "store call failed"
            );
            Err(CoreError::Invocation {
                command: command.to_string(),
                tag,
                message: normalized.friendly_message,
            })
        }
    }
}

/// Whole milliseconds, saturating at `u64::MAX`.
fn elapsed_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
