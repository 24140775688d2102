//! Concurrent fan-out of independent Lead writes.

use std::future::Future;

use futures::future::join_all;
use leadbook_core::error::{BatchFailure, CoreError, FailedWrite};
use leadbook_core::types::DbId;

/// Per-item outcome of a fan-out, in submission order.
#[derive(Debug)]
pub struct BatchOutcome<T> {
    pub succeeded: Vec<(DbId, T)>,
    pub failed: Vec<FailedWrite>,
}

impl<T> BatchOutcome<T> {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Surface any rejected write as one [`CoreError::PartialBatch`].
    ///
    /// Writes that succeeded are listed in the error and are not undone.
    pub fn into_result(self, operation: &str) -> Result<Vec<(DbId, T)>, CoreError> {
        if self.failed.is_empty() {
            return Ok(self.succeeded);
        }
        Err(CoreError::PartialBatch(BatchFailure {
            operation: operation.to_string(),
            succeeded: self.succeeded.into_iter().map(|(id, _)| id).collect(),
            failed: self.failed,
        }))
    }
}

/// Run every write concurrently and wait for all of them to settle.
pub async fn run_batch<T, Fut>(tasks: Vec<(DbId, Fut)>) -> BatchOutcome<T>
where
    Fut: Future<Output = Result<T, CoreError>>,
{
    let (ids, calls): (Vec<DbId>, Vec<Fut>) = tasks.into_iter().unzip();
    let results = join_all(calls).await;

    let mut outcome = BatchOutcome {
        succeeded: Vec::with_capacity(ids.len()),
        failed: Vec::new(),
    };
    for (id, result) in ids.into_iter().zip(results) {
        match result {
            Ok(value) => outcome.succeeded.push((id, value)),
            Err(err) => {
                tracing::warn!(id, tag = err.tag(), "batch write failed");
                outcome.failed.push(FailedWrite {
                    id,
                    tag: err.tag().to_string(),
                    message: err.friendly_message(),
                });
            }
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    async fn write(id: DbId) -> Result<DbId, CoreError> {
        if id % 2 == 0 {
            Err(CoreError::Invocation {
                command: "update_lead".into(),
                tag: "CMD_UPDATE_LEAD_FAILED".into(),
                message: "locked".into(),
            })
        } else {
            Ok(id * 10)
        }
    }

    #[tokio::test]
    async fn all_succeed() {
        let outcome = run_batch(vec![(1, write(1)), (3, write(3))]).await;
        assert!(outcome.is_complete());
        assert_eq!(outcome.into_result("op").unwrap(), vec![(1, 10), (3, 30)]);
    }

    #[tokio::test]
    async fn failures_keep_successes_listed() {
        let outcome = run_batch(vec![(1, write(1)), (2, write(2)), (3, write(3))]).await;
        let err = outcome.into_result("update_customer").unwrap_err();
        assert_matches!(err, CoreError::PartialBatch(ref failure) => {
            assert_eq!(failure.succeeded, vec![1, 3]);
            assert_eq!(failure.failed.len(), 1);
            assert_eq!(failure.failed[0].id, 2);
            assert_eq!(failure.failed[0].tag, "CMD_UPDATE_LEAD_FAILED");
        });
    }
}
