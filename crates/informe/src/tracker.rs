//! Step tracking: wrap one named async test action and record its timing.
//!
//! The instrumentation contract: every invocation appends exactly one
//! [`StepRecord`] to the enclosing [`TestResult`], success or failure, so
//! timing data is never lost even when the action throws. Failures are
//! recorded and then propagated unchanged.

use crate::record::{StepRecord, TestResult, TestStatus};
use std::fmt::Display;
use std::future::Future;
use std::time::Instant;
use tracing::{debug, error};

/// Fallback message when a failure carries no text of its own.
const UNKNOWN_ERROR: &str = "Unknown error";

/// Execute a named step against the enclosing test record.
///
/// Awaits `action` and appends a [`StepRecord`] with the measured duration.
/// On success the record's status becomes [`TestStatus::Passed`]; on failure
/// it becomes [`TestStatus::Failed`], the failure message is recorded on the
/// record (first failure wins), and the original error is returned to the
/// caller. A cancelled or aborted action that surfaces as an error takes the
/// same path as any other failure.
///
/// Steps are awaited one at a time against a single record; the tracker
/// imposes no timeout of its own.
///
/// # Errors
///
/// Returns the wrapped action's error, unchanged, after recording it.
///
/// # Example
///
/// ```
/// use informe::{track_step, TestResult, TestStatus};
///
/// # async fn demo() -> Result<(), std::io::Error> {
/// let mut result = TestResult::new("Login Flow", "login.spec");
///
/// track_step("Open login page", || async { Ok::<(), std::io::Error>(()) }, &mut result).await?;
///
/// assert_eq!(result.steps.len(), 1);
/// assert_eq!(result.status, TestStatus::Passed);
/// # Ok(())
/// # }
/// ```
pub async fn track_step<F, Fut, E>(
    name: impl Into<String>,
    action: F,
    result: &mut TestResult,
) -> Result<(), E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: Display,
{
    let name = name.into();
    let started = Instant::now();
    let outcome = action().await;
    let duration = started.elapsed().as_millis() as u64;

    result.steps.push(StepRecord {
        step: name.clone(),
        duration,
    });

    match outcome {
        Ok(()) => {
            result.status = TestStatus::Passed;
            debug!(step = %name, duration_ms = duration, "step passed");
            Ok(())
        }
        Err(err) => {
            let mut message = err.to_string();
            if message.is_empty() {
                message = UNKNOWN_ERROR.to_string();
            }
            result.status = TestStatus::Failed;
            result.record_error(message.clone());
            error!(step = %name, duration_ms = duration, error = %message, "step failed");
            Err(err)
        }
    }
}
