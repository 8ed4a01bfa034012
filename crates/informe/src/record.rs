//! Per-test execution record: status, timing, and tracked steps.
//!
//! One [`TestResult`] is created per test execution, owned by the test
//! driver. Step tracking mutates it in place; the driver finalizes timing
//! and verdict at test end, then hands it once to the report generator.

use serde::{Deserialize, Serialize};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Outcome of a test execution
///
/// `Unset` is the state between creation and finalization; the driver's
/// verdict or the last tracked step replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TestStatus {
    /// Test passed
    Passed,
    /// Test failed
    Failed,
    /// Test was skipped
    Skipped,
    /// Test exceeded its timeout
    TimedOut,
    /// Test was interrupted before completion
    Interrupted,
    /// No verdict recorded yet
    #[default]
    Unset,
}

impl TestStatus {
    /// Check if status is passing
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Check if status is failing
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }

    /// Status name as it appears in serialized records
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
            Self::TimedOut => "timedOut",
            Self::Interrupted => "interrupted",
            Self::Unset => "unset",
        }
    }
}

impl std::fmt::Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Timing record for one tracked step, immutable once appended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Step name
    pub step: String,
    /// Wall-clock duration in milliseconds
    pub duration: u64,
}

/// Full record of one test's execution, steps, timing, and outcome
///
/// Step-level timing is kept per step; error text is kept only here on the
/// parent record, set by the first uncaught failure.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    /// Human-readable test title
    pub test_name: String,
    /// Current verdict
    pub status: TestStatus,
    /// Wall-clock span from creation to finalization, in milliseconds
    pub duration: u64,
    /// Epoch milliseconds at creation
    pub start_time: u64,
    /// Tracked steps in execution order, append-only
    pub steps: Vec<StepRecord>,
    /// Automation engine name, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser: Option<String>,
    /// Path of the originating test file
    pub test_file: String,
    /// Message or stack trace of the first uncaught failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Monotonic anchor for duration; epoch time is display-only
    #[serde(skip)]
    started: Instant,
    #[serde(skip)]
    finalized: bool,
}

impl TestResult {
    /// Create a record for a test that is about to run
    #[must_use]
    pub fn new(test_name: impl Into<String>, test_file: impl Into<String>) -> Self {
        let start_time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        Self {
            test_name: test_name.into(),
            status: TestStatus::Unset,
            duration: 0,
            start_time,
            steps: Vec::new(),
            browser: None,
            test_file: test_file.into(),
            error: None,
            started: Instant::now(),
            finalized: false,
        }
    }

    /// Set the automation engine name
    #[must_use]
    pub fn with_browser(mut self, browser: impl Into<String>) -> Self {
        self.browser = Some(browser.into());
        self
    }

    /// Record a failure message, keeping the first one if already set
    pub fn record_error(&mut self, message: impl Into<String>) {
        if self.error.is_none() {
            self.error = Some(message.into());
        }
    }

    /// Finalize the record with the driver's verdict
    ///
    /// The verdict overwrites whatever status the last step left behind.
    /// Duration is fixed on the first call and never recomputed.
    pub fn finalize(&mut self, verdict: TestStatus) {
        if !self.finalized {
            self.duration = self.started.elapsed().as_millis() as u64;
            self.finalized = true;
        }
        self.status = verdict;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod test_status_tests {
        use super::*;

        #[test]
        fn test_default_is_unset() {
            assert_eq!(TestStatus::default(), TestStatus::Unset);
        }

        #[test]
        fn test_status_is_passed() {
            assert!(TestStatus::Passed.is_passed());
            assert!(!TestStatus::Failed.is_passed());
            assert!(!TestStatus::Unset.is_passed());
        }

        #[test]
        fn test_status_is_failed() {
            assert!(!TestStatus::Passed.is_failed());
            assert!(TestStatus::Failed.is_failed());
            assert!(!TestStatus::TimedOut.is_failed());
        }

        #[test]
        fn test_serialized_names() {
            assert_eq!(
                serde_json::to_string(&TestStatus::TimedOut).unwrap(),
                "\"timedOut\""
            );
            assert_eq!(
                serde_json::to_string(&TestStatus::Passed).unwrap(),
                "\"passed\""
            );
            assert_eq!(
                serde_json::to_string(&TestStatus::Unset).unwrap(),
                "\"unset\""
            );
        }

        #[test]
        fn test_as_str_matches_serde() {
            for status in [
                TestStatus::Passed,
                TestStatus::Failed,
                TestStatus::Skipped,
                TestStatus::TimedOut,
                TestStatus::Interrupted,
                TestStatus::Unset,
            ] {
                let json = serde_json::to_string(&status).unwrap();
                assert_eq!(json, format!("\"{status}\""));
            }
        }
    }

    mod test_result_tests {
        use super::*;

        #[test]
        fn test_new_record() {
            let result = TestResult::new("Smoke", "smoke.spec");
            assert_eq!(result.test_name, "Smoke");
            assert_eq!(result.test_file, "smoke.spec");
            assert_eq!(result.status, TestStatus::Unset);
            assert_eq!(result.duration, 0);
            assert!(result.start_time > 0);
            assert!(result.steps.is_empty());
            assert!(result.browser.is_none());
            assert!(result.error.is_none());
        }

        #[test]
        fn test_with_browser() {
            let result = TestResult::new("Smoke", "smoke.spec").with_browser("firefox");
            assert_eq!(result.browser.as_deref(), Some("firefox"));
        }

        #[test]
        fn test_record_error_keeps_first() {
            let mut result = TestResult::new("Smoke", "smoke.spec");
            result.record_error("first");
            result.record_error("second");
            assert_eq!(result.error.as_deref(), Some("first"));
        }

        #[test]
        fn test_finalize_sets_verdict_and_duration() {
            let mut result = TestResult::new("Smoke", "smoke.spec");
            std::thread::sleep(std::time::Duration::from_millis(5));
            result.finalize(TestStatus::Passed);
            assert_eq!(result.status, TestStatus::Passed);
            assert!(result.duration >= 5);
        }

        #[test]
        fn test_finalize_computes_duration_once() {
            let mut result = TestResult::new("Smoke", "smoke.spec");
            result.finalize(TestStatus::Passed);
            let first_duration = result.duration;

            std::thread::sleep(std::time::Duration::from_millis(10));
            result.finalize(TestStatus::Failed);

            assert_eq!(result.duration, first_duration);
            assert_eq!(result.status, TestStatus::Failed);
        }

        #[test]
        fn test_serialized_shape() {
            let mut result = TestResult::new("Login Flow", "login.spec").with_browser("chromium");
            result.steps.push(StepRecord {
                step: "Open page".to_string(),
                duration: 12,
            });
            result.finalize(TestStatus::Passed);

            let value = serde_json::to_value(&result).unwrap();
            assert_eq!(value["testName"], "Login Flow");
            assert_eq!(value["testFile"], "login.spec");
            assert_eq!(value["status"], "passed");
            assert_eq!(value["steps"][0]["step"], "Open page");
            assert_eq!(value["steps"][0]["duration"], 12);
        }

        #[test]
        fn test_optional_fields_omitted_when_absent() {
            let result = TestResult::new("Smoke", "smoke.spec");
            let value = serde_json::to_value(&result).unwrap();
            assert!(value.get("browser").is_none());
            assert!(value.get("error").is_none());
        }
    }
}
