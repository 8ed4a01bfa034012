//! Informe: Test Reporting and Step Tracking for Browser Suites
//!
//! Informe (Spanish: "report") is the reporting core of a browser UI test
//! suite: it records per-step timing into a per-test record, renders the
//! finished record as a self-contained HTML report, and keeps a bounded
//! newest-first history ledger for trend visibility. Browser automation,
//! page objects, and specs are external callers; their only contract with
//! this crate is the [`TestResult`] record they populate.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    INFORME Data Flow                            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   test driver ──creates──► TestResult                           │
//! │   each step ───await────► track_step ──appends──► StepRecord    │
//! │   test end ──finalize───► TestResult ──once──► ReportGenerator  │
//! │                                │                                │
//! │                                ├──► TestResults/<slug>-<date>-  │
//! │                                │        <n>.html                │
//! │                                └──► TestResults/testHistory.json│
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use informe::{track_step, ReportGenerator, TestResult, TestStatus};
//!
//! # async fn run() -> Result<(), std::io::Error> {
//! let generator = ReportGenerator::new().expect("results directory");
//! let mut result = TestResult::new("Login Flow", "login.spec").with_browser("chromium");
//!
//! track_step("Open login page", || async { Ok::<(), std::io::Error>(()) }, &mut result).await?;
//! track_step("Submit credentials", || async { Ok::<(), std::io::Error>(()) }, &mut result).await?;
//!
//! result.finalize(TestStatus::Passed);
//! let _report = generator.generate_report_or_log(&result);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod history;
mod record;
mod report;
mod result;
mod tracker;

pub use history::{HistoryEntry, HistoryStore, RunSummary, MAX_HISTORY_ENTRIES};
pub use record::{StepRecord, TestResult, TestStatus};
pub use report::{ReportConfig, ReportGenerator};
pub use result::{InformeError, InformeResult};
pub use tracker::track_step;
