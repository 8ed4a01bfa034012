//! HTML report generation and run-history maintenance.
//!
//! Turns a finished [`TestResult`] into a self-contained HTML document under
//! the results directory and appends a ledger entry for trend visibility.
//! Filenames are unique per test name and calendar day via a sequence
//! suffix derived from a scan of the directory at call time, so no counter
//! survives process restarts.

use crate::history::{HistoryEntry, HistoryStore};
use crate::record::TestResult;
use crate::result::{InformeError, InformeResult};
use chrono::{Local, TimeZone, Utc};
use regex::Regex;
use std::fs;
use std::path::PathBuf;
use tracing::{error, info};

/// Ledger filename inside the results directory.
const HISTORY_FILE: &str = "testHistory.json";

/// Subdirectory for screenshots taken by external callers.
const SCREENSHOTS_DIR: &str = "screenshots";

/// Configuration for report generation
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Root directory for reports, screenshots, and the history ledger
    pub results_dir: PathBuf,
    /// Engine name rendered when a record carries no browser
    pub default_browser: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from("TestResults"),
            default_browser: "chromium".to_string(),
        }
    }
}

impl ReportConfig {
    /// Create a config with the default layout
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the results root directory
    #[must_use]
    pub fn with_results_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.results_dir = dir.into();
        self
    }

    /// Set the fallback engine name
    #[must_use]
    pub fn with_default_browser(mut self, browser: impl Into<String>) -> Self {
        self.default_browser = browser.into();
        self
    }
}

/// Write-once consumer of finished test records
///
/// Construction bootstraps the results directory tree; generation renders
/// the HTML document, writes it, and updates the history ledger. The
/// generator holds no reference to a record after [`generate_report`]
/// returns.
///
/// [`generate_report`]: ReportGenerator::generate_report
///
/// # Example
///
/// ```no_run
/// use informe::{ReportGenerator, TestResult, TestStatus};
///
/// # fn demo() -> informe::InformeResult<()> {
/// let generator = ReportGenerator::new()?;
///
/// let mut result = TestResult::new("Login Flow", "login.spec");
/// result.finalize(TestStatus::Passed);
///
/// let path = generator.generate_report(&result)?;
/// println!("report at {}", path.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ReportGenerator {
    config: ReportConfig,
    history: HistoryStore,
}

impl ReportGenerator {
    /// Create a generator with the default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the results directories cannot be created.
    pub fn new() -> InformeResult<Self> {
        Self::with_config(ReportConfig::default())
    }

    /// Create a generator with an explicit configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the results directories cannot be created.
    pub fn with_config(config: ReportConfig) -> InformeResult<Self> {
        let history = HistoryStore::new(config.results_dir.join(HISTORY_FILE));
        let generator = Self { config, history };
        generator.ensure_directories()?;
        Ok(generator)
    }

    /// Create the results root and screenshots directory, recursively
    ///
    /// Idempotent; safe to call on every process start.
    fn ensure_directories(&self) -> InformeResult<()> {
        let screenshots = self.config.results_dir.join(SCREENSHOTS_DIR);
        fs::create_dir_all(&screenshots).map_err(|source| InformeError::DirectoryCreation {
            path: screenshots.clone(),
            source,
        })?;
        Ok(())
    }

    /// Generator configuration
    #[must_use]
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Generate an HTML report and record it in the history ledger
    ///
    /// Returns the path of the written report. Report failures must never
    /// fail the test itself; callers on the test path should prefer
    /// [`generate_report_or_log`](Self::generate_report_or_log).
    ///
    /// # Errors
    ///
    /// Returns an error if the report file or the history ledger cannot be
    /// written.
    pub fn generate_report(&self, result: &TestResult) -> InformeResult<PathBuf> {
        let filename = self.generate_filename(&result.test_name);
        let filepath = self.config.results_dir.join(&filename);

        let html = self.render_html(result);
        fs::write(&filepath, html).map_err(|source| InformeError::ReportWrite {
            path: filepath.clone(),
            source,
        })?;

        self.history.append(HistoryEntry::from_result(
            result,
            filename,
            &self.config.default_browser,
        ))?;

        info!(path = %filepath.display(), "test report generated");
        Ok(filepath)
    }

    /// Generate a report, logging instead of propagating on failure
    ///
    /// The verdict was fixed before the report step runs, so a report
    /// failure is logged and swallowed here.
    pub fn generate_report_or_log(&self, result: &TestResult) -> Option<PathBuf> {
        match self.generate_report(result) {
            Ok(path) => Some(path),
            Err(err) => {
                error!(test = %result.test_name, %err, "report generation failed");
                None
            }
        }
    }

    /// Read the history ledger, newest first; never fails
    #[must_use]
    pub fn get_test_history(&self) -> Vec<HistoryEntry> {
        self.history.read()
    }

    /// Compose the next free `<slug>-<YYYYMMDD>-<n>.html` filename
    ///
    /// `<n>` is one greater than the highest sequence already on disk for
    /// the same slug and UTC date, or 1 when none exist.
    #[must_use]
    pub fn generate_filename(&self, test_name: &str) -> String {
        let slug = slugify(test_name);
        let date = Utc::now().format("%Y%m%d").to_string();
        let sequence = self.next_sequence(&slug, &date);
        format!("{slug}-{date}-{sequence}.html")
    }

    fn next_sequence(&self, slug: &str, date: &str) -> u32 {
        let Ok(pattern) = Regex::new(&format!(r"^{}-{date}-(\d+)\.html$", regex::escape(slug)))
        else {
            return 1;
        };
        let Ok(entries) = fs::read_dir(&self.config.results_dir) else {
            return 1;
        };

        entries
            .flatten()
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter_map(|name| {
                pattern
                    .captures(&name)
                    .and_then(|captures| captures[1].parse::<u32>().ok())
            })
            .max()
            .map_or(1, |max| max + 1)
    }

    /// Render the report as a single self-contained HTML document
    #[must_use]
    pub fn render_html(&self, result: &TestResult) -> String {
        let status_color = if result.status.is_passed() {
            "#4CAF50"
        } else {
            "#f44336"
        };
        let status_icon = if result.status.is_passed() {
            "✓"
        } else {
            "✗"
        };
        let browser = result
            .browser
            .as_deref()
            .unwrap_or(&self.config.default_browser);

        let mut html = String::new();

        html.push_str(&format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Test Report - {title}</title>
    <style>
        * {{ margin: 0; padding: 0; box-sizing: border-box; }}
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: #f5f5f5;
            padding: 20px;
        }}
        .container {{
            max-width: 1200px;
            margin: 0 auto;
            background: white;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
            overflow: hidden;
        }}
        .header {{
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            color: white;
            padding: 30px;
        }}
        .header h1 {{ margin-bottom: 10px; font-size: 28px; }}
        .status {{
            display: inline-block;
            padding: 8px 20px;
            background: {color};
            border-radius: 20px;
            font-weight: bold;
            font-size: 14px;
        }}
        .content {{ padding: 30px; }}
        .info-grid {{
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(250px, 1fr));
            gap: 20px;
            margin-bottom: 30px;
        }}
        .info-card {{
            background: #f8f9fa;
            padding: 20px;
            border-radius: 8px;
            border-left: 4px solid #667eea;
        }}
        .info-card h3 {{
            color: #667eea;
            font-size: 14px;
            text-transform: uppercase;
            margin-bottom: 8px;
        }}
        .info-card p {{ font-size: 18px; font-weight: 600; color: #333; }}
        .steps {{ margin-top: 30px; }}
        .steps h2 {{ margin-bottom: 20px; color: #333; }}
        .step {{
            background: #f8f9fa;
            padding: 15px 20px;
            margin-bottom: 10px;
            border-radius: 6px;
            border-left: 4px solid {color};
        }}
        .step-title {{ font-weight: 600; color: #333; margin-bottom: 5px; }}
        .step-duration {{ color: #666; font-size: 14px; }}
        .error-section {{
            background: #fff3f3;
            border: 1px solid #ffcdd2;
            border-radius: 8px;
            padding: 20px;
            margin-top: 20px;
        }}
        .error-section h3 {{ color: #d32f2f; margin-bottom: 10px; }}
        .error-section pre {{
            background: white;
            padding: 15px;
            border-radius: 4px;
            overflow-x: auto;
            font-size: 13px;
            color: #d32f2f;
        }}
        .footer {{
            background: #f8f9fa;
            padding: 20px 30px;
            text-align: center;
            color: #666;
            font-size: 14px;
        }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>{icon} {title}</h1>
            <span class="status">{status}</span>
        </div>

        <div class="content">
            <div class="info-grid">
                <div class="info-card">
                    <h3>Duration</h3>
                    <p>{duration}ms</p>
                </div>
                <div class="info-card">
                    <h3>Started At</h3>
                    <p>{started}</p>
                </div>
                <div class="info-card">
                    <h3>Browser</h3>
                    <p>{browser}</p>
                </div>
                <div class="info-card">
                    <h3>Test File</h3>
                    <p>{test_file}</p>
                </div>
            </div>
"#,
            title = escape_html(&result.test_name),
            color = status_color,
            icon = status_icon,
            status = result.status.as_str().to_uppercase(),
            duration = result.duration,
            started = format_local(result.start_time),
            browser = escape_html(browser),
            test_file = escape_html(&result.test_file),
        ));

        if !result.steps.is_empty() {
            html.push_str("\n            <div class=\"steps\">\n                <h2>Test Steps</h2>\n");
            for (index, step) in result.steps.iter().enumerate() {
                html.push_str(&format!(
                    r#"                <div class="step">
                    <div class="step-title">{number}. {name}</div>
                    <div class="step-duration">Duration: {duration}ms</div>
                </div>
"#,
                    number = index + 1,
                    name = escape_html(&step.step),
                    duration = step.duration,
                ));
            }
            html.push_str("            </div>\n");
        }

        if let Some(error) = &result.error {
            html.push_str(&format!(
                r#"
            <div class="error-section">
                <h3>Error Details</h3>
                <pre>{}</pre>
            </div>
"#,
                escape_html(error)
            ));
        }

        html.push_str(&format!(
            r#"        </div>

        <div class="footer">
            Generated on {} | Informe Test Report
        </div>
    </div>
</body>
</html>
"#,
            Local::now().format("%Y-%m-%d %H:%M:%S"),
        ));

        html
    }
}

/// Format epoch milliseconds in the local timezone for the report header
fn format_local(epoch_ms: u64) -> String {
    Local
        .timestamp_millis_opt(epoch_ms as i64)
        .single()
        .map_or_else(
            || "-".to_string(),
            |dt| dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        )
}

/// Derive a filesystem-safe slug from a test name
///
/// Every run of non-alphanumeric characters collapses to a single
/// underscore; the rest is lowercased.
fn slugify(test_name: &str) -> String {
    let mut slug = String::with_capacity(test_name.len());
    let mut last_was_underscore = false;

    for ch in test_name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_was_underscore = false;
        } else if !last_was_underscore {
            slug.push('_');
            last_was_underscore = true;
        }
    }

    slug
}

/// Escape HTML special characters in user-supplied text
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
