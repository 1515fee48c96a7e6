//! Pass/fail summaries and run artifacts.
//!
//! The suite records one [`TestRecord`] per test and folds them into a
//! [`RunSummary`] written as JSON and as a small HTML table under
//! `test-results/`.

use crate::result::VitrinaResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Directory run artifacts are written under
pub const RESULTS_DIR: &str = "test-results";

/// Test outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestStatus {
    /// Test passed
    Passed,
    /// Test failed
    Failed,
    /// Test was skipped
    Skipped,
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
}

/// Outcome of one test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestRecord {
    /// Test name
    pub name: String,
    /// Outcome
    pub status: TestStatus,
    /// Wall-clock duration
    pub duration: Duration,
    /// Error message if failed
    pub error: Option<String>,
    /// Screenshot artifact captured on failure, if any
    pub failure_screenshot: Option<PathBuf>,
}

impl TestRecord {
    /// Create a passing record
    #[must_use]
    pub fn passed(name: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            status: TestStatus::Passed,
            duration,
            error: None,
            failure_screenshot: None,
        }
    }

    /// Create a failing record
    #[must_use]
    pub fn failed(name: impl Into<String>, duration: Duration, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: TestStatus::Failed,
            duration,
            error: Some(error.into()),
            failure_screenshot: None,
        }
    }

    /// Create a skipped record
    #[must_use]
    pub fn skipped(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: TestStatus::Skipped,
            duration: Duration::ZERO,
            error: Some(reason.into()),
            failure_screenshot: None,
        }
    }

    /// Attach a failure screenshot path
    #[must_use]
    pub fn with_screenshot(mut self, path: impl Into<PathBuf>) -> Self {
        self.failure_screenshot = Some(path.into());
        self
    }
}

/// Aggregated outcome of a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Number of tests recorded
    pub total: usize,
    /// Number that passed
    pub passed: usize,
    /// Number that failed
    pub failed: usize,
    /// Number that were skipped
    pub skipped: usize,
    /// Pass rate in percent (0 when no tests ran)
    pub pass_rate: f64,
    /// Completion timestamp (RFC 3339)
    pub completed_at: String,
    /// Individual records
    pub records: Vec<TestRecord>,
}

impl RunSummary {
    /// Fold records into a summary
    #[must_use]
    pub fn from_records(records: Vec<TestRecord>) -> Self {
        let total = records.len();
        let passed = records.iter().filter(|r| r.status.is_passed()).count();
        let failed = records.iter().filter(|r| r.status.is_failed()).count();
        let skipped = records
            .iter()
            .filter(|r| r.status == TestStatus::Skipped)
            .count();
        let pass_rate = if total > 0 {
            passed as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        Self {
            total,
            passed,
            failed,
            skipped,
            pass_rate,
            completed_at: chrono::Local::now().to_rfc3339(),
            records,
        }
    }

    /// True when no recorded test failed
    #[must_use]
    pub const fn is_green(&self) -> bool {
        self.failed == 0
    }

    /// Write the summary as JSON.
    pub fn save_json(&self, path: &Path) -> VitrinaResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Write the summary as a small HTML page.
    pub fn write_html(&self, path: &Path) -> VitrinaResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut rows = String::new();
        for record in &self.records {
            let class = match record.status {
                TestStatus::Passed => "passed",
                TestStatus::Failed => "failed",
                TestStatus::Skipped => "skipped",
            };
            rows.push_str(&format!(
                "<tr><td>{}</td><td class=\"{class}\">{class}</td><td>{} ms</td><td>{}</td></tr>\n",
                html_escape(&record.name),
                record.duration.as_millis(),
                html_escape(record.error.as_deref().unwrap_or("")),
            ));
        }
        let html = format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<title>Test Execution Report</title>\n<style>\n\
             body {{ font-family: Arial, sans-serif; margin: 20px; }}\n\
             .summary {{ background-color: #f5f5f5; padding: 15px; border-radius: 5px; }}\n\
             .passed {{ color: green; }}\n.failed {{ color: red; }}\n.skipped {{ color: orange; }}\n\
             table {{ border-collapse: collapse; width: 100%; margin-top: 20px; }}\n\
             th, td {{ border: 1px solid #ddd; padding: 8px; text-align: left; }}\n\
             th {{ background-color: #f2f2f2; }}\n</style>\n</head>\n<body>\n\
             <h1>Test Execution Report</h1>\n<div class=\"summary\">\n\
             <p><strong>Total:</strong> {}</p>\n\
             <p><strong class=\"passed\">Passed:</strong> {}</p>\n\
             <p><strong class=\"failed\">Failed:</strong> {}</p>\n\
             <p><strong class=\"skipped\">Skipped:</strong> {}</p>\n\
             <p><strong>Pass rate:</strong> {:.2}%</p>\n\
             <p><strong>Completed:</strong> {}</p>\n</div>\n\
             <table>\n<tr><th>Test</th><th>Status</th><th>Duration</th><th>Error</th></tr>\n{}\
             </table>\n</body>\n</html>\n",
            self.total,
            self.passed,
            self.failed,
            self.skipped,
            self.pass_rate,
            html_escape(&self.completed_at),
            rows,
        );
        std::fs::write(path, html)?;
        Ok(())
    }
}

/// Timestamped screenshot name for a failed test
#[must_use]
pub fn failure_screenshot_name(test_name: &str) -> String {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    format!(
        "{}_failure_{timestamp}",
        crate::pages::base::sanitize_name(test_name)
    )
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
