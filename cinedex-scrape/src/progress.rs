//! Batch scrape progress reporting.

use crate::error::ScrapeError;
use crate::scrape::ScrapeReport;

/// Trait for receiving batch progress updates.
pub trait ScrapeProgress {
    /// Called before each file is scraped.
    fn on_file(&self, current: usize, total: usize, path: &str);

    /// Called after a file was scraped and stored.
    fn on_scraped(&self, path: &str, report: &ScrapeReport);

    /// Called when a file's scrape failed. The batch continues.
    fn on_failed(&self, path: &str, error: &ScrapeError);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl ScrapeProgress for SilentProgress {
    fn on_file(&self, _current: usize, _total: usize, _path: &str) {}
    fn on_scraped(&self, _path: &str, _report: &ScrapeReport) {}
    fn on_failed(&self, _path: &str, _error: &ScrapeError) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl ScrapeProgress for LogProgress {
    fn on_file(&self, current: usize, total: usize, path: &str) {
        log::info!("[{}/{}] {}", current, total, path);
    }

    fn on_scraped(&self, path: &str, report: &ScrapeReport) {
        log::info!(
            "  {} -> {} {} ({}) {}",
            path,
            report.kind,
            report.id,
            report.title,
            report.signature
        );
    }

    fn on_failed(&self, path: &str, error: &ScrapeError) {
        log::warn!("  {} failed: {}", path, error);
    }
}
