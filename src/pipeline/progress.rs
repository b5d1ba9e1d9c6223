// file: src/pipeline/progress.rs
// description: progress reporting and run statistics for the export stages
// reference: uses indicatif for progress bars and tracks export counts

use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Instant;
use tracing::info;

/// Receives progress from the pagination and resolution loops.
pub trait ProgressObserver: Send + Sync {
    fn banner(&self, message: &str);
    fn start(&self, label: &str, total: u64);
    fn advance(&self, position: u64);
    fn finish(&self);
}

/// Draws an indicatif bar per loop.
pub struct TerminalProgress {
    colored: bool,
    bar: Mutex<Option<ProgressBar>>,
}

impl TerminalProgress {
    pub fn new(colored: bool) -> Self {
        Self {
            colored,
            bar: Mutex::new(None),
        }
    }

    fn current(&self) -> Option<ProgressBar> {
        self.bar.lock().ok().and_then(|bar| bar.clone())
    }
}

impl ProgressObserver for TerminalProgress {
    fn banner(&self, message: &str) {
        match self.current() {
            Some(bar) => bar.println(message),
            None => println!("{}", message),
        }
    }

    fn start(&self, label: &str, total: u64) {
        let bar = create_progress_bar(total, self.colored);
        bar.set_message(label.to_string());
        if let Ok(mut slot) = self.bar.lock() {
            if let Some(previous) = slot.replace(bar) {
                previous.finish_and_clear();
            }
        }
    }

    fn advance(&self, position: u64) {
        if let Some(bar) = self.current() {
            bar.set_position(position);
        }
    }

    fn finish(&self) {
        if let Ok(mut slot) = self.bar.lock() {
            if let Some(bar) = slot.take() {
                bar.finish();
            }
        }
    }
}

impl Drop for TerminalProgress {
    fn drop(&mut self) {
        self.finish();
    }
}

/// Discards all progress; used with `--no-progress`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgress;

impl ProgressObserver for SilentProgress {
    fn banner(&self, message: &str) {
        info!("{}", message);
    }

    fn start(&self, _label: &str, _total: u64) {}

    fn advance(&self, _position: u64) {}

    fn finish(&self) {}
}

fn create_progress_bar(total: u64, colored: bool) -> ProgressBar {
    let bar = ProgressBar::new(total);
    let style = if colored {
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .map(|style| style.progress_chars("█▓▒░"))
    } else {
        ProgressStyle::default_bar()
            .template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} {msg}")
            .map(|style| style.progress_chars("=>-"))
    };
    if let Ok(style) = style {
        bar.set_style(style);
    }
    bar
}

/// Counts gathered over one export run.
#[derive(Debug, Clone)]
pub struct ExportStats {
    pub started_at: DateTime<Utc>,
    pub synonym_sets: usize,
    pub curations_fetched: usize,
    pub curations_dropped: usize,
    pub curations_written: usize,
    pub documents_resolved: usize,
    pub documents_unresolved: usize,
    pub search_fields: usize,
    pub requests_issued: usize,
    pub duration_secs: f64,
}

impl Default for ExportStats {
    fn default() -> Self {
        Self {
            started_at: Utc::now(),
            synonym_sets: 0,
            curations_fetched: 0,
            curations_dropped: 0,
            curations_written: 0,
            documents_resolved: 0,
            documents_unresolved: 0,
            search_fields: 0,
            requests_issued: 0,
            duration_secs: 0.0,
        }
    }
}

impl ExportStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(&mut self, started: Instant) {
        self.duration_secs = started.elapsed().as_secs_f64();
    }

    /// Share of requested document identifiers that resolved to a URL.
    pub fn resolution_rate(&self) -> f64 {
        let total = self.documents_resolved + self.documents_unresolved;
        if total == 0 {
            return 100.0;
        }
        (self.documents_resolved as f64 / total as f64) * 100.0
    }

    pub fn log_summary(&self) {
        info!(
            "Export started {} finished in {:.2}s",
            self.started_at.to_rfc3339(),
            self.duration_secs
        );
        info!("Synonym sets: {}", self.synonym_sets);
        info!(
            "Curations: {} fetched, {} without promoted or hidden results dropped, {} written",
            self.curations_fetched, self.curations_dropped, self.curations_written
        );
        info!(
            "Documents: {} resolved, {} unresolved ({:.1}%)",
            self.documents_resolved,
            self.documents_unresolved,
            self.resolution_rate()
        );
        info!("Search fields: {}", self.search_fields);
        info!("API requests issued: {}", self.requests_issued);
    }
}
