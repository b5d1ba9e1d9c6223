// file: src/pipeline/mod.rs
// description: pipeline module exports and public api
// reference: pipeline orchestration

mod orchestrator;
mod paginate;
pub mod progress;

pub use orchestrator::ExportPipeline;
pub use paginate::Paginator;
pub use progress::{ExportStats, ProgressObserver, SilentProgress, TerminalProgress};
