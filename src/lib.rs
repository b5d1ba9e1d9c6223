// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod client;
pub mod config;
pub mod error;
pub mod exporter;
pub mod models;
pub mod pipeline;
pub mod utils;

pub use client::{HttpSearchApi, SearchApi};
pub use config::Config;
pub use error::{ExportError, Result};
pub use exporter::{
    CURATIONS_FILE, CurationUrlResolver, ExportContext, JsonExporter, SEARCH_SETTINGS_FILE,
    SYNONYMS_FILE,
};
pub use models::{Endpoint, PageRequest, Stage};
pub use pipeline::{
    ExportPipeline, ExportStats, Paginator, ProgressObserver, SilentProgress, TerminalProgress,
};
pub use utils::Validator;
