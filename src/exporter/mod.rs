// file: src/exporter/mod.rs
// description: export stages and the shared context they run in
// reference: internal module structure

pub mod curations;
pub mod json;
pub mod resolver;
pub mod search_settings;
pub mod synonyms;

pub use curations::{export_curations, prepare_curations};
pub use json::{CURATIONS_FILE, JsonExporter, SEARCH_SETTINGS_FILE, SYNONYMS_FILE};
pub use resolver::{CurationUrlResolver, ResolutionStats, resolve_curation_urls};
pub use search_settings::export_search_settings;
pub use synonyms::export_synonyms;

use crate::client::SearchApi;
use crate::config::Config;
use crate::pipeline::{Paginator, ProgressObserver};

/// Everything a stage needs: the API, where to write, and who to report to.
pub struct ExportContext<'a> {
    pub config: &'a Config,
    pub api: &'a dyn SearchApi,
    pub output: &'a JsonExporter,
    pub progress: &'a dyn ProgressObserver,
}

impl<'a> ExportContext<'a> {
    pub fn paginator(&self) -> Paginator<'a> {
        Paginator::new(self.api, self.progress, self.config.page_size)
    }
}
