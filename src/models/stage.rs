// file: src/models/stage.rs
// description: export stages in their canonical execution order
// reference: selected from the command line, reported in errors and banners

use clap::ValueEnum;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum Stage {
    Synonyms,
    Curations,
    CurationUrls,
    SearchSettings,
}

impl Stage {
    /// Every stage in the order a full export runs them.
    pub const ALL: [Stage; 4] = [
        Stage::Synonyms,
        Stage::Curations,
        Stage::CurationUrls,
        Stage::SearchSettings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Synonyms => "synonyms",
            Stage::Curations => "curations",
            Stage::CurationUrls => "curation-urls",
            Stage::SearchSettings => "search-settings",
        }
    }

    pub fn banner(&self) -> &'static str {
        match self {
            Stage::Synonyms => "Getting synonyms",
            Stage::Curations => "Getting curations",
            Stage::CurationUrls => "Getting URLs for each result in each curation",
            Stage::SearchSettings => "Getting search settings",
        }
    }

    /// Sorts and deduplicates a user selection into execution order.
    pub fn ordered(selection: &[Stage]) -> Vec<Stage> {
        if selection.is_empty() {
            return Self::ALL.to_vec();
        }
        let mut stages = selection.to_vec();
        stages.sort();
        stages.dedup();
        stages
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
