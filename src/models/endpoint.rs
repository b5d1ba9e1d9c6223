// file: src/models/endpoint.rs
// description: logical endpoints of the engine management API

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Synonyms,
    Curations,
    Documents,
    SearchSettings,
}

impl Endpoint {
    /// Path below `engines/{engine}/`.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Synonyms => "synonyms",
            Endpoint::Curations => "curations",
            Endpoint::Documents => "documents",
            Endpoint::SearchSettings => "search_settings",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
