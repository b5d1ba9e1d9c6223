// file: src/exporter/json.rs
// description: whole-file JSON reads and pretty-printed writes in the output directory

use crate::error::{ExportError, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const SYNONYMS_FILE: &str = "synonyms.json";
pub const CURATIONS_FILE: &str = "curations.json";
pub const SEARCH_SETTINGS_FILE: &str = "search_settings.json";

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_dir: PathBuf,
}

impl JsonExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|e| ExportError::FileIo {
            path: output_dir.clone(),
            source: e,
        })?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }

    /// Serializes `value` with two-space indentation and replaces the file.
    pub fn write<T: Serialize + ?Sized>(&self, file_name: &str, value: &T) -> Result<PathBuf> {
        let path = self.path(file_name);
        let content = serde_json::to_string_pretty(value)?;

        fs::write(&path, content).map_err(|e| ExportError::FileIo {
            path: path.clone(),
            source: e,
        })?;

        info!("Wrote {}", path.display());
        Ok(path)
    }

    pub fn read(&self, file_name: &str) -> Result<Value> {
        let path = self.path(file_name);
        let content = fs::read_to_string(&path).map_err(|e| ExportError::FileIo {
            path: path.clone(),
            source: e,
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}
