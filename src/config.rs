// file: src/config.rs
// description: application configuration loaded from the environment and .env
// reference: https://docs.rs/config

use crate::error::{ExportError, Result};
use crate::models::{DEFAULT_PAGE_SIZE, Endpoint};
use crate::utils::Validator;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

const DEFAULT_URL_FIELD: &str = "url";
const MAX_PAGE_SIZE: u32 = 1000;

/// Immutable settings for one export run.
#[derive(Clone)]
pub struct Config {
    pub host_identifier: String,
    pub engine_name: String,
    pub private_api_key: String,
    pub url_field: String,
    pub api_base_url: Option<String>,
    pub page_size: u32,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    host_identifier: Option<String>,
    engine_name: Option<String>,
    private_api_key: Option<String>,
    url_field: String,
    api_base_url: Option<String>,
    page_size: u32,
}

impl Config {
    /// Loads `.env` (if present) and then reads the process environment.
    pub fn load(env_file: Option<&Path>) -> Result<Self> {
        match env_file {
            Some(path) => {
                dotenvy::from_path(path).ok();
            }
            None => {
                dotenvy::dotenv().ok();
            }
        }

        Self::from_source(config::Environment::default())
    }

    /// Reads configuration from an explicit variable map instead of the process
    /// environment. Keys use the environment names, e.g. `HOST_IDENTIFIER`.
    pub fn from_vars<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Result<Self>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let source: HashMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        Self::from_source(config::Environment::default().source(Some(source)))
    }

    fn from_source(environment: config::Environment) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("url_field", DEFAULT_URL_FIELD)
            .and_then(|b| b.set_default("page_size", i64::from(DEFAULT_PAGE_SIZE)))
            .map_err(|e| ExportError::Configuration(e.to_string()))?
            .add_source(environment)
            .build()
            .map_err(|e| ExportError::Configuration(e.to_string()))?;

        let raw: RawConfig = settings
            .try_deserialize()
            .map_err(|e| ExportError::Configuration(e.to_string()))?;

        let config = Config {
            host_identifier: required("HOST_IDENTIFIER", raw.host_identifier)?,
            engine_name: required("ENGINE_NAME", raw.engine_name)?,
            private_api_key: required("PRIVATE_API_KEY", raw.private_api_key)?,
            url_field: raw.url_field,
            api_base_url: raw.api_base_url.filter(|url| !url.trim().is_empty()),
            page_size: raw.page_size,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        Validator::validate_path_segment("HOST_IDENTIFIER", &self.host_identifier)?;
        Validator::validate_path_segment("ENGINE_NAME", &self.engine_name)?;

        if self.url_field.trim().is_empty() {
            return Err(ExportError::Configuration(
                "URL_FIELD must not be empty".to_string(),
            ));
        }

        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ExportError::Configuration(format!(
                "PAGE_SIZE must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }

        if let Some(url) = &self.api_base_url {
            Validator::validate_url(url)
                .map_err(|e| ExportError::Configuration(format!("API_BASE_URL: {}", e)))?;
        }

        Ok(())
    }

    /// Base URL of the engine, always ending in `/`.
    pub fn engine_url(&self) -> String {
        let api_root = match &self.api_base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}.api.example.com/api/as/v1", self.host_identifier),
        };
        format!("{}/engines/{}/", api_root, self.engine_name)
    }

    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.engine_url(), endpoint.path())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host_identifier", &self.host_identifier)
            .field("engine_name", &self.engine_name)
            .field("private_api_key", &"<redacted>")
            .field("url_field", &self.url_field)
            .field("api_base_url", &self.api_base_url)
            .field("page_size", &self.page_size)
            .finish()
    }
}

fn required(name: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ExportError::Configuration(format!(
            "missing required environment variable {}",
            name
        ))),
    }
}
