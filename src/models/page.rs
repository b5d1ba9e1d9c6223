// file: src/models/page.rs
// description: pagination request body and response metadata
// reference: list endpoints page with {"page": {"size", "current"}}

use crate::error::{ExportError, Result};
use crate::models::Endpoint;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Page size the list endpoints accept by default.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: PageCursor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    pub size: u32,
    /// 1-indexed.
    pub current: u32,
}

impl PageRequest {
    pub fn new(size: u32, current: u32) -> Self {
        Self {
            page: PageCursor { size, current },
        }
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Reads `meta.page.total_pages` from a list response.
pub fn total_pages(endpoint: Endpoint, response: &Value) -> Result<u32> {
    let total = response
        .pointer("/meta/page/total_pages")
        .ok_or_else(|| ExportError::malformed(endpoint.path(), "missing meta.page.total_pages"))?;

    total
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| {
            ExportError::malformed(
                endpoint.path(),
                format!("meta.page.total_pages is not a page count: {}", total),
            )
        })
}

/// Takes the `results` array out of a list response.
pub fn take_results(endpoint: Endpoint, response: Value) -> Result<Vec<Value>> {
    match response {
        Value::Object(mut body) => match body.remove("results") {
            Some(Value::Array(results)) => Ok(results),
            Some(other) => Err(ExportError::malformed(
                endpoint.path(),
                format!("results is not an array: {}", other),
            )),
            None => Err(ExportError::malformed(endpoint.path(), "missing results")),
        },
        other => Err(ExportError::malformed(
            endpoint.path(),
            format!("expected an object, got {}", other),
        )),
    }
}
