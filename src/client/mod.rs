// file: src/client/mod.rs
// description: search management API seam and its HTTP implementation
// reference: internal module structure

mod http;

pub use http::HttpSearchApi;

use crate::error::Result;
use crate::models::Endpoint;
use async_trait::async_trait;
use serde_json::Value;

/// Authenticated GET access to the engine's management endpoints.
///
/// Implementations fail with `Transport` when the request cannot complete and
/// with `Api` on a non-success status. The parsed JSON body is returned as-is.
#[async_trait]
pub trait SearchApi: Send + Sync {
    async fn get(&self, endpoint: Endpoint, body: Option<&Value>) -> Result<Value>;
}
