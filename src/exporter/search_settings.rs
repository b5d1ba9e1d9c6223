// file: src/exporter/search_settings.rs
// description: exports the engine's search field settings

use super::{ExportContext, SEARCH_SETTINGS_FILE};
use crate::error::{ExportError, Result};
use crate::models::Endpoint;
use serde_json::Value;

/// Fetches search settings once and writes their `search_fields` object.
/// Returns the number of configured search fields.
pub async fn export_search_settings(ctx: &ExportContext<'_>) -> Result<usize> {
    let response = ctx.api.get(Endpoint::SearchSettings, None).await?;
    let search_fields = search_fields(response)?;

    ctx.output.write(SEARCH_SETTINGS_FILE, &search_fields)?;
    Ok(search_fields.as_object().map_or(0, |fields| fields.len()))
}

fn search_fields(response: Value) -> Result<Value> {
    match response {
        Value::Object(mut settings) => settings.remove("search_fields").ok_or_else(|| {
            ExportError::malformed(Endpoint::SearchSettings.path(), "missing search_fields")
        }),
        other => Err(ExportError::malformed(
            Endpoint::SearchSettings.path(),
            format!("expected an object, got {}", other),
        )),
    }
}
