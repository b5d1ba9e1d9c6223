// file: src/exporter/curations.rs
// description: exports curations that promote or hide at least one document

use super::{CURATIONS_FILE, ExportContext};
use crate::error::{ExportError, Result};
use crate::models::Endpoint;
use serde_json::{Map, Value};
use tracing::debug;

/// Outcome of filtering the fetched curations.
#[derive(Debug, Default)]
pub struct PreparedCurations {
    pub curations: Vec<Value>,
    pub dropped: usize,
}

/// Pages through the curations endpoint, filters, and writes curations.json.
pub async fn export_curations(ctx: &ExportContext<'_>) -> Result<PreparedCurations> {
    let results = ctx.paginator().paginate(Endpoint::Curations).await?;
    let prepared = prepare_curations(results)?;

    ctx.output.write(CURATIONS_FILE, &prepared.curations)?;
    Ok(prepared)
}

/// Removes `id` from every curation and drops those whose `promoted` and
/// `hidden` lists are both empty.
pub fn prepare_curations(results: Vec<Value>) -> Result<PreparedCurations> {
    let mut prepared = PreparedCurations::default();

    for result in results {
        let mut curation = match result {
            Value::Object(curation) => curation,
            other => {
                return Err(ExportError::malformed(
                    Endpoint::Curations.path(),
                    format!("curation is not an object: {}", other),
                ));
            }
        };

        let id = curation.remove("id");
        let no_promoted = is_empty_list(&curation, "promoted")?;
        let no_hidden = is_empty_list(&curation, "hidden")?;
        if no_promoted && no_hidden {
            debug!("Dropping curation {:?} without promoted or hidden results", id);
            prepared.dropped += 1;
            continue;
        }

        prepared.curations.push(Value::Object(curation));
    }

    Ok(prepared)
}

fn is_empty_list(curation: &Map<String, Value>, field: &str) -> Result<bool> {
    match curation.get(field) {
        Some(Value::Array(items)) => Ok(items.is_empty()),
        Some(other) => Err(ExportError::malformed(
            Endpoint::Curations.path(),
            format!("{} is not an array: {}", field, other),
        )),
        None => Err(ExportError::malformed(
            Endpoint::Curations.path(),
            format!("curation without {}", field),
        )),
    }
}
