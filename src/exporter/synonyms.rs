// file: src/exporter/synonyms.rs
// description: exports every synonym set of the engine to synonyms.json

use super::{ExportContext, SYNONYMS_FILE};
use crate::error::{ExportError, Result};
use crate::models::Endpoint;
use serde_json::Value;

/// Pages through the synonyms endpoint and writes the bare synonym groups.
/// Returns the number of sets written.
pub async fn export_synonyms(ctx: &ExportContext<'_>) -> Result<usize> {
    let results = ctx.paginator().paginate(Endpoint::Synonyms).await?;
    let synonym_sets = synonym_groups(results)?;

    ctx.output.write(SYNONYMS_FILE, &synonym_sets)?;
    Ok(synonym_sets.len())
}

pub fn synonym_groups(results: Vec<Value>) -> Result<Vec<Value>> {
    results
        .into_iter()
        .map(|mut result| {
            result
                .as_object_mut()
                .and_then(|item| item.remove("synonyms"))
                .ok_or_else(|| {
                    ExportError::malformed(
                        Endpoint::Synonyms.path(),
                        format!("result without synonyms: {}", result),
                    )
                })
        })
        .collect()
}
