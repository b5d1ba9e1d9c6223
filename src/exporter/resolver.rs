// file: src/exporter/resolver.rs
// description: rewrites curation document identifiers as document URLs
// reference: batch lookups against the documents endpoint, one per non-empty list

use super::{CURATIONS_FILE, ExportContext};
use crate::client::SearchApi;
use crate::error::{ExportError, Result};
use crate::models::Endpoint;
use crate::pipeline::ProgressObserver;
use serde_json::Value;
use std::io;
use tracing::warn;

const LIST_FIELDS: [&str; 2] = ["promoted", "hidden"];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionStats {
    pub curations: usize,
    pub resolved: usize,
    pub unresolved: usize,
}

pub struct CurationUrlResolver<'a> {
    api: &'a dyn SearchApi,
    progress: &'a dyn ProgressObserver,
    url_field: &'a str,
}

impl<'a> CurationUrlResolver<'a> {
    pub fn new(
        api: &'a dyn SearchApi,
        progress: &'a dyn ProgressObserver,
        url_field: &'a str,
    ) -> Self {
        Self {
            api,
            progress,
            url_field,
        }
    }

    /// Replaces the `promoted` and `hidden` identifier lists of every curation
    /// with the URLs of the referenced documents.
    ///
    /// Returned documents are matched to identifiers by their `id` field, or by
    /// position when they carry none and the response is as long as the
    /// request. Identifiers without a document are dropped from the list.
    pub async fn resolve(&self, curations: &mut [Value]) -> Result<ResolutionStats> {
        let mut stats = ResolutionStats::default();
        self.progress.start("curations", curations.len() as u64);

        for (index, curation) in curations.iter_mut().enumerate() {
            let curation = curation.as_object_mut().ok_or_else(|| {
                invalid_file(format!("curation {} is not an object", index))
            })?;

            for field in LIST_FIELDS {
                let ids = match curation.get(field) {
                    Some(Value::Array(ids)) => ids.clone(),
                    Some(_) => {
                        return Err(invalid_file(format!(
                            "curation {} has a non-array {}",
                            index, field
                        )));
                    }
                    None => continue,
                };
                if ids.is_empty() {
                    continue;
                }

                let urls = self.lookup_urls(&ids, &mut stats).await?;
                curation.insert(field.to_string(), Value::Array(urls));
            }

            stats.curations += 1;
            self.progress.advance(index as u64 + 1);
        }

        self.progress.finish();
        Ok(stats)
    }

    async fn lookup_urls(&self, ids: &[Value], stats: &mut ResolutionStats) -> Result<Vec<Value>> {
        let body = Value::Array(ids.to_vec());
        let documents = match self.api.get(Endpoint::Documents, Some(&body)).await? {
            Value::Array(documents) => documents,
            other => {
                return Err(ExportError::malformed(
                    Endpoint::Documents.path(),
                    format!("expected an array of documents, got {}", other),
                ));
            }
        };

        let positional = documents.len() == ids.len();
        let mut urls = Vec::with_capacity(ids.len());

        for (position, id) in ids.iter().enumerate() {
            let document = documents
                .iter()
                .find(|doc| doc.get("id") == Some(id))
                .or_else(|| {
                    positional
                        .then(|| &documents[position])
                        .filter(|doc| doc.is_object() && doc.get("id").is_none())
                });

            match document {
                Some(document) => {
                    let url = document.get(self.url_field).cloned().ok_or_else(|| {
                        ExportError::malformed(
                            Endpoint::Documents.path(),
                            format!("document {} has no '{}' field", id, self.url_field),
                        )
                    })?;
                    urls.push(url);
                    stats.resolved += 1;
                }
                None => {
                    warn!("No document found for {}, dropping it from the curation", id);
                    stats.unresolved += 1;
                }
            }
        }

        Ok(urls)
    }
}

/// Re-reads curations.json, resolves identifiers to URLs, and rewrites it.
pub async fn resolve_curation_urls(ctx: &ExportContext<'_>) -> Result<ResolutionStats> {
    let mut curations = match ctx.output.read(CURATIONS_FILE)? {
        Value::Array(curations) => curations,
        _ => return Err(invalid_file("expected a JSON array of curations".to_string())),
    };

    let resolver = CurationUrlResolver::new(ctx.api, ctx.progress, &ctx.config.url_field);
    let stats = resolver.resolve(&mut curations).await?;

    ctx.output.write(CURATIONS_FILE, &curations)?;
    Ok(stats)
}

fn invalid_file(message: String) -> ExportError {
    ExportError::FileIo {
        path: CURATIONS_FILE.into(),
        source: io::Error::new(io::ErrorKind::InvalidData, message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::scripted::ScriptedApi;
    use crate::exporter::JsonExporter;
    use crate::exporter::test_support::config;
    use crate::pipeline::SilentProgress;
    use crate::pipeline::progress::recording::RecordingProgress;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_positional_urls_replace_ids() {
        let api = ScriptedApi::new().respond(
            Endpoint::Documents,
            json!([{"url": "u1"}, {"url": "u2"}]),
        );
        let mut curations = vec![json!({"promoted": ["a", "b"], "hidden": []})];

        let stats = CurationUrlResolver::new(&api, &SilentProgress, "url")
            .resolve(&mut curations)
            .await
            .unwrap();

        assert_eq!(curations, vec![json!({"promoted": ["u1", "u2"], "hidden": []})]);
        assert_eq!(api.calls_to(Endpoint::Documents), vec![Some(json!(["a", "b"]))]);
        assert_eq!(stats.resolved, 2);
    }

    #[tokio::test]
    async fn test_documents_matched_by_id_and_missing_dropped() {
        let mut curations = vec![json!({
            "queries": ["parks"],
            "promoted": ["park_zion", "does_not_exist"],
            "hidden": ["park_arches", "park_yosemite"]
        })];

        let api = ScriptedApi::new()
            .respond(
                Endpoint::Documents,
                json!([{"id": "park_zion", "link": "https://parks.example/zion"}, null]),
            )
            .respond(
                Endpoint::Documents,
                json!([
                    {"id": "park_yosemite", "link": "https://parks.example/yosemite"},
                    {"id": "park_arches", "link": "https://parks.example/arches"}
                ]),
            );
        let stats = CurationUrlResolver::new(&api, &SilentProgress, "link")
            .resolve(&mut curations)
            .await
            .unwrap();

        assert_eq!(
            curations,
            vec![json!({
                "queries": ["parks"],
                "promoted": ["https://parks.example/zion"],
                "hidden": ["https://parks.example/arches", "https://parks.example/yosemite"]
            })]
        );
        assert_eq!(
            stats,
            ResolutionStats {
                curations: 1,
                resolved: 3,
                unresolved: 1
            }
        );
    }

    #[tokio::test]
    async fn test_empty_curation_skipped_without_lookup() {
        let api = ScriptedApi::new();
        let progress = RecordingProgress::default();
        let mut curations = vec![
            json!({"promoted": [], "hidden": []}),
            json!({"promoted": [], "hidden": []}),
        ];

        CurationUrlResolver::new(&api, &progress, "url")
            .resolve(&mut curations)
            .await
            .unwrap();

        assert!(api.calls().is_empty());
        assert_eq!(progress.advances(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_non_array_documents_response_is_malformed() {
        let api = ScriptedApi::new().respond(Endpoint::Documents, json!({"errors": []}));
        let mut curations = vec![json!({"promoted": ["a"], "hidden": []})];

        let err = CurationUrlResolver::new(&api, &SilentProgress, "url")
            .resolve(&mut curations)
            .await
            .unwrap_err();

        assert!(matches!(err, ExportError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_file_rewritten_in_place() {
        let dir = tempdir().unwrap();
        let output = JsonExporter::new(dir.path()).unwrap();
        output
            .write(CURATIONS_FILE, &json!([{"promoted": [], "hidden": ["x"]}]))
            .unwrap();

        let config = config();
        let api = ScriptedApi::new()
            .respond(Endpoint::Documents, json!([{"id": "x", "url": "https://x"}]));
        let ctx = ExportContext {
            config: &config,
            api: &api,
            output: &output,
            progress: &SilentProgress,
        };

        resolve_curation_urls(&ctx).await.unwrap();

        assert_eq!(
            output.read(CURATIONS_FILE).unwrap(),
            json!([{"promoted": [], "hidden": ["https://x"]}])
        );
    }

    #[tokio::test]
    async fn test_failed_lookup_leaves_file_untouched() {
        let dir = tempdir().unwrap();
        let output = JsonExporter::new(dir.path()).unwrap();
        output
            .write(CURATIONS_FILE, &json!([{"promoted": ["a"], "hidden": []}]))
            .unwrap();
        let before = fs::read(output.path(CURATIONS_FILE)).unwrap();

        let config = config();
        let api = ScriptedApi::new().fail(Endpoint::Documents, 403);
        let ctx = ExportContext {
            config: &config,
            api: &api,
            output: &output,
            progress: &SilentProgress,
        };

        let err = resolve_curation_urls(&ctx).await.unwrap_err();

        assert!(matches!(err, ExportError::Api { status: 403, .. }));
        assert_eq!(fs::read(output.path(CURATIONS_FILE)).unwrap(), before);
    }

    #[tokio::test]
    async fn test_curations_file_must_be_an_array() {
        let dir = tempdir().unwrap();
        let output = JsonExporter::new(dir.path()).unwrap();
        output.write(CURATIONS_FILE, &json!({"promoted": []})).unwrap();

        let config = config();
        let api = ScriptedApi::new();
        let ctx = ExportContext {
            config: &config,
            api: &api,
            output: &output,
            progress: &SilentProgress,
        };

        assert!(matches!(
            resolve_curation_urls(&ctx).await,
            Err(ExportError::FileIo { .. })
        ));
    }
}
