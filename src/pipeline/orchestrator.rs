// file: src/pipeline/orchestrator.rs
// description: runs the selected export stages in order
// reference: synonyms, curations, curation URLs, search settings; first failure aborts

use crate::client::SearchApi;
use crate::config::Config;
use crate::error::Result;
use crate::exporter::{
    ExportContext, JsonExporter, export_curations, export_search_settings, export_synonyms,
    resolve_curation_urls,
};
use crate::models::{Endpoint, Stage};
use crate::pipeline::progress::{ExportStats, ProgressObserver};
use crate::utils::logging::format_step;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::info;

/// Counts every request passed through to the wrapped API.
struct CountingApi<'a> {
    inner: &'a dyn SearchApi,
    requests: AtomicUsize,
}

impl<'a> CountingApi<'a> {
    fn new(inner: &'a dyn SearchApi) -> Self {
        Self {
            inner,
            requests: AtomicUsize::new(0),
        }
    }

    fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchApi for CountingApi<'_> {
    async fn get(&self, endpoint: Endpoint, body: Option<&Value>) -> Result<Value> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.inner.get(endpoint, body).await
    }
}

pub struct ExportPipeline<'a> {
    config: &'a Config,
    api: &'a dyn SearchApi,
    output: &'a JsonExporter,
    progress: &'a dyn ProgressObserver,
}

impl<'a> ExportPipeline<'a> {
    pub fn new(
        config: &'a Config,
        api: &'a dyn SearchApi,
        output: &'a JsonExporter,
        progress: &'a dyn ProgressObserver,
    ) -> Self {
        Self {
            config,
            api,
            output,
            progress,
        }
    }

    /// Runs `stages` in execution order. An error names the stage it came from;
    /// files written by earlier stages stay on disk.
    pub async fn run(&self, stages: &[Stage]) -> Result<ExportStats> {
        let started = Instant::now();
        let stages = Stage::ordered(stages);
        let mut stats = ExportStats::new();
        let api = CountingApi::new(self.api);

        info!(
            "Exporting engine '{}' to {}",
            self.config.engine_name,
            self.output.output_dir().display()
        );

        for (step, stage) in stages.iter().enumerate() {
            self.progress
                .banner(&format_step(step + 1, stages.len(), stage.banner()));
            let outcome = self.run_stage(&api, *stage, &mut stats).await;
            stats.requests_issued = api.requests();
            outcome.map_err(|e| e.in_stage(*stage))?;
        }

        stats.finish(started);
        Ok(stats)
    }

    async fn run_stage(
        &self,
        api: &dyn SearchApi,
        stage: Stage,
        stats: &mut ExportStats,
    ) -> Result<()> {
        let ctx = ExportContext {
            config: self.config,
            api,
            output: self.output,
            progress: self.progress,
        };

        match stage {
            Stage::Synonyms => {
                stats.synonym_sets = export_synonyms(&ctx).await?;
            }
            Stage::Curations => {
                let prepared = export_curations(&ctx).await?;
                stats.curations_fetched = prepared.curations.len() + prepared.dropped;
                stats.curations_dropped = prepared.dropped;
                stats.curations_written = prepared.curations.len();
            }
            Stage::CurationUrls => {
                let resolution = resolve_curation_urls(&ctx).await?;
                stats.documents_resolved = resolution.resolved;
                stats.documents_unresolved = resolution.unresolved;
            }
            Stage::SearchSettings => {
                stats.search_fields = export_search_settings(&ctx).await?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::scripted::ScriptedApi;
    use crate::error::ExportError;
    use crate::exporter::test_support::config;
    use crate::exporter::{CURATIONS_FILE, SEARCH_SETTINGS_FILE, SYNONYMS_FILE};
    use crate::pipeline::progress::recording::{Event, RecordingProgress};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::tempdir;

    fn full_api() -> ScriptedApi {
        ScriptedApi::new()
            .respond(
                Endpoint::Synonyms,
                json!({"meta": {"page": {"total_pages": 1}}, "results": []}),
            )
            .respond(
                Endpoint::Synonyms,
                json!({"results": [{"id": "s", "synonyms": ["park", "reserve"]}]}),
            )
            .respond(
                Endpoint::Curations,
                json!({"meta": {"page": {"total_pages": 1}}, "results": []}),
            )
            .respond(
                Endpoint::Curations,
                json!({"results": [
                    {"id": "cur-1", "queries": ["zion"], "promoted": ["park_zion"], "hidden": []},
                    {"id": "cur-2", "queries": ["none"], "promoted": [], "hidden": []}
                ]}),
            )
            .respond(
                Endpoint::Documents,
                json!([{"id": "park_zion", "url": "https://parks.example/zion"}]),
            )
            .respond(
                Endpoint::SearchSettings,
                json!({"search_fields": {"title": {"weight": 2}}, "boosts": {}}),
            )
    }

    #[tokio::test]
    async fn test_full_run_writes_all_files() {
        let dir = tempdir().unwrap();
        let output = JsonExporter::new(dir.path()).unwrap();
        let config = config();
        let api = full_api();
        let progress = RecordingProgress::default();

        let stats = ExportPipeline::new(&config, &api, &output, &progress)
            .run(&[])
            .await
            .unwrap();

        assert_eq!(output.read(SYNONYMS_FILE).unwrap(), json!([["park", "reserve"]]));
        assert_eq!(
            output.read(CURATIONS_FILE).unwrap(),
            json!([{"queries": ["zion"], "promoted": ["https://parks.example/zion"], "hidden": []}])
        );
        assert_eq!(
            output.read(SEARCH_SETTINGS_FILE).unwrap(),
            json!({"title": {"weight": 2}})
        );

        assert_eq!(stats.synonym_sets, 1);
        assert_eq!(stats.curations_fetched, 2);
        assert_eq!(stats.curations_dropped, 1);
        assert_eq!(stats.documents_resolved, 1);
        assert_eq!(stats.search_fields, 1);
        assert_eq!(stats.requests_issued, 6);

        let endpoints: Vec<Endpoint> = api.calls().into_iter().map(|(e, _)| e).collect();
        assert_eq!(
            endpoints,
            vec![
                Endpoint::Synonyms,
                Endpoint::Synonyms,
                Endpoint::Curations,
                Endpoint::Curations,
                Endpoint::Documents,
                Endpoint::SearchSettings,
            ]
        );

        let banners = progress
            .events()
            .into_iter()
            .filter(|e| matches!(e, Event::Banner(_)))
            .count();
        assert_eq!(banners, 4);
    }

    #[tokio::test]
    async fn test_failure_names_stage_and_keeps_earlier_files() {
        let dir = tempdir().unwrap();
        let output = JsonExporter::new(dir.path()).unwrap();
        let config = config();
        let api = ScriptedApi::new()
            .respond(Endpoint::Synonyms, json!({"meta": {"page": {"total_pages": 0}}}))
            .fail(Endpoint::Curations, 401);
        let progress = RecordingProgress::default();

        let err = ExportPipeline::new(&config, &api, &output, &progress)
            .run(&[])
            .await
            .unwrap_err();

        match &err {
            ExportError::Stage { stage, source } => {
                assert_eq!(*stage, Stage::Curations);
                assert!(matches!(**source, ExportError::Api { status: 401, .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("curations"));
        assert!(output.path(SYNONYMS_FILE).exists());
        assert!(!output.path(CURATIONS_FILE).exists());
        assert!(!output.path(SEARCH_SETTINGS_FILE).exists());
        assert_eq!(api.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_single_stage_selection() {
        let dir = tempdir().unwrap();
        let output = JsonExporter::new(dir.path()).unwrap();
        let config = config();
        let api = ScriptedApi::new().respond(
            Endpoint::SearchSettings,
            json!({"search_fields": {}}),
        );
        let progress = RecordingProgress::default();

        ExportPipeline::new(&config, &api, &output, &progress)
            .run(&[Stage::SearchSettings])
            .await
            .unwrap();

        assert_eq!(api.calls().len(), 1);
        assert!(!output.path(SYNONYMS_FILE).exists());
        assert_eq!(output.read(SEARCH_SETTINGS_FILE).unwrap(), json!({}));
    }
}
