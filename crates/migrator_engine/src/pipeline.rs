use std::path::PathBuf;
use std::sync::Arc;

use migrator_core::{extract_posts, locate_images, ExportDocument, MigrationConfig, Stage};
use migrator_logging::{migrate_error, migrate_info};
use thiserror::Error;

use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::images::ImageDownloader;
use crate::markdown::MarkdownWriter;
use crate::persist::{reset_dir, PersistError};
use crate::xml::{read_export, ParseError};
use crate::{DownloadReport, FetchError, PipelineEvent, RunSummary};

/// Fatal run failures. Everything else is absorbed and logged.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Export(#[from] ParseError),
    #[error("cannot prepare image directory {}: {source}", path.display())]
    ImageDir {
        path: PathBuf,
        #[source]
        source: PersistError,
    },
    #[error("cannot build http client: {0}")]
    HttpClient(#[source] FetchError),
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: PipelineEvent);
}

/// Sink that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl ProgressSink for NoopSink {
    fn emit(&self, _event: PipelineEvent) {}
}

/// Runs `Init → PrepareImageDir → ParseExport → [FetchImages] → ExtractAndWrite → Done`.
pub struct Pipeline<'a> {
    config: &'a MigrationConfig,
    fetcher: Option<Arc<dyn Fetcher>>,
    sink: Arc<dyn ProgressSink>,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a MigrationConfig) -> Self {
        Self {
            config,
            fetcher: None,
            sink: Arc::new(NoopSink),
        }
    }

    /// Replaces the default reqwest fetcher.
    pub fn with_fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn ProgressSink>) -> Self {
        self.sink = sink;
        self
    }

    pub async fn run(&self) -> Result<RunSummary, PipelineError> {
        let config = self.config;

        self.enter(Stage::Init);
        // Checked before the image directory is wiped.
        if !config.export_path.is_file() {
            return Err(ParseError::Missing(config.export_path.clone()).into());
        }

        self.enter(Stage::PrepareImageDir);
        let removed = reset_dir(&config.image_dir).map_err(|source| PipelineError::ImageDir {
            path: config.image_dir.clone(),
            source,
        })?;
        migrate_info!(
            "prepared image directory {} ({removed} stale entries removed)",
            config.image_dir.display()
        );

        self.enter(Stage::ParseExport);
        let doc = read_export(&config.export_path, &config.namespaces)?;
        migrate_info!(
            "parsed {} items from {}",
            doc.items.len(),
            config.export_path.display()
        );

        let downloads = if config.download_images {
            self.enter(Stage::FetchImages);
            Some(self.fetch_images(&doc).await?)
        } else {
            None
        };

        self.enter(Stage::ExtractAndWrite);
        let posts = extract_posts(&doc);
        migrate_info!("extracted {} posts from {} items", posts.len(), doc.items.len());

        let writer = MarkdownWriter::new(config.posts_dir.clone());
        let mut summary = RunSummary {
            items: doc.items.len(),
            posts_extracted: posts.len(),
            downloads,
            ..RunSummary::default()
        };
        for post in &posts {
            match writer.write(post) {
                Ok(path) => {
                    migrate_info!("wrote {}", path.display());
                    summary.posts_written += 1;
                    self.sink.emit(PipelineEvent::PostWritten {
                        slug: post.slug.clone(),
                        path,
                    });
                }
                Err(err) => {
                    migrate_error!("failed to write post {:?}: {err}", post.slug);
                    summary.posts_failed += 1;
                    self.sink.emit(PipelineEvent::PostFailed {
                        slug: post.slug.clone(),
                        message: err.to_string(),
                    });
                }
            }
        }

        self.enter(Stage::Done);
        migrate_info!("migration finished: {summary}");
        Ok(summary)
    }

    async fn fetch_images(
        &self,
        doc: &ExportDocument,
    ) -> Result<DownloadReport, PipelineError> {
        let references = locate_images(doc, self.config);
        migrate_info!(
            "found {} image references on {}",
            references.len(),
            self.config.image_host
        );

        let fetcher: Arc<dyn Fetcher> = match &self.fetcher {
            Some(fetcher) => fetcher.clone(),
            None => Arc::new(
                ReqwestFetcher::new(FetchSettings::from(&self.config.download))
                    .map_err(PipelineError::HttpClient)?,
            ),
        };
        let report = ImageDownloader::new(fetcher, self.config)
            .download_all(&references)
            .await;
        migrate_info!(
            "images: {} downloaded, {} failed, {} skipped",
            report.downloaded(),
            report.failed(),
            report.skipped()
        );
        for outcome in &report.outcomes {
            self.sink.emit(PipelineEvent::ImageFinished(outcome.clone()));
        }
        Ok(report)
    }

    fn enter(&self, stage: Stage) {
        migrate_info!("stage: {stage}");
        self.sink.emit(PipelineEvent::StageEntered(stage));
    }
}
