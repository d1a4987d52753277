use std::path::PathBuf;
use std::sync::Arc;

use futures_util::{stream, StreamExt};
use migrator_core::{DownloadSettings, MigrationConfig};
use migrator_logging::{migrate_debug, migrate_error, migrate_info, migrate_warn};
use url::Url;

use crate::fetch::Fetcher;
use crate::persist::AtomicFileWriter;
use crate::{DownloadReport, FailureKind, ImageOutcome, ImageResult, SkipReason};

/// Cleans a located reference into a fetchable URL.
///
/// Whitespace and `&nbsp;` (literal or decoded) are removed. A reference
/// without `http://`/`https://` gets `https://` only when it mentions the
/// image host; otherwise it is skipped.
pub fn normalize_image_url(raw: &str, image_host: &str) -> Result<String, SkipReason> {
    let cleaned = raw.trim().replace("&nbsp;", "").replace('\u{a0}', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Err(SkipReason::Empty);
    }

    let lower = cleaned.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return Ok(cleaned.to_string());
    }
    if !cleaned.contains(image_host) {
        return Err(SkipReason::MissingScheme);
    }
    // Protocol-relative `//host/...` references lose their slashes first.
    Ok(format!("https://{}", cleaned.trim_start_matches('/')))
}

/// Final path segment of `url`, used as the local file name.
pub fn image_file_name(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let name = parsed.path_segments()?.last()?;
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Downloads located images into one flat directory with bounded concurrency.
pub struct ImageDownloader {
    fetcher: Arc<dyn Fetcher>,
    writer: AtomicFileWriter,
    image_host: String,
    settings: DownloadSettings,
}

impl ImageDownloader {
    pub fn new(fetcher: Arc<dyn Fetcher>, config: &MigrationConfig) -> Self {
        Self {
            fetcher,
            writer: AtomicFileWriter::new(config.image_dir.clone()),
            image_host: config.image_host.clone(),
            settings: config.download.clone(),
        }
    }

    /// Fetches every reference. Never fails as a whole: each reference gets
    /// its own outcome, in completion order.
    pub async fn download_all(&self, references: &[String]) -> DownloadReport {
        let workers = self.settings.concurrency.max(1);
        migrate_info!(
            "downloading {} image references into {} ({} workers)",
            references.len(),
            self.writer.root().display(),
            workers
        );

        let outcomes = stream::iter(references)
            .map(|reference| self.download_one(reference))
            .buffer_unordered(workers)
            .collect::<Vec<_>>()
            .await;

        DownloadReport { outcomes }
    }

    async fn download_one(&self, reference: &str) -> ImageOutcome {
        let skipped = |url: Option<String>, reason: SkipReason| {
            migrate_warn!("skipping image reference {reference:?}: {reason}");
            ImageOutcome {
                source: reference.to_string(),
                url,
                result: ImageResult::Skipped(reason),
            }
        };

        let url = match normalize_image_url(reference, &self.image_host) {
            Ok(url) => url,
            Err(reason) => return skipped(None, reason),
        };
        if url != reference {
            migrate_debug!("normalized {reference:?} to {url}");
        }
        let Some(file_name) = image_file_name(&url) else {
            return skipped(Some(url), SkipReason::NoFileName);
        };

        let result = self.fetch_with_retry(&url, &file_name).await;
        ImageOutcome {
            source: reference.to_string(),
            url: Some(url),
            result,
        }
    }

    async fn fetch_with_retry(&self, url: &str, file_name: &str) -> ImageResult {
        let max_attempts = self.settings.max_attempts.max(1);
        let mut attempt = 0;
        loop {
            attempt += 1;
            migrate_info!("fetching {url} (attempt {attempt}/{max_attempts})");

            match self.fetcher.fetch(url).await {
                Ok(output) => {
                    let bytes = output.bytes.len() as u64;
                    return match self.store(file_name, output.bytes).await {
                        Ok(path) => {
                            migrate_info!("saved {url} to {} ({bytes} bytes)", path.display());
                            ImageResult::Downloaded {
                                path,
                                bytes,
                                attempts: attempt,
                            }
                        }
                        Err(message) => {
                            migrate_error!("failed to store {url} as {file_name}: {message}");
                            ImageResult::Failed {
                                kind: FailureKind::Write,
                                attempts: attempt,
                                message,
                            }
                        }
                    };
                }
                Err(err) if err.kind.is_transient() && attempt < max_attempts => {
                    migrate_warn!(
                        "attempt {attempt}/{max_attempts} for {url} failed ({err}); retrying in {:?}",
                        self.settings.retry_delay
                    );
                    tokio::time::sleep(self.settings.retry_delay).await;
                }
                Err(err) => {
                    migrate_error!("giving up on {url} after {attempt} attempt(s): {err}");
                    return ImageResult::Failed {
                        kind: err.kind,
                        attempts: attempt,
                        message: err.message,
                    };
                }
            }
        }
    }

    /// Runs the file write on the blocking pool.
    async fn store(&self, file_name: &str, bytes: Vec<u8>) -> Result<PathBuf, String> {
        let writer = self.writer.clone();
        let name = PathBuf::from(file_name);
        match tokio::task::spawn_blocking(move || writer.write(&name, &bytes)).await {
            Ok(Ok(path)) => Ok(path),
            Ok(Err(err)) => Err(err.to_string()),
            Err(join) => Err(format!("write task did not complete: {join}")),
        }
    }
}
