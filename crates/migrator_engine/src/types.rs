use std::fmt;
use std::path::PathBuf;

use migrator_core::Stage;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Network,
    /// The body arrived but could not be stored.
    Write,
}

impl FailureKind {
    /// Whether another attempt may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            FailureKind::Timeout | FailureKind::Network => true,
            FailureKind::HttpStatus(code) => *code == 429 || (500..600).contains(code),
            _ => false,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Write => write!(f, "write error"),
        }
    }
}

/// Why a reference was dropped without a fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Empty,
    /// No scheme and no image host to justify adding one.
    MissingScheme,
    NoFileName,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Empty => write!(f, "empty reference"),
            SkipReason::MissingScheme => write!(f, "no scheme and not on the image host"),
            SkipReason::NoFileName => write!(f, "url has no file name"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageResult {
    Downloaded {
        path: PathBuf,
        bytes: u64,
        attempts: u32,
    },
    Failed {
        kind: FailureKind,
        attempts: u32,
        message: String,
    },
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageOutcome {
    /// Reference as located in the export.
    pub source: String,
    /// Normalized URL; `None` when skipped before normalization succeeded.
    pub url: Option<String>,
    pub result: ImageResult,
}

/// Per-reference outcomes of one download batch, in completion order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DownloadReport {
    pub outcomes: Vec<ImageOutcome>,
}

impl DownloadReport {
    pub fn downloaded(&self) -> usize {
        self.count(|r| matches!(r, ImageResult::Downloaded { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|r| matches!(r, ImageResult::Failed { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|r| matches!(r, ImageResult::Skipped(_)))
    }

    /// Outcome for a given source reference, if it was part of the batch.
    pub fn outcome_for(&self, source: &str) -> Option<&ImageOutcome> {
        self.outcomes.iter().find(|o| o.source == source)
    }

    fn count(&self, pred: impl Fn(&ImageResult) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.result)).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    StageEntered(Stage),
    ImageFinished(ImageOutcome),
    PostWritten { slug: String, path: PathBuf },
    PostFailed { slug: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub items: usize,
    pub posts_extracted: usize,
    pub posts_written: usize,
    pub posts_failed: usize,
    /// Present only when image download was requested.
    pub downloads: Option<DownloadReport>,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} items, {} posts extracted, {} written, {} failed",
            self.items, self.posts_extracted, self.posts_written, self.posts_failed
        )?;
        if let Some(report) = &self.downloads {
            write!(
                f,
                "; images: {} downloaded, {} failed, {} skipped",
                report.downloaded(),
                report.failed(),
                report.skipped()
            )?;
        }
        Ok(())
    }
}
