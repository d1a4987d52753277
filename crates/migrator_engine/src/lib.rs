//! Migrator engine: export reading, image downloads, Markdown output and the run pipeline.
mod fetch;
mod filename;
mod frontmatter;
mod images;
mod markdown;
mod persist;
mod pipeline;
mod types;
mod xml;

pub use fetch::{FetchOutput, FetchSettings, Fetcher, ReqwestFetcher};
pub use filename::post_relative_path;
pub use frontmatter::build_markdown_document;
pub use images::{image_file_name, normalize_image_url, ImageDownloader};
pub use markdown::MarkdownWriter;
pub use persist::{ensure_output_dir, reset_dir, AtomicFileWriter, PersistError};
pub use pipeline::{NoopSink, Pipeline, PipelineError, ProgressSink};
pub use types::{
    DownloadReport, FailureKind, FetchError, ImageOutcome, ImageResult, PipelineEvent,
    RunSummary, SkipReason,
};
pub use xml::{parse_export, read_export, ParseError};
