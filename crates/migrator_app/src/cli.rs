//! Command-line surface. Every option can also come from a `MIGRATE_*` variable.

use std::path::PathBuf;
use std::time::Duration;

use clap::builder::NonEmptyStringValueParser;
use clap::Parser;
use migrator_core::{
    DownloadSettings, ExportNamespaces, MigrationConfig, CONTENT_NAMESPACE, DEFAULT_EXPORT_PATH,
    DEFAULT_IMAGE_DIR, DEFAULT_IMAGE_HOST, DEFAULT_POSTS_DIR, WP_NAMESPACE,
};

/// Convert a WordPress/Squarespace XML export into Markdown files.
#[derive(Parser, Debug)]
#[command(name = "export2md", version, about, long_about = None)]
pub struct Cli {
    /// Path to the XML export.
    #[arg(short, long, default_value = DEFAULT_EXPORT_PATH, env = "MIGRATE_INPUT")]
    pub input: PathBuf,

    /// Directory receiving one Markdown file per post.
    #[arg(long, default_value = DEFAULT_POSTS_DIR, env = "MIGRATE_POSTS_DIR")]
    pub posts_dir: PathBuf,

    /// Image directory. Emptied at the start of every run.
    #[arg(long, default_value = DEFAULT_IMAGE_DIR, env = "MIGRATE_IMAGE_DIR")]
    pub image_dir: PathBuf,

    /// Download images hosted on the image host.
    #[arg(long, alias = "download_images", env = "MIGRATE_DOWNLOAD_IMAGES")]
    pub download_images: bool,

    /// Substring identifying image CDN URLs.
    #[arg(
        long,
        alias = "img_url",
        default_value = DEFAULT_IMAGE_HOST,
        env = "MIGRATE_IMAGE_HOST",
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub image_host: String,

    /// Namespace URI of the content module (`content:encoded`).
    #[arg(
        long,
        alias = "namespace",
        default_value = CONTENT_NAMESPACE,
        env = "MIGRATE_CONTENT_NAMESPACE"
    )]
    pub content_namespace: String,

    /// Namespace URI of the WordPress export fields (`wp:*`).
    #[arg(long, default_value = WP_NAMESPACE, env = "MIGRATE_WP_NAMESPACE")]
    pub wp_namespace: String,

    /// Maximum concurrent image downloads.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    pub workers: u32,

    /// Attempts per image before giving up.
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
    pub attempts: u32,

    /// Pause between attempts, in milliseconds.
    #[arg(long, default_value_t = 1000)]
    pub retry_delay_ms: u64,

    /// Per-request timeout, in seconds.
    #[arg(long, default_value_t = 60)]
    pub timeout_secs: u64,

    /// Also write log lines to this file.
    #[arg(long, env = "MIGRATE_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn to_config(&self) -> MigrationConfig {
        MigrationConfig {
            export_path: self.input.clone(),
            image_dir: self.image_dir.clone(),
            posts_dir: self.posts_dir.clone(),
            download_images: self.download_images,
            image_host: self.image_host.clone(),
            namespaces: ExportNamespaces {
                content: self.content_namespace.clone(),
                wp: self.wp_namespace.clone(),
            },
            download: DownloadSettings {
                concurrency: self.workers as usize,
                max_attempts: self.attempts,
                retry_delay: Duration::from_millis(self.retry_delay_ms),
                request_timeout: Duration::from_secs(self.timeout_secs),
                ..DownloadSettings::default()
            },
        }
    }
}
