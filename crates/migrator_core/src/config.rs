use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_EXPORT_PATH: &str = "squarespace.xml";
pub const DEFAULT_IMAGE_DIR: &str = "img";
pub const DEFAULT_POSTS_DIR: &str = "posts";
pub const DEFAULT_IMAGE_HOST: &str = "images.squarespace-cdn.com";

/// RSS content module; carries the rich HTML body.
pub const CONTENT_NAMESPACE: &str = "http://purl.org/rss/1.0/modules/content/";
/// WordPress export namespace; carries post type, slug, native date and attachment URL.
pub const WP_NAMESPACE: &str = "http://wordpress.org/export/1.2/";

/// Namespace URIs used to recognise export fields. Both are configurable
/// independently of each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportNamespaces {
    pub content: String,
    pub wp: String,
}

impl Default for ExportNamespaces {
    fn default() -> Self {
        Self {
            content: CONTENT_NAMESPACE.to_string(),
            wp: WP_NAMESPACE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadSettings {
    /// Maximum number of fetches in flight.
    pub concurrency: usize,
    /// Attempts per URL, including the first one.
    pub max_attempts: u32,
    pub retry_delay: Duration,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            concurrency: 10,
            max_attempts: 3,
            retry_delay: Duration::from_secs(1),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
        }
    }
}

/// Run configuration. Built once at startup and only ever borrowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationConfig {
    pub export_path: PathBuf,
    pub image_dir: PathBuf,
    pub posts_dir: PathBuf,
    pub download_images: bool,
    /// Substring identifying CDN image URLs. Never empty.
    pub image_host: String,
    pub namespaces: ExportNamespaces,
    pub download: DownloadSettings,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            export_path: PathBuf::from(DEFAULT_EXPORT_PATH),
            image_dir: PathBuf::from(DEFAULT_IMAGE_DIR),
            posts_dir: PathBuf::from(DEFAULT_POSTS_DIR),
            download_images: false,
            image_host: DEFAULT_IMAGE_HOST.to_string(),
            namespaces: ExportNamespaces::default(),
            download: DownloadSettings::default(),
        }
    }
}

impl MigrationConfig {
    /// Returns true when `candidate` points at the configured image host.
    pub fn is_image_host(&self, candidate: &str) -> bool {
        candidate.contains(self.image_host.as_str())
    }
}
