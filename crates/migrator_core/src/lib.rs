//! Migrator core: IO-free export model, configuration and content rules.
mod config;
mod document;
mod extract;
mod locate;
mod stage;
mod text;

pub use config::{
    DownloadSettings, ExportNamespaces, MigrationConfig, CONTENT_NAMESPACE, DEFAULT_EXPORT_PATH,
    DEFAULT_IMAGE_DIR, DEFAULT_IMAGE_HOST, DEFAULT_POSTS_DIR, WP_NAMESPACE,
};
pub use document::{ExportDocument, ExportItem, ATTACHMENT_POST_TYPE};
pub use extract::{
    extract_post, extract_posts, ExtractedPost, UNKNOWN_DATE, UNKNOWN_POST_NAME, UNKNOWN_TITLE,
};
pub use locate::locate_images;
pub use stage::Stage;
pub use text::{body_to_text, html_to_text};
