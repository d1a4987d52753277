use std::path::PathBuf;

use migrator_core::ExtractedPost;

use crate::filename::post_relative_path;
use crate::frontmatter::build_markdown_document;
use crate::persist::{AtomicFileWriter, PersistError};

/// Writes one Markdown file per post below the posts root.
#[derive(Debug, Clone)]
pub struct MarkdownWriter {
    writer: AtomicFileWriter,
}

impl MarkdownWriter {
    pub fn new(posts_dir: PathBuf) -> Self {
        Self {
            writer: AtomicFileWriter::new(posts_dir),
        }
    }

    /// Creates or overwrites the post's file and returns its path.
    pub fn write(&self, post: &ExtractedPost) -> Result<PathBuf, PersistError> {
        let relative = post_relative_path(&post.slug);
        let document = build_markdown_document(post);
        self.writer.write(&relative, document.as_bytes())
    }
}
