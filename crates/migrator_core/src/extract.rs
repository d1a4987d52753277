use migrator_logging::migrate_debug;

use crate::text::body_to_text;
use crate::{ExportDocument, ExportItem};

pub const UNKNOWN_TITLE: &str = "unknown title";
pub const UNKNOWN_POST_NAME: &str = "unknown post name";
pub const UNKNOWN_DATE: &str = "unknown date";

/// Fields of one post ready for the Markdown writer. `slug` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPost {
    pub title: String,
    pub slug: String,
    pub publish_date: String,
    pub body_text: String,
}

/// Extracts every publishable post, preserving document order.
pub fn extract_posts(doc: &ExportDocument) -> Vec<ExtractedPost> {
    let posts: Vec<ExtractedPost> = doc.items.iter().filter_map(extract_post).collect();
    migrate_debug!(
        "extracted {} posts from {} items",
        posts.len(),
        doc.items.len()
    );
    posts
}

/// Builds a post from one item.
///
/// Returns `None` for attachment records and for items without a body.
pub fn extract_post(item: &ExportItem) -> Option<ExtractedPost> {
    if item.is_attachment() {
        return None;
    }
    let body = item
        .content
        .as_deref()
        .filter(|body| !body.trim().is_empty())?;

    let publish_date = first_present(&[&item.pub_date, &item.post_date]).unwrap_or(UNKNOWN_DATE);

    Some(ExtractedPost {
        title: first_present(&[&item.title]).unwrap_or(UNKNOWN_TITLE).to_string(),
        slug: first_present(&[&item.post_name])
            .unwrap_or(UNKNOWN_POST_NAME)
            .to_string(),
        publish_date: publish_date.to_string(),
        body_text: body_to_text(body),
    })
}

/// First field with non-blank text, returned as written.
fn first_present<'a>(fields: &[&'a Option<String>]) -> Option<&'a str> {
    fields
        .iter()
        .copied()
        .filter_map(Option::as_deref)
        .find(|value| !value.trim().is_empty())
}
