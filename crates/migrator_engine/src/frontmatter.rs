use migrator_core::ExtractedPost;

/// Front matter followed by the raw body. Values are written verbatim,
/// without YAML escaping.
pub fn build_markdown_document(post: &ExtractedPost) -> String {
    format!(
        "---\ntitle: {title}\ndate: {date}\n---\n{body}",
        title = post.title,
        date = post.publish_date,
        body = post.body_text
    )
}
