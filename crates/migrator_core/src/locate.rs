use migrator_logging::migrate_debug;
use scraper::node::Node;
use scraper::Html;

use crate::text::holds_raw_markup;
use crate::{ExportDocument, MigrationConfig};

/// Collects image URLs pointing at the configured image host.
///
/// Per item, in document order: `img` sources inside the HTML body, then the
/// `link` field, then the attachment URL. Duplicates are kept.
pub fn locate_images(doc: &ExportDocument, config: &MigrationConfig) -> Vec<String> {
    let mut urls = Vec::new();

    for item in &doc.items {
        let mut candidates: Vec<String> = Vec::new();
        if let Some(content) = item.content.as_deref() {
            collect_image_sources(content, &mut candidates);
        }
        candidates.extend(item.link.iter().cloned());
        candidates.extend(item.attachment_url.iter().cloned());

        urls.extend(
            candidates
                .into_iter()
                .filter(|candidate| !candidate.trim().is_empty())
                .filter(|candidate| config.is_image_host(candidate)),
        );
    }

    migrate_debug!(
        "located {} image references across {} items",
        urls.len(),
        doc.items.len()
    );
    urls
}

/// `img` sources in document order, including images wrapped in `noscript`.
fn collect_image_sources(fragment: &str, sources: &mut Vec<String>) {
    let html = Html::parse_fragment(fragment);
    for node in html.tree.root().descendants() {
        match node.value() {
            Node::Element(element) if element.name() == "img" => {
                sources.extend(element.attr("src").map(str::to_string));
            }
            Node::Text(chunk) if holds_raw_markup(node.parent().map(|parent| parent.value())) => {
                collect_image_sources(chunk, sources);
            }
            _ => {}
        }
    }
}
