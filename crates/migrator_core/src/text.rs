use scraper::node::Node;
use scraper::Html;

/// Elements whose text is never visible.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "template"];

/// html5ever parses with scripting enabled, which keeps `noscript` content
/// as a single raw-markup text node. Such text must be parsed again.
pub(crate) fn holds_raw_markup(parent: Option<&Node>) -> bool {
    matches!(parent, Some(Node::Element(element)) if element.name() == "noscript")
}

/// Visible text of an HTML fragment with all markup dropped.
///
/// Parsing is tolerant: malformed markup yields whatever text html5ever
/// recovers, and an unusable fragment yields an empty string.
pub fn html_to_text(fragment: &str) -> String {
    let mut text = String::with_capacity(fragment.len());
    push_visible_text(fragment, &mut text);
    text
}

fn push_visible_text(fragment: &str, text: &mut String) {
    let html = Html::parse_fragment(fragment);
    for node in html.tree.root().descendants() {
        let Node::Text(chunk) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| match ancestor.value() {
            Node::Element(element) => HIDDEN_ELEMENTS.contains(&element.name()),
            _ => false,
        });
        if hidden {
            continue;
        }
        if holds_raw_markup(node.parent().map(|parent| parent.value())) {
            push_visible_text(chunk, text);
        } else {
            text.push_str(chunk);
        }
    }
}

/// Renders a `content:encoded` body into the Markdown body text.
///
/// CDATA markers are removed textually first, since some exports double-wrap
/// them. After extraction the text is trimmed and every `\n\n\n` run is
/// deleted; other newline runs are left alone.
pub fn body_to_text(raw: &str) -> String {
    let unwrapped = raw.replace("<![CDATA[", "").replace("]]>", "");
    html_to_text(&unwrapped).trim().replace("\n\n\n", "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn drops_markup_and_keeps_text() {
        let text = html_to_text("<p>Hello <strong>bold</strong> <a href=\"x\">world</a></p>");
        assert_eq!(text, "Hello bold world");
    }

    #[test]
    fn decodes_entities() {
        assert_eq!(html_to_text("Fish &amp; chips&nbsp;today"), "Fish & chips\u{a0}today");
    }

    #[test]
    fn skips_scripts_styles_and_comments() {
        let text = html_to_text("<style>p{}</style><!-- note --><p>shown</p><script>alert(1)</script>");
        assert_eq!(text, "shown");
    }

    #[test]
    fn noscript_fallback_text_is_visible() {
        assert_eq!(
            html_to_text("<noscript>visible <b>fallback</b></noscript><p>a</p>"),
            "visible fallbacka"
        );
        assert_eq!(html_to_text("<noscript><img src=\"x.jpg\"></noscript>"), "");
    }

    #[test]
    fn malformed_markup_never_fails() {
        assert_eq!(html_to_text("<p><b>unclosed <i>tags"), "unclosed tags");
        assert_eq!(html_to_text("</div></span>stray"), "stray");
        assert_eq!(html_to_text(""), "");
    }

    #[test]
    fn body_strips_cdata_markers_and_trims() {
        assert_eq!(body_to_text("<![CDATA[  <p>Sample Content</p>  ]]>"), "Sample Content");
    }

    #[test]
    fn body_removes_only_triple_newlines() {
        assert_eq!(body_to_text("a\n\n\nb\n\nc"), "ab\n\nc");
        assert_eq!(body_to_text("a\n\n\n\nb"), "a\nb");
    }
}
