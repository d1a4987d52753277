use migrator_core::{ExportItem, ExportNamespaces};
use migrator_engine::{parse_export, read_export, ParseError};
use pretty_assertions::assert_eq;

const HEADER: &str = r#"<rss version="2.0"
    xmlns:excerpt="http://wordpress.org/export/1.2/excerpt/"
    xmlns:content="http://purl.org/rss/1.0/modules/content/"
    xmlns:dc="http://purl.org/dc/elements/1.1/"
    xmlns:wp="http://wordpress.org/export/1.2/">"#;

fn wrap(channel_body: &str) -> String {
    format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{HEADER}<channel>{channel_body}</channel></rss>")
}

#[test]
fn reads_every_item_field() {
    let xml = wrap(
        r#"
        <title>Site title</title>
        <link>https://blog.example.com</link>
        <item>
            <title>Sample Title</title>
            <link>https://blog.example.com/sample</link>
            <pubDate>Sample Date</pubDate>
            <content:encoded><![CDATA[<p>Sample <b>Content</b></p>]]></content:encoded>
            <excerpt:encoded><![CDATA[excerpt]]></excerpt:encoded>
            <wp:post_type>post</wp:post_type>
            <wp:post_name>blog/sample-post</wp:post_name>
            <wp:post_date>2024-01-02 03:04:05</wp:post_date>
            <wp:attachment_url>https://images.squarespace-cdn.com/a.jpg</wp:attachment_url>
        </item>"#,
    );
    let doc = parse_export(&xml, &ExportNamespaces::default()).unwrap();
    assert_eq!(
        doc.items,
        vec![ExportItem {
            title: Some("Sample Title".to_string()),
            link: Some("https://blog.example.com/sample".to_string()),
            pub_date: Some("Sample Date".to_string()),
            content: Some("<p>Sample <b>Content</b></p>".to_string()),
            post_type: Some("post".to_string()),
            post_name: Some("blog/sample-post".to_string()),
            post_date: Some("2024-01-02 03:04:05".to_string()),
            attachment_url: Some("https://images.squarespace-cdn.com/a.jpg".to_string()),
        }]
    );
}

#[test]
fn channel_without_items_is_empty() {
    let doc = parse_export(&wrap("<title>Empty</title>"), &ExportNamespaces::default()).unwrap();
    assert!(doc.is_empty());
}

#[test]
fn missing_and_blank_fields_stay_absent() {
    let xml = wrap("<item><title>  </title><wp:post_type/><pubDate></pubDate></item><item/>");
    let doc = parse_export(&xml, &ExportNamespaces::default()).unwrap();
    assert_eq!(doc.items, vec![ExportItem::default(), ExportItem::default()]);
}

#[test]
fn escaped_text_is_unescaped() {
    let xml = wrap("<item><title>Fish &amp; Chips</title><content:encoded>&lt;p&gt;hi&lt;/p&gt;</content:encoded></item>");
    let doc = parse_export(&xml, &ExportNamespaces::default()).unwrap();
    assert_eq!(doc.items[0].title.as_deref(), Some("Fish & Chips"));
    assert_eq!(doc.items[0].content.as_deref(), Some("<p>hi</p>"));
}

#[test]
fn unescaped_body_markup_is_kept_as_html() {
    let xml = wrap(
        r#"<item>
            <title>Plain <em>title</em></title>
            <content:encoded><p>raw &amp; <img src="x.jpg"/></p><hr/></content:encoded>
        </item>"#,
    );
    let doc = parse_export(&xml, &ExportNamespaces::default()).unwrap();
    let item = &doc.items[0];
    assert_eq!(
        item.content.as_deref(),
        Some(r#"<p>raw &amp; <img src="x.jpg"/></p><hr/>"#)
    );
    assert_eq!(item.title.as_deref(), Some("Plain title"));
}

#[test]
fn prefixes_are_resolved_by_uri() {
    let xml = r#"<rss xmlns:c="http://purl.org/rss/1.0/modules/content/" xmlns:w="http://wordpress.org/export/1.2/">
        <channel><item>
            <c:encoded>body</c:encoded>
            <w:post_name>slug</w:post_name>
            <content:encoded xmlns:content="urn:not-content">ignored</content:encoded>
        </item></channel></rss>"#;
    let doc = parse_export(xml, &ExportNamespaces::default()).unwrap();
    assert_eq!(doc.items[0].content.as_deref(), Some("body"));
    assert_eq!(doc.items[0].post_name.as_deref(), Some("slug"));
}

#[test]
fn namespaces_are_configurable_independently() {
    let xml = r#"<rss xmlns:content="urn:custom-content" xmlns:wp="http://wordpress.org/export/1.1/">
        <channel><item>
            <content:encoded>body</content:encoded>
            <wp:post_type>attachment</wp:post_type>
        </item></channel></rss>"#;

    let defaults = parse_export(xml, &ExportNamespaces::default()).unwrap();
    assert_eq!(defaults.items[0], ExportItem::default());

    let custom = ExportNamespaces {
        content: "urn:custom-content".to_string(),
        wp: "http://wordpress.org/export/1.1/".to_string(),
    };
    let doc = parse_export(xml, &custom).unwrap();
    assert_eq!(doc.items[0].content.as_deref(), Some("body"));
    assert_eq!(doc.items[0].post_type.as_deref(), Some("attachment"));
}

#[test]
fn first_occurrence_of_a_field_wins() {
    let xml = wrap("<item><title>first</title><title>second</title></item>");
    let doc = parse_export(&xml, &ExportNamespaces::default()).unwrap();
    assert_eq!(doc.items[0].title.as_deref(), Some("first"));
}

#[test]
fn malformed_xml_is_fatal() {
    let mismatched = wrap("<item><title>oops</link></item>");
    assert!(matches!(
        parse_export(&mismatched, &ExportNamespaces::default()),
        Err(ParseError::Xml { .. })
    ));

    let truncated = format!("{HEADER}<channel><item><title>cut");
    assert!(parse_export(&truncated, &ExportNamespaces::default()).is_err());

    assert!(matches!(
        parse_export("   ", &ExportNamespaces::default()),
        Err(ParseError::NoRoot)
    ));
}

#[test]
fn missing_file_is_reported() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("absent.xml");
    match read_export(&path, &ExportNamespaces::default()) {
        Err(ParseError::Missing(reported)) => assert_eq!(reported, path),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn reads_export_from_disk() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("export.xml");
    std::fs::write(&path, wrap("<item><title>On disk</title></item>")).unwrap();
    let doc = read_export(&path, &ExportNamespaces::default()).unwrap();
    assert_eq!(doc.items[0].title.as_deref(), Some("On disk"));
}
