use std::fs;

use migrator_core::ExtractedPost;
use migrator_engine::{build_markdown_document, MarkdownWriter};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn post(slug: &str) -> ExtractedPost {
    ExtractedPost {
        title: "Sample Title".to_string(),
        slug: slug.to_string(),
        publish_date: "Sample Date".to_string(),
        body_text: "Sample Content".to_string(),
    }
}

#[test]
fn document_has_exact_front_matter_layout() {
    assert_eq!(
        build_markdown_document(&post("sample-post")),
        "---\ntitle: Sample Title\ndate: Sample Date\n---\nSample Content"
    );
}

#[test]
fn values_are_not_yaml_escaped() {
    let mut tricky = post("x");
    tricky.title = "Colons: \"quotes\" & #hash".to_string();
    let doc = build_markdown_document(&tricky);
    assert!(doc.starts_with("---\ntitle: Colons: \"quotes\" & #hash\n"));
}

#[test]
fn writer_creates_flat_file() {
    let temp = TempDir::new().unwrap();
    let writer = MarkdownWriter::new(temp.path().to_path_buf());
    let path = writer.write(&post("sample-post")).unwrap();

    assert_eq!(path, temp.path().join("sample-post.md"));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "---\ntitle: Sample Title\ndate: Sample Date\n---\nSample Content"
    );
}

#[test]
fn nested_slug_creates_intermediate_directory() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("posts");
    let writer = MarkdownWriter::new(root.clone());
    let path = writer.write(&post("2024/my-post")).unwrap();

    assert_eq!(path, root.join("2024").join("my-post.md"));
    assert!(root.join("2024").is_dir());
    assert!(path.is_file());
}

#[test]
fn rewriting_overwrites_previous_content() {
    let temp = TempDir::new().unwrap();
    let writer = MarkdownWriter::new(temp.path().to_path_buf());
    writer.write(&post("again")).unwrap();

    let mut updated = post("again");
    updated.body_text = "New body".to_string();
    let path = writer.write(&updated).unwrap();
    assert!(fs::read_to_string(path).unwrap().ends_with("---\nNew body"));
}
