//! Export reader for the `rss > channel > item` dialect.
//!
//! Prefixes are resolved to namespace URIs, so an export that binds the
//! content or WordPress namespaces to unusual prefixes still reads the same.

use std::fs;
use std::path::{Path, PathBuf};

use migrator_core::{ExportDocument, ExportItem, ExportNamespaces};
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("export file not found: {}", .0.display())]
    Missing(PathBuf),
    #[error("cannot read export {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed export XML near byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },
    #[error("export contains no XML elements")]
    NoRoot,
    #[error("export ended inside an unclosed <{0}> element")]
    UnexpectedEof(String),
}

/// Reads and parses the export at `path`.
pub fn read_export(path: &Path, namespaces: &ExportNamespaces) -> Result<ExportDocument, ParseError> {
    if !path.is_file() {
        return Err(ParseError::Missing(path.to_path_buf()));
    }
    let xml = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_export(&xml, namespaces)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Plain,
    Content,
    Wp,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Tag {
    scope: Scope,
    local: Vec<u8>,
}

impl Tag {
    fn is(&self, scope: Scope, local: &[u8]) -> bool {
        self.scope == scope && self.local == local
    }
}

#[derive(Debug, Clone, Copy)]
enum Field {
    Title,
    Link,
    PubDate,
    Content,
    PostType,
    PostName,
    PostDate,
    AttachmentUrl,
}

const ITEM_DEPTH: usize = 3;

/// Text collected for one item field.
///
/// Post bodies are usually escaped or wrapped in CDATA, but some exporters
/// write the HTML as real child elements. `markup` keeps that raw form so
/// a body with nested elements is stored as HTML rather than flattened.
struct Capture {
    field: Field,
    text: String,
    markup: String,
    nested: bool,
}

impl Capture {
    fn new(field: Field) -> Self {
        Self {
            field,
            text: String::new(),
            markup: String::new(),
            nested: false,
        }
    }

    fn open(&mut self, raw: &[u8], empty: bool) {
        self.nested = true;
        self.markup.push('<');
        self.markup.push_str(&String::from_utf8_lossy(raw));
        self.markup.push_str(if empty { "/>" } else { ">" });
    }

    fn close(&mut self, name: &[u8]) {
        self.markup.push_str("</");
        self.markup.push_str(&String::from_utf8_lossy(name));
        self.markup.push('>');
    }

    fn finish(self) -> (Field, String) {
        if self.nested && matches!(self.field, Field::Content) {
            (self.field, self.markup)
        } else {
            (self.field, self.text)
        }
    }
}

/// Parses export XML held in memory.
pub fn parse_export(xml: &str, namespaces: &ExportNamespaces) -> Result<ExportDocument, ParseError> {
    let mut reader = NsReader::from_str(xml);
    let mut path: Vec<Tag> = Vec::new();
    let mut items = Vec::new();
    let mut current: Option<ExportItem> = None;
    let mut capture: Option<Capture> = None;
    let mut saw_root = false;

    loop {
        let position = reader.buffer_position() as u64;
        let xml_error = |source| ParseError::Xml { position, source };
        let (resolved, event) = reader.read_resolved_event().map_err(xml_error)?;
        let scope = scope_of(&resolved, namespaces);

        match event {
            Event::Start(start) => {
                saw_root = true;
                path.push(Tag {
                    scope,
                    local: start.local_name().as_ref().to_vec(),
                });
                if is_item_path(&path) {
                    current = Some(ExportItem::default());
                } else if current.is_some() && path.len() == ITEM_DEPTH + 1 {
                    capture = path.last().and_then(field_for).map(Capture::new);
                } else if let Some(capture) = capture.as_mut() {
                    capture.open(&start, false);
                }
            }
            Event::Empty(start) => {
                saw_root = true;
                path.push(Tag {
                    scope,
                    local: start.local_name().as_ref().to_vec(),
                });
                if is_item_path(&path) {
                    items.push(ExportItem::default());
                } else if let Some(capture) = capture.as_mut() {
                    capture.open(&start, true);
                }
                path.pop();
            }
            Event::Text(text) => {
                if let Some(capture) = capture.as_mut() {
                    capture.text.push_str(&text.unescape().map_err(xml_error)?);
                    capture.markup.push_str(&String::from_utf8_lossy(&text));
                }
            }
            Event::CData(data) => {
                if let Some(capture) = capture.as_mut() {
                    let data = String::from_utf8_lossy(&data);
                    capture.text.push_str(&data);
                    capture.markup.push_str(&data);
                }
            }
            Event::End(end) => {
                if path.len() == ITEM_DEPTH + 1 {
                    if let (Some(capture), Some(item)) = (capture.take(), current.as_mut()) {
                        let (field, text) = capture.finish();
                        set_field(item, field, text);
                    }
                } else if let Some(capture) = capture.as_mut() {
                    capture.close(end.name().as_ref());
                } else if is_item_path(&path) {
                    items.extend(current.take());
                }
                path.pop();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = path.last() {
        return Err(ParseError::UnexpectedEof(
            String::from_utf8_lossy(&open.local).into_owned(),
        ));
    }
    if !saw_root {
        return Err(ParseError::NoRoot);
    }
    Ok(ExportDocument::new(items))
}

fn scope_of(resolved: &ResolveResult<'_>, namespaces: &ExportNamespaces) -> Scope {
    match resolved {
        ResolveResult::Unbound => Scope::Plain,
        ResolveResult::Bound(Namespace(uri)) if *uri == namespaces.content.as_bytes() => {
            Scope::Content
        }
        ResolveResult::Bound(Namespace(uri)) if *uri == namespaces.wp.as_bytes() => Scope::Wp,
        _ => Scope::Other,
    }
}

fn is_item_path(path: &[Tag]) -> bool {
    matches!(path, [rss, channel, item]
        if rss.is(Scope::Plain, b"rss")
            && channel.is(Scope::Plain, b"channel")
            && item.is(Scope::Plain, b"item"))
}

fn field_for(tag: &Tag) -> Option<Field> {
    let field = match (tag.scope, tag.local.as_slice()) {
        (Scope::Plain, b"title") => Field::Title,
        (Scope::Plain, b"link") => Field::Link,
        (Scope::Plain, b"pubDate") => Field::PubDate,
        (Scope::Content, b"encoded") => Field::Content,
        (Scope::Wp, b"post_type") => Field::PostType,
        (Scope::Wp, b"post_name") => Field::PostName,
        (Scope::Wp, b"post_date") => Field::PostDate,
        (Scope::Wp, b"attachment_url") => Field::AttachmentUrl,
        _ => return None,
    };
    Some(field)
}

/// First occurrence wins; blank text leaves the field absent.
fn set_field(item: &mut ExportItem, field: Field, text: String) {
    if text.trim().is_empty() {
        return;
    }
    let slot = match field {
        Field::Title => &mut item.title,
        Field::Link => &mut item.link,
        Field::PubDate => &mut item.pub_date,
        Field::Content => &mut item.content,
        Field::PostType => &mut item.post_type,
        Field::PostName => &mut item.post_name,
        Field::PostDate => &mut item.post_date,
        Field::AttachmentUrl => &mut item.attachment_url,
    };
    if slot.is_none() {
        *slot = Some(text);
    }
}
