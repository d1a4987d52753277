/// Post-type marker value of media attachment records.
pub const ATTACHMENT_POST_TYPE: &str = "attachment";

/// Parsed `rss > channel` export. Items keep document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExportDocument {
    pub items: Vec<ExportItem>,
}

impl ExportDocument {
    pub fn new(items: Vec<ExportItem>) -> Self {
        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// One `<item>` record. Every field is optional; `None` means the element
/// was missing or carried no text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExportItem {
    pub title: Option<String>,
    pub link: Option<String>,
    pub pub_date: Option<String>,
    /// `content:encoded`, usually HTML wrapped in CDATA.
    pub content: Option<String>,
    pub post_type: Option<String>,
    pub post_name: Option<String>,
    /// Native `wp:post_date`, used when `pubDate` is missing.
    pub post_date: Option<String>,
    pub attachment_url: Option<String>,
}

impl ExportItem {
    pub fn is_attachment(&self) -> bool {
        self.post_type.as_deref().map(str::trim) == Some(ATTACHMENT_POST_TYPE)
    }
}
