//! Normalized, read-only view of one fetched page.
//!
//! A [`Document`] is built once per request (by [`html::parse_html`] or by
//! deserializing a JSON snapshot) and shared immutably by every analyzer.

pub mod html;

use crate::core::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    pub url: String,
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub lang: Option<String>,
    pub headings: Vec<Heading>,
    pub blocks: Vec<TextBlock>,
    pub schema_blocks: Vec<SchemaBlock>,
    pub links: Vec<Link>,
    pub images: Vec<Image>,
    pub tables: usize,
    pub author: Option<String>,
    pub published_at: Option<String>,
    pub has_author_bio: bool,
    #[serde(rename = "hasHTTPS")]
    pub has_https: bool,
    pub robots_allows_index: bool,
    pub robots_allows_follow: bool,
    pub has_canonical: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Heading {
    pub level: u8,
    pub text: String,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum BlockKind {
    #[default]
    Paragraph,
    ListItem,
    OrderedListItem,
    TableCell,
    Quote,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    #[serde(default)]
    pub kind: BlockKind,
    pub text: String,
    /// Index into [`Document::headings`] of the nearest preceding heading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<usize>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SchemaBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declared_type: Option<String>,
    pub raw: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Link {
    pub href: String,
    #[serde(default)]
    pub rel: Option<String>,
    #[serde(default)]
    pub text: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Image {
    pub src: String,
    #[serde(default)]
    pub alt: Option<String>,
}

/// Crawl flags default to permissive so a snapshot without a robots meta
/// tag reads as indexable.
impl Default for Document {
    fn default() -> Self {
        Self {
            url: String::new(),
            title: None,
            meta_description: None,
            lang: None,
            headings: Vec::new(),
            blocks: Vec::new(),
            schema_blocks: Vec::new(),
            links: Vec::new(),
            images: Vec::new(),
            tables: 0,
            author: None,
            published_at: None,
            has_author_bio: false,
            has_https: false,
            robots_allows_index: true,
            robots_allows_follow: true,
            has_canonical: false,
        }
    }
}

impl Document {
    /// Create an empty document for `url` with permissive crawl flags.
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            has_https: url.starts_with("https://"),
            url,
            ..Self::default()
        }
    }

    /// Check the invariants analyzers rely on.
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(Error::MalformedDocument("document has no URL".into()));
        }
        if let Some(h) = self.headings.iter().find(|h| !(1..=6).contains(&h.level)) {
            return Err(Error::MalformedDocument(format!(
                "heading '{}' has level {} outside 1..=6",
                h.text, h.level
            )));
        }
        if let Some(b) = self
            .blocks
            .iter()
            .find(|b| b.heading.is_some_and(|i| i >= self.headings.len()))
        {
            return Err(Error::MalformedDocument(format!(
                "block references missing heading {:?}",
                b.heading
            )));
        }
        Ok(())
    }

    /// All block text joined by single spaces.
    pub fn body_text(&self) -> String {
        self.blocks
            .iter()
            .map(|b| b.text.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &TextBlock> {
        self.blocks
            .iter()
            .filter(|b| b.kind == BlockKind::Paragraph)
    }

    /// Blocks that sit under heading `index`, in document order.
    pub fn section(&self, index: usize) -> impl Iterator<Item = &TextBlock> {
        self.blocks
            .iter()
            .filter(move |b| b.heading == Some(index))
    }

    pub fn title_text(&self) -> &str {
        self.title.as_deref().unwrap_or("").trim()
    }

    pub fn meta_text(&self) -> &str {
        self.meta_description.as_deref().unwrap_or("").trim()
    }

    /// Host of the document URL, used to tell outbound links apart.
    pub fn host(&self) -> Option<String> {
        url::Url::parse(&self.url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_lowercase))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_detects_https() {
        assert!(Document::new("https://example.com").has_https);
        assert!(!Document::new("http://example.com").has_https);
    }

    #[test]
    fn test_validate_rejects_blank_url() {
        let doc = Document::new("  ");
        assert!(matches!(doc.validate(), Err(Error::MalformedDocument(_))));
    }

    #[test]
    fn test_validate_rejects_bad_heading_level() {
        let mut doc = Document::new("https://example.com");
        doc.headings.push(Heading {
            level: 7,
            text: "Deep".into(),
        });
        assert!(doc.validate().is_err());
    }

    #[test]
    fn test_section_returns_blocks_under_heading() {
        let mut doc = Document::new("https://example.com");
        doc.headings.push(Heading {
            level: 2,
            text: "Intro".into(),
        });
        doc.blocks.push(TextBlock {
            kind: BlockKind::Paragraph,
            text: "Before".into(),
            heading: None,
        });
        doc.blocks.push(TextBlock {
            kind: BlockKind::Paragraph,
            text: "After".into(),
            heading: Some(0),
        });
        let texts: Vec<_> = doc.section(0).map(|b| b.text.as_str()).collect();
        assert_eq!(texts, vec!["After"]);
    }

    #[test]
    fn test_deserializes_camel_case_snapshot() {
        let json = r#"{"url":"https://a.test","hasHTTPS":true,"robotsAllowsIndex":true,
            "headings":[{"level":1,"text":"Hi"}],"blocks":[{"text":"Hello there."}]}"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert!(doc.has_https);
        // absent crawl flags stay permissive
        assert!(doc.robots_allows_follow);
        assert_eq!(doc.blocks[0].kind, BlockKind::Paragraph);
    }
}
