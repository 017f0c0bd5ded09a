//! Document-wide inventories shared by every analyzer of one run.

use super::{heading_inventory, schema_inventory, HeadingInventory, SchemaInventory};
use crate::document::Document;

/// Heading and structured-data inventories of one document.
///
/// Derived once per audit: every JSON-LD block is parsed, and every
/// malformed block logged, a single time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageMetrics {
    pub schema: SchemaInventory,
    pub headings: HeadingInventory,
}

impl PageMetrics {
    pub fn derive(doc: &Document) -> Self {
        Self {
            schema: schema_inventory(doc),
            headings: heading_inventory(doc),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Heading, SchemaBlock};

    #[test]
    fn test_derive_collects_both_inventories() {
        let mut doc = Document::new("https://example.com");
        doc.headings.push(Heading {
            level: 2,
            text: "What is Rust?".into(),
        });
        doc.schema_blocks.push(SchemaBlock {
            declared_type: None,
            raw: r#"{"@type":"FAQPage"}"#.into(),
        });
        doc.schema_blocks.push(SchemaBlock {
            declared_type: None,
            raw: "{not json".into(),
        });

        let metrics = PageMetrics::derive(&doc);
        assert!(metrics.schema.detected.has_faq);
        assert!(metrics.schema.is_malformed());
        assert_eq!(metrics.headings.question_headers.count, 1);
    }
}
