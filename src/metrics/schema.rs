//! Structured data (JSON-LD / microdata) detection.

use crate::core::MetricFailure;
use crate::document::{Document, SchemaBlock};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DetectedSchemas {
    #[serde(rename = "hasFAQ")]
    pub has_faq: bool,
    #[serde(rename = "hasArticle")]
    pub has_article: bool,
    #[serde(rename = "hasOrganization")]
    pub has_organization: bool,
    #[serde(rename = "hasPerson")]
    pub has_person: bool,
    #[serde(rename = "hasProduct")]
    pub has_product: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaInventory {
    pub has_schema: bool,
    pub count: usize,
    pub types: Vec<String>,
    pub detected: DetectedSchemas,
    pub failures: Vec<MetricFailure>,
}

impl SchemaInventory {
    pub fn is_malformed(&self) -> bool {
        !self.failures.is_empty()
    }
}

const ARTICLE_TYPES: &[&str] = &["Article", "NewsArticle", "BlogPosting", "TechArticle"];
const ORGANIZATION_TYPES: &[&str] = &["Organization", "LocalBusiness", "Corporation"];

pub fn schema_inventory(doc: &Document) -> SchemaInventory {
    let mut inventory = SchemaInventory {
        has_schema: !doc.schema_blocks.is_empty(),
        count: doc.schema_blocks.len(),
        ..SchemaInventory::default()
    };

    for (index, block) in doc.schema_blocks.iter().enumerate() {
        match block_types(block) {
            Ok(types) => {
                for t in types {
                    if !inventory.types.contains(&t) {
                        inventory.types.push(t);
                    }
                }
            }
            Err(message) => {
                tracing::warn!(block = index, %message, "skipping malformed structured data");
                inventory
                    .failures
                    .push(MetricFailure::new("schema", format!("block {index}: {message}")));
            }
        }
    }

    let has = |names: &[&str]| inventory.types.iter().any(|t| names.contains(&t.as_str()));
    inventory.detected = DetectedSchemas {
        has_faq: has(&["FAQPage"]),
        has_article: has(ARTICLE_TYPES),
        has_organization: has(ORGANIZATION_TYPES),
        has_person: has(&["Person"]),
        has_product: has(&["Product"]),
    };
    inventory
}

fn block_types(block: &SchemaBlock) -> Result<Vec<String>, String> {
    let mut types: Vec<String> = block.declared_type.iter().cloned().collect();
    let raw = block.raw.trim();

    if raw.is_empty() {
        return if types.is_empty() {
            Err("empty structured data block".to_string())
        } else {
            Ok(types)
        };
    }

    let value: Value = serde_json::from_str(raw).map_err(|e| e.to_string())?;
    collect_types(&value, &mut types);
    Ok(types)
}

fn collect_types(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Array(items) => items.iter().for_each(|item| collect_types(item, out)),
        Value::Object(map) => {
            match map.get("@type") {
                Some(Value::String(t)) => out.push(t.clone()),
                Some(Value::Array(ts)) => out.extend(
                    ts.iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string),
                ),
                _ => {}
            }
            if let Some(graph) = map.get("@graph") {
                collect_types(graph, out);
            }
        }
        _ => {}
    }
}
