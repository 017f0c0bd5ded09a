//! Metric extractors
//!
//! Pure, stateless functions that turn a [`Document`](crate::document::Document)
//! into typed measurements shared across analyzers.

pub mod citations;
pub mod entities;
pub mod headings;
pub mod page;
pub mod qa;
pub mod readability;
pub mod schema;
pub mod text;

pub use citations::{
    citation_signals, has_original_content, quotable_sentences, specificity_score,
    CitationSignals, QuotableSentences, SourceLinks,
};
pub use entities::entity_mentions;
pub use headings::{heading_inventory, HeadingInventory, QuestionHeaders};
pub use page::PageMetrics;
pub use qa::{direct_answers, has_faq_heading, has_step_content, DirectAnswers};
pub use readability::{readability_metrics, ReadabilityMetrics};
pub use schema::{schema_inventory, DetectedSchemas, SchemaInventory};
pub use text::{text_stats, TextStats};
