//! Question-and-answer patterns: direct answers, FAQ sections, step lists.

use super::headings::QuestionHeaders;
use super::text::{split_sentences, word_count};
use crate::document::{BlockKind, Document};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static STEP_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bstep\s+\d+\b").expect("static regex"));

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DirectAnswers {
    pub count: usize,
}

/// First sentence of the section under heading `index`, if any.
pub fn first_sentence(doc: &Document, index: usize) -> Option<&str> {
    doc.section(index)
        .flat_map(|block| split_sentences(&block.text))
        .next()
}

/// Declarative and short enough to quote.
pub fn is_direct_answer(sentence: &str, max_words: usize) -> bool {
    let words = word_count(sentence);
    words > 0 && words <= max_words && !sentence.trim_end().ends_with('?')
}

/// Question headings whose first following sentence answers directly.
pub fn direct_answers(doc: &Document, questions: &QuestionHeaders, max_words: usize) -> DirectAnswers {
    let count = questions
        .indexes
        .iter()
        .filter_map(|&index| first_sentence(doc, index))
        .filter(|sentence| is_direct_answer(sentence, max_words))
        .count();
    DirectAnswers { count }
}

pub fn has_faq_heading(doc: &Document) -> bool {
    doc.headings.iter().any(|h| {
        let text = h.text.to_lowercase();
        text.contains("faq") || text.contains("frequently asked")
    })
}

/// At least three ordered list items, or explicit "Step N" markers.
pub fn has_step_content(doc: &Document) -> bool {
    let ordered = doc
        .blocks
        .iter()
        .filter(|b| b.kind == BlockKind::OrderedListItem)
        .count();
    ordered >= 3
        || doc.headings.iter().any(|h| STEP_MARKER.is_match(&h.text))
        || doc.blocks.iter().any(|b| STEP_MARKER.is_match(&b.text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Heading, TextBlock};
    use crate::metrics::headings::heading_inventory;

    fn block(text: &str, heading: Option<usize>) -> TextBlock {
        TextBlock {
            kind: BlockKind::Paragraph,
            text: text.to_string(),
            heading,
        }
    }

    #[test]
    fn test_direct_answers_checks_first_sentence() {
        let mut doc = Document::new("https://example.com");
        doc.headings = vec![
            Heading { level: 2, text: "What is AEO?".into() },
            Heading { level: 2, text: "Why does it matter?".into() },
        ];
        doc.blocks = vec![
            block("AEO is answer engine optimization. It helps.", Some(0)),
            block("Have you ever wondered?", Some(1)),
        ];
        let inv = heading_inventory(&doc);
        assert_eq!(direct_answers(&doc, &inv.question_headers, 40).count, 1);
    }

    #[test]
    fn test_long_first_sentence_is_not_direct() {
        let long = vec!["word"; 41].join(" ") + ".";
        assert!(!is_direct_answer(&long, 40));
        assert!(is_direct_answer("Short answer.", 40));
    }

    #[test]
    fn test_step_content() {
        let mut doc = Document::new("https://example.com");
        doc.blocks.push(block("Step 1: install the toolchain.", None));
        assert!(has_step_content(&doc));

        let mut doc = Document::new("https://example.com");
        doc.blocks = (0..3)
            .map(|i| TextBlock {
                kind: BlockKind::OrderedListItem,
                text: format!("item {i}"),
                heading: None,
            })
            .collect();
        assert!(has_step_content(&doc));
    }

    #[test]
    fn test_faq_heading() {
        let mut doc = Document::new("https://example.com");
        doc.headings.push(Heading { level: 2, text: "Frequently Asked Questions".into() });
        assert!(has_faq_heading(&doc));
    }
}
