use super::text::is_question;
use crate::document::Document;
use serde::Serialize;

const MAX_EXAMPLES: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuestionHeaders {
    pub count: usize,
    pub examples: Vec<String>,
    /// Indexes into `Document::headings`
    #[serde(skip)]
    pub indexes: Vec<usize>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadingInventory {
    /// Counts for H1..H6
    pub counts: [usize; 6],
    pub h1_texts: Vec<String>,
    pub question_headers: QuestionHeaders,
    /// Headings that jump more than one level deeper than their predecessor
    pub hierarchy_skips: usize,
}

impl HeadingInventory {
    pub fn count(&self, level: u8) -> usize {
        match level {
            1..=6 => self.counts[usize::from(level) - 1],
            _ => 0,
        }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// H2 and deeper
    pub fn subheadings(&self) -> usize {
        self.total() - self.count(1)
    }
}

pub fn heading_inventory(doc: &Document) -> HeadingInventory {
    let mut inventory = HeadingInventory::default();
    let mut previous: Option<u8> = None;

    for (index, heading) in doc.headings.iter().enumerate() {
        if (1..=6).contains(&heading.level) {
            inventory.counts[usize::from(heading.level) - 1] += 1;
        }
        if heading.level == 1 {
            inventory.h1_texts.push(heading.text.clone());
        }
        if is_question(&heading.text) {
            let q = &mut inventory.question_headers;
            q.count += 1;
            q.indexes.push(index);
            if q.examples.len() < MAX_EXAMPLES {
                q.examples.push(heading.text.clone());
            }
        }
        if previous.is_some_and(|p| heading.level > p + 1) {
            inventory.hierarchy_skips += 1;
        }
        previous = Some(heading.level);
    }

    inventory
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Heading;

    fn doc_with(headings: &[(u8, &str)]) -> Document {
        let mut doc = Document::new("https://example.com");
        doc.headings = headings
            .iter()
            .map(|(level, text)| Heading {
                level: *level,
                text: text.to_string(),
            })
            .collect();
        doc
    }

    #[test]
    fn test_counts_levels_and_questions() {
        let doc = doc_with(&[
            (1, "Guide"),
            (2, "What is AEO?"),
            (2, "Benefits"),
            (3, "How it works"),
        ]);
        let inv = heading_inventory(&doc);
        assert_eq!(inv.count(1), 1);
        assert_eq!(inv.count(2), 2);
        assert_eq!(inv.subheadings(), 3);
        assert_eq!(inv.question_headers.count, 2);
        assert_eq!(inv.question_headers.indexes, vec![1, 3]);
    }

    #[test]
    fn test_examples_are_capped() {
        let headings: Vec<(u8, &str)> = (0..8).map(|_| (2, "Why?")).collect();
        let inv = heading_inventory(&doc_with(&headings));
        assert_eq!(inv.question_headers.count, 8);
        assert_eq!(inv.question_headers.examples.len(), MAX_EXAMPLES);
    }

    #[test]
    fn test_hierarchy_skips() {
        let inv = heading_inventory(&doc_with(&[(1, "A"), (3, "B"), (4, "C"), (2, "D")]));
        assert_eq!(inv.hierarchy_skips, 1);
    }
}
