// Shared fixtures for aeoscope integration tests
#![allow(dead_code)]

use aeoscope::document::{BlockKind, Document, Heading, SchemaBlock, TextBlock};
use indoc::indoc;

/// A reasonably well-optimized article page.
pub const GUIDE_HTML: &str = indoc! {r#"
    <!DOCTYPE html>
    <html lang="en">
    <head>
      <title>What is Rust? A practical guide for new developers</title>
      <meta name="description" content="Learn what Rust is, why teams adopt it, and how to install the toolchain in three short steps.">
      <meta name="author" content="Jane Doe">
      <meta property="article:published_time" content="2024-03-01">
      <link rel="canonical" href="https://example.com/rust-guide">
      <script type="application/ld+json">
        {"@context": "https://schema.org", "@graph": [
          {"@type": "Article", "headline": "What is Rust?"},
          {"@type": "FAQPage", "mainEntity": []},
          {"@type": "Organization", "name": "Example Inc"}
        ]}
      </script>
    </head>
    <body>
      <nav><a href="/">Home</a></nav>
      <h1>Rust guide</h1>
      <h2>What is Rust?</h2>
      <p>Rust is a systems programming language focused on safety and speed. It was first released in 2015 by Mozilla Research.</p>
      <h2>Why do teams adopt Rust?</h2>
      <p>Teams adopt Rust because it prevents memory bugs at compile time. According to the 2023 developer survey, 85% of Rust users want to keep using it.</p>
      <p>See the <a href="https://survey.stackoverflow.co/2023">2023 developer survey results</a> for the full data.</p>
      <h2>How do I install Rust?</h2>
      <ol>
        <li>Download rustup from the official site.</li>
        <li>Run the installer and accept the defaults.</li>
        <li>Open a new terminal and run cargo --version.</li>
      </ol>
      <img src="/logo.png" alt="Rust logo">
      <footer><a href="/privacy">Privacy</a></footer>
    </body>
    </html>
"#};

/// A page with no schema, blocked from indexing and served over plain HTTP.
pub const BLOCKED_HTML: &str = indoc! {r#"
    <html>
    <head>
      <title>Hi</title>
      <meta name="robots" content="noindex, nofollow">
    </head>
    <body>
      <p>Welcome.</p>
      <a href="/x">click here</a>
    </body>
    </html>
"#};

pub fn paragraph(text: &str, heading: Option<usize>) -> TextBlock {
    TextBlock {
        kind: BlockKind::Paragraph,
        text: text.to_string(),
        heading,
    }
}

pub fn heading(level: u8, text: &str) -> Heading {
    Heading {
        level,
        text: text.to_string(),
    }
}

pub fn schema(raw: &str) -> SchemaBlock {
    SchemaBlock {
        declared_type: None,
        raw: raw.to_string(),
    }
}

const FILLER: &str = "Teams use the tool every day to plan their work and ship features faster.";

/// A long FAQ-style article: `questions` question headings, each answered
/// directly and padded with `filler_sentences` sentences of body text.
pub fn faq_article(questions: &[&str], filler_sentences: usize) -> Document {
    let mut doc = Document::new("https://example.com/faq");
    doc.title = Some("Frequently asked questions about the planner".into());
    for (index, question) in questions.iter().enumerate() {
        doc.headings.push(heading(2, question));
        doc.blocks.push(paragraph(
            "The planner is a scheduling tool for small product teams.",
            Some(index),
        ));
        let body = vec![FILLER; filler_sentences].join(" ");
        doc.blocks.push(paragraph(&body, Some(index)));
    }
    doc.schema_blocks.push(schema(r#"{"@type":"FAQPage","mainEntity":[]}"#));
    doc
}

/// Page whose first H2 is "What is `subject`?" followed by a one-sentence answer.
pub fn definition_page(subject: &str) -> Document {
    let mut doc = Document::new("https://example.com/define");
    doc.headings = vec![heading(2, &format!("What is {subject}?"))];
    doc.blocks = vec![paragraph(
        &format!("{subject} is a systems programming language."),
        Some(0),
    )];
    doc
}
