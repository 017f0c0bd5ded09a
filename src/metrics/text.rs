//! Tokenization primitives shared by every extractor.

use crate::config::Lexicon;
use crate::document::Document;
use once_cell::sync::Lazy;
use regex::Regex;

static INTERROGATIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(who|what|when|where|why|how)\b").expect("static regex"));

/// Whitespace-delimited, non-empty tokens.
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

pub fn word_count(text: &str) -> usize {
    words(text).count()
}

/// Split on runs of `.`, `!`, `?` that are followed by whitespace or the end
/// of the text. Fragments are trimmed and empty ones dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        let mut end = i + c.len_utf8();
        while let Some(&(j, next)) = chars.peek() {
            if matches!(next, '.' | '!' | '?') {
                end = j + next.len_utf8();
                chars.next();
            } else {
                break;
            }
        }
        let at_boundary = chars.peek().map_or(true, |&(_, next)| next.is_whitespace());
        if at_boundary {
            push_fragment(&mut sentences, &text[start..end]);
            start = end;
        }
    }
    push_fragment(&mut sentences, &text[start..]);
    sentences
}

fn push_fragment<'a>(out: &mut Vec<&'a str>, fragment: &'a str) {
    let trimmed = fragment.trim();
    if !trimmed.is_empty() && trimmed.chars().any(char::is_alphanumeric) {
        out.push(trimmed);
    }
}

/// Vowel-group syllable estimate, at least one per word.
pub fn count_syllables(word: &str) -> usize {
    let mut groups = 0;
    let mut in_group = false;
    for c in word.chars().flat_map(char::to_lowercase) {
        let vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if vowel && !in_group {
            groups += 1;
        }
        in_group = vowel;
    }
    groups.max(1)
}

/// Lowercase alphanumeric terms.
pub fn terms(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Terms with stopwords removed; an all-stopword text keeps its raw terms.
pub fn content_terms(text: &str, lexicon: &Lexicon) -> Vec<String> {
    let all = terms(text);
    let filtered: Vec<String> = all
        .iter()
        .filter(|t| !lexicon.is_stopword(t))
        .cloned()
        .collect();
    let mut chosen = if filtered.is_empty() { all } else { filtered };
    let mut seen = std::collections::HashSet::new();
    chosen.retain(|t| seen.insert(t.clone()));
    chosen
}

/// Light plural stem: drops a trailing `s` from longer terms.
pub fn stem(term: &str) -> &str {
    if term.len() > 3 && term.ends_with('s') && !term.ends_with("ss") {
        &term[..term.len() - 1]
    } else {
        term
    }
}

pub fn has_digit(token: &str) -> bool {
    token.chars().any(|c| c.is_ascii_digit())
}

/// Digit-bearing tokens per 100 words.
pub fn numeric_density(text: &str) -> f64 {
    let total = word_count(text);
    if total == 0 {
        return 0.0;
    }
    let numeric = words(text).filter(|w| has_digit(w)).count();
    numeric as f64 * 100.0 / total as f64
}

/// Heading-style question: interrogative word anywhere, or a trailing `?`.
pub fn is_question(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.ends_with('?') || INTERROGATIVE.is_match(trimmed)
}

/// Aggregate counts over all text blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextStats {
    pub words: usize,
    pub sentences: usize,
    pub syllables: usize,
    pub paragraphs: usize,
}

pub fn text_stats(doc: &Document) -> TextStats {
    doc.blocks.iter().fold(
        TextStats {
            paragraphs: doc.paragraphs().count(),
            ..TextStats::default()
        },
        |mut acc, block| {
            acc.words += word_count(&block.text);
            acc.sentences += split_sentences(&block.text).len();
            acc.syllables += words(&block.text).map(count_syllables).sum::<usize>();
            acc
        },
    )
}

/// Round to one decimal place for reporting.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sentences_on_terminal_punctuation() {
        let s = split_sentences("Rust is fast. Is it safe? Yes!  Version 1.75 shipped");
        assert_eq!(s, vec!["Rust is fast.", "Is it safe?", "Yes!", "Version 1.75 shipped"]);
    }

    #[test]
    fn test_split_sentences_handles_runs_and_empties() {
        assert_eq!(split_sentences("Wait... what?! ..."), vec!["Wait...", "what?!"]);
        assert!(split_sentences("   ").is_empty());
    }

    #[test]
    fn test_count_syllables() {
        assert_eq!(count_syllables("rhythm"), 1);
        assert_eq!(count_syllables("language"), 3);
        assert_eq!(count_syllables("a"), 1);
        assert_eq!(count_syllables("42"), 1);
    }

    #[test]
    fn test_content_terms_drop_stopwords_and_duplicates() {
        let lexicon = Lexicon::default();
        assert_eq!(content_terms("What is Rust? Rust!", &lexicon), vec!["rust"]);
        assert_eq!(content_terms("what is it", &lexicon), vec!["what", "is", "it"]);
    }

    #[test]
    fn test_stem() {
        assert_eq!(stem("crates"), "crate");
        assert_eq!(stem("class"), "class");
        assert_eq!(stem("is"), "is");
    }

    #[test]
    fn test_is_question() {
        assert!(is_question("How to install Rust"));
        assert!(is_question("Installation?"));
        assert!(!is_question("Showcase"));
    }

    #[test]
    fn test_numeric_density() {
        assert_eq!(numeric_density("In 2024 sales grew 40%"), 40.0);
        assert_eq!(numeric_density(""), 0.0);
    }
}
