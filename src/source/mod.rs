//! Page source: turns a local HTML or serialized document file into a
//! [`Document`], and normalizes user-supplied URLs.

use crate::core::{Error, Result};
use crate::document::html::parse_html;
use crate::document::Document;
use std::fs;
use std::path::Path;
use url::Url;

/// Trim, default the scheme to `https://` and require an http(s) URL.
pub fn normalize_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid_input("URL is required"));
    }

    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let parsed = Url::parse(&candidate)
        .map_err(|e| Error::invalid_input(format!("invalid URL '{trimmed}': {e}")))?;
    match parsed.scheme() {
        "http" | "https" if parsed.host_str().is_some() => Ok(parsed.to_string()),
        scheme => Err(Error::invalid_input(format!(
            "unsupported URL scheme '{scheme}' in '{trimmed}'"
        ))),
    }
}

/// Load a document from `path`.
///
/// `.json` files hold a serialized [`Document`]; anything else is parsed as
/// HTML. `url` overrides the document URL; an HTML file without one gets a
/// `file://` URL. Read and decode failures surface as
/// [`Error::UpstreamFetch`].
pub fn load_document(path: &Path, url: Option<&str>) -> Result<Document> {
    let url = url.map(normalize_url).transpose()?;
    let source = path.display().to_string();

    let raw = fs::read_to_string(path).map_err(|e| Error::upstream(&source, e.to_string()))?;
    tracing::debug!(path = %source, bytes = raw.len(), "loaded page source");

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let doc = if is_json {
        let mut doc = decode_snapshot(&raw).map_err(|e| Error::upstream(&source, e))?;
        if let Some(url) = url {
            doc.has_https = url.starts_with("https://");
            doc.url = url;
        }
        doc
    } else {
        let url = url.unwrap_or_else(|| file_url(path));
        parse_html(&raw, &url)
    };

    doc.validate()?;
    Ok(doc)
}

/// Decode a serialized document. A snapshot without `hasHTTPS` takes it
/// from its URL scheme.
fn decode_snapshot(raw: &str) -> std::result::Result<Document, String> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| format!("invalid document JSON: {e}"))?;
    let https_given = value.get("hasHTTPS").is_some();
    let mut doc: Document =
        serde_json::from_value(value).map_err(|e| format!("invalid document JSON: {e}"))?;
    if !https_given {
        doc.has_https = doc.url.starts_with("https://");
    }
    Ok(doc)
}

fn file_url(path: &Path) -> String {
    fs::canonicalize(path)
        .ok()
        .and_then(|abs| Url::from_file_path(abs).ok())
        .map(String::from)
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_normalize_url_adds_https() {
        assert_eq!(normalize_url("  example.com/page ").unwrap(), "https://example.com/page");
        assert_eq!(normalize_url("http://example.com").unwrap(), "http://example.com/");
    }

    #[test]
    fn test_normalize_url_rejects_blank_and_other_schemes() {
        assert!(matches!(normalize_url("   "), Err(Error::InvalidInput(_))));
        assert!(matches!(normalize_url("ftp://example.com"), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_load_html_with_url_override() {
        let mut file = tempfile::Builder::new().suffix(".html").tempfile().unwrap();
        file.write_all(
            indoc! {r#"
                <html lang="en"><head><title>Hello page title</title></head>
                <body><h1>Hello</h1><p>Rust is fast.</p></body></html>
            "#}
            .as_bytes(),
        )
        .unwrap();

        let doc = load_document(file.path(), Some("example.com")).unwrap();
        assert_eq!(doc.url, "https://example.com/");
        assert!(doc.has_https);
        assert_eq!(doc.title_text(), "Hello page title");
        assert_eq!(doc.blocks.len(), 1);
    }

    #[test]
    fn test_load_json_document() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(br#"{"url":"https://example.com/a","title":"From JSON"}"#)
            .unwrap();
        let doc = load_document(file.path(), None).unwrap();
        assert_eq!(doc.url, "https://example.com/a");
        assert_eq!(doc.title.as_deref(), Some("From JSON"));
    }

    #[test]
    fn test_snapshot_without_https_flag_uses_url_scheme() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        file.write_all(br#"{"url":"https://a.test","title":"x"}"#).unwrap();
        let doc = load_document(file.path(), None).unwrap();
        assert!(doc.has_https);

        let result = crate::analyzers::analyze_technical(&doc).unwrap();
        assert_eq!(result.scores.get("crawlability"), Some(85));
        assert!(!result
            .recommendations
            .iter()
            .any(|r| r.issue.to_lowercase().contains("https")));
    }

    #[test]
    fn test_snapshot_https_flag_wins_over_url() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        file.write_all(br#"{"url":"https://a.test","hasHTTPS":false}"#)
            .unwrap();
        let doc = load_document(file.path(), None).unwrap();
        assert!(!doc.has_https);
    }

    #[test]
    fn test_missing_file_is_upstream_failure() {
        let err = load_document(Path::new("/definitely/not/here.html"), None).unwrap_err();
        assert!(matches!(err, Error::UpstreamFetch { .. }));
    }

    #[test]
    fn test_broken_json_is_upstream_failure() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        file.write_all(b"{ nope").unwrap();
        let err = load_document(file.path(), None).unwrap_err();
        assert!(matches!(err, Error::UpstreamFetch { .. }));
    }
}
