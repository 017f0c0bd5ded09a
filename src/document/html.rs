//! Builds a [`Document`] from raw HTML using `scraper`.

use super::{BlockKind, Document, Heading, Image, Link, SchemaBlock, TextBlock};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

struct Selectors {
    flow: Selector,
    title: Selector,
    meta_description: Selector,
    robots: Selector,
    canonical: Selector,
    html: Selector,
    json_ld: Selector,
    microdata: Selector,
    links: Selector,
    images: Selector,
    tables: Selector,
    author_meta: Selector,
    author_inline: Selector,
    published: Selector,
    time: Selector,
    author_bio: Selector,
}

static SELECTORS: Lazy<Selectors> = Lazy::new(|| {
    let parse = |css: &str| Selector::parse(css).expect("static selector");
    Selectors {
        flow: parse("h1, h2, h3, h4, h5, h6, p, li, td, th, blockquote"),
        title: parse("title"),
        meta_description: parse(r#"meta[name="description"], meta[property="og:description"]"#),
        robots: parse(r#"meta[name="robots"]"#),
        canonical: parse(r#"link[rel="canonical"]"#),
        html: parse("html"),
        json_ld: parse(r#"script[type="application/ld+json"]"#),
        microdata: parse("[itemscope][itemtype]"),
        links: parse("a[href]"),
        images: parse("img"),
        tables: parse("table"),
        author_meta: parse(r#"meta[name="author"], meta[property="article:author"]"#),
        author_inline: parse(r#"[rel="author"], [itemprop="author"], .author, .byline"#),
        published: parse(
            r#"meta[property="article:published_time"], meta[name="date"], meta[itemprop="datePublished"], meta[name="publish-date"]"#,
        ),
        time: parse("time[datetime]"),
        author_bio: parse(".author-bio, .author-box, .about-author, .author-description"),
    }
});

const BLOCK_TAGS: &[&str] = &["p", "li", "td", "th", "blockquote"];
const SKIPPED_CONTAINERS: &[&str] = &["nav", "footer", "script", "style", "noscript", "template"];

/// Parse `html` fetched from `url` into a normalized [`Document`].
pub fn parse_html(html: &str, url: &str) -> Document {
    let page = Html::parse_document(html);
    let s = &*SELECTORS;

    let robots = first_attr(&page, &s.robots, "content")
        .unwrap_or_default()
        .to_lowercase();
    let blocks_none = robots.contains("none");

    let mut doc = Document::new(url);
    doc.title = first_text(&page, &s.title);
    doc.meta_description = first_attr(&page, &s.meta_description, "content");
    doc.lang = first_attr(&page, &s.html, "lang");
    doc.robots_allows_index = !(robots.contains("noindex") || blocks_none);
    doc.robots_allows_follow = !(robots.contains("nofollow") || blocks_none);
    doc.has_canonical = first_attr(&page, &s.canonical, "href").is_some();

    collect_flow(&page, &mut doc);

    doc.schema_blocks = page
        .select(&s.json_ld)
        .map(|el| SchemaBlock {
            declared_type: None,
            raw: el.text().collect::<String>(),
        })
        .chain(page.select(&s.microdata).filter_map(|el| {
            let itemtype = el.value().attr("itemtype")?;
            let name = itemtype.trim_end_matches('/').rsplit('/').next()?;
            Some(SchemaBlock {
                declared_type: Some(name.to_string()),
                raw: "{}".to_string(),
            })
        }))
        .collect();

    doc.links = page
        .select(&s.links)
        .filter_map(|el| {
            let href = el.value().attr("href")?.trim();
            Some(Link {
                href: href.to_string(),
                rel: el.value().attr("rel").map(str::to_string),
                text: normalize_ws(&el.text().collect::<String>()),
            })
        })
        .collect();

    doc.images = page
        .select(&s.images)
        .map(|el| Image {
            src: el.value().attr("src").unwrap_or_default().to_string(),
            alt: el.value().attr("alt").map(str::to_string),
        })
        .collect();

    doc.tables = page.select(&s.tables).count();

    doc.author = first_attr(&page, &s.author_meta, "content").or_else(|| {
        page.select(&s.author_inline)
            .filter(|el| el.value().name() != "meta")
            .map(|el| normalize_ws(&el.text().collect::<String>()))
            .find(|t| !t.is_empty())
    });
    doc.published_at = first_attr(&page, &s.published, "content")
        .or_else(|| first_attr(&page, &s.time, "datetime"));
    doc.has_author_bio = page.select(&s.author_bio).next().is_some()
        || doc
            .headings
            .iter()
            .any(|h| h.text.to_lowercase().contains("about the author"));

    doc
}

/// Walk headings and text blocks in document order, tagging each block with
/// the heading it sits under.
fn collect_flow(page: &Html, doc: &mut Document) {
    let mut current: Option<usize> = None;

    for el in page.select(&SELECTORS.flow) {
        if has_ancestor(el, SKIPPED_CONTAINERS) {
            continue;
        }
        let name = el.value().name();
        let text = normalize_ws(&el.text().collect::<String>());
        if text.is_empty() {
            continue;
        }

        if let Some(level) = heading_level(name) {
            doc.headings.push(Heading { level, text });
            current = Some(doc.headings.len() - 1);
            continue;
        }

        // Nested blocks are already covered by their outer block's text.
        if has_ancestor(el, BLOCK_TAGS) {
            continue;
        }

        let kind = match name {
            "li" if parent_name(el) == Some("ol") => BlockKind::OrderedListItem,
            "li" => BlockKind::ListItem,
            "td" | "th" => BlockKind::TableCell,
            "blockquote" => BlockKind::Quote,
            _ => BlockKind::Paragraph,
        };
        doc.blocks.push(TextBlock {
            kind,
            text,
            heading: current,
        });
    }
}

fn heading_level(name: &str) -> Option<u8> {
    match name {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

fn has_ancestor(el: ElementRef<'_>, names: &[&str]) -> bool {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|a| names.contains(&a.value().name()))
}

fn parent_name(el: ElementRef<'_>) -> Option<&str> {
    el.parent()
        .and_then(ElementRef::wrap)
        .map(|p| p.value().name())
}

fn first_text(page: &Html, selector: &Selector) -> Option<String> {
    page.select(selector)
        .map(|el| normalize_ws(&el.text().collect::<String>()))
        .find(|t| !t.is_empty())
}

fn first_attr(page: &Html, selector: &Selector, attr: &str) -> Option<String> {
    page.select(selector)
        .filter_map(|el| el.value().attr(attr))
        .map(str::trim)
        .find(|v| !v.is_empty())
        .map(str::to_string)
}

fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
