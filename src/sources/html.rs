//! Shared helpers for pulling text out of scraped pages.

use std::borrow::Cow;

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::errors::{MirrorError, MirrorResult};

pub fn selector(css: &str) -> MirrorResult<Selector> {
    Selector::parse(css).map_err(|e| MirrorError::Selector(format!("{}: {}", css, e)))
}

/// Collapse every whitespace run (newlines and tabs included) to one space and trim
pub fn clean_text(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn element_text(element: ElementRef<'_>) -> String {
    clean_text(&element.text().collect::<Vec<_>>().join(" "))
}

pub fn select_first<'a>(scope: ElementRef<'a>, css: &str) -> MirrorResult<Option<ElementRef<'a>>> {
    let selector = selector(css)?;
    Ok(scope.select(&selector).next())
}

/// Cleaned text of the first match, `None` when absent or blank
pub fn first_text(scope: ElementRef<'_>, css: &str) -> MirrorResult<Option<String>> {
    Ok(select_first(scope, css)?
        .map(element_text)
        .filter(|text| !text.is_empty()))
}

/// Cleaned, non-empty texts of every match, in document order, up to `limit`
pub fn texts(scope: ElementRef<'_>, css: &str, limit: usize) -> MirrorResult<Vec<String>> {
    let selector = selector(css)?;
    Ok(scope
        .select(&selector)
        .map(element_text)
        .filter(|text| !text.is_empty())
        .take(limit)
        .collect())
}

pub fn attr(element: ElementRef<'_>, name: &str) -> Option<String> {
    element
        .value()
        .attr(name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Meta description when the page has one, else the first paragraph under `paragraph_css`
pub fn summary_from(document: &Html, meta_css: &str, paragraph_css: &str) -> MirrorResult<String> {
    let root = document.root_element();

    if let Some(meta) = select_first(root, meta_css)? {
        if let Some(content) = attr(meta, "content") {
            return Ok(clean_text(&content));
        }
    }

    Ok(first_text(root, paragraph_css)?.unwrap_or_default())
}

pub fn resolve(base: &Url, href: &str) -> MirrorResult<String> {
    base.join(href)
        .map(String::from)
        .map_err(|e| MirrorError::InvalidUrl(format!("{}: {}", href, e)))
}

pub fn escape_text(value: &str) -> Cow<'_, str> {
    html_escape::encode_text(value)
}

pub fn escape_attr(value: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  Budget\n\t 2025 \r\n news  "), "Budget 2025 news");
        assert_eq!(clean_text("\n\t "), "");
    }

    #[test]
    fn test_element_text_joins_nested_nodes() {
        let document = Html::parse_fragment("<p>Tax <b>bands</b>\n  widened</p>");
        let p = select_first(document.root_element(), "p").unwrap().unwrap();
        assert_eq!(element_text(p), "Tax bands widened");
    }

    #[test]
    fn test_texts_skips_blank_and_limits() {
        let document = Html::parse_document(
            "<article><p>one</p><p>  </p><p>two</p><p>three</p></article>",
        );
        let found = texts(document.root_element(), "article p", 2).unwrap();
        assert_eq!(found, vec!["one", "two"]);
    }

    #[test]
    fn test_summary_prefers_meta() {
        let document = Html::parse_document(
            r#"<html><head><meta name="description" content=" From meta "></head>
            <body><div class="body"><p>From paragraph</p></div></body></html>"#,
        );
        let summary = summary_from(&document, r#"meta[name="description"]"#, ".body p").unwrap();
        assert_eq!(summary, "From meta");
    }

    #[test]
    fn test_summary_falls_back_to_paragraph() {
        let document = Html::parse_document(
            r#"<html><head><meta name="description" content=""></head>
            <body><div class="body"><p>From
            paragraph</p></div></body></html>"#,
        );
        let summary = summary_from(&document, r#"meta[name="description"]"#, ".body p").unwrap();
        assert_eq!(summary, "From paragraph");
    }

    #[test]
    fn test_invalid_selector_is_error() {
        assert!(matches!(selector("p[["), Err(MirrorError::Selector(_))));
    }

    #[test]
    fn test_resolve_relative_link() {
        let base = Url::parse("https://rednetwork.net").unwrap();
        assert_eq!(
            resolve(&base, "/articles/a-piece/").unwrap(),
            "https://rednetwork.net/articles/a-piece/"
        );
        assert_eq!(
            resolve(&base, "https://other.test/x").unwrap(),
            "https://other.test/x"
        );
    }

    #[test]
    fn test_escaping() {
        assert_eq!(escape_text("Tom & <Jerry>"), "Tom &amp; &lt;Jerry&gt;");
        assert_eq!(escape_attr(r#"a "quoted" & b"#), "a &quot;quoted&quot; &amp; b");
    }
}
