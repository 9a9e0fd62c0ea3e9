//! Summary extraction from rendered HTML.

use scraper::{Html, Selector};

/// Text content of the first paragraph, or an empty string.
///
/// Never fails: a selector that cannot be built is logged and yields an
/// empty summary.
pub fn extract_summary(html: &str) -> String {
    let selector = match Selector::parse("p") {
        Ok(selector) => selector,
        Err(e) => {
            tracing::warn!("Could not build summary selector: {:?}", e);
            return String::new();
        }
    };

    let fragment = Html::parse_fragment(html);
    fragment
        .select(&selector)
        .next()
        .map(|p| p.text().collect::<String>())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_paragraph_in_document_order() {
        let html = "<h1>Title</h1><blockquote><p>quoted</p></blockquote><p>second</p>";
        assert_eq!(extract_summary(html), "quoted");
    }

    #[test]
    fn text_includes_nested_markup() {
        let html = r#"<p>Hello <strong>bold</strong> <a href="/x">link</a>.</p><p>Other</p>"#;
        assert_eq!(extract_summary(html), "Hello bold link.");
    }

    #[test]
    fn empty_without_paragraphs() {
        assert_eq!(extract_summary("<h1>Only a heading</h1>"), "");
        assert_eq!(extract_summary(""), "");
    }

    #[test]
    fn tolerates_broken_markup() {
        assert_eq!(extract_summary("<div><p>unclosed <em>tags"), "unclosed tags");
    }
}
