//! Allow-list HTML sanitizer for user-generated content.

use ammonia::Builder;

/// `rel` added to every link in a post.
pub const LINK_REL: &str = "nofollow noopener noreferrer";

/// Sanitizer policy: ammonia's default allow-list of formatting, structural,
/// link and image markup. Scripts, styles, event handlers and unknown
/// attributes are dropped.
pub fn ugc_policy() -> Builder<'static> {
    let mut builder = Builder::default();
    builder.link_rel(Some(LINK_REL));
    builder
}

pub fn sanitize_html(policy: &Builder<'_>, html: &str) -> String {
    policy.clean(html).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(html: &str) -> String {
        sanitize_html(&ugc_policy(), html)
    }

    #[test]
    fn strips_script_and_style() {
        let out = clean("<p>hi</p><script>alert(1)</script><style>p{}</style>");
        assert_eq!(out, "<p>hi</p>");
    }

    #[test]
    fn strips_event_handlers() {
        let out = clean(r#"<img src="/images/a.png" onerror="alert(1)">"#);
        assert!(out.contains(r#"src="/images/a.png""#));
        assert!(!out.contains("onerror"));
    }

    #[test]
    fn strips_javascript_urls() {
        let out = clean(r#"<a href="javascript:alert(1)">x</a>"#);
        assert!(!out.contains("javascript"));
    }

    #[test]
    fn keeps_links_with_rel() {
        let out = clean(r#"<a href="https://example.com">x</a>"#);
        assert_eq!(
            out,
            r#"<a href="https://example.com" rel="nofollow noopener noreferrer">x</a>"#
        );
    }

    #[test]
    fn keeps_formatting() {
        let html = "<h2>T</h2><p><strong>b</strong> <em>i</em> <code>c</code></p>\
                    <ul><li>x</li></ul>";
        assert_eq!(clean(html), html);
    }
}
