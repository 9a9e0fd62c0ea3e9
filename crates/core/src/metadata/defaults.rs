//! Defaults for article fields the header left empty.

use crate::article::Article;

/// Default published folder, stripped when deriving a permalink.
pub const PUBLISHED_SEGMENT: &str = "/published/";

/// Fill empty `permalink`, `title` and `created_at` from the file metadata.
///
/// `published_dir` is the `/`-delimited folder removed from the path when
/// deriving the permalink, normally [`PUBLISHED_SEGMENT`]. The permalink is
/// resolved first because the title defaults from it. Non-empty fields are
/// left as they are.
pub fn sanitize_metadata(article: &mut Article, published_dir: &str) {
    if article.permalink.is_empty() {
        article.permalink = default_permalink(&article.file.path, published_dir);
    }

    if article.title.is_empty() {
        article.title = default_title(&article.permalink);
    }

    if article.created_at.is_empty() {
        article.created_at = article.file.modified.format("%Y-%m-%d").to_string();
    }
}

/// `/published/hello_world.md` → `hello-world`.
pub fn default_permalink(path: &str, published_dir: &str) -> String {
    let dashed = path.replace(' ', "-").replace('_', "-");
    let segment = published_dir.replace(' ', "-").replace('_', "-");
    let slug = if segment.trim_matches('/').is_empty() {
        dashed.trim_start_matches('/').to_string()
    } else {
        dashed.replace(&segment, "")
    };
    match slug.strip_suffix(".md") {
        Some(stripped) => stripped.to_string(),
        None => slug,
    }
}

/// `hello-world` → `hello world`.
pub fn default_title(permalink: &str) -> String {
    permalink.replace('-', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::FileMetadata;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn article_at(path: &str) -> Article {
        Article {
            file: FileMetadata {
                path: path.into(),
                modified: Utc.with_ymd_and_hms(2021, 3, 4, 18, 5, 0).unwrap(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[rstest]
    #[case("/published/hello_world.md", "hello-world")]
    #[case("/published/my first post.md", "my-first-post")]
    #[case("/published/notes.mdx", "notes.mdx")]
    #[case("/published/readme.md.md", "readme.md")]
    #[case("/drafts/idea.md", "/drafts/idea")]
    #[case("/published/nested/deep_post.md", "nested/deep-post")]
    fn permalink_from_path(#[case] path: &str, #[case] expected: &str) {
        assert_eq!(default_permalink(path, PUBLISHED_SEGMENT), expected);
    }

    #[rstest]
    #[case("/blog/hello_world.md", "/blog/", "hello-world")]
    #[case("/my blog/first_post.md", "/my blog/", "first-post")]
    #[case("/blog/2021/post.md", "/blog/", "2021/post")]
    #[case("/published/post.md", "/blog/", "/published/post")]
    #[case("/hello_world.md", "/", "hello-world")]
    fn permalink_with_custom_folder(#[case] path: &str, #[case] dir: &str, #[case] expected: &str) {
        assert_eq!(default_permalink(path, dir), expected);
    }

    #[test]
    fn fills_all_empty_fields() {
        let mut article = article_at("/published/hello_world.md");
        sanitize_metadata(&mut article, PUBLISHED_SEGMENT);
        assert_eq!(article.permalink, "hello-world");
        assert_eq!(article.title, "hello world");
        assert_eq!(article.created_at, "2021-03-04");
    }

    #[test]
    fn title_defaults_from_explicit_permalink() {
        let mut article = article_at("/published/hello_world.md");
        article.permalink = "custom-slug".into();
        sanitize_metadata(&mut article, PUBLISHED_SEGMENT);
        assert_eq!(article.permalink, "custom-slug");
        assert_eq!(article.title, "custom slug");
    }

    #[test]
    fn explicit_fields_are_kept() {
        let mut article = article_at("/published/hello_world.md");
        article.title = "Hello, World!".into();
        article.created_at = "1999-12-31".into();
        sanitize_metadata(&mut article, PUBLISHED_SEGMENT);
        assert_eq!(article.title, "Hello, World!");
        assert_eq!(article.created_at, "1999-12-31");
        assert_eq!(article.permalink, "hello-world");
    }

    #[test]
    fn created_at_is_zero_padded() {
        let mut article = article_at("/published/x.md");
        article.file.modified = Utc.with_ymd_and_hms(987, 1, 2, 0, 0, 0).unwrap();
        sanitize_metadata(&mut article, PUBLISHED_SEGMENT);
        assert_eq!(article.created_at, "0987-01-02");
    }
}
