//! Markdown to HTML.

use comrak::{Options, markdown_to_html};

/// Relative asset prefix used by posts inside the synced folder.
pub const RELATIVE_IMAGES: &[u8] = b"../images";
/// Site path the relative prefix is rewritten to.
pub const SITE_IMAGES: &[u8] = b"/images";

/// Rewrite every `../images` to `/images`.
///
/// Plain substring replacement: it also applies inside code blocks and
/// longer paths such as `../../images`.
pub fn fix_image_paths(raw: &[u8]) -> Vec<u8> {
    replace_all(raw, RELATIVE_IMAGES, SITE_IMAGES)
}

/// Render markdown with GFM extensions. Raw HTML is passed through; the
/// result must be sanitized before it is shown.
pub fn render_markdown(markdown: &str, options: &Options) -> String {
    markdown_to_html(markdown, options)
}

pub fn default_options() -> Options<'static> {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.footnotes = true;
    options.extension.description_lists = true;

    options.parse.smart = true;

    options.render.hardbreaks = false;
    options.render.github_pre_lang = false;
    options.render.unsafe_ = true; // sanitizer runs afterwards

    options
}

fn replace_all(haystack: &[u8], from: &[u8], to: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(haystack.len());
    let mut rest = haystack;
    while let Some(pos) = find(rest, from) {
        out.extend_from_slice(&rest[..pos]);
        out.extend_from_slice(to);
        rest = &rest[pos + from.len()..];
    }
    out.extend_from_slice(rest);
    out
}

pub(crate) fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}
