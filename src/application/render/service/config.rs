use std::collections::HashSet;

use ammonia::Builder as AmmoniaBuilder;
use comrak::Options;

pub(crate) fn default_options() -> Options<'static> {
    let mut options = Options::default();

    let ext = &mut options.extension;
    ext.strikethrough = true;
    ext.table = true;
    ext.autolink = true;
    ext.tasklist = true;

    let render = &mut options.render;
    // Raw HTML in markdown source is entity-escaped rather than passed
    // through or clobbered.
    render.escape = true;
    render.gfm_quirks = true;

    options
}

/// Allow-list for markdown fragment output. Markdown source is semi-trusted
/// formatting input; this pass bounds what its markup can reach.
pub(crate) fn build_fragment_sanitizer() -> AmmoniaBuilder<'static> {
    let mut builder = AmmoniaBuilder::default();

    let tags: HashSet<&'static str> = HashSet::from([
        "a",
        "blockquote",
        "br",
        "code",
        "del",
        "em",
        "h1",
        "h2",
        "h3",
        "h4",
        "h5",
        "h6",
        "hr",
        "i",
        "img",
        "input",
        "li",
        "ol",
        "p",
        "pre",
        "s",
        "strong",
        "sub",
        "sup",
        "u",
        "ul",
    ]);
    builder.tags(tags);

    let generic: HashSet<&'static str> = HashSet::from(["class"]);
    builder.generic_attributes(generic);

    builder.add_tag_attributes("a", &["target"]);
    builder.add_tag_attributes("img", &["alt", "title", "width", "height"]);
    builder.add_tag_attributes("input", &["type", "checked", "disabled"]);

    builder.add_url_schemes(["http", "https", "mailto", "tel"].iter().copied());

    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_sanitizer_preserves_emphasis_and_strikethrough() {
        let sanitizer = build_fragment_sanitizer();
        let html = sanitizer
            .clean("<p><strong>bold</strong> and <del>gone</del></p>")
            .to_string();

        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<del>gone</del>"));
    }

    #[test]
    fn fragment_sanitizer_strips_script_content() {
        let sanitizer = build_fragment_sanitizer();
        let html = sanitizer
            .clean("<p>ok</p><script>alert(1)</script>")
            .to_string();

        assert!(html.contains("<p>ok</p>"));
        assert!(!html.contains("script"));
        assert!(!html.contains("alert(1)"));
    }

    #[test]
    fn fragment_sanitizer_rejects_javascript_urls() {
        let sanitizer = build_fragment_sanitizer();
        let html = sanitizer
            .clean("<a href=\"javascript:alert(1)\">x</a>")
            .to_string();

        assert!(!html.contains("javascript:"));
    }

    #[test]
    fn markdown_options_escape_raw_html() {
        let html = comrak::markdown_to_html("before <b>raw</b> after", &default_options());
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;b&gt;"));
    }
}
