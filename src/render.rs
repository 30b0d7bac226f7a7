//! Markup rendering and sanitization.
//!
//! Markdown is rendered to HTML with comrak; fenced code blocks go
//! through syntect. All HTML destined for a preview, whether rendered
//! from markdown or loaded from an `.html` file, passes through the
//! ammonia sanitizer with a fixed allow-list.

use std::collections::{HashMap, HashSet};
use std::io::{self, Write};
use std::path::Path;
use std::sync::OnceLock;

use comrak::adapters::SyntaxHighlighterAdapter;
use comrak::{Options, Plugins, markdown_to_html_with_plugins};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{IncludeBackground, append_highlighted_html_for_styled_line};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::classify::{Classification, classify};

/// URL schemes the sanitizer lets through.
const ALLOWED_SCHEMES: [&str; 4] = ["http", "https", "mailto", "data"];

/// Attributes allowed on any tag.
const ALLOWED_ATTRIBUTES: [&str; 9] = [
    "class", "id", "style", "src", "href", "alt", "title", "width", "height",
];

/// A document prepared for the preview pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub classification: Classification,
    /// Sanitized HTML for html/markdown content, the raw text for plain.
    pub body: String,
}

/// Render a document for preview.
///
/// HTML files are sanitized as-is, markdown is rendered then sanitized,
/// and everything else passes through untouched. Never fails: a render
/// problem degrades to the plain pass-through.
pub fn render_document(path: Option<&Path>, text: &str) -> Rendered {
    let classification = classify(path, text);
    let body = match classification {
        Classification::Html => sanitize_markup(text),
        Classification::Markdown => sanitize_markup(&render_markup(text)),
        Classification::Plain => text.to_string(),
    };
    Rendered {
        classification,
        body,
    }
}

/// Render markdown to HTML with syntax-highlighted code fences.
///
/// Raw HTML is let through here; sanitization is the caller's step.
pub fn render_markup(text: &str) -> String {
    let mut options = Options::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.tasklist = true;
    options.extension.autolink = true;
    options.extension.shortcodes = true;
    options.parse.smart = true;
    options.render.unsafe_ = true;

    let adapter = HighlightAdapter;
    let mut plugins = Plugins::default();
    plugins.render.codefence_syntax_highlighter = Some(&adapter);

    markdown_to_html_with_plugins(text, &options, &plugins)
}

/// Sanitize untrusted HTML with the fixed allow-list.
pub fn sanitize_markup(html: &str) -> String {
    ammonia::Builder::default()
        .add_tags(["img"])
        .add_generic_attributes(ALLOWED_ATTRIBUTES)
        .url_schemes(HashSet::from(ALLOWED_SCHEMES))
        .clean(html)
        .to_string()
}

/// Syntect-backed highlighter for comrak code fences.
///
/// Unknown or missing languages fall back to the escaped source so the
/// block still renders as `<pre><code>` text.
struct HighlightAdapter;

impl SyntaxHighlighterAdapter for HighlightAdapter {
    fn write_highlighted(
        &self,
        output: &mut dyn Write,
        lang: Option<&str>,
        code: &str,
    ) -> io::Result<()> {
        match highlight_html(lang, code) {
            Some(html) => output.write_all(html.as_bytes()),
            None => output.write_all(ammonia::clean_text(code).as_bytes()),
        }
    }

    fn write_pre_tag(
        &self,
        output: &mut dyn Write,
        attributes: HashMap<String, String>,
    ) -> io::Result<()> {
        write_open_tag(output, "pre", &attributes)
    }

    fn write_code_tag(
        &self,
        output: &mut dyn Write,
        attributes: HashMap<String, String>,
    ) -> io::Result<()> {
        write_open_tag(output, "code", &attributes)
    }
}

fn write_open_tag(
    output: &mut dyn Write,
    tag: &str,
    attributes: &HashMap<String, String>,
) -> io::Result<()> {
    write!(output, "<{tag}")?;
    for (key, value) in attributes {
        write!(output, " {key}=\"{value}\"")?;
    }
    write!(output, ">")
}

/// Highlight a code block, returning `None` when the language is
/// unknown or highlighting fails.
fn highlight_html(lang: Option<&str>, code: &str) -> Option<String> {
    let lang = lang.filter(|lang| !lang.trim().is_empty())?;
    let syntax_set = syntax_set();
    let syntax = syntax_set.find_syntax_by_token(lang)?;

    let mut highlighter = HighlightLines::new(syntax, theme());
    let mut html = String::with_capacity(code.len() * 2);
    for line in LinesWithEndings::from(code) {
        let regions = highlighter
            .highlight_line(line, syntax_set)
            .inspect_err(|err| tracing::warn!(%err, lang, "highlighting failed"))
            .ok()?;
        append_highlighted_html_for_styled_line(&regions, IncludeBackground::No, &mut html)
            .inspect_err(|err| tracing::warn!(%err, lang, "highlight HTML emit failed"))
            .ok()?;
    }
    Some(html)
}

fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme() -> &'static Theme {
    static THEME: OnceLock<Theme> = OnceLock::new();
    THEME.get_or_init(|| {
        let theme_set = ThemeSet::load_defaults();
        for name in ["InspiredGitHub", "base16-ocean.light", "base16-ocean.dark"] {
            if let Some(theme) = theme_set.themes.get(name) {
                return theme.clone();
            }
        }
        theme_set.themes.values().next().cloned().unwrap_or_default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_markup_produces_heading() {
        let html = render_markup("# Hi");
        assert!(html.contains("<h1>Hi</h1>"), "unexpected html: {html}");
    }

    #[test]
    fn test_render_markup_highlights_known_fence() {
        let html = render_markup("```rust\nfn main() {}\n```");
        assert!(html.contains("<pre"), "missing pre: {html}");
        assert!(html.contains("<span"), "expected highlight spans: {html}");
    }

    #[test]
    fn test_render_markup_escapes_unknown_fence() {
        let html = render_markup("```nosuchlang\n<script>alert(1)</script>\n```");
        assert!(!html.contains("<script>"), "source must be escaped: {html}");
        assert!(html.contains("&lt;script&gt;"), "expected escaped tag: {html}");
    }

    #[test]
    fn test_render_markup_escapes_plain_fence() {
        let html = render_markup("```\nx < y\n```");
        assert!(html.contains("&lt;"), "expected escaped comparison: {html}");
    }

    #[test]
    fn test_sanitize_strips_script_tags() {
        let clean = sanitize_markup("<p>ok</p><script>alert(1)</script>");
        assert!(clean.contains("<p>ok</p>"));
        assert!(!clean.contains("script"));
    }

    #[test]
    fn test_sanitize_strips_disallowed_schemes() {
        let clean = sanitize_markup("<a href=\"javascript:alert(1)\">x</a>");
        assert!(!clean.contains("javascript:"));

        let clean = sanitize_markup("<a href=\"https://example.com\">x</a>");
        assert!(clean.contains("https://example.com"));
    }

    #[test]
    fn test_sanitize_keeps_data_image_src() {
        let clean = sanitize_markup("<img src=\"data:image/png;base64,AAAA\" alt=\"dot\">");
        assert!(clean.contains("data:image/png"), "unexpected: {clean}");
        assert!(clean.contains("alt=\"dot\""));
    }

    #[test]
    fn test_sanitize_keeps_allowed_generic_attributes() {
        let clean = sanitize_markup("<p class=\"note\" id=\"p1\" style=\"color:red\">x</p>");
        assert!(clean.contains("class=\"note\""));
        assert!(clean.contains("id=\"p1\""));
        assert!(clean.contains("style="));
    }

    #[test]
    fn test_render_document_markdown_is_sanitized_html() {
        let rendered = render_document(Some(Path::new("notes.md")), "# Hi");
        assert_eq!(rendered.classification, Classification::Markdown);
        assert!(rendered.body.contains("<h1>Hi</h1>"));
    }

    #[test]
    fn test_render_document_markdown_strips_raw_script() {
        let rendered = render_document(Some(Path::new("notes.md")), "# Hi\n\n<script>x</script>");
        assert!(!rendered.body.contains("<script>"));
    }

    #[test]
    fn test_render_document_html_passes_through_sanitized() {
        let rendered =
            render_document(Some(Path::new("page.html")), "<h2>T</h2><script>x</script>");
        assert_eq!(rendered.classification, Classification::Html);
        assert!(rendered.body.contains("<h2>T</h2>"));
        assert!(!rendered.body.contains("script"));
    }

    #[test]
    fn test_render_document_plain_is_untouched() {
        let text = "{ \"a\": 1 }";
        let rendered = render_document(Some(Path::new("data.json")), text);
        assert_eq!(rendered.classification, Classification::Plain);
        assert_eq!(rendered.body, text);
    }
}
