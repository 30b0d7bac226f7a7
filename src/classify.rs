//! Content classification and formatter backend selection.
//!
//! The classifier decides what the preview pane should treat a document
//! as (HTML, markdown, or plain text/code) and, independently, which
//! beautify/minify backend applies to it. Both decisions key on the same
//! "effective kind": the path extension when there is one, a content
//! sniff otherwise.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

/// The inferred content kind driving preview rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Html,
    Markdown,
    Plain,
}

/// Effective file kind: the extension when the path has one, otherwise
/// sniffed from content.
///
/// `Other` covers extensions the app has no special handling for, and
/// empty content. It still classifies as [`Classification::Plain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Markdown,
    Html,
    Json,
    Js,
    Ts,
    Css,
    Txt,
    Other,
}

/// Classify content for the preview pane.
///
/// Ordered, first match wins: a path extension decides outright; only
/// extensionless content is sniffed.
pub fn classify(path: Option<&Path>, text: &str) -> Classification {
    match content_kind(path, text) {
        ContentKind::Markdown => Classification::Markdown,
        ContentKind::Html => Classification::Html,
        _ => Classification::Plain,
    }
}

/// Resolve the effective kind of a document.
pub fn content_kind(path: Option<&Path>, text: &str) -> ContentKind {
    extension(path).map_or_else(|| sniff_content(text), |ext| kind_from_extension(&ext))
}

/// Extensions that force a preview-only layout on load.
///
/// Keyed on the path alone; content never promotes a file into this set.
pub fn is_previewable(path: &Path) -> bool {
    extension(Some(path)).is_some_and(|ext| {
        matches!(ext.as_str(), "md" | "markdown" | "html" | "htm")
    })
}

fn extension(path: Option<&Path>) -> Option<String> {
    let ext = path?.extension()?.to_str()?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

fn kind_from_extension(ext: &str) -> ContentKind {
    match ext {
        "md" | "markdown" => ContentKind::Markdown,
        "html" | "htm" => ContentKind::Html,
        "json" => ContentKind::Json,
        "js" => ContentKind::Js,
        "ts" => ContentKind::Ts,
        "css" => ContentKind::Css,
        "txt" => ContentKind::Txt,
        _ => ContentKind::Other,
    }
}

/// Sniff extensionless content.
///
/// Valid JSON wins, then anything with a markup tag, then a loose
/// JSON-ish heuristic (leading `{` or `[`), then the code-like fallback.
fn sniff_content(text: &str) -> ContentKind {
    if text.is_empty() {
        return ContentKind::Other;
    }
    if serde_json::from_str::<serde_json::Value>(text).is_ok() {
        return ContentKind::Json;
    }
    if tag_pattern().is_match(text) {
        return ContentKind::Html;
    }
    if text.trim_start().starts_with(['{', '[']) {
        return ContentKind::Json;
    }
    ContentKind::Js
}

fn tag_pattern() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"(?is)<[a-z!].*>").expect("tag pattern"))
}

/// Beautifier backend, keyed on the effective kind.
///
/// TypeScript and the generic code fallback share the script backend;
/// the re-indenter does not need to distinguish them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeautifyBackend {
    Json,
    Markup,
    Stylesheet,
    Script,
}

/// Minifier backend, keyed on the effective kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinifyBackend {
    Json,
    Script,
    Stylesheet,
    Markup,
    Whitespace,
}

pub const fn beautify_backend(kind: ContentKind) -> BeautifyBackend {
    match kind {
        ContentKind::Json => BeautifyBackend::Json,
        ContentKind::Html => BeautifyBackend::Markup,
        ContentKind::Css => BeautifyBackend::Stylesheet,
        _ => BeautifyBackend::Script,
    }
}

pub const fn minify_backend(kind: ContentKind) -> MinifyBackend {
    match kind {
        ContentKind::Json => MinifyBackend::Json,
        ContentKind::Js | ContentKind::Ts => MinifyBackend::Script,
        ContentKind::Css => MinifyBackend::Stylesheet,
        ContentKind::Html => MinifyBackend::Markup,
        _ => MinifyBackend::Whitespace,
    }
}
