//! Beautify and minify actions.
//!
//! Both actions dispatch on the document's effective kind and delegate
//! to a backend: serde_json for JSON, the `minifier` crate for scripts
//! and stylesheets, `minify-html` for markup, and a whitespace-collapse
//! fallback for everything else. A backend failure is never surfaced as
//! an error: the action degrades to a logged no-op that hands back the
//! original text.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::classify::{BeautifyBackend, ContentKind, MinifyBackend, beautify_backend, minify_backend};

/// Indentation applied by the re-indenting beautifiers.
const INDENT_WIDTH: usize = 2;

/// The two formatting actions a user can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatAction {
    Beautify,
    Minify,
}

impl FormatAction {
    /// Run the action against `text`, falling back to the input on any
    /// backend failure.
    pub fn apply(self, kind: ContentKind, text: &str) -> String {
        match self {
            Self::Beautify => beautify(kind, text),
            Self::Minify => minify(kind, text),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Beautify => "Beautify",
            Self::Minify => "Minify",
        }
    }
}

#[derive(Debug, Error)]
enum FormatError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unbalanced braces")]
    UnbalancedBraces,
    #[error("stylesheet minifier rejected input: {0}")]
    Stylesheet(String),
    #[error("minified markup is not valid UTF-8")]
    MarkupEncoding,
}

/// Pretty-print `text` according to its kind.
pub fn beautify(kind: ContentKind, text: &str) -> String {
    match try_beautify(kind, text) {
        Ok(formatted) => formatted,
        Err(err) => {
            tracing::warn!(%err, ?kind, "beautify failed, keeping input");
            text.to_string()
        }
    }
}

/// Minify `text` according to its kind. Total: the worst case is the
/// input handed back unchanged.
pub fn minify(kind: ContentKind, text: &str) -> String {
    match try_minify(kind, text) {
        Ok(minified) => minified,
        Err(err) => {
            tracing::warn!(%err, ?kind, "minify failed, keeping input");
            text.to_string()
        }
    }
}

fn try_beautify(kind: ContentKind, text: &str) -> Result<String, FormatError> {
    match beautify_backend(kind) {
        BeautifyBackend::Json => {
            let value: serde_json::Value = serde_json::from_str(text)?;
            Ok(serde_json::to_string_pretty(&value)?)
        }
        BeautifyBackend::Markup => Ok(reindent_markup(text)),
        BeautifyBackend::Stylesheet | BeautifyBackend::Script => reindent_braces(text),
    }
}

fn try_minify(kind: ContentKind, text: &str) -> Result<String, FormatError> {
    match minify_backend(kind) {
        MinifyBackend::Json => {
            let value: serde_json::Value = serde_json::from_str(text)?;
            Ok(serde_json::to_string(&value)?)
        }
        MinifyBackend::Script => Ok(minifier::js::minify(text).to_string()),
        MinifyBackend::Stylesheet => minifier::css::minify(text)
            .map(|minified| minified.to_string())
            .map_err(|err| FormatError::Stylesheet(err.to_string())),
        MinifyBackend::Markup => {
            let cfg = minify_html::Cfg {
                minify_css: true,
                minify_js: true,
                ..minify_html::Cfg::default()
            };
            let minified = minify_html::minify(text.as_bytes(), &cfg);
            String::from_utf8(minified).map_err(|_| FormatError::MarkupEncoding)
        }
        MinifyBackend::Whitespace => Ok(collapse_whitespace(text)),
    }
}

/// Collapse all whitespace runs to single spaces and trim the ends.
fn collapse_whitespace(text: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    let pattern = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern"));
    pattern.replace_all(text, " ").trim().to_string()
}

/// Re-indent brace-structured source (scripts and stylesheets).
///
/// Purely line-based: each line is stripped and re-indented by its
/// brace depth. Input whose braces do not balance is refused so prose
/// or truncated code comes back untouched. Idempotent: a second pass
/// sees the same stripped lines and produces identical output.
fn reindent_braces(text: &str) -> Result<String, FormatError> {
    if !text.contains(['{', '}']) {
        return Ok(text.to_string());
    }

    let mut depth = 0_i64;
    for ch in text.chars() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth < 0 {
                    return Err(FormatError::UnbalancedBraces);
                }
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(FormatError::UnbalancedBraces);
    }

    let mut out = String::with_capacity(text.len());
    let mut level: usize = 0;
    for line in text.lines() {
        let stripped = line.trim();
        if stripped.is_empty() {
            out.push('\n');
            continue;
        }
        let leading_closers = stripped.chars().take_while(|&ch| ch == '}').count();
        let indent = level.saturating_sub(leading_closers);
        push_indented(&mut out, indent, stripped);
        let opens = stripped.matches('{').count();
        let closes = stripped.matches('}').count();
        level = (level + opens).saturating_sub(closes);
    }
    Ok(out)
}

/// Re-indent markup by tag depth.
///
/// Void and self-closing tags do not open a level; a line that starts
/// with a closing tag dedents itself. Lines are stripped first, so the
/// pass is idempotent.
fn reindent_markup(text: &str) -> String {
    if !text.contains('<') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut level: usize = 0;
    for line in text.lines() {
        let stripped = line.trim();
        if stripped.is_empty() {
            out.push('\n');
            continue;
        }
        let (opens, closes) = tag_balance(stripped);
        let indent = if stripped.starts_with("</") {
            level.saturating_sub(1)
        } else {
            level
        };
        push_indented(&mut out, indent, stripped);
        level = (level + opens).saturating_sub(closes);
    }
    out
}

fn push_indented(out: &mut String, level: usize, line: &str) {
    for _ in 0..level * INDENT_WIDTH {
        out.push(' ');
    }
    out.push_str(line);
    out.push('\n');
}

/// Count the opening and closing tags on one line of markup.
fn tag_balance(line: &str) -> (usize, usize) {
    const VOID_TAGS: [&str; 14] = [
        "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
        "source", "track", "wbr",
    ];
    static TAG: OnceLock<Regex> = OnceLock::new();
    let pattern = TAG
        .get_or_init(|| Regex::new(r"(?i)<(/?)([a-z][a-z0-9-]*)[^>]*?(/?)>").expect("tag pattern"));

    let mut opens = 0;
    let mut closes = 0;
    for caps in pattern.captures_iter(line) {
        let closing = &caps[1] == "/";
        let self_closing = &caps[3] == "/";
        let name = caps[2].to_ascii_lowercase();
        if closing {
            closes += 1;
        } else if !self_closing && !VOID_TAGS.contains(&name.as_str()) {
            opens += 1;
        }
    }
    (opens, closes)
}
