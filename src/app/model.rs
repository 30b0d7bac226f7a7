use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::classify::Classification;
use crate::document::Document;
use crate::format::FormatAction;
use crate::preview::PreviewState;
use crate::recent::RecentFiles;
use crate::render::{self, Rendered};
use crate::search::SearchState;

/// Storage key for the persisted UI preferences.
pub const PREFS_KEY: &str = "markpane";

/// Severity of a transient status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// UI preferences persisted between sessions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UiPrefs {
    pub dark_mode: bool,
    pub zoom: f32,
}

impl Default for UiPrefs {
    fn default() -> Self {
        Self {
            dark_mode: true,
            zoom: 1.0,
        }
    }
}

/// The complete application state.
///
/// All state lives here - no global or scattered state. Side-effectful
/// resources (dialogs, worker channels, the markdown widget cache) live
/// in the shell, keeping this struct testable.
#[derive(Debug)]
pub struct Model {
    /// The loaded document.
    pub document: Document,
    /// Classification of the current document text.
    pub classification: Classification,
    /// Preview/editor pane visibility.
    pub preview: PreviewState,
    /// Sanitized preview body for html/markdown content.
    pub rendered: Rendered,
    /// Recent-files list (persisted).
    pub recent: RecentFiles,
    /// Find-next search state.
    pub search: SearchState,
    /// Most recent search hit, shown in the status bar.
    pub last_match: Option<crate::search::Match>,
    /// Persisted UI preferences.
    pub prefs: UiPrefs,
    /// True while a beautify/minify request is outstanding.
    pub busy: bool,
    /// Format request accepted by `update`, awaiting dispatch.
    pub pending_format: Option<FormatAction>,
    toast: Option<Toast>,
}

impl Model {
    pub fn new(document: Document, recent: RecentFiles, prefs: UiPrefs) -> Self {
        let classification = document.classification();
        let rendered = render::render_document(document.path.as_deref(), &document.text);
        Self {
            document,
            classification,
            preview: PreviewState::new(),
            rendered,
            recent,
            search: SearchState::new(),
            last_match: None,
            prefs,
            busy: false,
            pending_format: None,
            toast: None,
        }
    }

    /// Re-derive classification and preview body from the current text.
    pub fn refresh_derived(&mut self) {
        self.classification = self.document.classification();
        self.rendered =
            render::render_document(self.document.path.as_deref(), &self.document.text);
    }

    pub fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }

    /// Window title: file name plus the application name.
    pub fn window_title(&self) -> String {
        format!("{} - markpane", self.document.display_name())
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(Document::empty(), RecentFiles::new(), UiPrefs::default())
    }
}
