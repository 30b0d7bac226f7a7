//! Preview pane visibility state machine.
//!
//! Visibility follows content classification automatically until the
//! user toggles the preview pane by hand. A manual hide disarms the
//! automatic behavior; a manual show (or any file load) re-arms it.

use std::path::Path;

use crate::classify::{self, Classification};

/// A toggleable pane in the main window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Editor,
    Preview,
}

/// Visibility state for the editor/preview pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewState {
    pub editor_visible: bool,
    pub preview_visible: bool,
    auto_show: bool,
}

impl Default for PreviewState {
    fn default() -> Self {
        Self {
            editor_visible: true,
            preview_visible: true,
            auto_show: true,
        }
    }
}

impl PreviewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether classification-driven visibility changes are armed.
    pub const fn auto_show(&self) -> bool {
        self.auto_show
    }

    /// React to an edit or reload of the current document.
    ///
    /// Only adjusts the preview pane, and only while auto-show is armed.
    pub const fn on_content_changed(&mut self, classification: Classification) {
        if self.auto_show {
            self.preview_visible = !matches!(classification, Classification::Plain);
        }
    }

    /// React to a file load.
    ///
    /// Previewable files (md/markdown/html/htm) force a preview-only
    /// layout and re-arm auto-show, overriding any earlier manual hide.
    /// Everything else forces the editor back on and leaves the preview
    /// flag for the follow-up content-changed transition to settle.
    pub fn on_load_file(&mut self, path: Option<&Path>) {
        match path {
            Some(path) if classify::is_previewable(path) => {
                self.editor_visible = false;
                self.preview_visible = true;
                self.auto_show = true;
            }
            _ => self.editor_visible = true,
        }
    }

    /// React to an explicit user toggle of a pane.
    ///
    /// For the preview pane, auto-show tracks the new visibility: hiding
    /// disarms automatic changes, showing re-arms them. The editor pane
    /// intentionally carries no such coupling.
    pub const fn on_user_toggle(&mut self, pane: Pane) {
        match pane {
            Pane::Editor => self.editor_visible = !self.editor_visible,
            Pane::Preview => {
                self.preview_visible = !self.preview_visible;
                self.auto_show = self.preview_visible;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_initial_state_shows_both_panes() {
        let state = PreviewState::new();
        assert!(state.editor_visible);
        assert!(state.preview_visible);
        assert!(state.auto_show());
    }

    #[test]
    fn test_content_changed_follows_classification_while_armed() {
        let mut state = PreviewState::new();
        state.on_content_changed(Classification::Plain);
        assert!(!state.preview_visible);
        state.on_content_changed(Classification::Markdown);
        assert!(state.preview_visible);
        state.on_content_changed(Classification::Html);
        assert!(state.preview_visible);
    }

    #[test]
    fn test_manual_hide_disarms_automatic_show() {
        let mut state = PreviewState::new();
        state.on_user_toggle(Pane::Preview);
        assert!(!state.preview_visible);
        assert!(!state.auto_show());

        // Markdown content would normally show the preview; the manual
        // hide must suppress that until the next load or manual show.
        state.on_content_changed(Classification::Markdown);
        assert!(!state.preview_visible);
    }

    #[test]
    fn test_manual_show_rearms_automatic_behavior() {
        let mut state = PreviewState::new();
        state.on_user_toggle(Pane::Preview);
        state.on_user_toggle(Pane::Preview);
        assert!(state.preview_visible);
        assert!(state.auto_show());

        state.on_content_changed(Classification::Plain);
        assert!(!state.preview_visible);
    }

    #[test]
    fn test_editor_toggle_does_not_touch_auto_show() {
        let mut state = PreviewState::new();
        state.on_user_toggle(Pane::Editor);
        assert!(!state.editor_visible);
        assert!(state.auto_show());

        state.on_user_toggle(Pane::Editor);
        assert!(state.editor_visible);
        assert!(state.auto_show());
    }

    #[test]
    fn test_load_previewable_forces_preview_only_layout() {
        let mut state = PreviewState::new();
        state.on_load_file(Some(Path::new("notes.md")));
        assert!(!state.editor_visible);
        assert!(state.preview_visible);
        assert!(state.auto_show());
    }

    #[test]
    fn test_load_overrides_prior_manual_hide() {
        let mut state = PreviewState::new();
        state.on_user_toggle(Pane::Preview);
        assert!(!state.auto_show());

        state.on_load_file(Some(Path::new("other.markdown")));
        assert!(state.preview_visible);
        assert!(state.auto_show());
    }

    #[test]
    fn test_load_non_previewable_forces_editor_on() {
        let mut state = PreviewState::new();
        state.on_user_toggle(Pane::Editor);
        assert!(!state.editor_visible);

        state.on_load_file(Some(Path::new("data.json")));
        assert!(state.editor_visible);
        // Preview flag is settled by the follow-up content-changed.
        state.on_content_changed(Classification::Plain);
        assert!(!state.preview_visible);
    }

    #[test]
    fn test_load_without_path_forces_editor_on() {
        let mut state = PreviewState::new();
        state.on_user_toggle(Pane::Editor);
        state.on_load_file(None);
        assert!(state.editor_visible);
    }
}
