use std::path::PathBuf;

use crate::app::model::{Model, ToastLevel};
use crate::document::Document;
use crate::format::FormatAction;
use crate::preview::Pane;

/// All possible events and actions in the application.
///
/// These represent user input, host events, and internal completions.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // Files
    /// Ask the host for a file via the open dialog
    OpenFileRequested,
    /// A file's content arrived (dialog, drag-drop, or startup file)
    FileLoaded {
        path: Option<PathBuf>,
        text: String,
    },
    /// Load an entry from the recent-files list
    OpenRecent(usize),
    /// The OS or a second instance asked to open a file
    ExternalOpen {
        path: PathBuf,
        text: String,
    },

    // Editing
    /// The editor buffer changed in place
    ContentEdited,

    // Formatting
    /// Beautify the current text
    Beautify,
    /// Minify the current text
    Minify,
    /// A formatting request completed
    FormatFinished {
        action: FormatAction,
        text: String,
    },

    // Panes
    /// User toggled a pane's visibility
    TogglePane(Pane),

    // Search
    /// Search query changed
    SearchInput(String),
    /// Jump to the next search match
    FindNext,

    // Misc
    /// Copy the rendered, sanitized HTML to the clipboard
    CopyHtml,
    /// Switch between dark and light theme
    SetDarkMode(bool),
    /// Change the UI zoom factor
    SetZoom(f32),
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// Dialogs, file reads, worker threads, and the clipboard live in the
/// effects layer.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        // Handled entirely in effects: the dialog result and clipboard
        // write come back as (or need no) follow-up messages.
        Message::OpenFileRequested | Message::CopyHtml => {}

        Message::FileLoaded { path, text } => {
            load_document(&mut model, Document::new(path, text));
        }
        Message::ExternalOpen { path, text } => {
            load_document(&mut model, Document::new(Some(path), text));
        }
        Message::OpenRecent(index) => {
            if let Some(entry) = model.recent.get(index).cloned() {
                load_document(&mut model, Document::new(Some(entry.path), entry.text));
            }
        }

        Message::ContentEdited => {
            model.refresh_derived();
            model.preview.on_content_changed(model.classification);
            // Byte offsets into the old text are meaningless now.
            model.search.reset();
            model.last_match = None;
        }

        Message::Beautify => request_format(&mut model, FormatAction::Beautify),
        Message::Minify => request_format(&mut model, FormatAction::Minify),
        Message::FormatFinished { action, text } => {
            model.busy = false;
            let changed = text != model.document.text;
            model.document.text = text;
            model.refresh_derived();
            model.preview.on_content_changed(model.classification);
            model.search.reset();
            model.last_match = None;
            if changed {
                model.show_toast(ToastLevel::Info, format!("{} applied", action.label()));
            } else {
                model.show_toast(ToastLevel::Warning, format!("{} left text unchanged", action.label()));
            }
        }

        Message::TogglePane(pane) => {
            model.preview.on_user_toggle(pane);
        }

        Message::SearchInput(query) => {
            model.search.set_query(query);
        }
        Message::FindNext => {
            model.last_match = model.search.find_next(&model.document.text);
            if model.last_match.is_none() && !model.search.query.is_empty() {
                model.show_toast(ToastLevel::Info, format!("No matches for \"{}\"", model.search.query));
            }
        }

        Message::SetDarkMode(dark) => {
            model.prefs.dark_mode = dark;
        }
        Message::SetZoom(zoom) => {
            model.prefs.zoom = zoom.clamp(0.5, 3.0);
        }
    }
    model
}

/// Shared load pipeline for dialog results, drops, recent selects, the
/// startup file, and external opens.
fn load_document(model: &mut Model, document: Document) {
    if let Some(path) = &document.path {
        model.recent.insert(path, &document.text);
    }
    model.preview.on_load_file(document.path.as_deref());
    model.show_toast(ToastLevel::Info, format!("Opened {}", document.display_name()));
    model.document = document;
    model.refresh_derived();
    model.preview.on_content_changed(model.classification);
    model.search.reset();
    model.last_match = None;
}

/// Accept a beautify/minify request unless one is already in flight.
///
/// Overlapping requests are not defined behavior; the triggering
/// controls are disabled while `busy`, and a message that slips
/// through anyway is dropped here.
fn request_format(model: &mut Model, action: FormatAction) {
    if model.busy {
        tracing::debug!(?action, "format request ignored, another is outstanding");
        return;
    }
    model.busy = true;
    model.pending_format = Some(action);
}
