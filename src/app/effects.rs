use std::sync::mpsc::{self, TryRecvError};

use eframe::egui;

use crate::app::update::Message;
use crate::app::{App, ToastLevel};
use crate::document::Document;
use crate::format::FormatAction;

/// File-type filter offered by the open dialog.
const DIALOG_EXTENSIONS: [&str; 8] = ["md", "markdown", "txt", "json", "js", "ts", "html", "css"];

impl App {
    /// Apply the side effects of a message after the pure update ran.
    ///
    /// Returns follow-up messages (e.g. the dialog's file) to feed back
    /// through `update`.
    pub(super) fn handle_message_side_effects(
        &mut self,
        ctx: &egui::Context,
        msg: &Message,
    ) -> Vec<Message> {
        match msg {
            Message::OpenFileRequested => {
                return self.open_file_dialog().into_iter().collect();
            }
            Message::Beautify | Message::Minify => {
                if let Some(action) = self.model.pending_format.take() {
                    self.spawn_format_worker(ctx, action);
                }
            }
            Message::CopyHtml => {
                ctx.copy_text(self.model.rendered.body.clone());
                self.model
                    .show_toast(ToastLevel::Info, "Rendered HTML copied to clipboard");
            }
            _ => {}
        }
        Vec::new()
    }

    /// Ask the user for a file. A canceled dialog and an unreadable
    /// file both come back empty; the read failure is only logged.
    fn open_file_dialog(&self) -> Option<Message> {
        let path = rfd::FileDialog::new()
            .add_filter("Markdown and text", &DIALOG_EXTENSIONS)
            .add_filter("All Files", &["*"])
            .pick_file()?;
        match Document::from_path(&path) {
            Ok(document) => Some(Message::FileLoaded {
                path: document.path,
                text: document.text,
            }),
            Err(err) => {
                tracing::warn!(%err, "open failed, treating as canceled");
                None
            }
        }
    }

    /// Hand the current text to a worker thread for formatting.
    ///
    /// At most one request is in flight; the triggering buttons are
    /// disabled until [`App::poll_format_worker`] drains the result.
    fn spawn_format_worker(&mut self, ctx: &egui::Context, action: FormatAction) {
        let (tx, rx) = mpsc::channel();
        let text = self.model.document.text.clone();
        let kind = self.model.document.content_kind();
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let formatted = action.apply(kind, &text);
            if tx.send(formatted).is_ok() {
                ctx.request_repaint();
            }
        });
        self.format_rx = Some((action, rx));
    }

    /// Check the outstanding format request for a result.
    pub(super) fn poll_format_worker(&mut self) -> Option<Message> {
        let (action, rx) = self.format_rx.as_ref()?;
        let action = *action;
        match rx.try_recv() {
            Ok(text) => {
                self.format_rx = None;
                Some(Message::FormatFinished { action, text })
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                // Worker died without a result; release the controls and
                // keep the text as it was.
                tracing::warn!(?action, "format worker disappeared");
                self.format_rx = None;
                Some(Message::FormatFinished {
                    action,
                    text: self.model.document.text.clone(),
                })
            }
        }
    }

    /// Collect host-level input: dropped files and keyboard shortcuts.
    pub(super) fn collect_input_messages(&mut self, ctx: &egui::Context) -> Vec<Message> {
        let mut messages = Vec::new();

        for file in ctx.input(|i| i.raw.dropped_files.clone()) {
            if let Some(path) = file.path {
                match Document::from_path(&path) {
                    Ok(document) => messages.push(Message::FileLoaded {
                        path: document.path,
                        text: document.text,
                    }),
                    Err(err) => tracing::warn!(%err, "dropped file unreadable, ignoring"),
                }
            } else if let Some(bytes) = file.bytes {
                messages.push(Message::FileLoaded {
                    path: None,
                    text: String::from_utf8_lossy(&bytes).into_owned(),
                });
            }
        }

        if ctx.input_mut(|i| i.consume_key(egui::Modifiers::COMMAND, egui::Key::O)) {
            messages.push(Message::OpenFileRequested);
        }

        messages
    }
}
