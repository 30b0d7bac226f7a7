//! Application shell and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App`]: egui frame loop applying side effects around `update`

mod effects;
mod model;
mod ui;
mod update;

pub use model::{Model, PREFS_KEY, ToastLevel, UiPrefs};
pub use update::{Message, update};

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use eframe::egui;
use egui_commonmark::CommonMarkCache;

use crate::document::Document;
use crate::format::FormatAction;
use crate::recent::{self, RecentFiles};

/// Application name used for the window and the storage scope.
pub const APP_NAME: &str = "markpane";

/// Main application struct that owns the frame loop and the
/// side-effectful resources around the [`Model`].
pub struct App {
    model: Model,
    /// Widget cache for the markdown preview.
    markdown_cache: CommonMarkCache,
    /// Search box buffer; the model only sees committed queries.
    search_input: String,
    /// Outstanding beautify/minify request, if any.
    format_rx: Option<(FormatAction, Receiver<String>)>,
    /// File passed on the command line, loaded on the first frame.
    initial_file: Option<PathBuf>,
    /// Last window title pushed to the host.
    last_title: String,
}

impl App {
    /// Create the application, restoring persisted state from the host
    /// key-value store.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        initial_file: Option<PathBuf>,
        dark_override: Option<bool>,
    ) -> Self {
        let recent: RecentFiles = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, recent::STORAGE_KEY))
            .unwrap_or_default();
        let mut prefs: UiPrefs = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, PREFS_KEY))
            .unwrap_or_default();
        if let Some(dark) = dark_override {
            prefs.dark_mode = dark;
        }

        Self {
            model: Model::new(Document::empty(), recent, prefs),
            markdown_cache: CommonMarkCache::default(),
            search_input: String::new(),
            format_rx: None,
            initial_file,
            last_title: String::new(),
        }
    }

    /// Run messages through the pure update and their side effects,
    /// including any follow-ups the effects produce.
    fn dispatch(&mut self, ctx: &egui::Context, messages: Vec<Message>) {
        let mut queue: VecDeque<Message> = messages.into();
        while let Some(msg) = queue.pop_front() {
            let model = std::mem::take(&mut self.model);
            self.model = update(model, msg.clone());
            queue.extend(self.handle_message_side_effects(ctx, &msg));
        }
    }

    fn sync_window_title(&mut self, ctx: &egui::Context) {
        let title = self.model.window_title();
        if title != self.last_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.last_title = title;
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut messages = Vec::new();

        // Startup file from the command line (the host-level "open
        // with" dispatch). An unreadable file degrades to no open.
        if let Some(path) = self.initial_file.take() {
            match Document::from_path(&path) {
                Ok(document) => messages.push(Message::FileLoaded {
                    path: document.path,
                    text: document.text,
                }),
                Err(err) => tracing::warn!(%err, "startup file unreadable, treating as canceled"),
            }
        }

        if let Some(msg) = self.poll_format_worker() {
            messages.push(msg);
        }
        messages.extend(self.collect_input_messages(ctx));

        ctx.set_zoom_factor(self.model.prefs.zoom);
        ctx.set_visuals(if self.model.prefs.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });

        if self.model.expire_toast(Instant::now()) {
            ctx.request_repaint();
        }

        messages.extend(self.draw(ctx));
        self.dispatch(ctx, messages);
        self.sync_window_title(ctx);

        // Keep polling while a format request or a toast is pending.
        if self.format_rx.is_some() || self.model.active_toast().is_some() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, recent::STORAGE_KEY, &self.model.recent);
        eframe::set_value(storage, PREFS_KEY, &self.model.prefs);
    }
}
