use eframe::egui::{self, RichText};
use egui_commonmark::CommonMarkViewer;

use crate::app::update::Message;
use crate::app::{App, ToastLevel};
use crate::classify::Classification;
use crate::preview::Pane;

impl App {
    /// Draw one frame and collect the messages the widgets produced.
    pub(super) fn draw(&mut self, ctx: &egui::Context) -> Vec<Message> {
        let mut messages = Vec::new();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.toolbar(ui, &mut messages);
        });
        egui::TopBottomPanel::bottom("status-bar").show(ctx, |ui| {
            self.status_bar(ui);
        });

        let editor_visible = self.model.preview.editor_visible;
        let preview_visible = self.model.preview.preview_visible;
        if editor_visible && preview_visible {
            egui::SidePanel::right("preview-pane")
                .resizable(true)
                .default_width(480.0)
                .show(ctx, |ui| self.preview_pane(ui));
            egui::CentralPanel::default().show(ctx, |ui| {
                self.editor_pane(ui, &mut messages);
            });
        } else if editor_visible {
            egui::CentralPanel::default().show(ctx, |ui| {
                self.editor_pane(ui, &mut messages);
            });
        } else if preview_visible {
            egui::CentralPanel::default().show(ctx, |ui| self.preview_pane(ui));
        } else {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.label("Both panes are hidden - toggle one from the toolbar");
                });
            });
        }

        messages
    }

    fn toolbar(&mut self, ui: &mut egui::Ui, messages: &mut Vec<Message>) {
        ui.horizontal_wrapped(|ui| {
            if ui.button("Open…").on_hover_text("Ctrl+O").clicked() {
                messages.push(Message::OpenFileRequested);
            }

            egui::ComboBox::from_id_salt("recent-files")
                .selected_text("Recent files")
                .width(140.0)
                .show_ui(ui, |ui| {
                    if self.model.recent.is_empty() {
                        ui.label("No recent files");
                    }
                    let names: Vec<String> =
                        self.model.recent.iter().map(|entry| entry.name.clone()).collect();
                    for (index, name) in names.iter().enumerate() {
                        if ui.selectable_label(false, name.as_str()).clicked() {
                            messages.push(Message::OpenRecent(index));
                        }
                    }
                });

            ui.separator();

            let busy = self.model.busy;
            if ui.add_enabled(!busy, egui::Button::new("Beautify")).clicked() {
                messages.push(Message::Beautify);
            }
            if ui.add_enabled(!busy, egui::Button::new("Minify")).clicked() {
                messages.push(Message::Minify);
            }
            if busy {
                ui.spinner();
            }

            ui.separator();

            if ui
                .selectable_label(self.model.preview.editor_visible, "Editor")
                .clicked()
            {
                messages.push(Message::TogglePane(Pane::Editor));
            }
            if ui
                .selectable_label(self.model.preview.preview_visible, "Preview")
                .clicked()
            {
                messages.push(Message::TogglePane(Pane::Preview));
            }

            let can_copy = self.model.classification != Classification::Plain;
            if ui
                .add_enabled(can_copy, egui::Button::new("Copy HTML"))
                .clicked()
            {
                messages.push(Message::CopyHtml);
            }

            ui.separator();

            let response = ui.add(
                egui::TextEdit::singleline(&mut self.search_input)
                    .hint_text("Search")
                    .desired_width(140.0),
            );
            if response.changed() {
                messages.push(Message::SearchInput(self.search_input.clone()));
            }
            let submitted =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Next").clicked() || submitted {
                messages.push(Message::FindNext);
            }

            ui.separator();

            let dark = self.model.prefs.dark_mode;
            if ui.selectable_label(dark, "Dark").clicked() {
                messages.push(Message::SetDarkMode(!dark));
            }
            let mut zoom = self.model.prefs.zoom;
            if ui
                .add(egui::Slider::new(&mut zoom, 0.5..=2.0).show_value(false))
                .on_hover_text("Zoom")
                .changed()
            {
                messages.push(Message::SetZoom(zoom));
            }
        });
    }

    fn editor_pane(&mut self, ui: &mut egui::Ui, messages: &mut Vec<Message>) {
        egui::ScrollArea::vertical()
            .id_salt("editor-scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let editor = egui::TextEdit::multiline(&mut self.model.document.text)
                    .code_editor()
                    .desired_width(f32::INFINITY)
                    .desired_rows(30);
                if ui.add(editor).changed() {
                    messages.push(Message::ContentEdited);
                }
            });
    }

    /// Markdown renders natively; HTML files show their sanitized
    /// markup; plain content (reachable via a manual show) is verbatim.
    fn preview_pane(&mut self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .id_salt("preview-scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| match self.model.classification {
                Classification::Markdown => {
                    CommonMarkViewer::new().max_image_width(Some(800)).show(
                        ui,
                        &mut self.markdown_cache,
                        &self.model.document.text,
                    );
                }
                Classification::Html => {
                    ui.add(egui::Label::new(
                        RichText::new(self.model.rendered.body.as_str()).monospace(),
                    ));
                }
                Classification::Plain => {
                    ui.add(egui::Label::new(
                        RichText::new(self.model.document.text.as_str()).monospace(),
                    ));
                }
            });
    }

    fn status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(self.model.document.display_name());
            ui.separator();
            ui.label(match self.model.classification {
                Classification::Html => "html",
                Classification::Markdown => "markdown",
                Classification::Plain => "plain",
            });
            if let Some(found) = self.model.last_match {
                ui.separator();
                ui.label(format!("match at line {}", found.line));
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if let Some((message, level)) = self.model.active_toast() {
                    let color = match level {
                        ToastLevel::Info => ui.visuals().text_color(),
                        ToastLevel::Warning => ui.visuals().warn_fg_color,
                        ToastLevel::Error => ui.visuals().error_fg_color,
                    };
                    ui.colored_label(color, message);
                }
            });
        });
    }
}
