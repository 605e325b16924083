use std::path::PathBuf;
use std::sync::Arc;

use egui::{Align2, Button, Key, RichText, TextEdit, Window};
use tracing::{debug, error, info, warn};

use crate::config::{DIALOG_MIN_HEIGHT, DIALOG_MIN_WIDTH, FONT_FILE_NAME, HEADER_BG_COLOR};
use crate::session::{Notice, Phase, Session};
use crate::tool::SevenZz;
use crate::ui::{draw_archive_contents, draw_drop_hint, draw_header};
use crate::utils::{open_system_file, parse_hex_color, resolve_resource_path};

pub struct ArchiveShell {
    pub session: Session,
    pub temp_password: String,
    pub focus_password: bool,
}

impl ArchiveShell {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        install_font(&cc.egui_ctx);

        let ctx = cc.egui_ctx.clone();
        let session =
            Session::new(Arc::new(SevenZz::locate())).with_waker(move || ctx.request_repaint());
        info!("Archive tool expected at {:?}", session.tool_location());

        Self {
            session,
            temp_password: String::new(),
            focus_password: true,
        }
    }

    pub fn handle_drops(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| {
            if i.raw.dropped_files.is_empty() {
                return None;
            }
            info!("Files dropped: {} files", i.raw.dropped_files.len());
            Some(i.raw.dropped_files[0].path.clone())
        });

        match dropped {
            Some(Some(path)) => self.open_archive(path),
            Some(None) => {
                warn!("Dropped file has no path");
            }
            None => {}
        }
    }

    fn open_archive(&mut self, path: PathBuf) {
        let path = std::path::absolute(&path).unwrap_or(path);
        self.temp_password.clear();
        self.session.drop_archive(&path);
        debug!("Session at token {:?}", self.session.token());
    }

    fn pick_archive(&mut self) {
        if let Some(path) = rfd::FileDialog::new().pick_file() {
            self.open_archive(path);
        }
    }

    pub fn draw_password_dialog(&mut self, ctx: &egui::Context) {
        if !matches!(self.session.phase(), Phase::AwaitingPassword(_)) {
            self.focus_password = true;
            return;
        }

        let mut submitted = false;
        let mut cancelled = false;
        let archive_name = self.session.archive_display_name();

        Window::new("Password required")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .min_width(DIALOG_MIN_WIDTH)
            .min_height(DIALOG_MIN_HEIGHT)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(format!("Enter the archive password:\n{archive_name}"));
                    ui.add_space(6.0);
                    let response = ui.add(
                        TextEdit::singleline(&mut self.temp_password)
                            .password(true)
                            .hint_text("Password")
                            .desired_width(DIALOG_MIN_WIDTH),
                    );
                    if self.focus_password {
                        response.request_focus();
                        self.focus_password = false;
                    }
                    if response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                        submitted = true;
                    }
                });

                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        cancelled = true;
                    }
                    if ui.button("OK").clicked() {
                        submitted = true;
                    }
                });
            });

        if submitted {
            let password = std::mem::take(&mut self.temp_password);
            self.session.submit_password(password);
        } else if cancelled {
            self.temp_password.clear();
            self.session.cancel_password();
        }
    }

    pub fn draw_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.session.notice().cloned() else {
            return;
        };
        let (title, message) = match &notice {
            Notice::Info(message) => ("Notice", message.clone()),
            Notice::Error(message) => ("Error", message.clone()),
            Notice::Extracted(dir) => ("Done", format!("Files extracted to:\n{}", dir.display())),
        };

        let mut dismissed = false;
        Window::new(title)
            .id(egui::Id::new("notice"))
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .min_width(DIALOG_MIN_WIDTH)
            .min_height(DIALOG_MIN_HEIGHT)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(message);
                });
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    if let Notice::Extracted(dir) = &notice {
                        if ui.button("Open folder").clicked() {
                            if let Err(e) = open_system_file(dir) {
                                error!("Cannot open {:?}: {}", dir, e);
                            }
                        }
                    }
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            });

        if dismissed {
            self.session.dismiss_notice();
        }
    }

    fn draw_extract_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let enabled = self.session.extract_enabled();
            if ui
                .add_enabled(enabled, Button::new("Extract to current folder").frame(false))
                .clicked()
            {
                self.session.request_extract();
            }
            if self.session.is_busy() {
                ui.spinner();
                let label = match self.session.phase() {
                    Phase::Extracting => "Extracting...",
                    _ => "Reading archive...",
                };
                ui.label(RichText::new(label).italics());
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Open…").clicked() {
                    self.pick_archive();
                }
                if let Some(path) = self.session.current_archive() {
                    ui.label(path.display().to_string());
                }
            });
        });
    }
}

impl eframe::App for ArchiveShell {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.session.poll();
        self.handle_drops(ctx);

        let hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());

        if self.session.current_archive().is_some() {
            egui::TopBottomPanel::bottom("extract_bar")
                .frame(
                    egui::Frame::side_top_panel(&ctx.style())
                        .fill(parse_hex_color(HEADER_BG_COLOR)),
                )
                .show(ctx, |ui| self.draw_extract_bar(ui));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.session.current_archive().is_none() {
                if draw_drop_hint(ui, hovering).clicked() {
                    self.pick_archive();
                }
                return;
            }
            draw_header(ui);
            draw_archive_contents(ui, self.session.entries());
        });

        self.draw_password_dialog(ctx);
        self.draw_notice(ctx);
    }
}

/// Uses the bundled font for all text when it is shipped with the program.
fn install_font(ctx: &egui::Context) {
    let path = resolve_resource_path(FONT_FILE_NAME);
    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!("No custom font at {:?}: {}", path, e);
            return;
        }
    };

    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert(FONT_FILE_NAME.to_owned(), egui::FontData::from_owned(bytes));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .insert(0, FONT_FILE_NAME.to_owned());
    }
    ctx.set_fonts(fonts);
    info!("Loaded font {:?}", path);
}
