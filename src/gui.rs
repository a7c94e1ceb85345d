// CiteSleuth - gui.rs
//
// Top-level eframe::App implementation.
// Wires together all UI panels and manages the fetch/verification
// lifecycles.

use crate::app::fetch::{FetchConfig, FetchManager};
use crate::app::state::AppState;
use crate::app::verify::VerifyManager;
use crate::core::export;
use crate::core::model::{FetchProgress, VerifyProgress};
use crate::core::review::Direction;
use crate::platform::config::PlatformPaths;
use crate::ui;
use crate::util::constants;

/// The CiteSleuth application.
pub struct CiteSleuthApp {
    pub state: AppState,
    pub fetch_manager: FetchManager,
    pub verify_manager: VerifyManager,
    fetch_config: FetchConfig,
    verify_delay_ms: u64,
    platform_paths: PlatformPaths,
}

impl CiteSleuthApp {
    /// Create a new application instance with the given state and config.
    pub fn new(
        state: AppState,
        fetch_config: FetchConfig,
        verify_delay_ms: u64,
        platform_paths: PlatformPaths,
    ) -> Self {
        Self {
            state,
            fetch_manager: FetchManager::new(),
            verify_manager: VerifyManager::new(),
            fetch_config,
            verify_delay_ms,
            platform_paths,
        }
    }

    /// Apply pending fetch progress messages to the state.
    fn poll_fetch(&mut self) -> bool {
        let messages = self.fetch_manager.poll_progress();
        let had_messages = !messages.is_empty();
        for msg in messages {
            match msg {
                FetchProgress::Started => {
                    self.state.fetch_in_progress = true;
                    self.state.status_message = "Loading brief...".to_string();
                }
                FetchProgress::AttemptFailed {
                    attempt,
                    max_attempts,
                } => {
                    self.state.fetch_attempts = attempt;
                    self.state.status_message =
                        format!("Fetch attempt {attempt} of {max_attempts} failed.");
                }
                FetchProgress::Retrying { attempt, delay_ms } => {
                    self.state.status_message =
                        format!("Retrying after attempt {attempt} ({delay_ms} ms)...");
                }
                FetchProgress::Completed { brief } => {
                    self.state.fetch_in_progress = false;
                    let citations = brief.citations.len();
                    let results = brief.verification_results.len();
                    self.state.set_brief(*brief);
                    self.state.status_message =
                        format!("Brief loaded: {citations} citations, {results} results.");
                    if !self.state.validation_warnings.is_empty() {
                        tracing::warn!(
                            warnings = self.state.validation_warnings.len(),
                            "Brief loaded with validation warnings"
                        );
                    }
                }
                FetchProgress::Failed { attempts, error } => {
                    self.state.fetch_in_progress = false;
                    self.state.fetch_attempts = attempts;
                    self.state.fetch_error = Some(error.clone());
                    self.state.status_message = format!("Fetch failed: {error}");
                }
                FetchProgress::Cancelled => {
                    self.state.fetch_in_progress = false;
                    self.state.status_message = "Fetch cancelled.".to_string();
                }
            }
        }
        had_messages
    }

    /// Apply pending verification progress messages to the state.
    fn poll_verify(&mut self) -> bool {
        let messages = self.verify_manager.poll_progress();
        let had_messages = !messages.is_empty();
        for msg in messages {
            match msg {
                VerifyProgress::Started => {
                    self.state.verify_in_progress = true;
                    self.state.status_message = "Running verification\u{2026}".to_string();
                }
                VerifyProgress::Completed => {
                    self.state.verify_in_progress = false;
                    self.state.status_message = "Verification updated.".to_string();
                }
                VerifyProgress::Cancelled => {
                    self.state.verify_in_progress = false;
                }
            }
        }
        had_messages
    }

    /// Keyboard navigation: arrows step the selection through the filtered
    /// list; Escape clears it. Skipped while a text field has focus so the
    /// search box keeps its keys.
    fn handle_keys(&mut self, ctx: &egui::Context) {
        if self.state.brief.is_none() || ctx.memory(|m| m.focused().is_some()) {
            return;
        }

        if ctx.input(|i| i.key_pressed(egui::Key::ArrowDown)) {
            self.state.step_selection(Direction::Next);
        }
        if ctx.input(|i| i.key_pressed(egui::Key::ArrowUp)) {
            self.state.step_selection(Direction::Previous);
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.state.clear_selection();
        }
    }

    /// Run the notes export through a save dialog.
    fn export_notes(&mut self) {
        let Some(brief) = &self.state.brief else {
            return;
        };
        let now = chrono::Utc::now();
        let file_name =
            export::build_file_name(&brief.title, now.date_naive(), constants::NOTES_EXTENSION);

        let Some(dest) = rfd::FileDialog::new()
            .add_filter("Text", &[constants::NOTES_EXTENSION])
            .set_directory(&self.platform_paths.export_dir)
            .set_file_name(file_name)
            .save_file()
        else {
            return;
        };

        match std::fs::File::create(&dest) {
            Ok(file) => match export::export_notes(brief, now, file, &dest) {
                Ok(n) => {
                    tracing::info!(path = %dest.display(), citations = n, "Notes exported");
                    self.state.status_message = format!("Exported notes for {n} citations.");
                }
                Err(e) => {
                    self.state.status_message = format!("Notes export failed: {e}");
                }
            },
            Err(e) => {
                self.state.status_message = format!("Cannot create file: {e}");
            }
        }
    }

    /// Run the CSV export through a save dialog.
    fn export_csv(&mut self) {
        let Some(brief) = &self.state.brief else {
            return;
        };
        let file_name = export::build_file_name(
            &brief.title,
            chrono::Utc::now().date_naive(),
            constants::CSV_EXTENSION,
        );

        let Some(dest) = rfd::FileDialog::new()
            .add_filter("CSV", &[constants::CSV_EXTENSION])
            .set_directory(&self.platform_paths.export_dir)
            .set_file_name(file_name)
            .save_file()
        else {
            return;
        };

        match std::fs::File::create(&dest) {
            Ok(file) => match export::export_csv(brief, file, &dest) {
                Ok(n) => {
                    tracing::info!(path = %dest.display(), rows = n, "CSV exported");
                    self.state.status_message = format!("Exported {n} rows to CSV.");
                }
                Err(e) => {
                    self.state.status_message = format!("CSV export failed: {e}");
                }
            },
            Err(e) => {
                self.state.status_message = format!("Cannot create file: {e}");
            }
        }
    }
}

impl eframe::App for CiteSleuthApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let had_fetch = self.poll_fetch();
        let had_verify = self.poll_verify();

        // Repaint while background work is active so progress appears
        // promptly even without input events.
        if had_fetch || had_verify {
            ctx.request_repaint();
        }
        if self.state.fetch_in_progress || self.state.verify_in_progress {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        // ---- Handle flags set by panels ----
        // request_fetch: initial load, or the Retry button after a failure.
        if self.state.request_fetch {
            self.state.request_fetch = false;
            self.state.reset_for_fetch();
            self.state.fetch_in_progress = true;
            self.fetch_manager
                .start_fetch(self.state.brief_source.clone(), self.fetch_config.clone());
        }

        // request_verify: ignored while a cycle is already running.
        if self.state.request_verify {
            self.state.request_verify = false;
            if !self.state.verify_in_progress {
                self.state.verify_in_progress = true;
                self.verify_manager.start_verify(self.verify_delay_ms);
            }
        }

        if self.state.request_export_notes {
            self.state.request_export_notes = false;
            self.export_notes();
        }
        if self.state.request_export_csv {
            self.state.request_export_csv = false;
            self.export_csv();
        }

        self.handle_keys(ctx);

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Brief\u{2026}").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Brief JSON", &["json"])
                            .pick_file()
                        {
                            self.state.brief_source = crate::app::state::BriefSource::File(path);
                            self.state.request_fetch = true;
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    let has_brief = self.state.brief.is_some();
                    ui.add_enabled_ui(has_brief, |ui| {
                        ui.menu_button("Export", |ui| {
                            if ui.button("Notes\u{2026}").clicked() {
                                self.state.request_export_notes = true;
                                ui.close_menu();
                            }
                            if ui.button("CSV\u{2026}").clicked() {
                                self.state.request_export_csv = true;
                                ui.close_menu();
                            }
                        });
                    });
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("View", |ui| {
                    if ui.button("Review Summary").clicked() {
                        self.state.show_summary = true;
                        ui.close_menu();
                    }
                    let has_brief = self.state.brief.is_some();
                    ui.add_enabled_ui(has_brief, |ui| {
                        if ui.button("Case Timeline").clicked() {
                            self.state.show_timeline = true;
                            ui.close_menu();
                        }
                    });
                    ui.separator();
                    let focus_label = if self.state.focus_mode {
                        "Exit Focus Mode"
                    } else {
                        "Focus Mode"
                    };
                    if ui.button(focus_label).clicked() {
                        self.state.focus_mode = !self.state.focus_mode;
                        ui.close_menu();
                    }
                });
                ui.menu_button("Review", |ui| {
                    let can_verify = self.state.brief.is_some() && !self.state.verify_in_progress;
                    ui.add_enabled_ui(can_verify, |ui| {
                        if ui.button("Re-run Verification").clicked() {
                            self.state.request_verify = true;
                            ui.close_menu();
                        }
                    });
                });
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                // VERIFYING badge — shown while the simulated cycle runs.
                if self.state.verify_in_progress {
                    ui.label(
                        egui::RichText::new(" \u{25cf} VERIFYING ")
                            .strong()
                            .color(egui::Color32::from_rgb(217, 119, 6))
                            .background_color(egui::Color32::from_rgba_premultiplied(
                                217, 119, 6, 28,
                            )),
                    );
                    ui.separator();
                }
                ui.label(&self.state.status_message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let total = self.state.stats.total;
                    let filtered = self.state.filtered_indices.len();
                    if total > 0 {
                        ui.label(format!("{filtered}/{total} citations"));
                    }
                });
            });
        });

        // Summary metric strip (hidden in focus mode and before load).
        if !self.state.focus_mode && self.state.brief.is_some() {
            egui::TopBottomPanel::top("summary_strip")
                .exact_height(ui::theme::SUMMARY_STRIP_HEIGHT)
                .show(ctx, |ui| {
                    ui::panels::summary::render(ui, &self.state);
                });
        }

        // Left sidebar — citation queue (hidden in focus mode).
        if !self.state.focus_mode {
            egui::SidePanel::left("queue_panel")
                .default_width(ui::theme::QUEUE_PANEL_WIDTH)
                .resizable(true)
                .show(ctx, |ui| {
                    ui::panels::queue::render(ui, &mut self.state);
                });
        }

        // Right sidebar — citation details.
        egui::SidePanel::right("detail_panel")
            .default_width(ui::theme::DETAIL_PANEL_WIDTH)
            .resizable(true)
            .show(ctx, |ui| {
                ui::panels::detail::render(ui, &self.state);
            });

        // Central panel — the annotated brief.
        egui::CentralPanel::default().show(ctx, |ui| {
            ui::panels::document::render(ui, &mut self.state);
        });

        // Dialogs (modal-ish)
        ui::panels::timeline::render(ctx, &mut self.state);
        ui::panels::review_summary::render(ctx, &mut self.state);
    }

    /// Called by eframe when the application window is about to close.
    /// Stops any background worker so threads exit promptly.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.fetch_manager.cancel_fetch();
        self.verify_manager.cancel_verify();
    }
}
