// CiteSleuth - ui/panels/review_summary.rs
//
// Review summary modal window: overall statistics, brief source, and any
// validation warnings from loading.

use crate::app::state::AppState;

/// Render the review summary dialog (if state.show_summary is true).
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_summary {
        return;
    }

    let mut open = true;
    egui::Window::new("Review Summary")
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .min_width(420.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            if state.brief.is_some() {
                ui.strong("Overview");
                egui::Grid::new("review_summary_overview")
                    .num_columns(2)
                    .spacing([16.0, 4.0])
                    .show(ui, |ui| {
                        ui.label("Source:");
                        ui.label(state.brief_source.describe());
                        ui.end_row();

                        ui.label("Total citations:");
                        ui.label(state.stats.total.to_string());
                        ui.end_row();

                        ui.label("Verified:");
                        ui.label(state.stats.verified.to_string());
                        ui.end_row();

                        ui.label("Warnings:");
                        let warn_colour = if state.stats.warning > 0 {
                            egui::Color32::from_rgb(253, 186, 116)
                        } else {
                            ui.style().visuals.text_color()
                        };
                        ui.colored_label(warn_colour, state.stats.warning.to_string());
                        ui.end_row();

                        ui.label("Critical:");
                        let crit_colour = if state.stats.critical > 0 {
                            egui::Color32::from_rgb(248, 113, 113)
                        } else {
                            ui.style().visuals.text_color()
                        };
                        ui.colored_label(crit_colour, state.stats.critical.to_string());
                        ui.end_row();

                        let pending = state
                            .stats
                            .total
                            .saturating_sub(state.stats.verified + state.stats.warning + state.stats.critical);
                        if pending > 0 {
                            ui.label("Pending:");
                            ui.label(pending.to_string());
                            ui.end_row();
                        }
                    });

                if !state.validation_warnings.is_empty() {
                    ui.add_space(8.0);
                    ui.separator();
                    ui.strong(format!(
                        "Data warnings ({})",
                        state.validation_warnings.len()
                    ));

                    egui::ScrollArea::vertical()
                        .id_salt("review_summary_warnings")
                        .max_height(120.0)
                        .show(ui, |ui| {
                            for warning in &state.validation_warnings {
                                ui.label(
                                    egui::RichText::new(warning)
                                        .color(egui::Color32::from_rgb(253, 186, 116))
                                        .size(11.5),
                                );
                            }
                        });
                }
            } else {
                ui.label("No brief has been loaded yet.");
            }

            ui.add_space(8.0);
            ui.separator();
            if ui.button("Close").clicked() {
                state.show_summary = false;
            }
        });

    if !open {
        state.show_summary = false;
    }
}
