// CiteSleuth - ui/panels/detail.rs
//
// Citation detail sidebar: fields of the selected citation plus its
// verification result, quote comparison, and treatment history.

use crate::app::state::AppState;
use crate::ui::panels::queue::severity_pill;
use crate::ui::theme;
use crate::util::constants;

/// Render the detail panel (right sidebar).
pub fn render(ui: &mut egui::Ui, state: &AppState) {
    ui.heading("Citation Details");

    let Some(citation) = state.selected() else {
        ui.separator();
        ui.label("Pick a citation flag inside the brief or from the review queue.");
        ui.add_space(6.0);
        ui.label(
            egui::RichText::new("Tip: Use arrow keys to move between citations.")
                .small()
                .weak(),
        );
        return;
    };

    let result = state.selected_result();
    let severity = result.map(|r| r.severity).unwrap_or_default();

    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(
                result
                    .map(|r| r.status.label())
                    .unwrap_or(constants::PENDING_STATUS_LABEL),
            )
                .small()
                .weak(),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            severity_pill(ui, &severity);
        });
    });
    ui.separator();

    // Verification message callout, tinted by severity.
    if let Some(result) = result {
        egui::Frame::new()
            .fill(theme::callout_fill(&severity))
            .corner_radius(egui::CornerRadius::same(4))
            .inner_margin(egui::Margin::same(8))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(&result.message);
            });
        ui.add_space(8.0);
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            egui::Grid::new("detail_grid")
                .num_columns(2)
                .spacing([8.0, 4.0])
                .show(ui, |ui| {
                    ui.label("Citation:");
                    ui.label(&citation.text);
                    ui.end_row();

                    ui.label("Case name:");
                    ui.label(&citation.case_name);
                    ui.end_row();

                    ui.label("Reporter:");
                    ui.label(citation.reporter_line());
                    ui.end_row();

                    if let Some(result) = result {
                        ui.label("Status:");
                        ui.label(result.status.label());
                        ui.end_row();
                    }
                });

            let details = result.and_then(|r| r.details.as_ref());

            if let Some(details) = details {
                if details.expected_quote.is_some() || details.actual_quote.is_some() {
                    ui.add_space(8.0);
                    ui.strong("Quote comparison");
                    if let Some(expected) = &details.expected_quote {
                        quote_card(ui, "Quote in brief", expected);
                    }
                    if let Some(actual) = &details.actual_quote {
                        quote_card(ui, "Source quote", actual);
                    }
                }

                if let Some(history) = &details.treatment_history {
                    ui.add_space(8.0);
                    ui.strong("Treatment history");
                    ui.label(history);
                }
            }
        });
}

/// One side of the quote comparison.
fn quote_card(ui: &mut egui::Ui, label: &str, quote: &str) {
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(6))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(label).small().weak());
            ui.label(egui::RichText::new(format!("\u{201c}{quote}\u{201d}")).italics());
        });
}
