// CiteSleuth - ui/panels/summary.rs
//
// Metric strip under the menu bar: total / verified / warning / critical
// counts for the loaded brief. Hidden in focus mode.

use crate::app::state::AppState;
use crate::core::model::Severity;
use crate::ui::theme;

/// Render the summary metric strip.
pub fn render(ui: &mut egui::Ui, state: &AppState) {
    ui.horizontal_centered(|ui| {
        ui.spacing_mut().item_spacing.x = 12.0;

        metric_card(ui, "Total Citations", state.stats.total, None);
        metric_card(
            ui,
            "Verified",
            state.stats.verified,
            Some(theme::severity_colour(&Severity::None)),
        );
        metric_card(
            ui,
            "Warnings",
            state.stats.warning,
            Some(theme::severity_colour(&Severity::Warning)),
        );
        metric_card(
            ui,
            "Critical",
            state.stats.critical,
            Some(theme::severity_colour(&Severity::Critical)),
        );
    });
}

/// One metric card: small label over a large (optionally coloured) value.
fn metric_card(ui: &mut egui::Ui, label: &str, value: usize, tone: Option<egui::Color32>) {
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::symmetric(14, 6))
        .show(ui, |ui| {
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(label).small().weak());
                let value_text = egui::RichText::new(value.to_string()).size(20.0).strong();
                match tone {
                    Some(colour) => ui.label(value_text.color(colour)),
                    None => ui.label(value_text),
                };
            });
        });
}
