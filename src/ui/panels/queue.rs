// CiteSleuth - ui/panels/queue.rs
//
// Citation queue sidebar: severity filter chips with counts, text search,
// and the filtered citation list. Selecting a row drives the detail panel
// and the inline marker highlight.

use crate::app::state::AppState;
use crate::core::filter::FilterState;
use crate::core::model::Severity;
use crate::ui::theme;

/// Render the citation queue (left sidebar).
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Citation Queue");
    ui.label(
        egui::RichText::new("Select a citation to inspect its history.")
            .small()
            .weak(),
    );
    ui.separator();

    render_filter_chips(ui, state);

    ui.add_space(4.0);
    let search_response = ui.add(
        egui::TextEdit::singleline(&mut state.filter_state.text_search)
            .hint_text("Search citations"),
    );
    if search_response.changed() {
        state.apply_filters();
    }

    ui.separator();

    let Some(brief) = &state.brief else {
        ui.centered_and_justified(|ui| {
            ui.label("No brief loaded.");
        });
        return;
    };

    if state.filtered_indices.is_empty() {
        ui.centered_and_justified(|ui| {
            ui.label("No citations match this filter.");
        });
        return;
    }

    // Clicks are collected and applied after the scroll area releases the
    // immutable borrow of `state.brief` held by `brief`.
    let mut clicked: Option<usize> = None;

    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            for &citation_index in &state.filtered_indices {
                let Some(citation) = brief.citations.get(citation_index) else {
                    continue;
                };
                let severity = brief
                    .result_for(&citation.id)
                    .map(|r| r.severity)
                    .unwrap_or_default();
                let is_selected = state.selected_citation == Some(citation_index);

                let response = egui::Frame::group(ui.style())
                    .fill(if is_selected {
                        ui.style().visuals.selection.bg_fill.linear_multiply(0.35)
                    } else {
                        egui::Color32::TRANSPARENT
                    })
                    .inner_margin(egui::Margin::symmetric(8, 6))
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.horizontal(|ui| {
                            ui.vertical(|ui| {
                                ui.label(egui::RichText::new(&citation.case_name).strong());
                                ui.label(
                                    egui::RichText::new(citation.reporter_line()).small().weak(),
                                );
                            });
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    severity_pill(ui, &severity);
                                },
                            );
                        });
                    })
                    .response;

                if response.interact(egui::Sense::click()).clicked() {
                    clicked = Some(citation_index);
                }
            }
        });

    if let Some(citation_index) = clicked {
        state.select_citation(citation_index);
    }
}

/// Severity filter chips: All / Critical / Warning / Verified with counts.
/// A chip whose count is zero is disabled.
fn render_filter_chips(ui: &mut egui::Ui, state: &mut AppState) {
    let mut next_filter: Option<Option<Severity>> = None;

    ui.horizontal_wrapped(|ui| {
        let all_selected = state.filter_state.severity.is_none();
        if ui
            .selectable_label(all_selected, format!("All {}", state.stats.total))
            .clicked()
        {
            next_filter = Some(None);
        }

        for severity in Severity::all() {
            let count = FilterState::chip_count(&state.stats, *severity);
            let selected = state.filter_state.severity == Some(*severity);
            let label = format!("{} {count}", severity.label());

            let chip = ui.add_enabled(count > 0, egui::SelectableLabel::new(selected, label));
            if chip.clicked() {
                next_filter = Some(Some(*severity));
            }
        }
    });

    if let Some(filter) = next_filter {
        state.filter_state.severity = filter;
        state.apply_filters();
    }
}

/// Small coloured severity pill.
pub(crate) fn severity_pill(ui: &mut egui::Ui, severity: &Severity) {
    egui::Frame::new()
        .fill(theme::marker_fill(severity))
        .corner_radius(egui::CornerRadius::same(8))
        .inner_margin(egui::Margin::symmetric(6, 2))
        .show(ui, |ui| {
            ui.label(
                egui::RichText::new(severity.label())
                    .small()
                    .color(theme::marker_text(severity)),
            );
        });
}
