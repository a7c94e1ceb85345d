// CiteSleuth - ui/panels/document.rs
//
// Annotated brief viewer (central panel). Renders the brief's blocks with
// inline citation markers, plus the loading and fetch-failure states.
//
// Markers are buttons styled by resolved severity; clicking one selects
// the citation. Selection mutations are deferred until rendering releases
// the immutable borrow of `state.brief`.

use crate::app::state::AppState;
use crate::core::markup::{parse_blocks, Block, Segment};
use crate::core::model::Brief;
use crate::ui::theme;

/// Render the document panel (central area).
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    if state.fetch_in_progress {
        render_loading(ui, state);
        return;
    }

    if let Some(error) = state.fetch_error.clone() {
        render_failed(ui, state, &error);
        return;
    }

    let Some(brief) = &state.brief else {
        ui.centered_and_justified(|ui| {
            ui.label("No brief loaded. Open one via File \u{2192} Open Brief.");
        });
        return;
    };

    // Action row
    let mut request_verify = false;
    let mut toggle_focus = false;
    let mut open_timeline = false;
    let mut request_export = false;

    ui.horizontal(|ui| {
        let verify_label = if state.verify_in_progress {
            "Verifying\u{2026}"
        } else {
            "Re-run Verification"
        };
        if ui
            .add_enabled(!state.verify_in_progress, egui::Button::new(verify_label))
            .clicked()
        {
            request_verify = true;
        }

        let focus_label = if state.focus_mode {
            "Exit Focus"
        } else {
            "Focus Mode"
        };
        if ui.button(focus_label).clicked() {
            toggle_focus = true;
        }

        if ui.button("Export Notes").clicked() {
            request_export = true;
        }

        if ui.button("View Timeline").clicked() {
            open_timeline = true;
        }
    });

    ui.separator();

    // Rendered brief
    let mut clicked: Option<usize> = None;

    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            ui.label(
                egui::RichText::new(&brief.title)
                    .size(theme::HEADING_SIZES[0])
                    .strong(),
            );
            ui.add_space(8.0);

            for block in parse_blocks(&brief.content, brief.citations.len()) {
                match block {
                    Block::Heading { level, text } => {
                        ui.add_space(10.0);
                        let size = theme::HEADING_SIZES
                            [usize::from(level.saturating_sub(1)).min(theme::HEADING_SIZES.len() - 1)];
                        ui.label(egui::RichText::new(text).size(size).strong());
                        ui.add_space(4.0);
                    }
                    Block::Paragraph { segments } => {
                        render_paragraph(ui, brief, &segments, state.selected_citation, &mut clicked);
                        ui.add_space(8.0);
                    }
                }
            }
        });

    if let Some(citation_index) = clicked {
        state.select_citation(citation_index);
    }
    if request_verify {
        state.request_verify = true;
    }
    if toggle_focus {
        state.focus_mode = !state.focus_mode;
    }
    if open_timeline {
        state.show_timeline = true;
    }
    if request_export {
        state.request_export_notes = true;
    }
}

/// One paragraph: literal text and inline citation markers flowing together.
fn render_paragraph(
    ui: &mut egui::Ui,
    brief: &Brief,
    segments: &[Segment],
    selected: Option<usize>,
    clicked: &mut Option<usize>,
) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;

        for segment in segments {
            match segment {
                Segment::Text(text) => {
                    ui.label(egui::RichText::new(text).size(theme::BODY_TEXT_SIZE));
                }
                Segment::Marker { citation_index } => {
                    let Some(citation) = brief.citations.get(*citation_index) else {
                        continue;
                    };
                    let severity = brief
                        .result_for(&citation.id)
                        .map(|r| r.severity)
                        .unwrap_or_default();
                    let is_selected = selected == Some(*citation_index);

                    let mut button = egui::Button::new(
                        egui::RichText::new(&citation.text)
                            .size(theme::BODY_TEXT_SIZE)
                            .color(theme::marker_text(&severity)),
                    )
                    .fill(theme::marker_fill(&severity))
                    .corner_radius(egui::CornerRadius::same(4));
                    if is_selected {
                        button = button.stroke(egui::Stroke::new(1.5, theme::SELECTED_RING));
                    }

                    let response = ui
                        .add(button)
                        .on_hover_text(format!("{} \u{2014} {}", severity.label(), citation.case_name));
                    if response.clicked() {
                        *clicked = Some(*citation_index);
                    }
                }
            }
        }
    });
}

/// Loading state: spinner plus attempt information while retrying.
fn render_loading(ui: &mut egui::Ui, state: &AppState) {
    ui.centered_and_justified(|ui| {
        ui.vertical_centered(|ui| {
            ui.spinner();
            ui.add_space(8.0);
            if state.fetch_attempts > 0 {
                ui.label(format!(
                    "Loading brief\u{2026} (attempt {} failed, retrying)",
                    state.fetch_attempts
                ));
            } else {
                ui.label("Loading brief\u{2026}");
            }
        });
    });
}

/// Failure state after retries are exhausted: message plus a manual retry.
fn render_failed(ui: &mut egui::Ui, state: &mut AppState, error: &str) {
    ui.centered_and_justified(|ui| {
        ui.vertical_centered(|ui| {
            ui.label(
                egui::RichText::new("Brief could not be loaded")
                    .size(theme::HEADING_SIZES[1])
                    .strong(),
            );
            ui.add_space(4.0);
            ui.label(error);
            if state.fetch_attempts > 0 {
                ui.label(
                    egui::RichText::new(format!("{} attempts made", state.fetch_attempts))
                        .small()
                        .weak(),
                );
            }
            ui.add_space(10.0);
            if ui.button("Retry").clicked() {
                state.request_fetch = true;
            }
        });
    });
}
