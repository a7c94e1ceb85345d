// CiteSleuth - ui/panels/timeline.rs
//
// Case timeline window: every citation in the brief ordered by decision
// year (newest first, ties broken by case name), with its verification
// outcome alongside.

use crate::app::state::AppState;
use crate::core::model::{Brief, Severity};
use crate::ui::panels::queue::severity_pill;
use crate::util::constants;

/// One row of the timeline, fully resolved for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineItem {
    pub year: i32,
    pub case_name: String,
    pub reporter_line: String,
    pub severity: Severity,
    pub status_label: &'static str,
    pub message: String,
}

/// Build the timeline rows: year descending, then case name ascending.
/// Citations without a result show pending placeholders.
pub fn timeline_items(brief: &Brief) -> Vec<TimelineItem> {
    let mut items: Vec<TimelineItem> = brief
        .citations
        .iter()
        .map(|citation| {
            let result = brief.result_for(&citation.id);
            TimelineItem {
                year: citation.year,
                case_name: citation.case_name.clone(),
                reporter_line: citation.reporter_line(),
                severity: result.map(|r| r.severity).unwrap_or_default(),
                status_label: result
                    .map(|r| r.status.label())
                    .unwrap_or(constants::PENDING_STATUS_LABEL),
                message: result
                    .map(|r| r.message.clone())
                    .unwrap_or_else(|| constants::PENDING_MESSAGE.to_string()),
            }
        })
        .collect();

    items.sort_by(|left, right| {
        right
            .year
            .cmp(&left.year)
            .then_with(|| left.case_name.cmp(&right.case_name))
    });
    items
}

/// Render the case timeline window (if state.show_timeline is true).
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_timeline {
        return;
    }
    let Some(brief) = &state.brief else {
        state.show_timeline = false;
        return;
    };

    let items = timeline_items(brief);
    let mut open = true;

    egui::Window::new("Case Timeline")
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .min_width(460.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new("Cited authorities by decision year, newest first.")
                    .small()
                    .weak(),
            );
            ui.separator();

            egui::ScrollArea::vertical()
                .max_height(340.0)
                .show(ui, |ui| {
                    for item in &items {
                        ui.horizontal(|ui| {
                            ui.label(
                                egui::RichText::new(item.year.to_string())
                                    .monospace()
                                    .strong(),
                            );
                            ui.vertical(|ui| {
                                ui.horizontal(|ui| {
                                    ui.label(egui::RichText::new(&item.case_name).strong());
                                    severity_pill(ui, &item.severity);
                                });
                                ui.label(
                                    egui::RichText::new(format!(
                                        "{} \u{2014} {}",
                                        item.reporter_line, item.status_label
                                    ))
                                    .small()
                                    .weak(),
                                );
                                ui.label(egui::RichText::new(&item.message).small());
                            });
                        });
                        ui.separator();
                    }
                });

            if ui.button("Close").clicked() {
                state.show_timeline = false;
            }
        });

    if !open {
        state.show_timeline = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::brief::load_sample_brief;

    #[test]
    fn items_sorted_year_descending_then_case_name() {
        let brief = load_sample_brief().unwrap();
        let items = timeline_items(&brief);

        assert_eq!(items.len(), brief.citations.len());
        for pair in items.windows(2) {
            assert!(
                pair[0].year > pair[1].year
                    || (pair[0].year == pair[1].year && pair[0].case_name <= pair[1].case_name),
                "out of order: {} ({}) before {} ({})",
                pair[0].case_name,
                pair[0].year,
                pair[1].case_name,
                pair[1].year
            );
        }
    }

    #[test]
    fn citation_without_result_shows_pending() {
        let mut brief = load_sample_brief().unwrap();
        brief.verification_results.clear();
        let items = timeline_items(&brief);
        assert!(items.iter().all(|i| i.status_label == "Pending"));
        assert!(items.iter().all(|i| i.severity == Severity::None));
    }
}
