// CiteSleuth - ui/theme.rs
//
// Colour scheme, severity colour mapping, and layout constants.
// No dependencies on app state or business logic.

use crate::core::model::Severity;
use egui::Color32;

/// Accent colour for a severity (pills, callout borders, metric values).
pub fn severity_colour(severity: &Severity) -> Color32 {
    match severity {
        Severity::Critical => Color32::from_rgb(220, 38, 38), // Red 600
        Severity::Warning => Color32::from_rgb(217, 119, 6),  // Amber 600
        Severity::None => Color32::from_rgb(22, 163, 74),     // Green 600
    }
}

/// Background fill of an inline citation marker.
pub fn marker_fill(severity: &Severity) -> Color32 {
    match severity {
        Severity::Critical => Color32::from_rgb(254, 226, 226), // Red 100
        Severity::Warning => Color32::from_rgb(254, 243, 199),  // Amber 100
        Severity::None => Color32::from_rgb(220, 252, 231),     // Green 100
    }
}

/// Text colour of an inline citation marker (dark shade on the pale fill).
pub fn marker_text(severity: &Severity) -> Color32 {
    match severity {
        Severity::Critical => Color32::from_rgb(153, 27, 27), // Red 800
        Severity::Warning => Color32::from_rgb(146, 64, 14),  // Amber 800
        Severity::None => Color32::from_rgb(22, 101, 52),     // Green 800
    }
}

/// Subtle background tint for the detail callout of a severity.
pub fn callout_fill(severity: &Severity) -> Color32 {
    match severity {
        Severity::Critical => Color32::from_rgba_premultiplied(220, 38, 38, 20),
        Severity::Warning => Color32::from_rgba_premultiplied(217, 119, 6, 18),
        Severity::None => Color32::from_rgba_premultiplied(22, 163, 74, 16),
    }
}

/// Ring colour of the selected citation marker.
pub const SELECTED_RING: Color32 = Color32::from_rgb(15, 23, 42); // Slate 900

/// Layout constants.
pub const QUEUE_PANEL_WIDTH: f32 = 300.0;
pub const DETAIL_PANEL_WIDTH: f32 = 330.0;
pub const SUMMARY_STRIP_HEIGHT: f32 = 64.0;

/// Heading sizes by markdown level (level 1 at index 0).
pub const HEADING_SIZES: [f32; 4] = [22.0, 18.0, 15.5, 13.0];

/// Body text size of the rendered brief.
pub const BODY_TEXT_SIZE: f32 = 14.0;
