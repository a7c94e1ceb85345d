// CiteSleuth - app/state.rs
//
// Application state management. Holds the loaded brief, filter state,
// selection, review statistics, and window flags.
// Owned by the eframe::App implementation.

use crate::core::filter::FilterState;
use crate::core::model::{Brief, Citation, ReviewStats, VerificationResult};
use crate::core::review::{self, Direction};
use std::path::PathBuf;

/// Where the current brief came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BriefSource {
    /// The built-in sample dataset embedded in the binary.
    Sample,

    /// A user-supplied brief JSON file.
    File(PathBuf),
}

impl BriefSource {
    /// Human-readable description for the summary window and status bar.
    pub fn describe(&self) -> String {
        match self {
            BriefSource::Sample => "Built-in sample brief".to_string(),
            BriefSource::File(path) => path.display().to_string(),
        }
    }
}

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// The loaded brief (None until the fetch completes).
    pub brief: Option<Brief>,

    /// Where the brief is fetched from; a retry re-uses this source.
    pub brief_source: BriefSource,

    /// Whether a fetch is currently in progress.
    pub fetch_in_progress: bool,

    /// Attempt counter shown while a fetch is running or after it failed.
    pub fetch_attempts: u32,

    /// Error message after a failed fetch (retries exhausted).
    pub fetch_error: Option<String>,

    /// Set by panels to request a (re-)fetch; consumed by the gui loop.
    pub request_fetch: bool,

    /// Non-fatal validation warnings for the current brief.
    pub validation_warnings: Vec<String>,

    /// Severity statistics for the current brief.
    pub stats: ReviewStats,

    /// Current filter configuration.
    pub filter_state: FilterState,

    /// Indices of citations matching the current filter (into
    /// `brief.citations`).
    pub filtered_indices: Vec<usize>,

    /// Index of the selected citation (into `brief.citations`). Always a
    /// member of `filtered_indices`.
    pub selected_citation: Option<usize>,

    /// Whether a verification cycle is currently running.
    pub verify_in_progress: bool,

    /// Set by panels to request a verification cycle; consumed by the gui
    /// loop (ignored while one is already running).
    pub request_verify: bool,

    /// Set by panels/menus to request a notes export; consumed by the gui
    /// loop, which owns the save dialog and file I/O.
    pub request_export_notes: bool,

    /// Set by panels/menus to request a CSV export.
    pub request_export_csv: bool,

    /// Focus mode hides the summary strip and side panels.
    pub focus_mode: bool,

    /// Whether to show the case timeline window.
    pub show_timeline: bool,

    /// Whether to show the review summary dialog.
    pub show_summary: bool,

    /// Status message for the status bar.
    pub status_message: String,

    /// Whether debug mode is enabled.
    pub debug_mode: bool,
}

impl AppState {
    /// Create initial state. The brief arrives later via the fetch manager.
    pub fn new(brief_source: BriefSource, debug_mode: bool) -> Self {
        Self {
            brief: None,
            brief_source,
            fetch_in_progress: false,
            fetch_attempts: 0,
            fetch_error: None,
            request_fetch: true,
            validation_warnings: Vec::new(),
            stats: ReviewStats::default(),
            filter_state: FilterState::default(),
            filtered_indices: Vec::new(),
            selected_citation: None,
            verify_in_progress: false,
            request_verify: false,
            request_export_notes: false,
            request_export_csv: false,
            focus_mode: false,
            show_timeline: false,
            show_summary: false,
            status_message: "Loading brief...".to_string(),
            debug_mode,
        }
    }

    /// Install a freshly fetched brief and derive stats, warnings, and the
    /// filtered view. Resets selection.
    pub fn set_brief(&mut self, brief: Brief) {
        self.validation_warnings = crate::core::brief::validate_brief(&brief);
        self.stats = review::build_stats(brief.citations.len(), &brief.verification_results);
        self.brief = Some(brief);
        self.fetch_error = None;
        self.selected_citation = None;
        self.apply_filters();
    }

    /// Recompute filtered indices from the current brief and filter state.
    pub fn apply_filters(&mut self) {
        self.filtered_indices = match &self.brief {
            Some(brief) => crate::core::filter::apply_filters(brief, &self.filter_state),
            None => Vec::new(),
        };

        // Drop a selection that the new filter no longer shows.
        if let Some(idx) = self.selected_citation {
            if !self.filtered_indices.contains(&idx) {
                self.selected_citation = None;
            }
        }
    }

    /// Select a citation by its index into `brief.citations`.
    ///
    /// A citation hidden by the current filter cannot hold the selection;
    /// selecting it is a no-op that clears instead (mirrors dropping the
    /// selection when a filter change hides it).
    pub fn select_citation(&mut self, citation_index: usize) {
        if self.filtered_indices.contains(&citation_index) {
            self.selected_citation = Some(citation_index);
        } else {
            self.selected_citation = None;
        }
    }

    /// Step the selection through the filtered list with wrap-around.
    pub fn step_selection(&mut self, direction: Direction) {
        let current_pos = self
            .selected_citation
            .and_then(|sel| self.filtered_indices.iter().position(|&idx| idx == sel));

        if let Some(pos) = review::step_index(current_pos, direction, self.filtered_indices.len())
        {
            self.selected_citation = self.filtered_indices.get(pos).copied();
        }
    }

    /// Clear the selection (Escape).
    pub fn clear_selection(&mut self) {
        self.selected_citation = None;
    }

    /// The currently selected citation, if any.
    pub fn selected(&self) -> Option<&Citation> {
        let brief = self.brief.as_ref()?;
        self.selected_citation
            .and_then(|idx| brief.citations.get(idx))
    }

    /// The verification result for the selected citation, if any.
    pub fn selected_result(&self) -> Option<&VerificationResult> {
        let brief = self.brief.as_ref()?;
        self.selected().and_then(|c| brief.result_for(&c.id))
    }

    /// Reset fetch-related state ahead of a retry.
    pub fn reset_for_fetch(&mut self) {
        self.brief = None;
        self.fetch_error = None;
        self.fetch_attempts = 0;
        self.validation_warnings.clear();
        self.stats = ReviewStats::default();
        self.filtered_indices.clear();
        self.selected_citation = None;
        self.status_message = "Loading brief...".to_string();
    }
}
