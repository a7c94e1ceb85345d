// CiteSleuth - core/filter.rs
//
// Citation queue filtering. All active filters are AND-combined.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::model::{Brief, ReviewStats, Severity};

/// Complete filter state. Fields are AND-combined when applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Severity to include (None = all severities). A citation without a
    /// verification result counts as `Severity::None` for filtering.
    pub severity: Option<Severity>,

    /// Substring text search (case-insensitive) across citation text,
    /// case name, and reporter. Empty = no filter.
    pub text_search: String,
}

impl FilterState {
    /// Returns true if no filters are active.
    pub fn is_empty(&self) -> bool {
        self.severity.is_none() && self.text_search.is_empty()
    }

    /// Count of citations each severity chip would show, derived from stats.
    /// Order matches `Severity::all()`; the "All" chip uses `stats.total`.
    pub fn chip_count(stats: &ReviewStats, severity: Severity) -> usize {
        match severity {
            Severity::Critical => stats.critical,
            Severity::Warning => stats.warning,
            Severity::None => stats.verified,
        }
    }
}

/// Apply filters to a brief's citation list, returning indices of matching
/// citations.
///
/// Returns a Vec of indices into `brief.citations`. This avoids copying
/// citations and keeps queue rows addressable by stable position.
pub fn apply_filters(brief: &Brief, filter: &FilterState) -> Vec<usize> {
    if filter.is_empty() {
        return (0..brief.citations.len()).collect();
    }

    let text_lower = filter.text_search.to_lowercase();

    brief
        .citations
        .iter()
        .enumerate()
        .filter(|(_, citation)| {
            if let Some(wanted) = filter.severity {
                let severity = brief
                    .result_for(&citation.id)
                    .map(|r| r.severity)
                    .unwrap_or_default();
                if severity != wanted {
                    return false;
                }
            }

            if !text_lower.is_empty() {
                let haystack = format!(
                    "{} {} {}",
                    citation.text, citation.case_name, citation.reporter
                )
                .to_lowercase();
                if !haystack.contains(&text_lower) {
                    return false;
                }
            }

            true
        })
        .map(|(idx, _)| idx)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{Citation, VerificationResult, VerificationStatus};

    fn make_brief() -> Brief {
        let citation = |n: u32, case_name: &str| Citation {
            id: format!("cit-{n}"),
            text: format!("{case_name}, {n} U.S. {n} (1990)"),
            case_name: case_name.to_string(),
            reporter: format!("{n} U.S. {n}"),
            pin_cite: None,
            year: 1990,
        };
        let result = |n: u32, severity: Severity| VerificationResult {
            id: format!("ver-{n}"),
            citation_id: format!("cit-{n}"),
            status: VerificationStatus::Valid,
            severity,
            message: String::new(),
            details: None,
        };
        Brief {
            title: "Test".to_string(),
            content: String::new(),
            citations: vec![
                citation(1, "Adler v. Baker"),
                citation(2, "Croft v. Dunn"),
                citation(3, "Ellis v. Frost"),
            ],
            verification_results: vec![
                result(1, Severity::Critical),
                result(2, Severity::Warning),
                // cit-3 has no result: filters as Severity::None.
            ],
        }
    }

    #[test]
    fn empty_filter_returns_all_indices() {
        let brief = make_brief();
        assert_eq!(apply_filters(&brief, &FilterState::default()), vec![0, 1, 2]);
    }

    #[test]
    fn severity_filter_selects_matching() {
        let brief = make_brief();
        let filter = FilterState {
            severity: Some(Severity::Warning),
            ..Default::default()
        };
        assert_eq!(apply_filters(&brief, &filter), vec![1]);
    }

    #[test]
    fn missing_result_counts_as_verified() {
        let brief = make_brief();
        let filter = FilterState {
            severity: Some(Severity::None),
            ..Default::default()
        };
        assert_eq!(apply_filters(&brief, &filter), vec![2]);
    }

    #[test]
    fn text_search_is_case_insensitive() {
        let brief = make_brief();
        let filter = FilterState {
            text_search: "CROFT".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&brief, &filter), vec![1]);
    }

    #[test]
    fn combined_filters_are_and_ed() {
        let brief = make_brief();
        let filter = FilterState {
            severity: Some(Severity::Critical),
            text_search: "frost".to_string(),
        };
        assert!(apply_filters(&brief, &filter).is_empty());
    }

    #[test]
    fn chip_counts_follow_stats() {
        let stats = ReviewStats {
            total: 6,
            verified: 3,
            warning: 2,
            critical: 1,
        };
        assert_eq!(FilterState::chip_count(&stats, Severity::Critical), 1);
        assert_eq!(FilterState::chip_count(&stats, Severity::Warning), 2);
        assert_eq!(FilterState::chip_count(&stats, Severity::None), 3);
    }
}
