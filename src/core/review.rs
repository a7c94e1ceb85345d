// CiteSleuth - core/review.rs
//
// Pure review utilities: severity statistics and wrap-around selection
// stepping. Core layer: no I/O or UI dependencies.

use crate::core::model::{ReviewStats, Severity, VerificationResult};

/// Aggregate severity counts for a result set.
///
/// `total` is the citation count, which may exceed the result count when
/// some citations have no verification result yet.
pub fn build_stats(total: usize, results: &[VerificationResult]) -> ReviewStats {
    let mut stats = ReviewStats {
        total,
        ..Default::default()
    };
    for result in results {
        match result.severity {
            Severity::Critical => stats.critical += 1,
            Severity::Warning => stats.warning += 1,
            Severity::None => stats.verified += 1,
        }
    }
    stats
}

/// Direction of a selection step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Step a selection index through a list of `total` items with wrap-around.
///
/// - Empty list: always `None` (no selection possible).
/// - No current selection: `Next` enters at the first item, `Previous` at
///   the last.
/// - Otherwise the index moves one step, wrapping last→first and
///   first→last.
pub fn step_index(current: Option<usize>, direction: Direction, total: usize) -> Option<usize> {
    if total == 0 {
        return None;
    }
    let last = total - 1;

    let next = match (current, direction) {
        (None, Direction::Next) => 0,
        (None, Direction::Previous) => last,
        (Some(idx), Direction::Next) => {
            if idx >= last {
                0
            } else {
                idx + 1
            }
        }
        (Some(idx), Direction::Previous) => {
            if idx == 0 {
                last
            } else {
                idx - 1
            }
        }
    };
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::VerificationStatus;

    fn make_result(id: u32, severity: Severity) -> VerificationResult {
        VerificationResult {
            id: format!("ver-{id}"),
            citation_id: format!("cit-{id}"),
            status: VerificationStatus::Valid,
            severity,
            message: "msg".to_string(),
            details: None,
        }
    }

    #[test]
    fn stats_partition_result_set() {
        let results = vec![
            make_result(1, Severity::Critical),
            make_result(2, Severity::Warning),
            make_result(3, Severity::Warning),
            make_result(4, Severity::None),
        ];
        let stats = build_stats(4, &results);
        assert_eq!(
            stats,
            ReviewStats {
                total: 4,
                verified: 1,
                warning: 2,
                critical: 1,
            }
        );
        assert_eq!(stats.verified + stats.warning + stats.critical, 4);
    }

    #[test]
    fn stats_counts_never_exceed_total_with_partial_results() {
        // Six citations, only two verified so far.
        let results = vec![
            make_result(1, Severity::None),
            make_result(2, Severity::Critical),
        ];
        let stats = build_stats(6, &results);
        assert_eq!(stats.total, 6);
        assert!(stats.verified + stats.warning + stats.critical <= stats.total);
    }

    #[test]
    fn stats_empty_results() {
        let stats = build_stats(0, &[]);
        assert_eq!(stats, ReviewStats::default());
    }

    #[test]
    fn step_wraps_forward_from_last() {
        assert_eq!(step_index(Some(2), Direction::Next, 3), Some(0));
    }

    #[test]
    fn step_wraps_backward_from_first() {
        assert_eq!(step_index(Some(0), Direction::Previous, 3), Some(2));
    }

    #[test]
    fn step_moves_within_range() {
        assert_eq!(step_index(Some(0), Direction::Next, 3), Some(1));
        assert_eq!(step_index(Some(2), Direction::Previous, 3), Some(1));
    }

    #[test]
    fn step_empty_list_yields_no_selection() {
        assert_eq!(step_index(None, Direction::Next, 0), None);
        assert_eq!(step_index(Some(5), Direction::Previous, 0), None);
    }

    #[test]
    fn step_enters_list_without_selection() {
        assert_eq!(step_index(None, Direction::Next, 4), Some(0));
        assert_eq!(step_index(None, Direction::Previous, 4), Some(3));
    }

    #[test]
    fn step_single_item_stays_put() {
        assert_eq!(step_index(Some(0), Direction::Next, 1), Some(0));
        assert_eq!(step_index(Some(0), Direction::Previous, 1), Some(0));
    }
}
