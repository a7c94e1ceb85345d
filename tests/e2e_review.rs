// CiteSleuth - tests/e2e_review.rs
//
// End-to-end tests for the brief review pipeline.
//
// These tests exercise real JSON parsing, real markup rendering, and real
// file I/O for brief loading and export — no mocks, no stubs. This covers
// the full path from a brief on disk (or the embedded sample) to rendered
// blocks, review state, and an exported notes file.

use citesleuth::app::fetch::load_brief_file;
use citesleuth::app::state::{AppState, BriefSource};
use citesleuth::core::brief::{load_sample_brief, parse_brief_json, validate_brief};
use citesleuth::core::export;
use citesleuth::core::filter::FilterState;
use citesleuth::core::markup::{parse_blocks, Block, Segment};
use citesleuth::core::model::Severity;
use citesleuth::util::constants;
use std::path::PathBuf;

// =============================================================================
// Helpers
// =============================================================================

/// Absolute path to the on-disk fixture files.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Collect every segment of every paragraph of the given content.
fn all_segments(content: &str, citation_count: usize) -> Vec<Segment> {
    parse_blocks(content, citation_count)
        .into_iter()
        .filter_map(|block| match block {
            Block::Paragraph { segments } => Some(segments),
            Block::Heading { .. } => None,
        })
        .flatten()
        .collect()
}

// =============================================================================
// Token substitution E2E
// =============================================================================

/// A brief with exactly one citation renders one interactive marker for
/// citation 1 and preserves the out-of-range token literally.
#[test]
fn e2e_single_citation_with_out_of_range_token() {
    let json = r#"{
        "title": "Test Brief",
        "content": "See [[CITATION:1]] and [[CITATION:9]].",
        "citations": [{
            "id": "cit-1",
            "text": "Ashworth v. Delgado, 455 U.S. 301 (1982)",
            "caseName": "Ashworth v. Delgado",
            "reporter": "455 U.S. 301",
            "year": 1982
        }],
        "verificationResults": []
    }"#;
    let brief = parse_brief_json(json, &PathBuf::from("<test>")).unwrap();
    let segments = all_segments(&brief.content, brief.citations.len());

    let markers: Vec<_> = segments
        .iter()
        .filter(|s| matches!(s, Segment::Marker { .. }))
        .collect();
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0], &Segment::Marker { citation_index: 0 });

    let literal: String = segments
        .iter()
        .filter_map(|s| match s {
            Segment::Text(t) => Some(t.as_str()),
            Segment::Marker { .. } => None,
        })
        .collect();
    assert!(literal.contains("[[CITATION:9]]"));
    assert_eq!(literal, "See  and [[CITATION:9]].");
}

/// The embedded sample renders a marker for every in-range token and keeps
/// its deliberate dangling token literal.
#[test]
fn e2e_sample_brief_renders_markers() {
    let brief = load_sample_brief().unwrap();
    let segments = all_segments(&brief.content, brief.citations.len());

    let marker_count = segments
        .iter()
        .filter(|s| matches!(s, Segment::Marker { .. }))
        .count();
    assert_eq!(marker_count, 6);

    let literal: String = segments
        .iter()
        .filter_map(|s| match s {
            Segment::Text(t) => Some(t.as_str()),
            Segment::Marker { .. } => None,
        })
        .collect();
    assert!(
        literal.contains("[[CITATION:9]]"),
        "dangling sample token should stay literal"
    );
}

// =============================================================================
// Brief loading E2E
// =============================================================================

/// Loading a brief from disk produces a fully reviewable state: stats,
/// filtering, and selection behave as they do for the sample.
#[test]
fn e2e_loads_fixture_brief_into_review_state() {
    let brief = load_brief_file(&fixture("minimal_brief.json")).unwrap();
    assert!(validate_brief(&brief).is_empty());

    let mut state = AppState::new(BriefSource::File(fixture("minimal_brief.json")), false);
    state.set_brief(brief);

    assert_eq!(state.stats.total, 2);
    assert_eq!(state.stats.verified, 1);
    assert_eq!(state.stats.critical, 1);
    assert_eq!(state.filtered_indices, vec![0, 1]);

    // Narrow to critical: only Nellis remains, and it becomes selectable.
    state.filter_state = FilterState {
        severity: Some(Severity::Critical),
        ..Default::default()
    };
    state.apply_filters();
    assert_eq!(state.filtered_indices, vec![1]);

    state.select_citation(1);
    let result = state.selected_result().unwrap();
    assert_eq!(result.severity, Severity::Critical);
    assert!(result
        .details
        .as_ref()
        .and_then(|d| d.treatment_history.as_deref())
        .is_some());
}

/// Loading a nonexistent brief file returns an Io error.
#[test]
fn e2e_missing_brief_file_returns_error() {
    use citesleuth::util::error::BriefError;
    let result = load_brief_file(&fixture("does_not_exist.json"));
    assert!(
        matches!(result, Err(BriefError::Io { .. })),
        "expected Io error, got {result:?}"
    );
}

// =============================================================================
// Export E2E
// =============================================================================

/// Notes export writes a deterministic report to disk with the expected
/// filename shape and content.
#[test]
fn e2e_notes_export_round_trip() {
    let brief = load_sample_brief().unwrap();
    let generated_at = chrono::DateTime::parse_from_rfc3339("2025-03-14T09:30:00Z")
        .unwrap()
        .to_utc();

    let dir = tempfile::tempdir().unwrap();
    let file_name = export::build_file_name(
        &brief.title,
        generated_at.date_naive(),
        constants::NOTES_EXTENSION,
    );
    assert_eq!(
        file_name,
        "citesleuth-notes-plaintiff-s-motion-for-summary-judgment-2025-03-14.txt"
    );

    let dest = dir.path().join(&file_name);
    let file = std::fs::File::create(&dest).unwrap();
    let count = export::export_notes(&brief, generated_at, file, &dest).unwrap();
    assert_eq!(count, 6);

    let written = std::fs::read_to_string(&dest).unwrap();
    assert!(written.contains("# CiteSleuth - Citation Review Notes"));
    assert!(written.contains("- Total citations: 6"));
    assert!(written.contains("### 4. Pemberton v. Granite State Ins. Co. (1967)"));
    assert!(written.contains("Severity: Critical"));
    assert!(written.contains("Treatment history: Overruled by"));
}

/// CSV export writes one row per citation, including unverified ones.
#[test]
fn e2e_csv_export_round_trip() {
    let mut brief = load_brief_file(&fixture("minimal_brief.json")).unwrap();
    brief.verification_results.pop(); // leave cit-2 pending

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("review.csv");
    let file = std::fs::File::create(&dest).unwrap();
    let count = export::export_csv(&brief, file, &dest).unwrap();
    assert_eq!(count, 2);

    let written = std::fs::read_to_string(&dest).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 3); // header + 2 rows
    assert!(lines[1].contains("Ashworth v. Delgado"));
    assert!(lines[2].contains("Pending"));
}
