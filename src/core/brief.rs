// CiteSleuth - core/brief.rs
//
// Brief parsing and validation, plus the built-in sample brief embedded at
// compile time. Core layer: accepts JSON strings, never touches the
// filesystem. File I/O is handled by app::fetch, which feeds content here.

use crate::core::markup;
use crate::core::model::Brief;
use crate::util::error::BriefError;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Embedded JSON for the built-in sample brief.
///
/// Using `include_str!` bakes the dataset into the binary so the simulated
/// fetch always has something to resolve regardless of working directory.
const SAMPLE_BRIEF_JSON: &str = include_str!("../../assets/sample_brief.json");

/// Virtual path reported in errors/diagnostics for the embedded sample.
pub const SAMPLE_BRIEF_PATH: &str = "<builtin>/sample_brief.json";

/// Parse a JSON string into a `Brief`.
///
/// `source_path` is used for error messages only (not for I/O).
pub fn parse_brief_json(json: &str, source_path: &Path) -> Result<Brief, BriefError> {
    serde_json::from_str(json).map_err(|e| BriefError::JsonParse {
        path: source_path.to_path_buf(),
        source: e,
    })
}

/// Load the built-in sample brief.
///
/// A parse failure here is a packaging bug; it is reported as a normal
/// `BriefError` so the fetch path degrades gracefully instead of panicking.
pub fn load_sample_brief() -> Result<Brief, BriefError> {
    parse_brief_json(SAMPLE_BRIEF_JSON, &PathBuf::from(SAMPLE_BRIEF_PATH))
}

/// Validate a parsed brief, returning non-fatal warnings.
///
/// Validation never rejects a parseable brief: every condition below
/// degrades cleanly at render time (an out-of-range token stays literal,
/// an orphaned result is simply never looked up). The warnings surface in
/// the review summary window so brief authors can fix their data.
pub fn validate_brief(brief: &Brief) -> Vec<String> {
    let mut warnings = Vec::new();

    if brief.title.trim().is_empty() {
        warnings.push("Brief has an empty title".to_string());
    }
    if brief.content.trim().is_empty() {
        warnings.push("Brief has no content".to_string());
    }

    // Duplicate citation ids make result lookup ambiguous.
    let mut seen_ids = HashSet::new();
    for citation in &brief.citations {
        if !seen_ids.insert(citation.id.as_str()) {
            warnings.push(format!("Duplicate citation id '{}'", citation.id));
        }
    }

    // Results must reference existing citations, at most one per citation.
    let mut seen_targets = HashSet::new();
    for result in &brief.verification_results {
        if !seen_ids.contains(result.citation_id.as_str()) {
            warnings.push(format!(
                "Result '{}' references unknown citation '{}'",
                result.id, result.citation_id
            ));
        }
        if !seen_targets.insert(result.citation_id.as_str()) {
            warnings.push(format!(
                "Citation '{}' has more than one verification result",
                result.citation_id
            ));
        }
    }

    // Content tokens outside 1..=N render as literal text; flag them so the
    // author knows the reference is dangling.
    let citation_count = brief.citations.len() as u64;
    for number in markup::token_numbers(&brief.content) {
        if number == 0 || number > citation_count {
            warnings.push(format!(
                "Content token [[CITATION:{number}]] is out of range (brief has {citation_count} citations)"
            ));
        }
    }

    warnings
}
