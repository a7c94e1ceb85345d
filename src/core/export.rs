// CiteSleuth - core/export.rs
//
// Notes and CSV export of a reviewed brief.
// Core layer: writes to any Write trait object; filename assembly and
// title sanitisation live here so they can be tested without I/O.

use crate::core::model::Brief;
use crate::core::review::build_stats;
use crate::util::constants;
use crate::util::error::ExportError;
use chrono::{DateTime, NaiveDate, Utc};
use std::io::Write;
use std::path::Path;

// =============================================================================
// Filename assembly
// =============================================================================

/// Sanitise a brief title for use in a filename.
///
/// Lowercase, any run of non-alphanumeric characters collapsed to a single
/// hyphen, leading/trailing hyphens trimmed. Idempotent: sanitising an
/// already-sanitised title returns it unchanged.
pub fn sanitize_title(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for c in title.trim().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.extend(c.to_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    out
}

/// Assemble an export filename: `<prefix>-<sanitised-title>-<date>.<ext>`.
/// Empty components (e.g. a title that sanitises to nothing) drop out.
pub fn build_file_name(title: &str, date: NaiveDate, extension: &str) -> String {
    let date_part = date.format("%Y-%m-%d").to_string();
    let safe_title = sanitize_title(title);

    let parts: Vec<&str> = [constants::EXPORT_FILE_PREFIX, &safe_title, &date_part]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect();
    format!("{}.{extension}", parts.join("-"))
}

// =============================================================================
// Notes export (plain text)
// =============================================================================

/// Build the plain-text review notes for a brief.
///
/// `generated_at` is injected by the caller so the report body is
/// deterministic under test.
pub fn build_notes(brief: &Brief, generated_at: DateTime<Utc>) -> String {
    let stats = build_stats(brief.citations.len(), &brief.verification_results);
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("# {} - Citation Review Notes", constants::APP_NAME));
    lines.push(String::new());
    lines.push(format!("Brief: {}", brief.title));
    lines.push(format!("Generated: {}", generated_at.to_rfc3339()));
    lines.push(String::new());
    lines.push("## Summary".to_string());
    lines.push(format!("- Total citations: {}", stats.total));
    lines.push(format!("- Verified: {}", stats.verified));
    lines.push(format!("- Warnings: {}", stats.warning));
    lines.push(format!("- Critical: {}", stats.critical));
    lines.push(String::new());
    lines.push("## Citations".to_string());

    for (index, citation) in brief.citations.iter().enumerate() {
        let result = brief.result_for(&citation.id);
        let severity = result.map(|r| r.severity).unwrap_or_default();
        let status_label = result
            .map(|r| r.status.label())
            .unwrap_or(constants::PENDING_STATUS_LABEL);
        let message = result
            .map(|r| r.message.as_str())
            .unwrap_or(constants::PENDING_MESSAGE);

        lines.push(String::new());
        lines.push(format!(
            "### {}. {} ({})",
            index + 1,
            citation.case_name,
            citation.year
        ));
        lines.push(format!("Citation: {}", citation.text));
        lines.push(format!("Status: {status_label}"));
        lines.push(format!("Severity: {}", severity.label()));
        lines.push(format!("Note: {message}"));

        if let Some(details) = result.and_then(|r| r.details.as_ref()) {
            if let Some(expected) = &details.expected_quote {
                lines.push(format!("Expected quote: \"{expected}\""));
            }
            if let Some(actual) = &details.actual_quote {
                lines.push(format!("Actual quote: \"{actual}\""));
            }
            if let Some(history) = &details.treatment_history {
                lines.push(format!("Treatment history: {history}"));
            }
        }
    }

    lines.join("\n")
}

/// Write the notes report for a brief.
///
/// Returns the number of citation sections written.
/// `export_path` is used for error context only.
pub fn export_notes<W: Write>(
    brief: &Brief,
    generated_at: DateTime<Utc>,
    mut writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let notes = build_notes(brief, generated_at);
    writer
        .write_all(notes.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|e| ExportError::Io {
            path: export_path.to_path_buf(),
            source: e,
        })?;
    Ok(brief.citations.len())
}

// =============================================================================
// CSV export
// =============================================================================

/// Export the review table to CSV.
///
/// Writes: index, case_name, year, reporter, pin_cite, status, severity, message
pub fn export_csv<W: Write>(
    brief: &Brief,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record([
            "index", "case_name", "year", "reporter", "pin_cite", "status", "severity", "message",
        ])
        .map_err(|e| ExportError::Csv {
            path: export_path.to_path_buf(),
            source: e,
        })?;

    let mut count = 0;
    for (index, citation) in brief.citations.iter().enumerate() {
        let result = brief.result_for(&citation.id);
        let status_label = result
            .map(|r| r.status.label())
            .unwrap_or(constants::PENDING_STATUS_LABEL);
        let severity = result.map(|r| r.severity).unwrap_or_default();
        let message = result.map(|r| r.message.as_str()).unwrap_or("");

        csv_writer
            .write_record([
                &(index + 1).to_string(),
                &citation.case_name,
                &citation.year.to_string(),
                &citation.reporter,
                citation.pin_cite.as_deref().unwrap_or(""),
                status_label,
                severity.label(),
                message,
            ])
            .map_err(|e| ExportError::Csv {
                path: export_path.to_path_buf(),
                source: e,
            })?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{
        Citation, ResultDetails, Severity, VerificationResult, VerificationStatus,
    };
    use std::path::PathBuf;

    fn make_brief() -> Brief {
        Brief {
            title: "Plaintiff's Motion for Summary Judgment".to_string(),
            content: String::new(),
            citations: vec![
                Citation {
                    id: "cit-1".to_string(),
                    text: "Meridian v. Holt, 512 U.S. 218 (1994)".to_string(),
                    case_name: "Meridian v. Holt".to_string(),
                    reporter: "512 U.S. 218".to_string(),
                    pin_cite: Some("224".to_string()),
                    year: 1994,
                },
                Citation {
                    id: "cit-2".to_string(),
                    text: "Orton v. Pace, 121 F.3d 44 (2d Cir. 1997)".to_string(),
                    case_name: "Orton v. Pace".to_string(),
                    reporter: "121 F.3d 44".to_string(),
                    pin_cite: None,
                    year: 1997,
                },
            ],
            verification_results: vec![VerificationResult {
                id: "ver-1".to_string(),
                citation_id: "cit-1".to_string(),
                status: VerificationStatus::QuoteMismatch,
                severity: Severity::Warning,
                message: "Quoted passage differs from the reported text.".to_string(),
                details: Some(ResultDetails {
                    expected_quote: Some("shall be construed".to_string()),
                    actual_quote: Some("must be construed".to_string()),
                    treatment_history: None,
                }),
            }],
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    #[test]
    fn sanitize_collapses_runs_and_trims() {
        assert_eq!(
            sanitize_title("  Plaintiff's Motion -- (Draft #2)  "),
            "plaintiff-s-motion-draft-2"
        );
    }

    #[test]
    fn sanitize_is_idempotent() {
        let once = sanitize_title("Motion to Dismiss, §12(b)(6)!");
        assert_eq!(sanitize_title(&once), once);
    }

    #[test]
    fn sanitize_all_symbols_yields_empty() {
        assert_eq!(sanitize_title("§§ -- !!"), "");
    }

    #[test]
    fn file_name_pattern() {
        assert_eq!(
            build_file_name("Motion to Dismiss", date(), constants::NOTES_EXTENSION),
            "citesleuth-notes-motion-to-dismiss-2025-03-14.txt"
        );
    }

    #[test]
    fn file_name_drops_empty_title_component() {
        assert_eq!(
            build_file_name("!!!", date(), constants::NOTES_EXTENSION),
            "citesleuth-notes-2025-03-14.txt"
        );
    }

    #[test]
    fn notes_include_summary_and_sections() {
        let brief = make_brief();
        let generated_at = date().and_hms_opt(9, 30, 0).unwrap().and_utc();
        let notes = build_notes(&brief, generated_at);

        assert!(notes.contains("# CiteSleuth - Citation Review Notes"));
        assert!(notes.contains("Brief: Plaintiff's Motion for Summary Judgment"));
        assert!(notes.contains("- Total citations: 2"));
        assert!(notes.contains("- Warnings: 1"));
        assert!(notes.contains("### 1. Meridian v. Holt (1994)"));
        assert!(notes.contains("Status: Quote mismatch"));
        assert!(notes.contains("Expected quote: \"shall be construed\""));
        // cit-2 has no result: pending defaults.
        assert!(notes.contains("### 2. Orton v. Pace (1997)"));
        assert!(notes.contains("Status: Pending"));
        assert!(notes.contains("Note: Verification pending."));
    }

    #[test]
    fn notes_export_returns_section_count() {
        let brief = make_brief();
        let generated_at = date().and_hms_opt(9, 30, 0).unwrap().and_utc();
        let mut buf = Vec::new();
        let count =
            export_notes(&brief, generated_at, &mut buf, &PathBuf::from("out.txt")).unwrap();
        assert_eq!(count, 2);
        assert!(!buf.is_empty());
    }

    #[test]
    fn csv_export_writes_header_and_rows() {
        let brief = make_brief();
        let mut buf = Vec::new();
        let count = export_csv(&brief, &mut buf, &PathBuf::from("out.csv")).unwrap();
        assert_eq!(count, 2);

        let output = String::from_utf8(buf).unwrap();
        assert!(output.starts_with("index,case_name"));
        assert!(output.contains("Meridian v. Holt"));
        assert!(output.contains("Quote mismatch"));
        assert!(output.contains("Pending"));
    }
}
