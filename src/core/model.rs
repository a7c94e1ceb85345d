// CiteSleuth - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use serde::{Deserialize, Serialize};

// =============================================================================
// Severity
// =============================================================================

/// Verification outcome severity, ordered from most to least severe.
///
/// `None` is the "verified clean" state, not an absence of data; a citation
/// without any verification result also resolves to `None` for display.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    #[default]
    None,
}

impl Severity {
    /// Returns all variants in display order (most severe first).
    pub fn all() -> &'static [Severity] {
        &[Severity::Critical, Severity::Warning, Severity::None]
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::Warning => "Warning",
            Severity::None => "Verified",
        }
    }

    /// Short label for compact display (e.g. table columns).
    pub fn short_label(&self) -> &'static str {
        match self {
            Severity::Critical => "CRIT",
            Severity::Warning => "WARN",
            Severity::None => "OK",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Verification status
// =============================================================================

/// Outcome classification of a single citation verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    /// The citation checks out against its source.
    Valid,

    /// The cited authority could not be located.
    NotFound,

    /// The quote in the brief differs from the source text.
    QuoteMismatch,

    /// The cited case has been overruled.
    Overruled,

    /// The cited authority has been superseded (e.g. by statute).
    Superseded,
}

impl VerificationStatus {
    /// Human-readable label for display and export.
    pub fn label(&self) -> &'static str {
        match self {
            VerificationStatus::Valid => "Valid",
            VerificationStatus::NotFound => "Not found",
            VerificationStatus::QuoteMismatch => "Quote mismatch",
            VerificationStatus::Overruled => "Overruled",
            VerificationStatus::Superseded => "Superseded",
        }
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Citation
// =============================================================================

/// A reference to a legal authority appearing in a brief.
/// Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Citation {
    /// Unique citation identifier (e.g. "cit-1").
    pub id: String,

    /// Display text as it appears inline in the brief
    /// (e.g. "Meridian v. Holt, 512 U.S. 218 (1994)").
    pub text: String,

    /// Case name (e.g. "Meridian v. Holt").
    #[serde(rename = "caseName")]
    pub case_name: String,

    /// Reporter citation (e.g. "512 U.S. 218").
    pub reporter: String,

    /// Optional pin cite (page reference within the reporter).
    #[serde(rename = "pinCite", default, skip_serializing_if = "Option::is_none")]
    pub pin_cite: Option<String>,

    /// Year of the decision.
    pub year: i32,
}

impl Citation {
    /// Reporter line for meta display: "512 U.S. 218 at 224 (1994)".
    pub fn reporter_line(&self) -> String {
        match &self.pin_cite {
            Some(pin) => format!("{} at {} ({})", self.reporter, pin, self.year),
            None => format!("{} ({})", self.reporter, self.year),
        }
    }
}

// =============================================================================
// Verification result
// =============================================================================

/// Supplementary evidence attached to a verification result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultDetails {
    /// Quote as it appears in the brief.
    #[serde(
        rename = "expectedQuote",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub expected_quote: Option<String>,

    /// Quote as it appears in the cited source.
    #[serde(
        rename = "actualQuote",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub actual_quote: Option<String>,

    /// Subsequent treatment of the cited authority.
    #[serde(
        rename = "treatmentHistory",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub treatment_history: Option<String>,
}

impl ResultDetails {
    /// True when no detail field is populated.
    pub fn is_empty(&self) -> bool {
        self.expected_quote.is_none()
            && self.actual_quote.is_none()
            && self.treatment_history.is_none()
    }
}

/// The canned outcome record associated with one citation.
/// At most one result exists per citation; lookup is by `citation_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Unique result identifier (e.g. "ver-1").
    pub id: String,

    /// Foreign key into the brief's citation list.
    #[serde(rename = "citationId")]
    pub citation_id: String,

    /// Outcome classification.
    pub status: VerificationStatus,

    /// Severity of the outcome.
    pub severity: Severity,

    /// One-line reviewer-facing message.
    pub message: String,

    /// Optional supporting evidence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ResultDetails>,
}

// =============================================================================
// Brief
// =============================================================================

/// A legal brief: title, markdown-like content with inline `[[CITATION:n]]`
/// tokens, the ordered citation list the tokens reference (1-based), and the
/// canned verification results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brief {
    /// Brief title.
    pub title: String,

    /// Markdown-like body text containing citation tokens.
    pub content: String,

    /// Ordered citation list; token `[[CITATION:n]]` references entry n-1.
    pub citations: Vec<Citation>,

    /// Verification results, at most one per citation.
    #[serde(rename = "verificationResults", default)]
    pub verification_results: Vec<VerificationResult>,
}

impl Brief {
    /// Look up the verification result for a citation, if one exists.
    pub fn result_for(&self, citation_id: &str) -> Option<&VerificationResult> {
        self.verification_results
            .iter()
            .find(|r| r.citation_id == citation_id)
    }
}

// =============================================================================
// Review statistics
// =============================================================================

/// Aggregated severity counts for a brief's result set.
///
/// `verified + warning + critical` partitions the result set exactly;
/// citations without a result are counted in `total` only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewStats {
    pub total: usize,
    pub verified: usize,
    pub warning: usize,
    pub critical: usize,
}

// =============================================================================
// Fetch progress (for UI updates)
// =============================================================================

/// Progress messages sent from the fetch thread to the UI thread.
#[derive(Debug, Clone)]
pub enum FetchProgress {
    /// Fetch started (first attempt under way).
    Started,

    /// An attempt failed; more attempts remain.
    AttemptFailed { attempt: u32, max_attempts: u32 },

    /// Sleeping before the next attempt.
    Retrying { attempt: u32, delay_ms: u64 },

    /// Fetch resolved with a brief.
    Completed { brief: Box<Brief> },

    /// All attempts failed.
    Failed { attempts: u32, error: String },

    /// Fetch was cancelled before completion.
    Cancelled,
}

// =============================================================================
// Verification progress (for UI updates)
// =============================================================================

/// Progress messages sent from the verification thread to the UI thread.
///
/// The cycle is a fixed-delay simulation: it never changes brief data,
/// only the UI's transient in-progress flag.
#[derive(Debug, Clone)]
pub enum VerifyProgress {
    /// Verification cycle started.
    Started,

    /// Verification cycle finished.
    Completed,

    /// Cycle was cancelled (application shutdown).
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_orders_most_severe_first() {
        assert_eq!(
            Severity::all(),
            &[Severity::Critical, Severity::Warning, Severity::None]
        );
        assert!(Severity::Critical < Severity::None);
    }

    #[test]
    fn severity_none_labels_as_verified() {
        assert_eq!(Severity::None.label(), "Verified");
        assert_eq!(Severity::None.to_string(), "Verified");
    }

    #[test]
    fn reporter_line_includes_pin_cite_when_present() {
        let cit = Citation {
            id: "cit-1".to_string(),
            text: "Meridian v. Holt, 512 U.S. 218 (1994)".to_string(),
            case_name: "Meridian v. Holt".to_string(),
            reporter: "512 U.S. 218".to_string(),
            pin_cite: Some("224".to_string()),
            year: 1994,
        };
        assert_eq!(cit.reporter_line(), "512 U.S. 218 at 224 (1994)");
    }

    #[test]
    fn brief_deserialises_camel_case_fields() {
        let json = r#"{
            "title": "T",
            "content": "Body [[CITATION:1]].",
            "citations": [{
                "id": "cit-1",
                "text": "A v. B, 1 U.S. 1 (1800)",
                "caseName": "A v. B",
                "reporter": "1 U.S. 1",
                "year": 1800
            }],
            "verificationResults": [{
                "id": "ver-1",
                "citationId": "cit-1",
                "status": "quote_mismatch",
                "severity": "warning",
                "message": "m",
                "details": { "expectedQuote": "x", "actualQuote": "y" }
            }]
        }"#;
        let brief: Brief = serde_json::from_str(json).unwrap();
        assert_eq!(brief.citations[0].case_name, "A v. B");
        assert!(brief.citations[0].pin_cite.is_none());
        let result = brief.result_for("cit-1").unwrap();
        assert_eq!(result.status, VerificationStatus::QuoteMismatch);
        assert_eq!(result.severity, Severity::Warning);
        assert_eq!(
            result.details.as_ref().unwrap().expected_quote.as_deref(),
            Some("x")
        );
        assert!(brief.result_for("cit-9").is_none());
    }
}
