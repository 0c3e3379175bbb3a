use serde::{Deserialize, Serialize};
use serde_json::Value;

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;

/// Request body for the streaming analysis endpoint
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

impl AnalyzeRequest {
    /// Create a request for the given text
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Raw payload of one protocol frame, before content classification
#[derive(Debug, Clone, Deserialize)]
pub struct RawFrame {
    #[serde(rename = "type")]
    pub event_type: String,
    pub content: Value,
}

/// A decoded streamed event.
///
/// The report content is normalized here, at ingestion, so downstream code
/// only ever sees the canonical sequence form.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Claims extracted from the submitted text
    Claims(Vec<String>),
    /// Search queries generated from the claims
    Queries(Vec<String>),
    /// Evidence snippets gathered from the web
    Evidence(String),
    /// Normalized verification report
    Report(Vec<FactCheckResult>),
    /// Final rewritten text; terminates the session
    Final(String),
    /// Structurally valid frame with an unrecognized type; dispatch ignores it
    Other {
        /// The unrecognized `type` value, kept for diagnostics
        event_type: String,
    },
}

impl Event {
    /// Decode a raw frame into a typed event.
    ///
    /// Fails when the content does not fit the shape its type demands;
    /// unrecognized types decode to [`Event::Other`].
    pub fn from_frame(frame: RawFrame) -> Result<Self, serde_json::Error> {
        let RawFrame {
            event_type,
            content,
        } = frame;

        match event_type.as_str() {
            "claims" => Ok(Event::Claims(serde_json::from_value(content)?)),
            "queries" => Ok(Event::Queries(serde_json::from_value(content)?)),
            "evidence" => Ok(Event::Evidence(serde_json::from_value(content)?)),
            "report" => Ok(Event::Report(normalize_report(&content))),
            "final" => Ok(Event::Final(serde_json::from_value(content)?)),
            _ => Ok(Event::Other { event_type }),
        }
    }

    /// Event type name for logging
    pub fn kind(&self) -> &str {
        match self {
            Event::Claims(_) => "claims",
            Event::Queries(_) => "queries",
            Event::Evidence(_) => "evidence",
            Event::Report(_) => "report",
            Event::Final(_) => "final",
            Event::Other { event_type } => event_type,
        }
    }
}

/// Verdict assigned to one claim by the verification service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VerificationStatus {
    Verified,
    False,
    Inconclusive,
    /// Any status string the service emits outside the known set
    #[default]
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            VerificationStatus::Verified => "VERIFIED",
            VerificationStatus::False => "FALSE",
            VerificationStatus::Inconclusive => "INCONCLUSIVE",
            VerificationStatus::Unknown => "UNKNOWN",
        };
        f.write_str(label)
    }
}

/// Verification outcome for a single claim
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactCheckResult {
    #[serde(default)]
    pub claim: String,
    #[serde(default)]
    pub status: VerificationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl FactCheckResult {
    /// Whether the evidence text merely repeats the reason (trim-equal).
    pub fn evidence_duplicates_reason(&self) -> bool {
        match (&self.evidence, &self.reason) {
            (Some(evidence), Some(reason)) => evidence.trim() == reason.trim(),
            _ => false,
        }
    }

    /// Evidence text worth surfacing alongside the reason.
    ///
    /// Returns `None` when the evidence duplicates the reason, so consumers
    /// show the text once.
    pub fn display_evidence(&self) -> Option<&str> {
        if self.evidence_duplicates_reason() {
            return None;
        }
        self.evidence.as_deref()
    }
}

/// Normalize raw `report` event content into the canonical result sequence.
///
/// Recognized shapes, first match wins: a bare array of results, an object
/// with a `fact_check_report` field, an object with a `results` field.
/// Anything else resolves to an empty sequence, never an absent one.
pub fn normalize_report(content: &Value) -> Vec<FactCheckResult> {
    let candidate = if content.is_array() {
        Some(content)
    } else {
        content
            .get("fact_check_report")
            .or_else(|| content.get("results"))
    };

    candidate
        .and_then(|value| serde_json::from_value(value.clone()).ok())
        .unwrap_or_default()
}
