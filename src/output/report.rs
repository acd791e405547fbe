//! Response envelopes wrapping an analysis for callers

use crate::error::AtsScorerError;
use crate::input::ExtractedDocument;
use crate::scoring::AnalysisResult;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub filename: String,
    pub file_size: u64,
    /// RFC 3339 timestamp of when the file was received
    pub upload_time: String,
}

impl ReportMetadata {
    pub fn for_document(document: &ExtractedDocument, received_at: DateTime<Utc>) -> Self {
        Self {
            filename: document.filename.clone(),
            file_size: document.file_size,
            upload_time: received_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Successful analysis: `{ success, analysis, metadata }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisEnvelope {
    pub success: bool,
    pub analysis: AnalysisResult,
    pub metadata: ReportMetadata,
}

impl AnalysisEnvelope {
    pub fn new(analysis: AnalysisResult, metadata: ReportMetadata) -> Self {
        Self {
            success: true,
            analysis,
            metadata,
        }
    }
}

/// Failed analysis: `{ error, message }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
    pub message: String,
}

impl From<&AtsScorerError> for ErrorEnvelope {
    fn from(err: &AtsScorerError) -> Self {
        Self {
            error: err.headline().to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ResumeAnalyzer;
    use chrono::TimeZone;

    #[test]
    fn test_success_envelope_shape() {
        let document = ExtractedDocument {
            filename: "resume.pdf".to_string(),
            file_size: 2048,
            text: "Experience Education Skills".to_string(),
        };
        let analysis = ResumeAnalyzer::new()
            .analyze(&document.text, &document.filename)
            .unwrap();
        let received = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();

        let envelope =
            AnalysisEnvelope::new(analysis, ReportMetadata::for_document(&document, received));
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["metadata"]["filename"], "resume.pdf");
        assert_eq!(json["metadata"]["fileSize"], 2048);
        assert_eq!(json["metadata"]["uploadTime"], "2024-03-01T12:30:00.000Z");
        assert_eq!(json["analysis"]["breakdown"]["structureAnalysis"]["score"], 9);
    }

    #[test]
    fn test_error_envelope() {
        let err = AtsScorerError::TextTooShort {
            length: 12,
            minimum: 50,
        };
        let envelope = ErrorEnvelope::from(&err);
        assert_eq!(envelope.error, "Insufficient text");
        assert!(envelope.message.contains("12 characters"));
    }
}
