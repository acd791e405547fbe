//! File type detection

use crate::error::{AtsScorerError, Result};

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const LEGACY_DOC_MIME: &str = "application/msword";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Docx,
    Text,
    Markdown,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "docx" => FileType::Docx,
            "txt" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            _ => FileType::Unknown,
        }
    }

    /// Map an upload MIME type to a file type. Legacy Word documents get a
    /// dedicated message since they look supported but are not.
    pub fn from_mime(mime_type: &str) -> Result<Self> {
        match mime_type.trim().to_lowercase().as_str() {
            PDF_MIME => Ok(FileType::Pdf),
            DOCX_MIME => Ok(FileType::Docx),
            "text/plain" => Ok(FileType::Text),
            "text/markdown" => Ok(FileType::Markdown),
            LEGACY_DOC_MIME => Err(AtsScorerError::UnsupportedFormat(
                "Legacy .doc files are not supported. Please use .docx format.".to_string(),
            )),
            other => Err(AtsScorerError::UnsupportedFormat(format!(
                "Unsupported file type: {}",
                other
            ))),
        }
    }

    pub fn mime_type(self) -> Option<&'static str> {
        match self {
            FileType::Pdf => Some(PDF_MIME),
            FileType::Docx => Some(DOCX_MIME),
            FileType::Text => Some("text/plain"),
            FileType::Markdown => Some("text/markdown"),
            FileType::Unknown => None,
        }
    }
}
