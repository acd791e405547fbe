//! Error handling for the ATS scorer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtsScorerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Text extraction error: {0}")]
    Extraction(String),

    #[error("Unable to extract sufficient text from the file ({length} characters, minimum is {minimum})")]
    TextTooShort { length: usize, minimum: usize },

    #[error("File too large: {size} bytes (maximum is {limit} bytes)")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

impl AtsScorerError {
    /// Short headline used as the `error` field of the JSON error envelope
    pub fn headline(&self) -> &'static str {
        match self {
            AtsScorerError::UnsupportedFormat(_) => "Unsupported file type",
            AtsScorerError::FileTooLarge { .. } => "File too large",
            AtsScorerError::TextTooShort { .. } => "Insufficient text",
            AtsScorerError::Extraction(_) => "Extraction failed",
            AtsScorerError::InvalidInput(_) => "Invalid input",
            _ => "Analysis failed",
        }
    }
}

pub type Result<T> = std::result::Result<T, AtsScorerError>;

impl From<zip::result::ZipError> for AtsScorerError {
    fn from(err: zip::result::ZipError) -> Self {
        AtsScorerError::Extraction(format!("Invalid DOCX container: {}", err))
    }
}
