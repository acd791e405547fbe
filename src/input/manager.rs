//! Input manager: the caller-side checks run before a resume reaches the scorer

use crate::config::InputConfig;
use crate::error::{AtsScorerError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    extract_text_from_bytes, DocxExtractor, MarkdownExtractor, PdfExtractor, PlainTextExtractor,
    TextExtractor,
};
use log::{debug, info};
use std::path::Path;

/// A resume that passed every pre-condition and is ready to score
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedDocument {
    pub filename: String,
    pub file_size: u64,
    pub text: String,
}

pub struct InputManager {
    config: InputConfig,
}

impl InputManager {
    pub fn new(config: InputConfig) -> Self {
        Self { config }
    }

    /// Read a resume from disk, enforcing the extension, size and minimum
    /// text length limits.
    pub async fn load(&self, path: &Path) -> Result<ExtractedDocument> {
        if !path.exists() {
            return Err(AtsScorerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or_else(|| {
                AtsScorerError::InvalidInput(format!("Not a file path: {}", path.display()))
            })?;

        let file_type = self.detect_file_type(path)?;

        let file_size = tokio::fs::metadata(path).await?.len();
        self.check_size(file_size)?;

        let text = match file_type {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Docx => {
                info!("Extracting text from DOCX: {}", path.display());
                DocxExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Unknown => {
                return Err(AtsScorerError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        self.check_text_length(&text)?;
        debug!("Extracted {} characters from {}", text.chars().count(), filename);

        Ok(ExtractedDocument {
            filename,
            file_size,
            text,
        })
    }

    /// Accept an in-memory upload, as a transport layer would hand it over
    pub fn accept_upload(
        &self,
        filename: &str,
        bytes: &[u8],
        mime_type: &str,
    ) -> Result<ExtractedDocument> {
        let file_size = bytes.len() as u64;
        self.check_size(file_size)?;

        // Uploads carry a MIME type as well as a name; both must be PDF or DOCX
        match FileType::from_mime(mime_type)? {
            FileType::Pdf | FileType::Docx => {}
            _ => {
                return Err(AtsScorerError::UnsupportedFormat(format!(
                    "Unsupported file type: {}. Upload a PDF or DOCX file.",
                    mime_type
                )));
            }
        }

        let extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        if !self.config.is_extension_allowed(extension) {
            return Err(AtsScorerError::UnsupportedFormat(format!(
                "Unsupported file type. Upload a {} file.",
                self.allowed_list()
            )));
        }

        info!("Extracting text from upload '{}' ({})", filename, mime_type);
        let text = extract_text_from_bytes(bytes, mime_type)?;
        self.check_text_length(&text)?;

        Ok(ExtractedDocument {
            filename: filename.to_string(),
            file_size,
            text,
        })
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                AtsScorerError::InvalidInput(format!("File has no extension: {}", path.display()))
            })?;

        if !self.config.is_extension_allowed(extension) {
            return Err(AtsScorerError::UnsupportedFormat(format!(
                "Unsupported file extension: .{}. Allowed: {}",
                extension,
                self.allowed_list()
            )));
        }

        Ok(FileType::from_extension(extension))
    }

    fn allowed_list(&self) -> String {
        self.config
            .allowed_extensions
            .iter()
            .map(|ext| format!(".{}", ext))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn check_size(&self, size: u64) -> Result<()> {
        if size > self.config.max_file_size_bytes {
            return Err(AtsScorerError::FileTooLarge {
                size,
                limit: self.config.max_file_size_bytes,
            });
        }
        Ok(())
    }

    fn check_text_length(&self, text: &str) -> Result<()> {
        let length = text.chars().count();
        if length < self.config.min_text_chars {
            return Err(AtsScorerError::TextTooShort {
                length,
                minimum: self.config.min_text_chars,
            });
        }
        Ok(())
    }
}
