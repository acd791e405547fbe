//! Text extraction from various file formats

use crate::error::{AtsScorerError, Result};
use crate::input::file_detector::FileType;
use once_cell::sync::Lazy;
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::io::{Cursor, Read};
use std::path::Path;
use tokio::fs;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"));

static NUMERIC_ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&#(x[0-9a-fA-F]+|[0-9]+);").expect("Invalid entity regex"));

pub trait TextExtractor: Sync {
    fn extract_bytes(&self, bytes: &[u8]) -> Result<String>;

    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send {
        async move {
            let bytes = fs::read(path).await.map_err(AtsScorerError::Io)?;
            self.extract_bytes(&bytes).map_err(|e| match e {
                AtsScorerError::Extraction(msg) => AtsScorerError::Extraction(format!(
                    "Failed to extract text from '{}': {}",
                    path.display(),
                    msg
                )),
                other => other,
            })
        }
    }
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract_bytes(&self, bytes: &[u8]) -> Result<String> {
        // pdf-extract panics on some malformed inputs instead of erroring
        match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(AtsScorerError::Extraction(format!("Unreadable PDF: {}", e))),
            Err(_) => Err(AtsScorerError::Extraction(
                "Unreadable PDF: parser aborted on malformed content".to_string(),
            )),
        }
    }
}

pub struct DocxExtractor;

impl DocxExtractor {
    const DOCUMENT_PART: &'static str = "word/document.xml";

    fn xml_to_text(&self, xml: &str) -> String {
        let text = xml
            .replace("</w:p>", "\n")
            .replace("<w:tab/>", "\t")
            .replace("<w:br/>", "\n")
            .replace("<w:cr/>", "\n");

        let stripped = TAG.replace_all(&text, "");
        let decoded = decode_entities(&stripped);

        let lines: Vec<&str> = decoded
            .lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect();

        lines.join("\n")
    }
}

impl TextExtractor for DocxExtractor {
    fn extract_bytes(&self, bytes: &[u8]) -> Result<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
        let mut part = archive.by_name(Self::DOCUMENT_PART).map_err(|_| {
            AtsScorerError::Extraction(format!("DOCX is missing {}", Self::DOCUMENT_PART))
        })?;

        let mut xml = String::new();
        part.read_to_string(&mut xml)
            .map_err(|e| AtsScorerError::Extraction(format!("Unreadable DOCX body: {}", e)))?;

        Ok(self.xml_to_text(&xml))
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract_bytes(&self, bytes: &[u8]) -> Result<String> {
        String::from_utf8(bytes.to_vec())
            .map_err(|e| AtsScorerError::Extraction(format!("Text is not valid UTF-8: {}", e)))
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn extract_bytes(&self, bytes: &[u8]) -> Result<String> {
        let markdown_content = PlainTextExtractor.extract_bytes(bytes)?;

        let parser = Parser::new(&markdown_content);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        Ok(self.html_to_text(&html_output))
    }
}

impl MarkdownExtractor {
    fn html_to_text(&self, html: &str) -> String {
        let text = html
            .replace("<br>", "\n")
            .replace("<br />", "\n")
            .replace("</p>", "\n\n")
            .replace("</li>", "\n")
            .replace("&nbsp;", " ");

        let clean_text = TAG.replace_all(&text, "");
        let decoded = decode_entities(&clean_text);

        let lines: Vec<&str> = decoded
            .lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect();

        lines.join("\n")
    }
}

fn decode_entities(text: &str) -> String {
    let named = text
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'");

    let numeric = NUMERIC_ENTITY.replace_all(&named, |caps: &regex::Captures| {
        let code = &caps[1];
        let value = match code.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => code.parse().ok(),
        };
        value
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    });

    // Last, so "&amp;lt;" decodes to "&lt;" rather than "<"
    numeric.replace("&amp;", "&")
}

/// Extract text from an in-memory upload identified by its MIME type
pub fn extract_text_from_bytes(bytes: &[u8], mime_type: &str) -> Result<String> {
    match FileType::from_mime(mime_type)? {
        FileType::Pdf => PdfExtractor.extract_bytes(bytes),
        FileType::Docx => DocxExtractor.extract_bytes(bytes),
        FileType::Text => PlainTextExtractor.extract_bytes(bytes),
        FileType::Markdown => MarkdownExtractor.extract_bytes(bytes),
        FileType::Unknown => Err(AtsScorerError::UnsupportedFormat(format!(
            "Unsupported file type: {}",
            mime_type
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::file_detector::{DOCX_MIME, PDF_MIME};
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn build_docx(document_xml: &str) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buffer);
            writer
                .start_file("word/document.xml", SimpleFileOptions::default())
                .unwrap();
            writer.write_all(document_xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        buffer.into_inner()
    }

    #[test]
    fn test_docx_paragraphs_and_entities() {
        let xml = r#"<?xml version="1.0"?><w:document><w:body>
            <w:p><w:r><w:t>Jane Roe</w:t></w:r></w:p>
            <w:p><w:r><w:t>R&amp;D Lead</w:t><w:tab/><w:t>Austin, TX</w:t></w:r></w:p>
            <w:p><w:r><w:t>Caf&#233; &lt;owner&gt;</w:t></w:r></w:p>
            </w:body></w:document>"#;

        let text = DocxExtractor.extract_bytes(&build_docx(xml)).unwrap();
        assert_eq!(text, "Jane Roe\nR&D Lead\tAustin, TX\nCafé <owner>");
    }

    #[test]
    fn test_docx_without_document_part() {
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buffer);
            writer
                .start_file("word/styles.xml", SimpleFileOptions::default())
                .unwrap();
            writer.write_all(b"<w:styles/>").unwrap();
            writer.finish().unwrap();
        }

        let err = DocxExtractor.extract_bytes(&buffer.into_inner()).unwrap_err();
        assert!(matches!(err, AtsScorerError::Extraction(_)));
    }

    #[test]
    fn test_corrupt_documents_are_extraction_errors() {
        let garbage = b"definitely not a document";
        assert!(matches!(
            extract_text_from_bytes(garbage, DOCX_MIME),
            Err(AtsScorerError::Extraction(_))
        ));
        assert!(matches!(
            extract_text_from_bytes(garbage, PDF_MIME),
            Err(AtsScorerError::Extraction(_))
        ));
    }

    #[test]
    fn test_unknown_mime_is_unsupported() {
        assert!(matches!(
            extract_text_from_bytes(b"GIF89a", "image/gif"),
            Err(AtsScorerError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_markdown_strips_formatting() {
        let md = b"# Jane Roe\n\n**Skills**: Rust &amp; Python\n\n- Led team\n- Grew revenue";
        let text = MarkdownExtractor.extract_bytes(md).unwrap();
        assert!(text.contains("Jane Roe"));
        assert!(text.contains("Skills: Rust & Python"));
        assert!(!text.contains("**"));
        assert!(!text.contains('#'));
    }

    #[test]
    fn test_invalid_utf8_text() {
        assert!(matches!(
            PlainTextExtractor.extract_bytes(&[0xff, 0xfe, 0x00]),
            Err(AtsScorerError::Extraction(_))
        ));
    }
}
