//! Text extraction from uploaded resumes.
//!
//! Dispatches on the detected file kind: PDFs go through `pdf-extract`,
//! images go through the tesseract OCR binary, and everything else is
//! decoded as UTF-8 text. No size limit is enforced before extraction.

pub mod ocr;
pub mod pdf;

use std::time::Duration;

use thiserror::Error;

use crate::config::Config;
use self::ocr::OcrEngine;

const OCR_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to extract text from PDF: {0}")]
    Pdf(String),

    #[error("OCR failed: {0}")]
    Ocr(String),

    #[error("file is not valid UTF-8 text")]
    Utf8,

    #[error("I/O error during extraction: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Image,
    Text,
}

/// Classifies an upload from its content type, filename, and magic bytes.
/// Anything that is not recognizably a PDF or an image is treated as text.
pub fn detect_kind(filename: &str, content_type: Option<&str>, head: &[u8]) -> FileKind {
    let ct = content_type.unwrap_or("").to_ascii_lowercase();
    let name = filename.to_ascii_lowercase();

    if ct.contains("application/pdf") || name.ends_with(".pdf") || head.starts_with(b"%PDF-") {
        return FileKind::Pdf;
    }

    let image_magic =
        head.starts_with(&[0x89, b'P', b'N', b'G']) || head.starts_with(&[0xFF, 0xD8, 0xFF]);
    if ct.starts_with("image/")
        || name.ends_with(".png")
        || name.ends_with(".jpg")
        || name.ends_with(".jpeg")
        || image_magic
    {
        return FileKind::Image;
    }

    FileKind::Text
}

/// Extracts plain text from an uploaded resume.
pub async fn extract_text(
    config: &Config,
    filename: &str,
    content_type: Option<&str>,
    data: &[u8],
) -> Result<String, ExtractError> {
    match detect_kind(filename, content_type, data) {
        FileKind::Pdf => {
            // pdf-extract parses synchronously; keep it off the async workers.
            let bytes = data.to_vec();
            tokio::task::spawn_blocking(move || pdf::extract_pdf_text(&bytes))
                .await
                .map_err(|e| ExtractError::Pdf(format!("extraction task failed: {e}")))?
        }
        FileKind::Image => {
            OcrEngine::new(config.tesseract_path.clone(), OCR_TIMEOUT)
                .recognize(data)
                .await
        }
        FileKind::Text => String::from_utf8(data.to_vec()).map_err(|_| ExtractError::Utf8),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            gemini_api_key: "test-key".to_string(),
            port: 8080,
            rust_log: "info".to_string(),
            max_resume_chars: 5000,
            tesseract_path: "tesseract".to_string(),
        }
    }

    #[test]
    fn test_detect_pdf_by_content_type() {
        assert_eq!(
            detect_kind("resume", Some("application/pdf"), b"junk"),
            FileKind::Pdf
        );
    }

    #[test]
    fn test_detect_pdf_by_magic_bytes() {
        assert_eq!(detect_kind("resume.bin", None, b"%PDF-1.7 ..."), FileKind::Pdf);
    }

    #[test]
    fn test_detect_image_by_extension_and_magic() {
        assert_eq!(detect_kind("scan.PNG", None, b""), FileKind::Image);
        assert_eq!(detect_kind("scan.jpeg", None, b""), FileKind::Image);
        assert_eq!(
            detect_kind("scan", None, &[0xFF, 0xD8, 0xFF, 0xE0]),
            FileKind::Image
        );
        assert_eq!(
            detect_kind("scan", Some("image/png"), b""),
            FileKind::Image
        );
    }

    #[test]
    fn test_detect_falls_back_to_text() {
        assert_eq!(
            detect_kind("resume.txt", Some("text/plain"), b"hello"),
            FileKind::Text
        );
        assert_eq!(detect_kind("resume", None, b"plain words"), FileKind::Text);
    }

    #[tokio::test]
    async fn test_plain_text_roundtrips_exactly() {
        let config = test_config();
        let body = "Jane Doe\nRust engineer since 2019.\nSkills: axum, tokio.";
        let text = extract_text(&config, "resume.txt", Some("text/plain"), body.as_bytes())
            .await
            .unwrap();
        assert_eq!(text, body);
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_an_extraction_error() {
        let config = test_config();
        let err = extract_text(&config, "resume.txt", Some("text/plain"), &[0xFF, 0xFE, 0x00])
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::Utf8));
    }

    #[tokio::test]
    async fn test_malformed_pdf_is_an_extraction_error() {
        let config = test_config();
        let err = extract_text(
            &config,
            "resume.pdf",
            Some("application/pdf"),
            b"%PDF-not really a pdf",
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ExtractError::Pdf(_)));
    }
}
