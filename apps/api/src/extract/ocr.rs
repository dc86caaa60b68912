//! Image OCR via the system tesseract binary.
//!
//! The image bytes are written to a temp file and tesseract is invoked with
//! `stdout` output. No language hint, no pre-processing, no confidence
//! threshold; whatever tesseract reports is returned verbatim.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;

use super::ExtractError;

pub struct OcrEngine {
    tesseract_path: String,
    timeout: Duration,
}

impl OcrEngine {
    pub fn new(tesseract_path: String, timeout: Duration) -> Self {
        Self {
            tesseract_path,
            timeout,
        }
    }

    pub async fn recognize(&self, image_bytes: &[u8]) -> Result<String, ExtractError> {
        let temp_dir = tempfile::Builder::new()
            .prefix("skillbridge-ocr-")
            .tempdir()?;

        let input_path: PathBuf = temp_dir.path().join("resume-image");
        tokio::fs::write(&input_path, image_bytes).await?;

        let mut command = Command::new(&self.tesseract_path);
        command
            .arg(&input_path)
            .arg("stdout")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match timeout(self.timeout, command.output()).await {
            Ok(result) => result.map_err(|e| {
                ExtractError::Ocr(format!("failed to run '{}': {e}", self.tesseract_path))
            })?,
            Err(_) => {
                return Err(ExtractError::Ocr(format!(
                    "OCR timed out after {}s",
                    self.timeout.as_secs()
                )))
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractError::Ocr(stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_binary_is_an_ocr_error() {
        let engine = OcrEngine::new(
            "/nonexistent/skillbridge-test-tesseract".to_string(),
            Duration::from_secs(5),
        );
        let err = engine.recognize(&[0x89, b'P', b'N', b'G']).await.unwrap_err();
        assert!(matches!(err, ExtractError::Ocr(_)));
    }
}
