use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails with a visible message if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Resumes are truncated to this many characters before prompting.
    pub max_resume_chars: usize,
    /// Path to the tesseract binary used for image OCR.
    pub tesseract_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_resume_chars: std::env::var("MAX_RESUME_CHARS")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<usize>()
                .context("MAX_RESUME_CHARS must be a positive integer")?,
            tesseract_path: std::env::var("TESSERACT_PATH")
                .unwrap_or_else(|_| "tesseract".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
