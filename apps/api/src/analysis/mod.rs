//! Analysis Client — turns resume text plus a target role into a structured
//! career gap report via the LLM.
//!
//! The model is instructed to reply with a bare JSON object; the reply is
//! sliced from the first `{` to the last `}` before parsing, so stray prose
//! around the object is tolerated. Typed deserialization is the schema
//! check: a reply missing expected fields fails here, not while rendering.

pub mod prompts;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::GeminiClient;
use prompts::{ANALYSIS_PROMPT_TEMPLATE, ANALYSIS_SYSTEM};

/// The structured career gap report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub match_score: f64,
    pub current_level: String,
    pub target_level: String,
    pub market_insights: String,
    pub strengths: Vec<String>,
    pub critical_gaps: Vec<String>,
    pub roadmap: Vec<RoadmapWeek>,
}

/// One week of the action roadmap. The prompt requests exactly four entries;
/// parsing accepts whatever the model returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapWeek {
    pub week: u32,
    pub title: String,
    pub focus: String,
    pub priority: String,
}

/// Runs the full analysis: truncate, prompt, call the model, parse.
pub async fn analyze(
    llm: &GeminiClient,
    resume_text: &str,
    target_role: &str,
    max_resume_chars: usize,
) -> Result<AnalysisResult, AppError> {
    let prompt = build_analysis_prompt(resume_text, target_role, max_resume_chars);

    let reply = llm
        .generate(&prompt, ANALYSIS_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("analysis call failed: {e}")))?;

    parse_analysis_reply(&reply)
}

/// Builds the analysis prompt. The resume is silently truncated to its first
/// `max_resume_chars` characters.
pub(crate) fn build_analysis_prompt(
    resume_text: &str,
    target_role: &str,
    max_resume_chars: usize,
) -> String {
    let truncated = truncate_chars(resume_text, max_resume_chars);
    ANALYSIS_PROMPT_TEMPLATE
        .replace("{target_role}", target_role)
        .replace("{resume_text}", truncated)
}

/// Parses the model reply into an `AnalysisResult`.
/// A reply with no JSON object is an LLM format error; a JSON object that
/// does not match the report shape is a schema mismatch.
pub(crate) fn parse_analysis_reply(reply: &str) -> Result<AnalysisResult, AppError> {
    let json = extract_json_object(reply)
        .ok_or_else(|| AppError::Llm("model reply contained no JSON object".to_string()))?;

    serde_json::from_str(json).map_err(|e| match e.classify() {
        serde_json::error::Category::Data => AppError::SchemaMismatch(e.to_string()),
        _ => AppError::Llm(format!("model reply was not valid JSON: {e}")),
    })
}

/// Slices the substring from the first `{` to the last `}`, inclusive.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Truncates to a character count without splitting a UTF-8 sequence.
fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOCK_REPLY: &str = r#"Here is the result: {"match_score": 72, "current_level": "Mid", "target_level": "Senior", "market_insights": "...", "strengths": ["A"], "critical_gaps": ["B"], "roadmap": [{"week":1,"title":"T","focus":"F","priority":"High"}]}"#;

    #[test]
    fn test_parse_reply_with_surrounding_prose() {
        let result = parse_analysis_reply(MOCK_REPLY).unwrap();
        assert_eq!(result.match_score, 72.0);
        assert_eq!(result.current_level, "Mid");
        assert_eq!(result.target_level, "Senior");
        assert_eq!(result.strengths, vec!["A".to_string()]);
        assert_eq!(result.critical_gaps, vec!["B".to_string()]);
        assert_eq!(result.roadmap.len(), 1);
        assert_eq!(result.roadmap[0].week, 1);
        assert_eq!(result.roadmap[0].priority, "High");
    }

    #[test]
    fn test_parse_reply_without_braces_is_llm_error() {
        let err = parse_analysis_reply("I could not produce a report.").unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }

    #[test]
    fn test_parse_reply_missing_fields_is_schema_mismatch() {
        let err = parse_analysis_reply(r#"{"match_score": 50}"#).unwrap_err();
        assert!(matches!(err, AppError::SchemaMismatch(_)));
    }

    #[test]
    fn test_parse_reply_truncated_json_is_llm_error() {
        // A '{' with a '}' earlier in the prose, so the slice is not valid JSON.
        let err = parse_analysis_reply("} nothing useful {").unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }

    #[test]
    fn test_extract_json_object_spans_first_to_last_brace() {
        let text = r#"prefix {"a": {"b": 1}} suffix"#;
        assert_eq!(extract_json_object(text), Some(r#"{"a": {"b": 1}}"#));
    }

    #[test]
    fn test_prompt_embeds_role_and_resume() {
        let prompt = build_analysis_prompt("resume body", "ML Engineer", 5000);
        assert!(prompt.contains(r#"the target role: "ML Engineer""#));
        assert!(prompt.contains("resume body"));
    }

    #[test]
    fn test_prompt_truncates_long_resume() {
        let resume = "x".repeat(6000);
        let prompt = build_analysis_prompt(&resume, "ML Engineer", 5000);
        assert!(prompt.contains(&"x".repeat(5000)));
        assert!(!prompt.contains(&"x".repeat(5001)));
    }

    #[test]
    fn test_truncate_chars_is_char_boundary_safe() {
        let s = "héllo wörld";
        assert_eq!(truncate_chars(s, 3), "hél");
        assert_eq!(truncate_chars(s, 100), s);
        assert_eq!(truncate_chars(s, 0), "");
    }
}
