// All LLM prompt constants for the career gap analysis.

/// System prompt — enforces JSON-only output.
pub const ANALYSIS_SYSTEM: &str =
    "You are an expert career coach and resume analyst. \
    Compare a candidate's resume against a target role and produce a career gap analysis. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Analysis prompt template. Replace `{target_role}` and `{resume_text}`
/// before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze this resume for the target role: "{target_role}"

Resume:
{resume_text}

Return a JSON object with this EXACT schema (no extra fields):
{
  "match_score": 72,
  "current_level": "Mid",
  "target_level": "Senior",
  "market_insights": "One short paragraph on demand and hiring trends for the target role",
  "strengths": ["Specific strength drawn from the resume"],
  "critical_gaps": ["Specific gap blocking the target role"],
  "roadmap": [
    {"week": 1, "title": "Short title", "focus": "One concrete action for the week", "priority": "High"}
  ]
}

Rules:
- match_score is a number from 0 to 100 measuring how well the resume fits the target role today.
- current_level describes the candidate's present seniority; target_level describes the seniority the target role demands.
- strengths and critical_gaps each contain 3 to 5 short, specific entries grounded in the resume.
- roadmap MUST contain exactly 4 entries, weeks 1 through 4, ordered.
- priority is one of "High", "Medium", "Low"."#;
