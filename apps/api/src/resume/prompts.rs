// LLM prompt constants for resume analysis.

/// System prompt for resume analysis — enforces JSON-only output.
pub const RESUME_ANALYSIS_SYSTEM: &str = "You are an ATS resume analysis engine. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Resume analysis prompt template. Replace `{resume_text}` before sending.
///
/// Every field is required: the model is instructed to infer rather than
/// leave anything empty, so the reconciler's string defaults are a last
/// resort, not the expected path.
pub const RESUME_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the resume below and return a DETAILED structured JSON.

Resume Text:
{resume_text}

Your job:
- Extract maximum information.
- If something is missing, infer it intelligently.
- Do NOT leave any field empty.
- Each field must contain full, meaningful content.
- Strengths & weaknesses must be 3-4 sentences.
- Summary must be 3-5 recruiter-focused sentences.

Return ONLY valid JSON in this exact structure:

{
    "ats_score": number,
    "best_fit_role": "string",
    "top_skills": "comma-separated string",
    "strengths": "3-4 complete sentences",
    "weaknesses": "3-4 complete sentences",
    "skills_missing": "comma-separated string",
    "summary": "3-5 detailed sentences"
}

Rules:
- No explanations before or after the JSON.
- JSON must be complete and valid.
- Never return an empty key.
- Fill in all fields even if you must infer from context."#;
