// LLM prompt constants for resume rewriting and critique.

/// System prompt for section rewriting.
pub const IMPROVE_SYSTEM: &str =
    "You are an expert resume writer. You rewrite resume content to be more \
    impactful and quantified without inventing facts.";

/// Rewrite template. Replace {section}, {industry}, {current_content},
/// {prose_only_instruction} before sending.
pub const IMPROVE_PROMPT_TEMPLATE: &str = r#"Improve the following {section} section of a {industry} professional's resume.

CURRENT CONTENT:
{current_content}

Requirements:
1. Use strong action verbs
2. Quantify outcomes where the content supports it
3. Keep every claim grounded in the current content — no invented facts
4. Keep it concise and aligned with {industry} hiring expectations

{prose_only_instruction}"#;

pub fn build_improve_prompt(section: &str, industry: &str, current_content: &str) -> String {
    IMPROVE_PROMPT_TEMPLATE
        .replace("{section}", section)
        .replace("{industry}", industry)
        .replace("{current_content}", current_content)
        .replace(
            "{prose_only_instruction}",
            crate::llm_client::prompts::PROSE_ONLY_INSTRUCTION,
        )
}

/// System prompt for the structured resume critique.
pub const ANALYZE_SYSTEM: &str =
    "You are a rigorous resume reviewer scoring against industry hiring bars.";

/// Critique template. Replace {industry}, {resume_content},
/// {json_only_instruction} before sending.
pub const ANALYZE_PROMPT_TEMPLATE: &str = r#"Review this resume for a {industry} role and return ONLY a JSON object in this format:

{
  "score": 0,
  "strengths": ["string"],
  "improvements": ["string"]
}

score is 0-100. strengths and improvements each list concrete, specific points.

{json_only_instruction}

RESUME:
{resume_content}"#;

pub fn build_analyze_prompt(industry: &str, resume_content: &str) -> String {
    ANALYZE_PROMPT_TEMPLATE
        .replace("{industry}", industry)
        .replace("{resume_content}", resume_content)
        .replace(
            "{json_only_instruction}",
            crate::llm_client::prompts::JSON_ONLY_INSTRUCTION,
        )
}
