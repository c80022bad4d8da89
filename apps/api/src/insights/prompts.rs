// LLM prompt constants for industry insight generation.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for market-report generation.
pub const INSIGHT_SYSTEM: &str =
    "You are a labor-market analyst producing structured industry reports \
    grounded in current hiring and compensation data.";

/// Insight prompt template. Replace `{industry}` and
/// `{json_only_instruction}` before sending.
pub const INSIGHT_PROMPT_TEMPLATE: &str = r#"Analyze the current state of the {industry} industry and return insights in ONLY the following JSON format:

{
  "salaryRanges": [
    { "role": "string", "min": 0, "max": 0, "median": 0, "location": "string" }
  ],
  "growthRate": 0.0,
  "demandLevel": "HIGH" | "MEDIUM" | "LOW",
  "topSkills": ["skill1", "skill2"],
  "marketOutlook": "POSITIVE" | "NEUTRAL" | "NEGATIVE",
  "keyTrends": ["trend1", "trend2"],
  "recommendedSkills": ["skill1", "skill2"]
}

{json_only_instruction}

Include at least 5 common roles in salaryRanges. growthRate is a percentage.
Include at least 5 topSkills, exactly 5 keyTrends, and exactly 5 recommendedSkills.
demandLevel and marketOutlook must be UPPERCASE."#;

pub fn build_insight_prompt(industry: &str) -> String {
    INSIGHT_PROMPT_TEMPLATE
        .replace("{industry}", industry)
        .replace(
            "{json_only_instruction}",
            crate::llm_client::prompts::JSON_ONLY_INSTRUCTION,
        )
}
