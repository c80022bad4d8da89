// LLM prompt constants for interview prep.

/// System prompt for quiz generation.
pub const QUIZ_SYSTEM: &str =
    "You are an experienced technical interviewer writing fair, precise \
    multiple-choice questions for working professionals.";

/// Quiz prompt template. Replace {question_count}, {industry},
/// {skills_clause}, {json_only_instruction} before sending.
pub const QUIZ_PROMPT_TEMPLATE: &str = r#"Generate {question_count} interview questions for a {industry} professional{skills_clause}.

Each question must be multiple choice with exactly 4 options.

Return ONLY a JSON object in this format:
{
  "questions": [
    {
      "question": "string",
      "options": ["string", "string", "string", "string"],
      "correctAnswer": "string",
      "explanation": "string"
    }
  ]
}

{json_only_instruction}

correctAnswer must exactly match one of the options, character for character.
Every question needs a brief explanation of the correct answer."#;

pub fn build_quiz_prompt(industry: &str, skills: &[String]) -> String {
    let skills_clause = if skills.is_empty() {
        String::new()
    } else {
        format!(" with expertise in {}", skills.join(", "))
    };

    QUIZ_PROMPT_TEMPLATE
        .replace(
            "{question_count}",
            &crate::artifact::schema::QUIZ_QUESTION_COUNT.to_string(),
        )
        .replace("{industry}", industry)
        .replace("{skills_clause}", &skills_clause)
        .replace(
            "{json_only_instruction}",
            crate::llm_client::prompts::JSON_ONLY_INSTRUCTION,
        )
}

/// System prompt for the post-quiz improvement tip.
pub const TIP_SYSTEM: &str =
    "You are an encouraging interview coach helping a candidate close \
    specific knowledge gaps.";

/// Improvement tip template. Replace {industry}, {wrong_answers},
/// {prose_only_instruction} before sending.
pub const TIP_PROMPT_TEMPLATE: &str = r#"A {industry} professional answered the following interview questions incorrectly:

{wrong_answers}

Based on these mistakes, give a concise, encouraging improvement tip.
Focus on the underlying knowledge gaps, not the specific questions.
Keep it under 2 sentences.

{prose_only_instruction}"#;

pub fn build_tip_prompt(industry: &str, wrong_answers: &str) -> String {
    TIP_PROMPT_TEMPLATE
        .replace("{industry}", industry)
        .replace("{wrong_answers}", wrong_answers)
        .replace(
            "{prose_only_instruction}",
            crate::llm_client::prompts::PROSE_ONLY_INSTRUCTION,
        )
}
