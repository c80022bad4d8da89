// LLM prompt constants for cover letter generation.

use crate::models::user::User;

use super::CoverLetterRequest;

/// System prompt for cover letter writing.
pub const COVER_LETTER_SYSTEM: &str =
    "You are an expert career writer crafting tailored, professional cover letters \
    grounded strictly in the candidate's stated background.";

/// Cover letter prompt template. Replace {job_title}, {company_name},
/// {industry}, {experience}, {skills}, {bio}, {job_description},
/// {prose_only_instruction} before sending.
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Write a cover letter for the position of {job_title} at {company_name}.

CANDIDATE PROFILE:
- Industry: {industry}
- Years of experience: {experience}
- Skills: {skills}
- Background: {bio}

JOB DESCRIPTION:
{job_description}

Requirements:
1. Professional yet enthusiastic tone
2. At most 400 words
3. Connect the candidate's actual background to the job's requirements
4. Do NOT invent employers, titles, or credentials absent from the profile

{prose_only_instruction}"#;

pub fn build_cover_letter_prompt(user: &User, request: &CoverLetterRequest) -> String {
    COVER_LETTER_PROMPT_TEMPLATE
        .replace("{job_title}", request.job_title.trim())
        .replace("{company_name}", request.company_name.trim())
        .replace("{industry}", user.industry.as_deref().unwrap_or("unspecified"))
        .replace(
            "{experience}",
            &user
                .experience_years
                .map(|y| y.to_string())
                .unwrap_or_else(|| "unspecified".to_string()),
        )
        .replace(
            "{skills}",
            &if user.skills.is_empty() {
                "unspecified".to_string()
            } else {
                user.skills.join(", ")
            },
        )
        .replace("{bio}", user.bio.as_deref().unwrap_or("unspecified"))
        .replace("{job_description}", &request.job_description)
        .replace(
            "{prose_only_instruction}",
            crate::llm_client::prompts::PROSE_ONLY_INSTRUCTION,
        )
}
