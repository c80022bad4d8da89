//! Per-artifact semantic checks on decoded AI output.
//!
//! Validators never mutate or repair; they confirm the payload or fail with
//! a [`MalformedArtifact`] naming the offending clause. Retrying is the
//! caller's decision.

use super::types::{InsightPayload, QuizPayload, ResumeAnalysisPayload};
use super::MalformedArtifact;

/// A validated quiz has exactly this many questions.
pub const QUIZ_QUESTION_COUNT: usize = 10;
/// Each question carries exactly this many answer options.
pub const QUIZ_OPTION_COUNT: usize = 4;

/// Shortest prose artifact (cover letter, rewritten section) we accept.
pub const MIN_PROSE_LEN: usize = 10;

pub const DEMAND_LEVELS: [&str; 3] = ["HIGH", "MEDIUM", "LOW"];
pub const MARKET_OUTLOOKS: [&str; 3] = ["POSITIVE", "NEUTRAL", "NEGATIVE"];

const QUIZ: &str = "interview quiz";
const INSIGHT: &str = "industry insight";
const ANALYSIS: &str = "resume analysis";

/// Validates a generated quiz: 10 questions, 4 options each, `correctAnswer`
/// string-equal to one of the options, non-empty question and explanation.
pub fn validate_quiz(quiz: &QuizPayload) -> Result<(), MalformedArtifact> {
    if quiz.questions.len() != QUIZ_QUESTION_COUNT {
        return Err(MalformedArtifact::new(
            QUIZ,
            format!(
                "expected {} questions, got {}",
                QUIZ_QUESTION_COUNT,
                quiz.questions.len()
            ),
        ));
    }

    for (i, q) in quiz.questions.iter().enumerate() {
        if q.question.trim().is_empty() {
            return Err(MalformedArtifact::new(
                QUIZ,
                format!("question {i}: empty question text"),
            ));
        }
        if q.options.len() != QUIZ_OPTION_COUNT {
            return Err(MalformedArtifact::new(
                QUIZ,
                format!(
                    "question {i}: expected {} options, got {}",
                    QUIZ_OPTION_COUNT,
                    q.options.len()
                ),
            ));
        }
        // Exact, case-sensitive match against the options
        if !q.options.iter().any(|o| o == &q.correct_answer) {
            return Err(MalformedArtifact::new(
                QUIZ,
                format!("question {i}: correctAnswer does not match any option"),
            ));
        }
        if q.explanation.trim().is_empty() {
            return Err(MalformedArtifact::new(
                QUIZ,
                format!("question {i}: empty explanation"),
            ));
        }
    }

    Ok(())
}

/// Validates an industry market report: salary coverage, skill coverage, and
/// membership of the categorical fields.
pub fn validate_industry_insight(insight: &InsightPayload) -> Result<(), MalformedArtifact> {
    if insight.salary_ranges.len() < 3 {
        return Err(MalformedArtifact::new(
            INSIGHT,
            format!(
                "salaryRanges must contain at least 3 entries, got {}",
                insight.salary_ranges.len()
            ),
        ));
    }
    if insight.top_skills.len() < 5 {
        return Err(MalformedArtifact::new(
            INSIGHT,
            format!(
                "topSkills must contain at least 5 entries, got {}",
                insight.top_skills.len()
            ),
        ));
    }
    if !DEMAND_LEVELS.contains(&insight.demand_level.as_str()) {
        return Err(MalformedArtifact::new(
            INSIGHT,
            format!(
                "demandLevel '{}' is not one of HIGH, MEDIUM, LOW",
                insight.demand_level
            ),
        ));
    }
    if !MARKET_OUTLOOKS.contains(&insight.market_outlook.as_str()) {
        return Err(MalformedArtifact::new(
            INSIGHT,
            format!(
                "marketOutlook '{}' is not one of POSITIVE, NEUTRAL, NEGATIVE",
                insight.market_outlook
            ),
        ));
    }

    Ok(())
}

/// Validates a resume critique: a finite 0–100 score and both lists present
/// (presence is enforced by the decoder; the range check lives here).
pub fn validate_resume_analysis(analysis: &ResumeAnalysisPayload) -> Result<(), MalformedArtifact> {
    if !analysis.score.is_finite() || !(0.0..=100.0).contains(&analysis.score) {
        return Err(MalformedArtifact::new(
            ANALYSIS,
            format!("score {} is not within 0–100", analysis.score),
        ));
    }
    Ok(())
}

/// Validates a free-form prose artifact (cover letter, rewritten resume
/// section): non-empty and minimally plausible length.
pub fn validate_prose(artifact: &'static str, text: &str) -> Result<(), MalformedArtifact> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(MalformedArtifact::new(artifact, "empty output"));
    }
    if trimmed.chars().count() < MIN_PROSE_LEN {
        return Err(MalformedArtifact::new(
            artifact,
            format!("output shorter than {MIN_PROSE_LEN} characters"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::types::{QuizQuestion, SalaryRange};

    fn valid_question(n: usize) -> QuizQuestion {
        QuizQuestion {
            question: format!("Question {n}?"),
            options: vec![
                "Option A".to_string(),
                "Option B".to_string(),
                "Option C".to_string(),
                "Option D".to_string(),
            ],
            correct_answer: "Option B".to_string(),
            explanation: format!("Because B is correct for {n}."),
        }
    }

    fn valid_quiz() -> QuizPayload {
        QuizPayload {
            questions: (0..10).map(valid_question).collect(),
        }
    }

    fn valid_insight() -> InsightPayload {
        let range = |role: &str| SalaryRange {
            role: role.to_string(),
            min: 80_000.0,
            max: 180_000.0,
            median: 120_000.0,
            location: None,
        };
        InsightPayload {
            salary_ranges: vec![range("Junior"), range("Mid"), range("Senior")],
            growth_rate: 6.5,
            demand_level: "HIGH".to_string(),
            top_skills: ["Python", "SQL", "Spark", "Airflow", "dbt"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            market_outlook: "POSITIVE".to_string(),
            key_trends: (0..5).map(|i| format!("Trend {i}")).collect(),
            recommended_skills: (0..5).map(|i| format!("Skill {i}")).collect(),
        }
    }

    #[test]
    fn test_valid_quiz_passes() {
        assert!(validate_quiz(&valid_quiz()).is_ok());
    }

    #[test]
    fn test_quiz_wrong_question_count_fails() {
        let mut quiz = valid_quiz();
        quiz.questions.pop();
        let err = validate_quiz(&quiz).unwrap_err();
        assert!(err.detail.contains("expected 10 questions"));
    }

    #[test]
    fn test_quiz_wrong_option_count_names_question_index() {
        let mut quiz = valid_quiz();
        quiz.questions[3].options.pop();
        let err = validate_quiz(&quiz).unwrap_err();
        assert!(err.detail.contains("question 3"));
        assert!(err.detail.contains("options"));
    }

    #[test]
    fn test_quiz_correct_answer_must_be_an_option() {
        let mut quiz = valid_quiz();
        quiz.questions[7].correct_answer = "Option Z".to_string();
        let err = validate_quiz(&quiz).unwrap_err();
        assert!(err.detail.contains("question 7"));
        assert!(err.detail.contains("correctAnswer"));
    }

    #[test]
    fn test_quiz_correct_answer_match_is_case_sensitive() {
        let mut quiz = valid_quiz();
        quiz.questions[0].correct_answer = "option b".to_string();
        assert!(validate_quiz(&quiz).is_err());
    }

    #[test]
    fn test_quiz_empty_question_text_fails() {
        let mut quiz = valid_quiz();
        quiz.questions[5].question = "   ".to_string();
        let err = validate_quiz(&quiz).unwrap_err();
        assert!(err.detail.contains("question 5"));
    }

    #[test]
    fn test_quiz_empty_explanation_fails() {
        let mut quiz = valid_quiz();
        quiz.questions[9].explanation = String::new();
        let err = validate_quiz(&quiz).unwrap_err();
        assert!(err.detail.contains("question 9"));
        assert!(err.detail.contains("explanation"));
    }

    #[test]
    fn test_valid_insight_passes() {
        assert!(validate_industry_insight(&valid_insight()).is_ok());
    }

    #[test]
    fn test_insight_too_few_salary_ranges_fails() {
        let mut insight = valid_insight();
        insight.salary_ranges.truncate(2);
        let err = validate_industry_insight(&insight).unwrap_err();
        assert!(err.detail.contains("salaryRanges"));
    }

    #[test]
    fn test_insight_too_few_top_skills_fails() {
        let mut insight = valid_insight();
        insight.top_skills.truncate(4);
        let err = validate_industry_insight(&insight).unwrap_err();
        assert!(err.detail.contains("topSkills"));
    }

    #[test]
    fn test_insight_demand_level_membership() {
        let mut insight = valid_insight();
        insight.demand_level = "EXTREME".to_string();
        let err = validate_industry_insight(&insight).unwrap_err();
        assert!(err.detail.contains("demandLevel"));

        for level in DEMAND_LEVELS {
            let mut ok = valid_insight();
            ok.demand_level = level.to_string();
            assert!(validate_industry_insight(&ok).is_ok());
        }
    }

    #[test]
    fn test_insight_market_outlook_membership() {
        let mut insight = valid_insight();
        insight.market_outlook = "positive".to_string(); // lowercase rejected
        let err = validate_industry_insight(&insight).unwrap_err();
        assert!(err.detail.contains("marketOutlook"));

        for outlook in MARKET_OUTLOOKS {
            let mut ok = valid_insight();
            ok.market_outlook = outlook.to_string();
            assert!(validate_industry_insight(&ok).is_ok());
        }
    }

    #[test]
    fn test_resume_analysis_score_in_range_passes() {
        let analysis = ResumeAnalysisPayload {
            score: 73.5,
            strengths: vec!["Clear impact metrics".to_string()],
            improvements: vec!["Tighten the summary".to_string()],
        };
        assert!(validate_resume_analysis(&analysis).is_ok());
    }

    #[test]
    fn test_resume_analysis_score_out_of_range_fails() {
        let analysis = ResumeAnalysisPayload {
            score: 130.0,
            strengths: vec![],
            improvements: vec![],
        };
        assert!(validate_resume_analysis(&analysis).is_err());
    }

    #[test]
    fn test_resume_analysis_nan_score_fails() {
        let analysis = ResumeAnalysisPayload {
            score: f64::NAN,
            strengths: vec![],
            improvements: vec![],
        };
        assert!(validate_resume_analysis(&analysis).is_err());
    }

    #[test]
    fn test_prose_minimum_length() {
        assert!(validate_prose("cover letter", "Dear Hiring Manager, I am writing…").is_ok());
        assert!(validate_prose("cover letter", "Too short").is_err());
        assert!(validate_prose("cover letter", "   ").is_err());
    }
}
