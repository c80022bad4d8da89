//! Typed payloads for each JSON-returning artifact. Field names mirror the
//! prompt schemas (camelCase on the wire).

use serde::{Deserialize, Serialize};

/// A single multiple-choice interview question.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
}

/// A generated interview quiz. Always 10 questions once validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizPayload {
    pub questions: Vec<QuizQuestion>,
}

/// A salary band for one role within an industry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryRange {
    pub role: String,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    #[serde(default)]
    pub location: Option<String>,
}

/// A full industry market report as produced by the LLM.
///
/// `demand_level` and `market_outlook` stay as strings here; membership in
/// the allowed sets is a schema check, not a decode concern (see
/// [`super::schema::validate_industry_insight`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightPayload {
    pub salary_ranges: Vec<SalaryRange>,
    pub growth_rate: f64,
    pub demand_level: String,
    pub top_skills: Vec<String>,
    pub market_outlook: String,
    pub key_trends: Vec<String>,
    pub recommended_skills: Vec<String>,
}

/// A structured resume critique.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAnalysisPayload {
    pub score: f64,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}
