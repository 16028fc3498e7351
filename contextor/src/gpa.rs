//! CGPA tool: the model extracts `{credits, points}` records from free text,
//! the weighted average is computed locally.

use ai_llm_service::ChatModel;
use serde::{Deserialize, Deserializer};
use tracing::{info, warn};

use crate::{
    api_types::{Answer, ChatMode},
    prompt::build_grade_extraction_prompt,
    usage::fixed_completion_usage,
};

pub const NEED_MORE_INFO: &str = "I can calculate your CGPA, but I need more specific information about your courses, credits, and grades. Please provide this information in your question.";
pub const CALCULATION_FAILED: &str =
    "I encountered an error trying to calculate your CGPA. Please try asking in a different way.";

const RESULT_TOKENS: u32 = 20;
const NEED_MORE_TOKENS: u32 = 30;

/// One course: credit weight and grade points.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GradeRecord {
    #[serde(deserialize_with = "lenient_f64")]
    pub credits: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub points: f64,
}

/// Models sometimes quote numbers; accept `3`, `3.5` and `"3.5"`.
fn lenient_f64<'de, D>(de: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrStr {
        Num(f64),
        Str(String),
    }

    match NumOrStr::deserialize(de)? {
        NumOrStr::Num(n) => Ok(n),
        NumOrStr::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Parses the slice between the first `[` and the last `]` of `raw`.
///
/// Any failure (no brackets, bad JSON, wrong shape) yields an empty list.
pub fn extract_grades(raw: &str) -> Vec<GradeRecord> {
    let (Some(start), Some(end)) = (raw.find('['), raw.rfind(']')) else {
        return Vec::new();
    };
    if end <= start {
        return Vec::new();
    }
    match serde_json::from_str::<Vec<GradeRecord>>(&raw[start..=end]) {
        Ok(grades) => grades,
        Err(e) => {
            warn!(error = %e, "failed to parse grade records");
            Vec::new()
        }
    }
}

/// Credit-weighted average of grade points.
///
/// `None` when there are no records or the credits sum to zero.
///
/// # Example
/// ```
/// use contextor::gpa::{GradeRecord, compute_cgpa};
/// let grades = [
///     GradeRecord { credits: 3.0, points: 4.0 },
///     GradeRecord { credits: 2.0, points: 3.0 },
/// ];
/// assert_eq!(format!("{:.2}", compute_cgpa(&grades).unwrap()), "3.60");
/// ```
pub fn compute_cgpa(grades: &[GradeRecord]) -> Option<f64> {
    let credits: f64 = grades.iter().map(|g| g.credits).sum();
    if grades.is_empty() || credits == 0.0 {
        return None;
    }
    let weighted: f64 = grades.iter().map(|g| g.credits * g.points).sum();
    Some(weighted / credits)
}

/// Two-decimal CGPA text with ties rounded away from zero (3.125 → "3.13").
///
/// `{:.2}` alone rounds exact binary ties to even, which would print "3.12".
pub fn format_cgpa(cgpa: f64) -> String {
    format!("{:.2}", (cgpa * 100.0).round() / 100.0)
}

/// Runs the full CGPA tool for `question`. Never fails: every outcome is a
/// user-facing answer.
pub async fn handle_request(llm: &dyn ChatModel, question: &str) -> Answer {
    let prompt = build_grade_extraction_prompt(question);

    let (answer, completion_tokens) = match llm.complete(&prompt).await {
        Ok(out) => match compute_cgpa(&extract_grades(&out.content)) {
            Some(cgpa) => {
                info!(cgpa, "cgpa computed");
                (
                    format!(
                        "Based on the grades you provided, your CGPA is {}.",
                        format_cgpa(cgpa)
                    ),
                    RESULT_TOKENS,
                )
            }
            None => (NEED_MORE_INFO.to_string(), NEED_MORE_TOKENS),
        },
        Err(e) => {
            warn!(error = %e, "grade extraction call failed");
            (CALCULATION_FAILED.to_string(), RESULT_TOKENS)
        }
    };

    Answer {
        answer,
        context: None,
        usage: fixed_completion_usage(question, completion_tokens),
        web_results: None,
        mode: ChatMode::Agent,
    }
}
