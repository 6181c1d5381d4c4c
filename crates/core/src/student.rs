use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::id::StudentId;

/// Submission state of a single assignment.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Submitted,
    Pending,
    Late,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Submitted => "submitted",
            SubmissionStatus::Pending => "pending",
            SubmissionStatus::Late => "late",
        }
    }
}

impl core::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One assignment and its submission state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub assignment: String,
    pub status: SubmissionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
}

/// One quiz entry.
///
/// A quiz without a score is scheduled but not yet taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizScore {
    pub quiz: String,
    #[serde(default)]
    pub score: Option<f64>,
    pub date: NaiveDate,
}

impl QuizScore {
    pub fn is_scheduled(&self) -> bool {
        self.score.is_none()
    }
}

/// One row of the student dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    #[serde(alias = "id")]
    pub student_id: StudentId,

    #[serde(alias = "student_name")]
    pub name: String,

    /// Grade as a string; integer grades in source data are normalized ("8").
    #[serde(deserialize_with = "deserialize_grade")]
    pub grade: String,

    #[serde(alias = "class_section")]
    pub class: String,

    pub region: String,

    #[serde(default)]
    pub submissions: Vec<Submission>,

    /// Quiz history in source order.
    #[serde(default)]
    pub quizzes: Vec<QuizScore>,
}

impl StudentRecord {
    /// Check the record invariants required for role filtering to be sound.
    pub fn validate(&self) -> DomainResult<()> {
        for (field, value) in [
            ("grade", &self.grade),
            ("class", &self.class),
            ("region", &self.region),
        ] {
            if value.trim().is_empty() {
                return Err(DomainError::invariant(format!(
                    "student {} has an empty {field}",
                    self.student_id
                )));
            }
        }

        if let Some(q) = self
            .quizzes
            .iter()
            .find(|q| q.score.is_some_and(|s| !s.is_finite()))
        {
            return Err(DomainError::validation(format!(
                "student {} has a non-finite score for quiz '{}'",
                self.student_id, q.quiz
            )));
        }

        Ok(())
    }

    /// Mean of all taken quizzes, `None` when no quiz has a score.
    pub fn average_quiz_score(&self) -> Option<f64> {
        let scores: Vec<f64> = self.quizzes.iter().filter_map(|q| q.score).collect();
        if scores.is_empty() {
            return None;
        }
        Some(scores.iter().sum::<f64>() / scores.len() as f64)
    }

    pub fn pending_assignments(&self) -> impl Iterator<Item = &Submission> {
        self.submissions
            .iter()
            .filter(|s| s.status == SubmissionStatus::Pending)
    }
}

fn deserialize_grade<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawGrade {
        Text(String),
        Number(u64),
    }

    Ok(match RawGrade::deserialize(deserializer)? {
        RawGrade::Text(s) => s,
        RawGrade::Number(n) => n.to_string(),
    })
}
