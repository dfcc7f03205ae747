//! Survey domain types
//!
//! Everything the store hands out is one of these four shapes. All ids are
//! store-assigned rowids, monotonically increasing within their table, and
//! no row is ever updated or deleted after insertion.

use serde::{Deserialize, Serialize};

/// A named survey owning an ordered set of questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Survey {
    pub id: i64,
    /// Display name. Empty names are accepted and kept as-is.
    pub name: String,
}

/// A prompt belonging to exactly one survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    /// Owning survey. Not checked against `surveys` at insert time.
    pub survey_id: i64,
    pub text: String,
}

/// One selectable choice for a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerChoice {
    pub id: i64,
    /// Owning question. Not checked against `questions` at insert time.
    pub question_id: i64,
    pub text: String,
}

/// One aggregated report line: how many responses picked this answer choice.
///
/// Only combinations with at least one matching response are reported;
/// zero-count lines never appear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub survey: String,
    pub question: String,
    pub answer: String,
    pub responses: i64,
}

impl std::fmt::Display for ReportRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} / {} / {} ({} responses)",
            self.survey, self.question, self.answer, self.responses
        )
    }
}
