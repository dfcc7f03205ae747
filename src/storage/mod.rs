//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - surveys(id, name)
//! - questions(id, survey_id, question)
//! - answers(id, question_id, answer)
//! - responses(id, question_id, answer_id)
//!
//! Foreign keys are declared but never enforced: the store does not enable
//! the `foreign_keys` pragma, so inserts are not existence-checked and
//! orphaned rows are accepted.

pub mod schema;
pub mod sqlite;

pub use sqlite::{StoreStats, SurveyStore};
