//! # Surveyor - Command-line survey manager
//!
//! Surveyor keeps surveys, their questions and answer choices, and the
//! responses collected during survey runs in a single SQLite database.
//!
//! Surveyor provides:
//! - Append-only creation of surveys, questions, and answer choices
//! - Response recording during survey runs
//! - Aggregate tally reports per (survey, question, answer) combination
//! - SQLite-backed storage behind a single owned connection

pub mod config;
pub mod model;
pub mod storage;
pub mod ui;

// Re-exports for convenient access
pub use model::{AnswerChoice, Question, ReportRow, Survey};
pub use storage::SurveyStore;

/// Result type alias for Surveyor operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Surveyor operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
