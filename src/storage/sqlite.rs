//! SQLite storage implementation

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};

use super::schema;
use crate::Result;
use crate::model::{AnswerChoice, Question, ReportRow, Survey};

/// SQLite-backed store for surveys, questions, answer choices, and responses.
///
/// Owns a single connection; every operation is one statement executed under
/// SQLite's default auto-commit. There is no transaction around multi-insert
/// flows, so an interrupted survey creation leaves the rows inserted so far
/// behind.
pub struct SurveyStore {
    conn: Connection,
}

impl SurveyStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema. Safe to run on every startup.
    fn initialize_schema(&self) -> Result<()> {
        // Foreign keys are declared but never enforced (see module docs). The
        // bundled SQLite is compiled with SQLITE_DEFAULT_FOREIGN_KEYS=1, so the
        // pragma must be turned off explicitly to keep the documented
        // "orphaned rows are accepted" contract.
        self.conn.execute("PRAGMA foreign_keys = OFF", [])?;
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    // ========== Survey Operations ==========

    /// Insert a survey and return its generated id. The name is stored
    /// verbatim; the empty string is accepted.
    pub fn create_survey(&self, name: &str) -> Result<i64> {
        self.conn
            .execute("INSERT INTO surveys (name) VALUES (?1)", params![name])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Get all surveys in insertion order
    pub fn list_surveys(&self) -> Result<Vec<Survey>> {
        let mut stmt = self.conn.prepare("SELECT id, name FROM surveys ORDER BY id")?;

        let surveys = stmt
            .query_map([], |row| {
                Ok(Survey {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .filter_map(|r| r.ok())
            .collect();

        Ok(surveys)
    }

    /// Look up a survey name by id. `None` for an unknown id is a normal
    /// outcome, not an error.
    pub fn survey_name(&self, survey_id: i64) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT name FROM surveys WHERE id = ?1",
                [survey_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    // ========== Question & Answer-Choice Operations ==========

    /// Insert a question under a survey and return its generated id. The
    /// survey id is not checked for existence; rows under an unknown survey
    /// are accepted.
    pub fn add_question(&self, survey_id: i64, text: &str) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO questions (survey_id, question) VALUES (?1, ?2)",
            params![survey_id, text],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Insert an answer choice under a question, same no-verification
    /// contract as [`add_question`](Self::add_question).
    pub fn add_answer_choice(&self, question_id: i64, text: &str) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO answers (question_id, answer) VALUES (?1, ?2)",
            params![question_id, text],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Get a survey's questions in insertion order
    pub fn list_questions(&self, survey_id: i64) -> Result<Vec<Question>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, survey_id, question FROM questions WHERE survey_id = ?1 ORDER BY id",
        )?;

        let questions = stmt
            .query_map([survey_id], |row| {
                Ok(Question {
                    id: row.get(0)?,
                    survey_id: row.get(1)?,
                    text: row.get(2)?,
                })
            })?
            .filter_map(|r| r.ok())
            .collect();

        Ok(questions)
    }

    /// Get a question's answer choices in insertion order
    pub fn list_answer_choices(&self, question_id: i64) -> Result<Vec<AnswerChoice>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, question_id, answer FROM answers WHERE question_id = ?1 ORDER BY id",
        )?;

        let choices = stmt
            .query_map([question_id], |row| {
                Ok(AnswerChoice {
                    id: row.get(0)?,
                    question_id: row.get(1)?,
                    text: row.get(2)?,
                })
            })?
            .filter_map(|r| r.ok())
            .collect();

        Ok(choices)
    }

    // ========== Response Operations ==========

    /// Insert a response and return its generated id. The pair is not
    /// cross-checked: an answer id that belongs to a different question, or
    /// ids that exist nowhere, are accepted as-is.
    pub fn record_response(&self, question_id: i64, answer_id: i64) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO responses (question_id, answer_id) VALUES (?1, ?2)",
            params![question_id, answer_id],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    // ========== Report ==========

    /// Aggregate response counts per (survey, question, answer) combination.
    ///
    /// Responses join on the exact (question_id, answer_id) pair, so a
    /// response recorded against a choice of a different question matches no
    /// combination. Combinations with zero responses are omitted by the
    /// inner join. Ordered by survey, question, then answer id.
    pub fn generate_report(&self) -> Result<Vec<ReportRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT surveys.name, questions.question, answers.answer, COUNT(*) AS responses
             FROM surveys
             JOIN questions ON questions.survey_id = surveys.id
             JOIN answers ON answers.question_id = questions.id
             JOIN responses ON responses.question_id = questions.id
                           AND responses.answer_id = answers.id
             GROUP BY surveys.id, questions.id, answers.id
             ORDER BY surveys.id, questions.id, answers.id",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(ReportRow {
                    survey: row.get(0)?,
                    question: row.get(1)?,
                    answer: row.get(2)?,
                    responses: row.get(3)?,
                })
            })?
            .filter_map(|r| r.ok())
            .collect();

        Ok(rows)
    }

    // ========== Statistics ==========

    /// Count all surveys
    pub fn count_surveys(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM surveys", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Count all questions
    pub fn count_questions(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM questions", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Count all answer choices
    pub fn count_answer_choices(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM answers", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Count all recorded responses
    pub fn count_responses(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM responses", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<StoreStats> {
        Ok(StoreStats {
            surveys: self.count_surveys()?,
            questions: self.count_questions()?,
            answer_choices: self.count_answer_choices()?,
            responses: self.count_responses()?,
        })
    }
}

/// Database statistics
#[derive(Debug, Clone)]
pub struct StoreStats {
    pub surveys: usize,
    pub questions: usize,
    pub answer_choices: usize,
    pub responses: usize,
}

impl std::fmt::Display for StoreStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Store Statistics:")?;
        writeln!(f, "  Surveys: {}", self.surveys)?;
        writeln!(f, "  Questions: {}", self.questions)?;
        writeln!(f, "  Answer choices: {}", self.answer_choices)?;
        write!(f, "  Responses: {}", self.responses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_lookup_survey() {
        let store = SurveyStore::open_in_memory().unwrap();

        let id = store.create_survey("Lunch Poll").unwrap();
        assert_eq!(store.survey_name(id).unwrap().as_deref(), Some("Lunch Poll"));
    }

    #[test]
    fn test_survey_name_missing_is_none() {
        let store = SurveyStore::open_in_memory().unwrap();

        assert_eq!(store.survey_name(42).unwrap(), None);
    }

    #[test]
    fn test_empty_survey_name_accepted() {
        let store = SurveyStore::open_in_memory().unwrap();

        let id = store.create_survey("").unwrap();
        assert_eq!(store.survey_name(id).unwrap().as_deref(), Some(""));
    }

    #[test]
    fn test_list_surveys_in_insertion_order() {
        let store = SurveyStore::open_in_memory().unwrap();

        store.create_survey("first").unwrap();
        store.create_survey("second").unwrap();
        store.create_survey("third").unwrap();

        let names: Vec<String> = store
            .list_surveys()
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_questions_and_choices_in_insertion_order() {
        let store = SurveyStore::open_in_memory().unwrap();

        let survey_id = store.create_survey("Lunch Poll").unwrap();
        let q1 = store.add_question(survey_id, "Best day?").unwrap();
        let q2 = store.add_question(survey_id, "Best place?").unwrap();

        store.add_answer_choice(q1, "Mon").unwrap();
        store.add_answer_choice(q1, "Tue").unwrap();
        store.add_answer_choice(q2, "Cafe").unwrap();

        let questions = store.list_questions(survey_id).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].id, q1);
        assert_eq!(questions[0].text, "Best day?");
        assert_eq!(questions[1].id, q2);

        let choices: Vec<String> = store
            .list_answer_choices(q1)
            .unwrap()
            .into_iter()
            .map(|c| c.text)
            .collect();
        assert_eq!(choices, vec!["Mon", "Tue"]);
    }

    #[test]
    fn test_question_under_unknown_survey_accepted() {
        let store = SurveyStore::open_in_memory().unwrap();

        // No survey 999 exists; the insert still succeeds (foreign keys are
        // declared, not enforced).
        let q = store.add_question(999, "Orphaned?").unwrap();
        let questions = store.list_questions(999).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].id, q);
        assert_eq!(questions[0].survey_id, 999);
    }

    #[test]
    fn test_record_response_accepts_mismatched_pair() {
        let store = SurveyStore::open_in_memory().unwrap();

        let survey_id = store.create_survey("Lunch Poll").unwrap();
        let q1 = store.add_question(survey_id, "Best day?").unwrap();
        let q2 = store.add_question(survey_id, "Best place?").unwrap();
        let a1 = store.add_answer_choice(q1, "Mon").unwrap();

        // a1 belongs to q1, not q2; the store must accept this anyway.
        store.record_response(q2, a1).unwrap();
        assert_eq!(store.count_responses().unwrap(), 1);
    }

    #[test]
    fn test_report_counts_exact_pairs() {
        let store = SurveyStore::open_in_memory().unwrap();

        let survey_id = store.create_survey("Lunch Poll").unwrap();
        let q = store.add_question(survey_id, "Best day?").unwrap();
        let mon = store.add_answer_choice(q, "Mon").unwrap();
        let tue = store.add_answer_choice(q, "Tue").unwrap();

        store.record_response(q, mon).unwrap();
        store.record_response(q, mon).unwrap();
        store.record_response(q, tue).unwrap();

        let report = store.generate_report().unwrap();
        assert_eq!(
            report,
            vec![
                ReportRow {
                    survey: "Lunch Poll".to_string(),
                    question: "Best day?".to_string(),
                    answer: "Mon".to_string(),
                    responses: 2,
                },
                ReportRow {
                    survey: "Lunch Poll".to_string(),
                    question: "Best day?".to_string(),
                    answer: "Tue".to_string(),
                    responses: 1,
                },
            ]
        );
    }

    #[test]
    fn test_report_omits_unanswered_choices() {
        let store = SurveyStore::open_in_memory().unwrap();

        let survey_id = store.create_survey("Lunch Poll").unwrap();
        let q = store.add_question(survey_id, "Best day?").unwrap();
        let mon = store.add_answer_choice(q, "Mon").unwrap();
        store.add_answer_choice(q, "Tue").unwrap();

        store.record_response(q, mon).unwrap();

        let report = store.generate_report().unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].answer, "Mon");
        assert_eq!(report[0].responses, 1);
    }

    #[test]
    fn test_mismatched_response_never_reaches_report() {
        let store = SurveyStore::open_in_memory().unwrap();

        let survey_id = store.create_survey("Lunch Poll").unwrap();
        let q1 = store.add_question(survey_id, "Best day?").unwrap();
        let q2 = store.add_question(survey_id, "Best place?").unwrap();
        let a1 = store.add_answer_choice(q1, "Mon").unwrap();

        store.record_response(q2, a1).unwrap();

        // The pair (q2, a1) matches no (question, answer) combination.
        assert!(store.generate_report().unwrap().is_empty());
    }

    #[test]
    fn test_report_empty_without_responses() {
        let store = SurveyStore::open_in_memory().unwrap();

        let survey_id = store.create_survey("Lunch Poll").unwrap();
        let q = store.add_question(survey_id, "Best day?").unwrap();
        store.add_answer_choice(q, "Mon").unwrap();

        assert!(store.generate_report().unwrap().is_empty());
    }

    #[test]
    fn test_open_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("survey.db");

        {
            let store = SurveyStore::open(&path).unwrap();
            store.create_survey("Persisted").unwrap();
        }

        // Re-opening re-runs schema creation against existing tables and
        // must leave the data untouched.
        let store = SurveyStore::open(&path).unwrap();
        let surveys = store.list_surveys().unwrap();
        assert_eq!(surveys.len(), 1);
        assert_eq!(surveys[0].name, "Persisted");
    }

    #[test]
    fn test_stats_counts() {
        let store = SurveyStore::open_in_memory().unwrap();

        let survey_id = store.create_survey("Lunch Poll").unwrap();
        let q = store.add_question(survey_id, "Best day?").unwrap();
        let mon = store.add_answer_choice(q, "Mon").unwrap();
        store.add_answer_choice(q, "Tue").unwrap();
        store.record_response(q, mon).unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(stats.surveys, 1);
        assert_eq!(stats.questions, 1);
        assert_eq!(stats.answer_choices, 2);
        assert_eq!(stats.responses, 1);
    }
}
