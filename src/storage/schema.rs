//! Database schema definitions

/// SQL to create the surveys table
pub const CREATE_SURVEYS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS surveys (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
)
"#;

/// SQL to create the questions table
pub const CREATE_QUESTIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS questions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    survey_id INTEGER NOT NULL,
    question TEXT NOT NULL,
    FOREIGN KEY(survey_id) REFERENCES surveys(id)
)
"#;

/// SQL to create the answers table
pub const CREATE_ANSWERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS answers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    question_id INTEGER NOT NULL,
    answer TEXT NOT NULL,
    FOREIGN KEY(question_id) REFERENCES questions(id)
)
"#;

/// SQL to create the responses table
///
/// The (question_id, answer_id) pair is not cross-checked against the
/// answers table; a response may pair a question with a choice that belongs
/// to a different question.
pub const CREATE_RESPONSES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS responses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    question_id INTEGER NOT NULL,
    answer_id INTEGER NOT NULL,
    FOREIGN KEY(question_id) REFERENCES questions(id),
    FOREIGN KEY(answer_id) REFERENCES answers(id)
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_questions_survey ON questions(survey_id)",
    "CREATE INDEX IF NOT EXISTS idx_answers_question ON answers(question_id)",
    "CREATE INDEX IF NOT EXISTS idx_responses_question ON responses(question_id)",
    "CREATE INDEX IF NOT EXISTS idx_responses_answer ON responses(answer_id)",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![
        CREATE_SURVEYS_TABLE,
        CREATE_QUESTIONS_TABLE,
        CREATE_ANSWERS_TABLE,
        CREATE_RESPONSES_TABLE,
    ];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
