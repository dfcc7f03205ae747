use tabled::{Table, Tabled, settings::Style};

use crate::model::{ReportRow, Survey};

#[derive(Tabled)]
struct ReportTableRow {
    #[tabled(rename = "Survey")]
    survey: String,
    #[tabled(rename = "Question")]
    question: String,
    #[tabled(rename = "Answer")]
    answer: String,
    #[tabled(rename = "Responses")]
    responses: i64,
}

#[derive(Tabled)]
struct SurveyTableRow {
    #[tabled(rename = "Id")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
}

/// Render the aggregate report as a rounded table
pub fn report_table(rows: &[ReportRow]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let rows: Vec<ReportTableRow> = rows
        .iter()
        .map(|r| ReportTableRow {
            survey: r.survey.clone(),
            question: r.question.clone(),
            answer: r.answer.clone(),
            responses: r.responses,
        })
        .collect();

    Table::new(&rows).with(Style::rounded()).to_string()
}

/// Render the survey listing as a rounded table
pub fn survey_table(surveys: &[Survey]) -> String {
    if surveys.is_empty() {
        return String::new();
    }

    let rows: Vec<SurveyTableRow> = surveys
        .iter()
        .map(|s| SurveyTableRow {
            id: s.id,
            name: s.name.clone(),
        })
        .collect();

    Table::new(&rows).with(Style::rounded()).to_string()
}
