// src/handlers/questions.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::json;

use crate::{config::QUIZ_QUESTION_COUNT, error::AppError, question_bank::QuestionBank};

/// Lists the subjects available in the question bank.
pub async fn list_subjects(State(bank): State<Arc<QuestionBank>>) -> impl IntoResponse {
    Json(json!({ "subjects": bank.subjects() }))
}

/// Returns a random quiz paper for a subject: a uniform sample of up to 20
/// questions. Subject lookup is exact (case-sensitive).
pub async fn get_subject_questions(
    State(bank): State<Arc<QuestionBank>>,
    Path(subject): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let paper = bank.sample(&subject, QUIZ_QUESTION_COUNT).ok_or_else(|| {
        AppError::NotFound(format!("No questions found for subject: {}", subject))
    })?;

    Ok(Json(paper))
}
