use std::sync::Arc;

use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use dumroo_auth::catalog::describe;

use crate::app::dto;
use crate::app::services::AppServices;
use crate::context::RoleContext;

const EXAMPLE_QUESTIONS: [&str; 6] = [
    "Which students haven't submitted their homework yet?",
    "Show me performance data for Grade 8 from last week.",
    "List all upcoming quizzes scheduled for next week.",
    "What is the average quiz score for students in 8A?",
    "How many students are in the North region?",
    "Show me all students with a quiz score less than 75.",
];

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(Extension(ctx): Extension<RoleContext>) -> impl IntoResponse {
    let mut body = dto::role_to_json(ctx.role());
    body["description"] = json!(describe(ctx.role()));
    Json(body)
}

/// Sample questions plus the date "last week" and "next week" are relative to.
pub async fn examples(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    Json(json!({
        "reference_date": services.dispatcher().config().reference_date.to_string(),
        "questions": EXAMPLE_QUESTIONS,
    }))
}
