use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use dumroo_ai::QueryError;
use dumroo_auth::AccessError;

pub fn access_error_to_response(err: AccessError) -> Response {
    match err {
        AccessError::InvalidRoleScope(_) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_role_scope", err.to_string())
        }
        AccessError::UnknownRole(_) => {
            json_error(StatusCode::BAD_REQUEST, "unknown_role", err.to_string())
        }
    }
}

pub fn query_error_to_response(err: QueryError) -> Response {
    match err {
        QueryError::EmptyQuestion => {
            json_error(StatusCode::BAD_REQUEST, "empty_question", err.to_string())
        }
        QueryError::UpstreamUnavailable(_) => {
            json_error(StatusCode::BAD_GATEWAY, "upstream_unavailable", err.to_string())
        }
        QueryError::UpstreamTimeout(_) => {
            json_error(StatusCode::GATEWAY_TIMEOUT, "upstream_timeout", err.to_string())
        }
    }
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
