use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::authz::visible_view;
use crate::context::RoleContext;

/// Answer a question about the data visible to the request's role.
///
/// The completion call is blocking, so it runs on the blocking pool. Bodies
/// that are not a JSON `AskRequest` get the usual JSON error shape.
pub async fn ask(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RoleContext>,
    body: Result<Json<dto::AskRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(e) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_body", e.body_text());
        }
    };

    let view = match visible_view(&services, &ctx) {
        Ok(v) => v,
        Err(e) => return errors::access_error_to_response(e),
    };

    let dto::AskRequest { question, history } = body;
    let outcome = tokio::task::spawn_blocking(move || {
        services
            .dispatcher()
            .answer_with_history(&view, &question, &history)
    })
    .await;

    match outcome {
        Ok(Ok(result)) => Json(dto::answer_to_json(&result)).into_response(),
        Ok(Err(e)) => errors::query_error_to_response(e),
        Err(e) => {
            tracing::error!(error = %e, "question task failed");
            errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "question task failed",
            )
        }
    }
}
