use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};

use dumroo_auth::explain_access;
use dumroo_core::table::render_markdown;

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::authz::visible_view;
use crate::context::RoleContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_students))
        .route("/table", get(students_table))
}

pub async fn list_students(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RoleContext>,
) -> Response {
    match visible_view(&services, &ctx) {
        Ok(view) => Json(dto::view_to_json(&view)).into_response(),
        Err(e) => errors::access_error_to_response(e),
    }
}

pub async fn students_table(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RoleContext>,
) -> Response {
    match visible_view(&services, &ctx) {
        Ok(view) => (
            [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
            render_markdown(view.records()),
        )
            .into_response(),
        Err(e) => errors::access_error_to_response(e),
    }
}

/// Why the request's role sees what it sees. Denials are reported in the body
/// with `granted: false` rather than as an error status.
pub async fn explain(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RoleContext>,
) -> impl IntoResponse {
    Json(explain_access(services.dataset().records(), ctx.role()))
}
