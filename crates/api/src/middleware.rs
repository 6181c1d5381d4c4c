use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

use dumroo_auth::{AdminRole, RoleKind};

use crate::app::errors::json_error;
use crate::context::RoleContext;

pub const ROLE_HEADER: &str = "x-admin-role";
pub const SCOPE_HEADER: &str = "x-admin-scope";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Derive the [`RoleContext`] from request headers.
///
/// `x-admin-role` is either a role kind (`grade_admin`, with the scope in
/// `x-admin-scope`) or a preset label (`Grade 8 Admin`). Scope validity is left
/// to the access filter.
pub async fn role_middleware(mut req: Request, next: Next) -> Result<Response, Response> {
    let role = extract_role(req.headers())?;
    req.extensions_mut().insert(RoleContext::new(role));
    Ok(next.run(req).await)
}

fn extract_role(headers: &HeaderMap) -> Result<AdminRole, Response> {
    let raw = headers.get(ROLE_HEADER).ok_or_else(|| {
        json_error(
            StatusCode::UNAUTHORIZED,
            "missing_role",
            format!("the {ROLE_HEADER} header is required"),
        )
    })?;

    let raw = header_text(raw).ok_or_else(|| {
        json_error(
            StatusCode::BAD_REQUEST,
            "unknown_role",
            format!("{ROLE_HEADER} must be valid UTF-8"),
        )
    })?;

    let scope = match headers.get(SCOPE_HEADER) {
        Some(v) => Some(header_text(v).ok_or_else(|| {
            json_error(
                StatusCode::BAD_REQUEST,
                "invalid_role_scope",
                format!("{SCOPE_HEADER} must be valid UTF-8"),
            )
        })?),
        None => None,
    };

    if let Ok(kind) = raw.parse::<RoleKind>() {
        return Ok(AdminRole::scoped(kind, scope.map(str::trim)));
    }

    raw.parse::<AdminRole>()
        .map_err(|e| json_error(StatusCode::BAD_REQUEST, "unknown_role", e.to_string()))
}

/// Header values as UTF-8 text; scopes come from the dataset and need not be ASCII.
fn header_text(value: &HeaderValue) -> Option<&str> {
    std::str::from_utf8(value.as_bytes()).ok()
}

/// Tag every request with an id (inbound `x-request-id` or a fresh UUIDv7),
/// run it inside a span, and echo the id on the response.
pub async fn request_id_middleware(req: Request, next: Next) -> Response {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::now_v7().to_string());

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    let mut response = next.run(req).instrument(span.clone()).await;

    span.in_scope(|| {
        tracing::info!(status = response.status().as_u16(), "request completed");
    });

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
