use std::sync::Arc;

use axum::{Json, extract::Extension, response::IntoResponse};

use crate::app::services::AppServices;

/// Role presets derived from the loaded dataset.
pub async fn list_roles(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    Json(services.catalog().clone())
}
