use axum::{
    Router,
    routing::{get, post},
};

pub mod ask;
pub mod roles;
pub mod students;
pub mod system;

/// Router for all role-scoped endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .nest("/students", students::router())
        .route("/access/explain", get(students::explain))
        .route("/ask", post(ask::ask))
}
