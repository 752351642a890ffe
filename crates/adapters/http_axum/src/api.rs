//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod lights;

use axum::Router;
use axum::routing::{get, post};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/lights", get(lights::list))
        .route("/lights/{name}", get(lights::get))
        .route("/lights/{name}/input", post(lights::input))
        .route(
            "/lights/{name}/schedule/{tag}",
            get(lights::schedule).post(lights::schedule),
        )
}
