pub mod categories;
pub mod collections;
pub mod error;
pub mod health;
pub mod params;
pub mod projection;
pub mod state;
pub mod templates;

use axum::{
    Router,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};

pub use state::{AppState, AppStateInner};

/// Full route table. Transport layers (CORS, tracing) are added by the binary.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route(
            "/templates/categories",
            get(categories::list_categories).options(allow_read),
        )
        .route(
            "/templates/collections",
            get(collections::list_collections)
                .put(collections::create_collection)
                .patch(collections::add_workflow)
                .options(allow_read),
        )
        .route(
            "/templates/collections/{id}",
            get(collections::get_collection).options(allow_read),
        )
        .route("/templates/search", get(templates::search).options(allow_read))
        .route(
            "/templates/workflows",
            get(templates::list_workflows)
                .put(templates::create_or_replace)
                .options(allow_read),
        )
        .route(
            "/templates/workflows/{id}",
            get(templates::get_workflow).options(allow_read),
        )
        // Import requests arrive with the path segments swapped.
        .route("/workflows/templates/{id}", get(templates::get_workflow_for_import))
        .with_state(state)
}

async fn allow_read() -> impl IntoResponse {
    (StatusCode::OK, [(header::ALLOW, "GET, HEAD")])
}
