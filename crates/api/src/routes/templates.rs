//! Boilerplate text template routes.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::templates;
use crate::state::AppState;

/// ```text
/// GET    /templates        -> list_templates
/// POST   /templates        -> create_template
/// PUT    /templates/{id}   -> update_template
/// DELETE /templates/{id}   -> delete_template
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/templates",
            get(templates::list_templates).post(templates::create_template),
        )
        .route(
            "/templates/{id}",
            put(templates::update_template).delete(templates::delete_template),
        )
}
