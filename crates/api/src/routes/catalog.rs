//! Brand/model catalog routes.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// ```text
/// GET    /brands               -> list_brands
/// POST   /brands               -> create_brand
/// POST   /brands/{id}/models   -> create_model
/// GET    /models/{id}          -> get_model
/// PUT    /models/{id}          -> update_model
/// DELETE /models/{id}          -> delete_model
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/brands",
            get(catalog::list_brands).post(catalog::create_brand),
        )
        .route("/brands/{id}/models", post(catalog::create_model))
        .route(
            "/models/{id}",
            get(catalog::get_model)
                .put(catalog::update_model)
                .delete(catalog::delete_model),
        )
}
