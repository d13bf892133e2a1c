//! Action Library routes.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::action_library;
use crate::state::AppState;

/// ```text
/// GET    /action-library           -> list_entries
/// POST   /action-library           -> create_entry
/// PUT    /action-library/{id}      -> update_entry
/// DELETE /action-library/{id}      -> delete_entry (soft)
/// POST   /action-library/reorder   -> reorder_entries
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/action-library",
            get(action_library::list_entries).post(action_library::create_entry),
        )
        .route(
            "/action-library/reorder",
            post(action_library::reorder_entries),
        )
        .route(
            "/action-library/{id}",
            put(action_library::update_entry).delete(action_library::delete_entry),
        )
}
