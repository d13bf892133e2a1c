//! Photo metadata and export artifact routes.
//!
//! Photo upload lives under `/reports/{id}/photos`; this module covers
//! the photo-level and export-level operations.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::media;
use crate::state::AppState;

/// ```text
/// PUT    /photos/{id}            -> update_photo
/// DELETE /photos/{id}            -> delete_photo
/// GET    /exports                -> list_exports
/// GET    /exports/{id}/download  -> download_export
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/photos/{id}",
            put(media::update_photo).delete(media::delete_photo),
        )
        .route("/exports", get(media::list_exports))
        .route("/exports/{id}/download", get(media::download_export))
}
