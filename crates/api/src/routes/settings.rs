//! Settings routes, mounted under `/settings`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::settings;
use crate::state::AppState;

/// ```text
/// GET    /company-profiles             -> list_profiles
/// POST   /company-profiles             -> create_profile
/// PUT    /company-profiles/{id}        -> update_profile
/// DELETE /company-profiles/{id}        -> delete_profile
/// POST   /company-profiles/{id}/logo   -> upload_logo
/// GET    /issuers                      -> list_issuers
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/company-profiles",
            get(settings::list_profiles).post(settings::create_profile),
        )
        .route(
            "/company-profiles/{id}",
            put(settings::update_profile).delete(settings::delete_profile),
        )
        .route("/company-profiles/{id}/logo", post(settings::upload_logo))
        .route("/issuers", get(settings::list_issuers))
}
