pub mod action_library;
pub mod auth;
pub mod catalog;
pub mod customers;
pub mod health;
pub mod media;
pub mod products;
pub mod reports;
pub mod settings;
pub mod templates;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                  dev login (POST)
/// /auth/me                                     current user (GET)
///
/// /customers                                   list, create
/// /customers/{id}                              get, update, delete
/// /customers/{id}/contacts                     list, create
/// /contacts/{id}                               update, delete
///
/// /brands                                      list, create
/// /brands/{id}/models                          create
/// /models/{id}                                 get, update, delete
///
/// /products                                    list (filters), create
/// /products/{id}                               get, update, delete
/// /products/{id}/service-history               report history + totals
///
/// /reports                                     list (filters), create
/// /reports/{id}                                get, update, delete
/// /reports/{id}/status                         guarded transition (POST)
/// /reports/{id}/revision                       new revision (POST)
/// /reports/{id}/duplicate                      duplicate (POST)
/// /reports/{id}/photos                         multipart upload (POST)
/// /reports/{id}/export/pdf                     render PDF (POST)
/// /reports/{id}/export/excel                   render spreadsheet (POST)
/// /issuers/{id}/reports                        reports for one issuer
/// /dashboard/kpis                              workload counters
///
/// /photos/{id}                                 update, delete
/// /exports                                     list
/// /exports/{id}/download                       fetch artifact
///
/// /templates                                   list, create
/// /templates/{id}                              update, delete
///
/// /action-library                              list (filters), create
/// /action-library/{id}                         update, soft delete
/// /action-library/reorder                      bulk order update (POST)
///
/// /settings/company-profiles                   list, create
/// /settings/company-profiles/{id}              update, delete
/// /settings/company-profiles/{id}/logo         upload logo (POST)
/// /settings/issuers                            issuer profiles
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(customers::router())
        .merge(catalog::router())
        .merge(products::router())
        .merge(reports::router())
        .merge(media::router())
        .merge(templates::router())
        .merge(action_library::router())
        .nest("/settings", settings::router())
}
