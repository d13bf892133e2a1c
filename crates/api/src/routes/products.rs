//! Product card routes.

use axum::routing::get;
use axum::Router;

use crate::handlers::products;
use crate::state::AppState;

/// ```text
/// GET    /products                        -> list_products
/// POST   /products                        -> create_product
/// GET    /products/{id}                   -> get_product
/// PUT    /products/{id}                   -> update_product
/// DELETE /products/{id}                   -> delete_product
/// GET    /products/{id}/service-history   -> service_history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route(
            "/products/{id}/service-history",
            get(products::service_history),
        )
}
