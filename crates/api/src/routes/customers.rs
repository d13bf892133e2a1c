//! Customer and contact routes.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::customers;
use crate::state::AppState;

/// ```text
/// GET    /customers                 -> list_customers
/// POST   /customers                 -> create_customer
/// GET    /customers/{id}            -> get_customer
/// PUT    /customers/{id}            -> update_customer
/// DELETE /customers/{id}            -> delete_customer
/// GET    /customers/{id}/contacts   -> list_contacts
/// POST   /customers/{id}/contacts   -> create_contact
/// PUT    /contacts/{id}             -> update_contact
/// DELETE /contacts/{id}             -> delete_contact
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/customers",
            get(customers::list_customers).post(customers::create_customer),
        )
        .route(
            "/customers/{id}",
            get(customers::get_customer)
                .put(customers::update_customer)
                .delete(customers::delete_customer),
        )
        .route(
            "/customers/{id}/contacts",
            get(customers::list_contacts).post(customers::create_contact),
        )
        .route(
            "/contacts/{id}",
            delete(customers::delete_contact).put(customers::update_contact),
        )
}
