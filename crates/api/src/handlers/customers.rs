//! Handlers for customers and their contact persons.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use servio_core::error::CoreError;
use servio_core::types::Id;
use servio_db::models::customer::{ContactIn, CustomerIn};
use servio_db::repositories::{ContactRepo, CustomerRepo};

use crate::error::{validate_payload, AppError, AppResult};
use crate::state::AppState;

/// GET /api/customers
pub async fn list_customers(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let customers = CustomerRepo::list(&state.pool).await?;
    Ok(Json(customers))
}

/// POST /api/customers
pub async fn create_customer(
    State(state): State<AppState>,
    Json(input): Json<CustomerIn>,
) -> AppResult<impl IntoResponse> {
    validate_payload(&input)?;
    let customer = CustomerRepo::create(&state.pool, &input).await?;

    tracing::info!(customer_id = %customer.id, "Customer created");

    Ok((StatusCode::CREATED, Json(customer)))
}

/// GET /api/customers/{id}
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> AppResult<impl IntoResponse> {
    let customer = CustomerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Customer",
            id,
        }))?;
    Ok(Json(customer))
}

/// PUT /api/customers/{id}
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Json(input): Json<CustomerIn>,
) -> AppResult<impl IntoResponse> {
    validate_payload(&input)?;
    let customer = CustomerRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Customer",
            id,
        }))?;
    Ok(Json(customer))
}

/// DELETE /api/customers/{id}
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> AppResult<impl IntoResponse> {
    let deleted = CustomerRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Customer",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/customers/{id}/contacts
pub async fn list_contacts(
    State(state): State<AppState>,
    Path(customer_id): Path<Id>,
) -> AppResult<impl IntoResponse> {
    let contacts = ContactRepo::list_by_customer(&state.pool, customer_id).await?;
    Ok(Json(contacts))
}

/// POST /api/customers/{id}/contacts
pub async fn create_contact(
    State(state): State<AppState>,
    Path(customer_id): Path<Id>,
    Json(input): Json<ContactIn>,
) -> AppResult<impl IntoResponse> {
    validate_payload(&input)?;

    CustomerRepo::find_by_id(&state.pool, customer_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Customer",
            id: customer_id,
        }))?;

    let contact = ContactRepo::create(&state.pool, customer_id, &input).await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

/// PUT /api/contacts/{id}
pub async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Json(input): Json<ContactIn>,
) -> AppResult<impl IntoResponse> {
    validate_payload(&input)?;
    let contact = ContactRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Contact",
            id,
        }))?;
    Ok(Json(contact))
}

/// DELETE /api/contacts/{id}
pub async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> AppResult<impl IntoResponse> {
    let deleted = ContactRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Contact",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
