//! Development login stub.
//!
//! Issues a fixed bearer token for known user emails; real authentication
//! sits in front of the service in deployment.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use servio_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    #[allow(dead_code)]
    #[serde(default)]
    pub password: String,
}

/// POST /api/auth/login
///
/// Any password is accepted for a known email.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".into()))?;

    Ok(Json(json!({
        "access_token": "dev-token",
        "token_type": "bearer",
        "user": { "name": user.name, "role": user.role },
    })))
}

/// GET /api/auth/me
pub async fn me() -> impl IntoResponse {
    Json(json!({ "name": "Demo User", "role": "admin" }))
}
