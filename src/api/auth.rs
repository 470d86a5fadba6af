//! Staff login

use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use crate::auth::create_token;
use crate::db::staff;
use crate::error::AppError;
use crate::models::StaffProfile;
use crate::state::AppState;
use crate::util::verify_password;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/auth/login
///
/// The response never distinguishes an unknown email from a wrong password.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let staff = staff::find_by_email(&state.pool, &req.email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !verify_password(&req.password, &staff.hashed_password) {
        tracing::info!(email = %req.email, "Login rejected");
        return Err(AppError::InvalidCredentials);
    }

    let token = create_token(&staff, &state.jwt_secret)
        .map_err(|e| AppError::Internal(format!("Failed to sign token: {e}")))?;

    tracing::info!(staff_id = staff.id, shop_id = staff.shop_id, "Staff logged in");

    Ok(Json(serde_json::json!({
        "token": token,
        "staff": StaffProfile::from(&staff),
    })))
}
