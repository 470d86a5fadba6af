//! Staff JWT authentication
//!
//! One authoritative middleware: every `/api/shops/…` route passes through
//! [`require_auth`], which verifies the Bearer token and injects
//! [`CurrentUser`] into request extensions. Handlers then call
//! [`ensure_shop_access`] so a caller can never reach another shop's
//! resources, regardless of what ids the request body or path carry.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::Staff;
use crate::state::AppState;

/// JWT claims for staff authentication
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Staff ID
    pub sub: String,
    /// Staff display name (recorded as biller on orders)
    pub name: String,
    /// owner | staff
    pub role: String,
    /// Owning shop
    pub shop_id: i64,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// Authenticated caller identity extracted from a verified JWT
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub staff_id: i64,
    pub name: String,
    pub role: String,
    pub shop_id: i64,
}

const JWT_EXPIRY_HOURS: i64 = 24 * 7;

/// Create a signed token for a staff member
pub fn create_token(staff: &Staff, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = Claims {
        sub: staff.id.to_string(),
        name: staff.name.clone(),
        role: staff.role.clone(),
        shop_id: staff.shop_id,
        exp: (now + chrono::Duration::hours(JWT_EXPIRY_HOURS)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verify a token and build the caller identity
pub fn verify_token(token: &str, secret: &str) -> Result<CurrentUser, AppError> {
    let token_data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        tracing::debug!("JWT validation failed: {e}");
        match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
            _ => AppError::InvalidToken("Invalid or expired token".into()),
        }
    })?;

    let claims = token_data.claims;
    let staff_id = claims
        .sub
        .parse::<i64>()
        .map_err(|_| AppError::InvalidToken("Malformed subject claim".into()))?;

    Ok(CurrentUser {
        staff_id,
        name: claims.name,
        role: claims.role,
        shop_id: claims.shop_id,
    })
}

/// Middleware that extracts and verifies the staff JWT from the
/// Authorization header
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // CORS preflight never carries credentials
    if request.method() == http::Method::OPTIONS {
        return Ok(next.run(request).await);
    }

    let auth_header = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::InvalidToken("Invalid authorization header".into()))?;

    let user = verify_token(token, &state.jwt_secret)?;
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Reject any request whose path shop does not match the caller's shop
pub fn ensure_shop_access(user: &CurrentUser, shop_id: i64) -> Result<(), AppError> {
    if user.shop_id != shop_id {
        tracing::warn!(
            staff_id = user.staff_id,
            caller_shop = user.shop_id,
            target_shop = shop_id,
            "Cross-shop access rejected"
        );
        return Err(AppError::forbidden(
            "Access denied to this shop's resources.",
        ));
    }
    Ok(())
}
