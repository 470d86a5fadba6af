//! Low-stock notification endpoints

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::auth::{CurrentUser, ensure_shop_access};
use crate::db::notifications;
use crate::error::AppError;
use crate::models::Notification;
use crate::state::AppState;

/// GET /api/shops/{shop_id}/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(shop_id): Path<i64>,
) -> Result<Json<Vec<Notification>>, AppError> {
    ensure_shop_access(&user, shop_id)?;
    let notifications = notifications::list_by_shop(&state.pool, shop_id).await?;
    Ok(Json(notifications))
}

/// PUT /api/shops/{shop_id}/notifications/mark-read
///
/// Marks every unread notification of the shop as read. Idempotent: a
/// second call reports zero updates.
pub async fn mark_read(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(shop_id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    ensure_shop_access(&user, shop_id)?;
    let updated = notifications::mark_all_read(&state.pool, shop_id).await?;
    Ok(Json(serde_json::json!({
        "message": "Notifications marked as read",
        "updated": updated,
    })))
}
