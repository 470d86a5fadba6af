//! Order endpoints

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::auth::{CurrentUser, ensure_shop_access};
use crate::db::orders as orders_db;
use crate::error::AppError;
use crate::models::{Order, OrderCreate};
use crate::orders;
use crate::state::AppState;

/// GET /api/shops/{shop_id}/orders
pub async fn list_orders(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(shop_id): Path<i64>,
) -> Result<Json<Vec<Order>>, AppError> {
    ensure_shop_access(&user, shop_id)?;
    let orders = orders_db::list_by_shop(&state.pool, shop_id).await?;
    Ok(Json(orders))
}

/// POST /api/shops/{shop_id}/orders
///
/// Runs the whole order transaction: stock movement, invoice document,
/// low-stock notifications. All or nothing.
pub async fn create_order(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(shop_id): Path<i64>,
    Json(req): Json<OrderCreate>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    ensure_shop_access(&user, shop_id)?;

    let created = orders::create_order(
        &state.pool,
        state.store.as_ref(),
        shop_id,
        &user.name,
        req,
        state.upload_timeout,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "Order created successfully",
            "order": created.order,
            "invoice": created.invoice,
        })),
    ))
}
