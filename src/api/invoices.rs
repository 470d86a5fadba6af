//! Invoice endpoints (read side — invoices are created with their order)

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::auth::{CurrentUser, ensure_shop_access};
use crate::db::invoices;
use crate::error::AppError;
use crate::models::Invoice;
use crate::state::AppState;

/// GET /api/shops/{shop_id}/invoices
pub async fn list_invoices(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(shop_id): Path<i64>,
) -> Result<Json<Vec<Invoice>>, AppError> {
    ensure_shop_access(&user, shop_id)?;
    let invoices = invoices::list_by_shop(&state.pool, shop_id).await?;
    Ok(Json(invoices))
}

/// GET /api/shops/{shop_id}/invoices/{invoice_id}
pub async fn get_invoice(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path((shop_id, invoice_id)): Path<(i64, i64)>,
) -> Result<Json<Invoice>, AppError> {
    ensure_shop_access(&user, shop_id)?;
    let invoice = invoices::find_scoped(&state.pool, shop_id, invoice_id)
        .await?
        .ok_or_else(|| AppError::not_found("Invoice"))?;
    Ok(Json(invoice))
}
