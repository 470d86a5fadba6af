//! Product endpoints

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::auth::{CurrentUser, ensure_shop_access};
use crate::db::products;
use crate::error::AppError;
use crate::models::{Product, ProductCreate};
use crate::state::AppState;

type ApiResult<T> = Result<Json<T>, AppError>;

/// GET /api/shops/{shop_id}/products
pub async fn list_products(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(shop_id): Path<i64>,
) -> ApiResult<Vec<Product>> {
    ensure_shop_access(&user, shop_id)?;
    let products = products::list_by_shop(&state.pool, shop_id).await?;
    Ok(Json(products))
}

/// POST /api/shops/{shop_id}/products — owner only
pub async fn create_product(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(shop_id): Path<i64>,
    Json(data): Json<ProductCreate>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    ensure_shop_access(&user, shop_id)?;
    if user.role != "owner" {
        return Err(AppError::forbidden("Only the shop owner can add products."));
    }
    if data.name.trim().is_empty() {
        return Err(AppError::validation("Product name must not be empty."));
    }
    if data.price < 0.0 || data.cost < 0.0 || data.stock < 0 {
        return Err(AppError::validation(
            "Price, cost and stock must not be negative.",
        ));
    }

    let product = products::create(&state.pool, shop_id, data).await?;
    Ok((StatusCode::CREATED, Json(product)))
}
