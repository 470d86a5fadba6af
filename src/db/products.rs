//! Product queries

use crate::models::{Product, ProductCreate};
use crate::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, shop_id, name, price, cost, stock, low_stock_threshold, created_at";

const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

pub async fn list_by_shop(pool: &SqlitePool, shop_id: i64) -> Result<Vec<Product>, sqlx::Error> {
    sqlx::query_as::<_, Product>(&format!(
        "SELECT {COLUMNS} FROM products WHERE shop_id = ? ORDER BY name"
    ))
    .bind(shop_id)
    .fetch_all(pool)
    .await
}

pub async fn find_scoped(
    pool: &SqlitePool,
    shop_id: i64,
    product_id: i64,
) -> Result<Option<Product>, sqlx::Error> {
    sqlx::query_as::<_, Product>(&format!(
        "SELECT {COLUMNS} FROM products WHERE id = ? AND shop_id = ?"
    ))
    .bind(product_id)
    .bind(shop_id)
    .fetch_optional(pool)
    .await
}

pub async fn create(
    pool: &SqlitePool,
    shop_id: i64,
    data: ProductCreate,
) -> Result<Product, sqlx::Error> {
    let id = snowflake_id();
    let now = now_millis();
    let threshold = data
        .low_stock_threshold
        .unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD);
    sqlx::query(
        "INSERT INTO products (id, shop_id, name, price, cost, stock, low_stock_threshold, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(shop_id)
    .bind(&data.name)
    .bind(data.price)
    .bind(data.cost)
    .bind(data.stock)
    .bind(threshold)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(Product {
        id,
        shop_id,
        name: data.name,
        price: data.price,
        cost: data.cost,
        stock: data.stock,
        low_stock_threshold: threshold,
        created_at: now,
    })
}
