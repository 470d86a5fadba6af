//! Shop queries

use crate::models::Shop;
use crate::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

pub async fn find_by_id(pool: &SqlitePool, shop_id: i64) -> Result<Option<Shop>, sqlx::Error> {
    sqlx::query_as::<_, Shop>("SELECT id, name, address, created_at FROM shops WHERE id = ?")
        .bind(shop_id)
        .fetch_optional(pool)
        .await
}

pub async fn create(
    pool: &SqlitePool,
    name: &str,
    address: Option<&str>,
) -> Result<Shop, sqlx::Error> {
    let id = snowflake_id();
    let now = now_millis();
    sqlx::query("INSERT INTO shops (id, name, address, created_at) VALUES (?, ?, ?, ?)")
        .bind(id)
        .bind(name)
        .bind(address)
        .bind(now)
        .execute(pool)
        .await?;

    Ok(Shop {
        id,
        name: name.to_string(),
        address: address.map(str::to_string),
        created_at: now,
    })
}
