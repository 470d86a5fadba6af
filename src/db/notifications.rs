//! Notification queries

use crate::models::Notification;
use sqlx::SqlitePool;

pub async fn list_by_shop(
    pool: &SqlitePool,
    shop_id: i64,
) -> Result<Vec<Notification>, sqlx::Error> {
    sqlx::query_as::<_, Notification>(
        "SELECT id, shop_id, message, is_read, created_at \
         FROM notifications WHERE shop_id = ? ORDER BY created_at DESC",
    )
    .bind(shop_id)
    .fetch_all(pool)
    .await
}

/// Mark every unread notification of the shop as read; returns the number
/// of rows updated.
pub async fn mark_all_read(pool: &SqlitePool, shop_id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE notifications SET is_read = 1 WHERE shop_id = ? AND is_read = 0")
        .bind(shop_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
