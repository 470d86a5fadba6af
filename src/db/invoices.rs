//! Invoice queries

use crate::models::Invoice;
use sqlx::SqlitePool;

const COLUMNS: &str =
    "id, shop_id, order_id, customer_name, biller_name, total, pdf_url, created_at";

pub async fn list_by_shop(pool: &SqlitePool, shop_id: i64) -> Result<Vec<Invoice>, sqlx::Error> {
    sqlx::query_as::<_, Invoice>(&format!(
        "SELECT {COLUMNS} FROM invoices WHERE shop_id = ? ORDER BY created_at DESC"
    ))
    .bind(shop_id)
    .fetch_all(pool)
    .await
}

pub async fn find_scoped(
    pool: &SqlitePool,
    shop_id: i64,
    invoice_id: i64,
) -> Result<Option<Invoice>, sqlx::Error> {
    sqlx::query_as::<_, Invoice>(&format!(
        "SELECT {COLUMNS} FROM invoices WHERE id = ? AND shop_id = ?"
    ))
    .bind(invoice_id)
    .bind(shop_id)
    .fetch_optional(pool)
    .await
}
