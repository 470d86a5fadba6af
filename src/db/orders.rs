//! Order queries (read side — order creation lives in [`crate::orders`])

use crate::models::{Order, OrderItem};
use sqlx::SqlitePool;

pub async fn list_by_shop(pool: &SqlitePool, shop_id: i64) -> Result<Vec<Order>, sqlx::Error> {
    let mut orders = sqlx::query_as::<_, Order>(
        "SELECT id, shop_id, customer_name, biller_name, total, total_profit, created_at \
         FROM orders WHERE shop_id = ? ORDER BY created_at DESC",
    )
    .bind(shop_id)
    .fetch_all(pool)
    .await?;

    for order in &mut orders {
        order.items = items_for_order(pool, order.id).await?;
    }

    Ok(orders)
}

async fn items_for_order(pool: &SqlitePool, order_id: i64) -> Result<Vec<OrderItem>, sqlx::Error> {
    sqlx::query_as::<_, OrderItem>(
        "SELECT product_id, name, quantity, price, cost \
         FROM order_items WHERE order_id = ? ORDER BY id",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await
}
