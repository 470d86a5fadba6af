//! Notification Emitter
//!
//! Low-stock alerts are edge-triggered: one notification per downward
//! threshold crossing, never one per sale while stock is already at or
//! below the threshold.

use sqlx::SqliteConnection;

use crate::util::{now_millis, snowflake_id};

/// True exactly when this decrement moved stock from above the threshold
/// to at-or-below it
pub fn crossed_threshold(pre_stock: i64, new_stock: i64, threshold: i64) -> bool {
    pre_stock > threshold && new_stock <= threshold
}

/// Insert a low-stock notification if this decrement crossed the product's
/// threshold. Runs inside the order-creation transaction so the alert
/// rolls back with everything else.
pub async fn maybe_emit(
    conn: &mut SqliteConnection,
    shop_id: i64,
    product_name: &str,
    pre_stock: i64,
    new_stock: i64,
    threshold: i64,
) -> Result<bool, sqlx::Error> {
    if !crossed_threshold(pre_stock, new_stock, threshold) {
        return Ok(false);
    }

    sqlx::query("INSERT INTO notifications (id, shop_id, message, is_read, created_at) VALUES (?, ?, ?, 0, ?)")
        .bind(snowflake_id())
        .bind(shop_id)
        .bind(format!(
            "{product_name} is low on stock! Only {new_stock} left."
        ))
        .bind(now_millis())
        .execute(conn)
        .await?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_only_on_the_crossing_edge() {
        // threshold 5: 6 -> 4 crosses
        assert!(crossed_threshold(6, 4, 5));
        // landing exactly on the threshold crosses too
        assert!(crossed_threshold(6, 5, 5));
        // already at or below: no further alerts
        assert!(!crossed_threshold(5, 4, 5));
        assert!(!crossed_threshold(4, 3, 5));
        // staying above: nothing
        assert!(!crossed_threshold(10, 6, 5));
    }
}
