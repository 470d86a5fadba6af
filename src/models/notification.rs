//! Notification Model

use serde::{Deserialize, Serialize};

/// Low-stock notification; unread until bulk-marked read
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Notification {
    pub id: i64,
    pub shop_id: i64,
    pub message: String,
    pub is_read: bool,
    pub created_at: i64,
}
