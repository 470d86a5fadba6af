//! Shop Model

use serde::{Deserialize, Serialize};

/// Shop entity — a tenant. All other entities belong to exactly one shop.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Shop {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    /// Creation timestamp (ms since epoch)
    pub created_at: i64,
}
