//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub shop_id: i64,
    pub name: String,
    /// Unit sell price in currency unit
    pub price: f64,
    /// Unit cost in currency unit
    pub cost: f64,
    /// Current stock count; never goes negative
    pub stock: i64,
    /// Stock level at or below which a low-stock notification fires
    /// (once per downward crossing)
    pub low_stock_threshold: i64,
    pub created_at: i64,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub price: f64,
    pub cost: f64,
    pub stock: i64,
    pub low_stock_threshold: Option<i64>,
}
