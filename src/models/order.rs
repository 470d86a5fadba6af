//! Order Model

use serde::{Deserialize, Serialize};

/// Order item — name, price and cost are snapshotted at order time and do
/// not change if the product record is later edited.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderItem {
    /// Product reference
    pub product_id: i64,
    /// Captured product name
    pub name: String,
    pub quantity: i64,
    /// Unit price in currency unit
    pub price: f64,
    /// Unit cost in currency unit
    pub cost: f64,
}

/// Order entity — created once, never mutated afterwards
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: i64,
    pub shop_id: i64,
    pub customer_name: String,
    /// Authenticated actor who created the order
    pub biller_name: String,
    /// Total revenue in currency unit
    pub total: f64,
    /// Revenue minus cost sum
    pub total_profit: f64,
    pub created_at: i64,
    /// Item lines (populated by application code, skipped by FromRow)
    #[sqlx(skip)]
    pub items: Vec<OrderItem>,
}

/// Single requested line of a new order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemInput {
    pub product_id: i64,
    pub quantity: i64,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    /// Defaults to "Walk-in Customer" when absent
    pub customer_name: Option<String>,
    pub items: Vec<OrderItemInput>,
}
