//! Invoice Model

use serde::{Deserialize, Serialize};

/// Invoice entity — 1:1 with its originating order; customer/biller/total
/// are denormalized copies taken at commit time.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Invoice {
    pub id: i64,
    pub shop_id: i64,
    pub order_id: i64,
    pub customer_name: String,
    pub biller_name: String,
    pub total: f64,
    /// Address of the rendered document in durable storage
    pub pdf_url: String,
    pub created_at: i64,
}
