//! Staff Model

use serde::{Deserialize, Serialize};

/// Staff entity — an authenticated actor (biller) belonging to one shop
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Staff {
    pub id: i64,
    pub shop_id: i64,
    pub name: String,
    pub email: String,
    /// Argon2 hash, never serialized out
    #[serde(skip_serializing)]
    pub hashed_password: String,
    /// owner | staff
    pub role: String,
    pub created_at: i64,
}

/// Public staff view returned by the login endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffProfile {
    pub id: i64,
    pub shop_id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<&Staff> for StaffProfile {
    fn from(s: &Staff) -> Self {
        Self {
            id: s.id,
            shop_id: s.shop_id,
            name: s.name.clone(),
            email: s.email.clone(),
            role: s.role.clone(),
        }
    }
}
