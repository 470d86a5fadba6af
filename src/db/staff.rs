//! Staff queries

use crate::models::Staff;
use crate::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, shop_id, name, email, hashed_password, role, created_at";

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<Staff>, sqlx::Error> {
    sqlx::query_as::<_, Staff>(&format!("SELECT {COLUMNS} FROM staff WHERE email = ?"))
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn create(
    pool: &SqlitePool,
    shop_id: i64,
    name: &str,
    email: &str,
    hashed_password: &str,
    role: &str,
) -> Result<Staff, sqlx::Error> {
    let id = snowflake_id();
    let now = now_millis();
    sqlx::query(
        "INSERT INTO staff (id, shop_id, name, email, hashed_password, role, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(shop_id)
    .bind(name)
    .bind(email)
    .bind(hashed_password)
    .bind(role)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(Staff {
        id,
        shop_id,
        name: name.to_string(),
        email: email.to_string(),
        hashed_password: hashed_password.to_string(),
        role: role.to_string(),
        created_at: now,
    })
}
