//! Shared application state

use std::sync::Arc;
use std::time::Duration;

use aws_sdk_s3::Client as S3Client;
use sqlx::SqlitePool;

use crate::config::Config;
use crate::db::DbService;
use crate::error::AppError;
use crate::storage::{DocumentStore, LocalDocumentStore, S3DocumentStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// Invoice document store (S3 or local, chosen at startup)
    pub store: Arc<dyn DocumentStore>,
    /// JWT secret for staff authentication
    pub jwt_secret: String,
    /// Bound on the invoice upload inside the order transaction
    pub upload_timeout: Duration,
    /// Allowed CORS origin for the frontend; permissive when unset
    pub frontend_origin: Option<String>,
}

impl AppState {
    /// Create a new AppState
    pub async fn new(config: &Config) -> Result<Self, AppError> {
        std::fs::create_dir_all(&config.work_dir)
            .map_err(|e| AppError::Internal(format!("Failed to create work dir: {e}")))?;

        let db = DbService::new(&config.db_path()).await?;

        let store: Arc<dyn DocumentStore> = if let Some(bucket) = &config.s3_bucket {
            let aws_config =
                aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
            tracing::info!(bucket = %bucket, "Using S3 document store");
            Arc::new(S3DocumentStore::new(
                S3Client::new(&aws_config),
                bucket.clone(),
                config.document_base_url.clone(),
            ))
        } else {
            let root = format!("{}/invoices", config.work_dir);
            tracing::info!(root = %root, "Using local document store");
            Arc::new(LocalDocumentStore::new(root))
        };

        Ok(Self {
            pool: db.pool,
            store,
            jwt_secret: config.jwt_secret.clone(),
            upload_timeout: Duration::from_millis(config.upload_timeout_ms),
            frontend_origin: config.frontend_origin.clone(),
        })
    }
}
