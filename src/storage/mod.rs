//! Durable document store
//!
//! The order transaction needs one external collaborator: somewhere to put a
//! rendered invoice that survives the process and resolves to a public
//! address. [`DocumentStore`] is that seam; production uses S3, development
//! and tests use a local directory.
//!
//! Keys are request-addressed and idempotent: re-uploading the same order's
//! invoice overwrites the same object instead of creating a sibling.

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// Document store error
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Backend(String),
}

/// Blob storage returning a publicly resolvable address per upload
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Upload `bytes` under `key`; returns the public address of the object
    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StoreError>;

    /// Remove a previously uploaded object (compensating cleanup)
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}

/// Storage key for an order's invoice document
pub fn invoice_key(shop_id: i64, order_id: i64) -> String {
    format!("invoices/{shop_id}/invoice-{order_id}.pdf")
}

// ── S3 ──

/// S3-backed store; addresses resolve under a public base URL
pub struct S3DocumentStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_base_url: String,
}

impl S3DocumentStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: String, public_base_url: Option<String>) -> Self {
        let public_base_url = public_base_url
            .unwrap_or_else(|| format!("https://{bucket}.s3.amazonaws.com"))
            .trim_end_matches('/')
            .to_string();
        Self {
            client,
            bucket,
            public_base_url,
        }
    }
}

#[async_trait]
impl DocumentStore for S3DocumentStore {
    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StoreError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(bytes.into())
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(key = %key, error = %e, "S3 upload failed");
                StoreError::Backend(format!("S3 upload failed: {e}"))
            })?;

        Ok(format!("{}/{key}", self.public_base_url))
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StoreError::Backend(format!("S3 delete failed: {e}")))?;
        Ok(())
    }
}

// ── Local directory ──

/// Directory-backed store for development and tests; addresses are
/// `file://` paths, not reachable from a browser
pub struct LocalDocumentStore {
    root: PathBuf,
}

impl LocalDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

#[async_trait]
impl DocumentStore for LocalDocumentStore {
    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<String, StoreError> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;
        Ok(format!("file://{}", path.display()))
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        tokio::fs::remove_file(self.path_for(key)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invoice_keys_are_stable_per_order() {
        assert_eq!(invoice_key(3, 9), "invoices/3/invoice-9.pdf");
        // Same order always maps to the same object
        assert_eq!(invoice_key(3, 9), invoice_key(3, 9));
    }

    #[tokio::test]
    async fn local_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalDocumentStore::new(dir.path());

        let addr = store
            .upload("invoices/1/invoice-2.pdf", b"%PDF-fake".to_vec(), "application/pdf")
            .await
            .unwrap();
        assert!(addr.starts_with("file://"));
        assert!(dir.path().join("invoices/1/invoice-2.pdf").exists());

        store.delete("invoices/1/invoice-2.pdf").await.unwrap();
        assert!(!dir.path().join("invoices/1/invoice-2.pdf").exists());
    }
}
