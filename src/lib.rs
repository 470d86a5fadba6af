//! triact-server — multi-tenant retail point-of-sale backend
//!
//! Long-running HTTP service that:
//! - Creates orders atomically (stock validation, inventory decrement,
//!   invoice PDF rendering, durable upload, invoice record) in one
//!   database transaction
//! - Emits low-stock notifications on threshold crossings
//! - Serves per-shop order/invoice/notification/product APIs behind
//!   JWT authentication
//!
//! # Module structure
//!
//! ```text
//! src/
//! ├── config.rs  # Environment configuration
//! ├── state.rs   # Shared application state
//! ├── error.rs   # Error type and HTTP error envelope
//! ├── auth/      # JWT authentication, shop-scope guard
//! ├── api/       # HTTP routes and handlers
//! ├── db/        # SQLite pool, migrations, per-table queries
//! ├── models/    # Row and request types
//! ├── orders/    # Order transaction coordinator + notification emitter
//! ├── invoice/   # Invoice PDF renderer (pure function)
//! └── storage/   # Durable document store (S3 / local directory)
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod invoice;
pub mod models;
pub mod orders;
pub mod state;
pub mod storage;
pub mod util;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
