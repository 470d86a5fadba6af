//! Order transaction integration tests over a real SQLite file.
//!
//! Every test opens a fresh database under a temp directory, seeds a shop
//! with products and drives the order coordinator directly.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::SqlitePool;
use tempfile::TempDir;

use triact_server::AppError;
use triact_server::db::{self, DbService};
use triact_server::models::{Notification, OrderCreate, OrderItemInput, ProductCreate, Shop};
use triact_server::orders::{CreatedOrder, create_order};
use triact_server::storage::{DocumentStore, LocalDocumentStore, StoreError};

const UPLOAD_TIMEOUT: Duration = Duration::from_secs(5);

/// A store whose uploads always fail, for rollback tests.
struct FailingStore;

#[async_trait]
impl DocumentStore for FailingStore {
    async fn upload(
        &self,
        _key: &str,
        _bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<String, StoreError> {
        Err(StoreError::Backend("injected upload failure".into()))
    }

    async fn delete(&self, _key: &str) -> Result<(), StoreError> {
        Ok(())
    }
}

struct TestEnv {
    // Keeps the temp directory alive for the duration of the test
    _dir: TempDir,
    pool: SqlitePool,
    store: LocalDocumentStore,
    shop: Shop,
}

async fn setup() -> TestEnv {
    let dir = tempfile::tempdir().expect("temp dir");
    let db_path = dir.path().join("test.db");
    let db = DbService::new(db_path.to_str().unwrap())
        .await
        .expect("open database");
    let store = LocalDocumentStore::new(dir.path().join("invoices"));
    let shop = db::shops::create(&db.pool, "Corner Mart", Some("12 High St"))
        .await
        .expect("create shop");
    TestEnv {
        _dir: dir,
        pool: db.pool,
        store,
        shop,
    }
}

async fn seed_product(
    env: &TestEnv,
    name: &str,
    price: f64,
    cost: f64,
    stock: i64,
    threshold: i64,
) -> i64 {
    let product = db::products::create(
        &env.pool,
        env.shop.id,
        ProductCreate {
            name: name.into(),
            price,
            cost,
            stock,
            low_stock_threshold: Some(threshold),
        },
    )
    .await
    .expect("create product");
    product.id
}

fn order_of(items: Vec<(i64, i64)>) -> OrderCreate {
    OrderCreate {
        customer_name: None,
        items: items
            .into_iter()
            .map(|(product_id, quantity)| OrderItemInput {
                product_id,
                quantity,
            })
            .collect(),
    }
}

async fn stock_of(pool: &SqlitePool, product_id: i64) -> i64 {
    sqlx::query_scalar("SELECT stock FROM products WHERE id = ?")
        .bind(product_id)
        .fetch_one(pool)
        .await
        .expect("stock query")
}

/// Full write-side state of the database, for before/after comparisons.
#[derive(Debug, PartialEq)]
struct Snapshot {
    stocks: Vec<(i64, i64)>,
    orders: i64,
    order_items: i64,
    invoices: i64,
    notifications: i64,
}

async fn snapshot(pool: &SqlitePool) -> Snapshot {
    let stocks = sqlx::query_as::<_, (i64, i64)>("SELECT id, stock FROM products ORDER BY id")
        .fetch_all(pool)
        .await
        .expect("stocks");
    let count = |table: &str| {
        let sql = format!("SELECT COUNT(*) FROM {table}");
        let pool = pool.clone();
        async move {
            sqlx::query_scalar::<_, i64>(&sql)
                .fetch_one(&pool)
                .await
                .expect("count")
        }
    };
    Snapshot {
        stocks,
        orders: count("orders").await,
        order_items: count("order_items").await,
        invoices: count("invoices").await,
        notifications: count("notifications").await,
    }
}

#[tokio::test]
async fn order_totals_and_stock_decrement() {
    let env = setup().await;
    let tea = seed_product(&env, "Tea", 12.5, 8.0, 20, 5).await;
    let rice = seed_product(&env, "Rice", 60.0, 45.0, 50, 5).await;

    let created = create_order(
        &env.pool,
        &env.store,
        env.shop.id,
        "Asha",
        order_of(vec![(tea, 3), (rice, 2)]),
        UPLOAD_TIMEOUT,
    )
    .await
    .expect("order should commit");

    // 3 * 12.5 + 2 * 60 = 157.5 revenue; cost 3 * 8 + 2 * 45 = 114
    assert!((created.order.total - 157.5).abs() < 1e-9);
    assert!((created.order.total_profit - 43.5).abs() < 1e-9);
    assert_eq!(created.order.customer_name, "Walk-in Customer");
    assert_eq!(created.order.biller_name, "Asha");
    assert_eq!(created.order.items.len(), 2);

    assert_eq!(stock_of(&env.pool, tea).await, 17);
    assert_eq!(stock_of(&env.pool, rice).await, 48);
}

#[tokio::test]
async fn invoice_matches_its_order() {
    let env = setup().await;
    let tea = seed_product(&env, "Tea", 10.0, 6.0, 20, 5).await;

    let CreatedOrder { order, invoice } = create_order(
        &env.pool,
        &env.store,
        env.shop.id,
        "Asha",
        OrderCreate {
            customer_name: Some("Priya".into()),
            items: vec![OrderItemInput {
                product_id: tea,
                quantity: 4,
            }],
        },
        UPLOAD_TIMEOUT,
    )
    .await
    .expect("order should commit");

    assert_eq!(invoice.order_id, order.id);
    assert_eq!(invoice.shop_id, order.shop_id);
    assert_eq!(invoice.customer_name, "Priya");
    assert_eq!(invoice.biller_name, "Asha");
    assert!((invoice.total - order.total).abs() < 1e-9);
    assert!(invoice.pdf_url.starts_with("file://"));

    // The rendered document really exists in the store
    let path = invoice.pdf_url.trim_start_matches("file://");
    let bytes = std::fs::read(path).expect("stored document");
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn empty_order_is_rejected_without_writes() {
    let env = setup().await;
    seed_product(&env, "Tea", 10.0, 6.0, 20, 5).await;
    let before = snapshot(&env.pool).await;

    let err = create_order(
        &env.pool,
        &env.store,
        env.shop.id,
        "Asha",
        order_of(vec![]),
        UPLOAD_TIMEOUT,
    )
    .await
    .expect_err("empty order must fail");

    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(snapshot(&env.pool).await, before);
}

#[tokio::test]
async fn insufficient_stock_rolls_back_everything() {
    let env = setup().await;
    let tea = seed_product(&env, "Tea", 10.0, 6.0, 20, 5).await;
    let rice = seed_product(&env, "Rice", 60.0, 45.0, 1, 5).await;
    let before = snapshot(&env.pool).await;

    // First line is satisfiable; second is not. Nothing may stick.
    let err = create_order(
        &env.pool,
        &env.store,
        env.shop.id,
        "Asha",
        order_of(vec![(tea, 5), (rice, 3)]),
        UPLOAD_TIMEOUT,
    )
    .await
    .expect_err("oversell must fail");

    assert!(matches!(err, AppError::InsufficientStock { .. }));
    assert_eq!(snapshot(&env.pool).await, before);
}

#[tokio::test]
async fn unknown_and_cross_shop_products_are_not_found() {
    let env = setup().await;
    let other_shop = db::shops::create(&env.pool, "Other Mart", None)
        .await
        .expect("create shop");
    let foreign = db::products::create(
        &env.pool,
        other_shop.id,
        ProductCreate {
            name: "Foreign".into(),
            price: 5.0,
            cost: 2.0,
            stock: 100,
            low_stock_threshold: None,
        },
    )
    .await
    .expect("create product")
    .id;

    // A product of another shop reads as nonexistent, not as forbidden
    let err = create_order(
        &env.pool,
        &env.store,
        env.shop.id,
        "Asha",
        order_of(vec![(foreign, 1)]),
        UPLOAD_TIMEOUT,
    )
    .await
    .expect_err("cross-shop product must fail");
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(stock_of(&env.pool, foreign).await, 100);

    let err = create_order(
        &env.pool,
        &env.store,
        env.shop.id,
        "Asha",
        order_of(vec![(999_999, 1)]),
        UPLOAD_TIMEOUT,
    )
    .await
    .expect_err("unknown product must fail");
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn low_stock_notification_fires_once_per_crossing() {
    let env = setup().await;
    let tea = seed_product(&env, "Tea", 10.0, 6.0, 6, 5).await;

    // 6 -> 4 crosses the threshold of 5: exactly one notification
    create_order(
        &env.pool,
        &env.store,
        env.shop.id,
        "Asha",
        order_of(vec![(tea, 2)]),
        UPLOAD_TIMEOUT,
    )
    .await
    .expect("first order");

    let notes = db::notifications::list_by_shop(&env.pool, env.shop.id)
        .await
        .expect("list notifications");
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].message, "Tea is low on stock! Only 4 left.");
    assert!(!notes[0].is_read);

    // 4 -> 3 stays below the threshold: no second notification
    create_order(
        &env.pool,
        &env.store,
        env.shop.id,
        "Asha",
        order_of(vec![(tea, 1)]),
        UPLOAD_TIMEOUT,
    )
    .await
    .expect("second order");

    let notes: Vec<Notification> = db::notifications::list_by_shop(&env.pool, env.shop.id)
        .await
        .expect("list notifications");
    assert_eq!(notes.len(), 1);
}

#[tokio::test]
async fn mark_read_is_idempotent() {
    let env = setup().await;
    let tea = seed_product(&env, "Tea", 10.0, 6.0, 6, 5).await;
    create_order(
        &env.pool,
        &env.store,
        env.shop.id,
        "Asha",
        order_of(vec![(tea, 2)]),
        UPLOAD_TIMEOUT,
    )
    .await
    .expect("order");

    assert_eq!(
        db::notifications::mark_all_read(&env.pool, env.shop.id)
            .await
            .expect("mark read"),
        1
    );
    assert_eq!(
        db::notifications::mark_all_read(&env.pool, env.shop.id)
            .await
            .expect("mark read again"),
        0
    );

    let notes = db::notifications::list_by_shop(&env.pool, env.shop.id)
        .await
        .expect("list notifications");
    assert!(notes.iter().all(|n| n.is_read));
}

#[tokio::test]
async fn upload_failure_rolls_back_the_order() {
    let env = setup().await;
    let tea = seed_product(&env, "Tea", 10.0, 6.0, 20, 5).await;
    let before = snapshot(&env.pool).await;

    let err = create_order(
        &env.pool,
        &FailingStore,
        env.shop.id,
        "Asha",
        order_of(vec![(tea, 3)]),
        UPLOAD_TIMEOUT,
    )
    .await
    .expect_err("upload failure must abort the order");

    assert!(matches!(err, AppError::Upload(_)));
    assert_eq!(snapshot(&env.pool).await, before);
}

#[tokio::test]
async fn concurrent_orders_never_oversell() {
    let env = setup().await;
    // 5 units, two concurrent orders of 3 each: exactly one can win
    let tea = seed_product(&env, "Tea", 10.0, 6.0, 5, 0).await;

    let a = create_order(
        &env.pool,
        &env.store,
        env.shop.id,
        "Asha",
        order_of(vec![(tea, 3)]),
        UPLOAD_TIMEOUT,
    );
    let b = create_order(
        &env.pool,
        &env.store,
        env.shop.id,
        "Ravi",
        order_of(vec![(tea, 3)]),
        UPLOAD_TIMEOUT,
    );
    let (ra, rb) = tokio::join!(a, b);

    // The loser surfaces either as insufficient stock or as a write
    // conflict, depending on interleaving. Either way stock never oversells.
    let succeeded = [&ra, &rb].iter().filter(|r| r.is_ok()).count();
    assert_eq!(succeeded, 1, "exactly one of the two orders may commit");
    assert_eq!(stock_of(&env.pool, tea).await, 2);
}
