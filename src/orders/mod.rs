//! Order Transaction Coordinator
//!
//! Creates an order as one atomic unit: stock validation, order + item
//! persistence, inventory decrement, low-stock notifications, invoice
//! rendering, durable upload and invoice record. On any failure the whole
//! database transaction rolls back and no partial state is visible to any
//! other reader — a reader can never observe an order without its invoice,
//! nor a stock decrement without its order.
//!
//! The upload targets a store with no native rollback, so it runs last
//! (saga-style): only the invoice insert and the commit happen after it,
//! and both compensate by best-effort deletion of the uploaded object on
//! failure.

pub mod notify;

use std::time::Duration;

use sqlx::SqlitePool;

use crate::error::{AppError, AppResult};
use crate::invoice::render_invoice;
use crate::models::{Invoice, Order, OrderCreate, OrderItem, Product, Shop};
use crate::storage::{DocumentStore, invoice_key};
use crate::util::{now_millis, snowflake_id};

/// Committed result of an order creation
#[derive(Debug, serde::Serialize)]
pub struct CreatedOrder {
    pub order: Order,
    pub invoice: Invoice,
}

/// Create an order, its invoice document and any low-stock notifications
/// in a single transaction.
///
/// `shop_id` and `biller_name` come from the authenticated caller, never
/// from the request body.
pub async fn create_order(
    pool: &SqlitePool,
    store: &dyn DocumentStore,
    shop_id: i64,
    biller_name: &str,
    req: OrderCreate,
    upload_timeout: Duration,
) -> AppResult<CreatedOrder> {
    // 1. An order without items is meaningless
    if req.items.is_empty() {
        return Err(AppError::validation("Order must contain items."));
    }

    let mut tx = pool.begin().await?;

    // 2-4. Validate each line against the caller's shop and accumulate totals
    let mut total_revenue = 0.0_f64;
    let mut total_cost = 0.0_f64;
    let mut items: Vec<OrderItem> = Vec::with_capacity(req.items.len());
    let mut thresholds: Vec<i64> = Vec::with_capacity(req.items.len());

    for line in &req.items {
        if line.quantity <= 0 {
            return Err(AppError::validation("Item quantity must be positive."));
        }

        // Scoping by the authenticated shop makes a foreign shop's product
        // indistinguishable from a missing one.
        let product: Option<Product> = sqlx::query_as(
            "SELECT id, shop_id, name, price, cost, stock, low_stock_threshold, created_at \
             FROM products WHERE id = ? AND shop_id = ?",
        )
        .bind(line.product_id)
        .bind(shop_id)
        .fetch_optional(&mut *tx)
        .await?;

        let product = product
            .ok_or_else(|| AppError::not_found(format!("Product {}", line.product_id)))?;

        if product.stock < line.quantity {
            return Err(AppError::InsufficientStock {
                name: product.name,
                available: product.stock,
                requested: line.quantity,
            });
        }

        total_revenue += product.price * line.quantity as f64;
        total_cost += product.cost * line.quantity as f64;
        thresholds.push(product.low_stock_threshold);
        items.push(OrderItem {
            product_id: product.id,
            name: product.name,
            quantity: line.quantity,
            price: product.price,
            cost: product.cost,
        });
    }

    let total_profit = total_revenue - total_cost;

    // 5. Persist the order with snapshotted prices and costs
    let order_id = snowflake_id();
    let now = now_millis();
    let customer_name = req
        .customer_name
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "Walk-in Customer".to_string());

    sqlx::query(
        "INSERT INTO orders (id, shop_id, customer_name, biller_name, total, total_profit, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(order_id)
    .bind(shop_id)
    .bind(&customer_name)
    .bind(biller_name)
    .bind(total_revenue)
    .bind(total_profit)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    for item in &items {
        sqlx::query(
            "INSERT INTO order_items (order_id, product_id, name, quantity, price, cost) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(order_id)
        .bind(item.product_id)
        .bind(&item.name)
        .bind(item.quantity)
        .bind(item.price)
        .bind(item.cost)
        .execute(&mut *tx)
        .await?;
    }

    // 6. Decrement stock with a guard (closes the lost-update race and keeps
    //    stock non-negative even with duplicate lines for one product) and
    //    emit a notification on each threshold crossing.
    for (item, threshold) in items.iter().zip(&thresholds) {
        let new_stock: Option<i64> = sqlx::query_scalar(
            "UPDATE products SET stock = stock - ?1 \
             WHERE id = ?2 AND shop_id = ?3 AND stock >= ?1 \
             RETURNING stock",
        )
        .bind(item.quantity)
        .bind(item.product_id)
        .bind(shop_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(new_stock) = new_stock else {
            let available: i64 = sqlx::query_scalar("SELECT stock FROM products WHERE id = ?")
                .bind(item.product_id)
                .fetch_one(&mut *tx)
                .await?;
            return Err(AppError::InsufficientStock {
                name: item.name.clone(),
                available,
                requested: item.quantity,
            });
        };

        let pre_stock = new_stock + item.quantity;
        notify::maybe_emit(&mut *tx, shop_id, &item.name, pre_stock, new_stock, *threshold)
            .await?;
    }

    // 7. Render the invoice from the committed-to-be order and the shop record
    let shop: Option<Shop> =
        sqlx::query_as("SELECT id, name, address, created_at FROM shops WHERE id = ?")
            .bind(shop_id)
            .fetch_optional(&mut *tx)
            .await?;
    let shop = shop.ok_or_else(|| AppError::not_found("Shop"))?;

    let order = Order {
        id: order_id,
        shop_id,
        customer_name: customer_name.clone(),
        biller_name: biller_name.to_string(),
        total: total_revenue,
        total_profit,
        created_at: now,
        items,
    };

    let pdf = render_invoice(&order, &shop)?;
    if pdf.is_empty() {
        return Err(AppError::Upload("Rendered invoice document is empty.".into()));
    }

    // 8. Upload to durable storage; the transaction is open for the whole
    //    upload, so it is bounded by a timeout.
    let key = invoice_key(shop_id, order_id);
    let address = match tokio::time::timeout(
        upload_timeout,
        store.upload(&key, pdf, "application/pdf"),
    )
    .await
    {
        Ok(Ok(address)) if !address.is_empty() => address,
        Ok(Ok(_)) => {
            return Err(AppError::Upload(
                "Document store returned no address.".into(),
            ));
        }
        Ok(Err(e)) => return Err(e.into()),
        Err(_) => {
            return Err(AppError::Upload(format!(
                "Upload timed out after {}ms.",
                upload_timeout.as_millis()
            )));
        }
    };

    // 9. Persist the invoice record. From here on a failure must also
    //    compensate for the already-uploaded document.
    let invoice_id = snowflake_id();
    let insert = sqlx::query(
        "INSERT INTO invoices (id, shop_id, order_id, customer_name, biller_name, total, pdf_url, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(invoice_id)
    .bind(shop_id)
    .bind(order_id)
    .bind(&customer_name)
    .bind(biller_name)
    .bind(total_revenue)
    .bind(&address)
    .bind(now)
    .execute(&mut *tx)
    .await;

    if let Err(e) = insert {
        remove_uploaded(store, &key).await;
        return Err(e.into());
    }

    // 10. Commit; everything before this rolls back together on failure
    if let Err(e) = tx.commit().await {
        remove_uploaded(store, &key).await;
        return Err(e.into());
    }

    tracing::info!(
        order_id,
        shop_id,
        total = total_revenue,
        "Order created successfully"
    );

    Ok(CreatedOrder {
        order,
        invoice: Invoice {
            id: invoice_id,
            shop_id,
            order_id,
            customer_name,
            biller_name: biller_name.to_string(),
            total: total_revenue,
            pdf_url: address,
            created_at: now,
        },
    })
}

/// Best-effort compensating cleanup of an uploaded invoice document after
/// the surrounding transaction failed. A cleanup failure is logged, never
/// escalated.
async fn remove_uploaded(store: &dyn DocumentStore, key: &str) {
    if let Err(e) = store.delete(key).await {
        tracing::warn!(key = %key, error = %e, "Failed to remove uploaded invoice document");
    }
}
