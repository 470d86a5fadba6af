//! Entity models
//!
//! Plain serde structs mirroring the database schema. Every business entity
//! is scoped to exactly one shop.

mod invoice;
mod notification;
mod order;
mod product;
mod shop;
mod staff;

pub use invoice::Invoice;
pub use notification::Notification;
pub use order::{Order, OrderCreate, OrderItem, OrderItemInput};
pub use product::{Product, ProductCreate};
pub use shop::Shop;
pub use staff::{Staff, StaffProfile};
