//! Orders domain
//!
//! An order and its line items are written in one transaction. Each line
//! item stores `total_price = quantity * unit_price` at creation. Customers
//! see their own orders; status changes and deletion are admin-only.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod number;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{OrderError, OrderResult};
pub use models::{
    CreateOrder, CreateOrderItem, NewOrder, NewOrderItem, Order, OrderDetails, OrderItem,
    OrderItemDetails, OrderReceipt, OrderStatus, StatusChange, UpdateOrderStatus,
};
pub use number::generate_order_number;
pub use postgres::PgOrderRepository;
pub use repository::OrderRepository;
pub use service::OrderService;
