use async_trait::async_trait;
use uuid::Uuid;

use crate::error::OrderResult;
use crate::models::{NewOrder, NewOrderItem, Order, OrderDetails, OrderReceipt, StatusChange};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Header and items in one transaction
    async fn create(&self, order: NewOrder, items: Vec<NewOrderItem>) -> OrderResult<OrderDetails>;

    async fn get_by_id(&self, id: Uuid) -> OrderResult<Option<OrderDetails>>;

    /// Order with customer, items, products, images and uploads
    async fn get_receipt(&self, order_number: &str) -> OrderResult<Option<OrderReceipt>>;

    /// Newest first
    async fn list_by_user(&self, user_id: Uuid) -> OrderResult<Vec<OrderDetails>>;

    async fn update_status(&self, id: Uuid, change: StatusChange) -> OrderResult<Option<Order>>;

    async fn delete(&self, id: Uuid) -> OrderResult<bool>;

    /// Ids among `product_ids` with no live product
    async fn missing_products(&self, product_ids: Vec<Uuid>) -> OrderResult<Vec<Uuid>>;
}
