use axum_helpers::Actor;
use chrono::Utc;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{OrderError, OrderResult};
use crate::models::{
    CreateOrder, NewOrder, NewOrderItem, Order, OrderDetails, OrderReceipt, OrderStatus,
    StatusChange,
};
use crate::number::generate_order_number;
use crate::repository::OrderRepository;

#[derive(Clone)]
pub struct OrderService<R: OrderRepository> {
    repository: Arc<R>,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// The caller's orders, newest first
    #[instrument(skip(self), fields(user_id = %actor.user_id))]
    pub async fn list_mine(&self, actor: Actor) -> OrderResult<Vec<OrderDetails>> {
        self.repository.list_by_user(actor.user_id).await
    }

    #[instrument(skip(self), fields(user_id = %actor.user_id))]
    pub async fn get(&self, actor: Actor, id: Uuid) -> OrderResult<OrderDetails> {
        let details = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(OrderError::NotFound(id))?;
        ensure_access(actor, &details.order)?;
        Ok(details)
    }

    #[instrument(skip(self), fields(user_id = %actor.user_id))]
    pub async fn get_by_number(&self, actor: Actor, order_number: &str) -> OrderResult<OrderReceipt> {
        let receipt = self
            .repository
            .get_receipt(order_number)
            .await?
            .ok_or_else(|| OrderError::NumberNotFound(order_number.to_string()))?;
        ensure_access(actor, &receipt.details.order)?;
        Ok(receipt)
    }

    /// Place an order for the caller. Line totals are computed here; the
    /// header amounts are stored as sent.
    #[instrument(skip(self, input), fields(user_id = %actor.user_id, items = input.items.len()))]
    pub async fn create(&self, actor: Actor, input: CreateOrder) -> OrderResult<OrderDetails> {
        input
            .validate()
            .map_err(|e| OrderError::Validation(e.to_string()))?;
        if input.items.is_empty() {
            return Err(OrderError::Validation(
                "An order needs at least one item".to_string(),
            ));
        }

        let items = input
            .items
            .into_iter()
            .map(NewOrderItem::try_from)
            .collect::<OrderResult<Vec<_>>>()?;

        let product_ids = items.iter().map(|item| item.product_id).collect();
        let missing = self.repository.missing_products(product_ids).await?;
        if !missing.is_empty() {
            let ids: Vec<String> = missing.iter().map(Uuid::to_string).collect();
            return Err(OrderError::Validation(format!(
                "Unknown products: {}",
                ids.join(", ")
            )));
        }

        let order = NewOrder {
            user_id: actor.user_id,
            order_number: generate_order_number(Utc::now()),
            sub_total: input.sub_total,
            shipping_cost: input.shipping_cost,
            total: input.total,
            status: OrderStatus::for_payment_method(input.payment_method.as_deref()),
            notes: input.notes,
        };

        self.repository.create(order, items).await
    }

    /// Admin only. Shipped and Delivered stamp their dates; transitions are not validated.
    #[instrument(skip(self), fields(user_id = %actor.user_id))]
    pub async fn update_status(&self, actor: Actor, id: Uuid, status: OrderStatus) -> OrderResult<Order> {
        require_admin(actor)?;

        let current = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(OrderError::NotFound(id))?;
        let change = StatusChange::apply(&current.order, status, Utc::now());

        self.repository
            .update_status(id, change)
            .await?
            .ok_or(OrderError::NotFound(id))
    }

    #[instrument(skip(self), fields(user_id = %actor.user_id))]
    pub async fn delete(&self, actor: Actor, id: Uuid) -> OrderResult<()> {
        require_admin(actor)?;
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(OrderError::NotFound(id))
        }
    }
}

fn require_admin(actor: Actor) -> OrderResult<()> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(OrderError::Forbidden("Admin role required".to_string()))
    }
}

fn ensure_access(actor: Actor, order: &Order) -> OrderResult<()> {
    if actor.can_access(order.user_id) {
        Ok(())
    } else {
        tracing::warn!(order_id = %order.id, "Access to foreign order");
        Err(OrderError::Forbidden(
            "Order belongs to another user".to_string(),
        ))
    }
}
