use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use database::{BaseRepository, NotDeleted, repository};
use domain_catalog::{ProductDetails, entity::product, load_details};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    entity::{order, order_item},
    error::OrderResult,
    models::{
        NewOrder, NewOrderItem, Order, OrderDetails, OrderItemDetails, OrderReceipt, StatusChange,
    },
    repository::OrderRepository,
};

/// Attach live line items, each with its product resolved.
async fn load_orders<C: ConnectionTrait>(
    conn: &C,
    orders: Vec<order::Model>,
) -> Result<Vec<OrderDetails>, DbErr> {
    if orders.is_empty() {
        return Ok(Vec::new());
    }

    let order_ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
    let items = order_item::Entity::find()
        .not_deleted()
        .filter(order_item::Column::OrderId.is_in(order_ids))
        .order_by_asc(order_item::Column::CreatedAt)
        .all(conn)
        .await?;

    let product_ids: HashSet<Uuid> = items.iter().map(|i| i.product_id).collect();
    let products = if product_ids.is_empty() {
        Vec::new()
    } else {
        product::Entity::find()
            .not_deleted()
            .filter(product::Column::Id.is_in(product_ids))
            .all(conn)
            .await?
    };
    let products: HashMap<Uuid, ProductDetails> = load_details(conn, products)
        .await?
        .into_iter()
        .map(|p| (p.product.id, p))
        .collect();

    let mut items_by_order: HashMap<Uuid, Vec<OrderItemDetails>> = HashMap::new();
    for item in items {
        let product = products.get(&item.product_id).cloned();
        items_by_order
            .entry(item.order_id)
            .or_default()
            .push(OrderItemDetails {
                item: item.into(),
                product,
            });
    }

    Ok(orders
        .into_iter()
        .map(|model| {
            let items = items_by_order.remove(&model.id).unwrap_or_default();
            OrderDetails {
                order: model.into(),
                items,
            }
        })
        .collect())
}

#[derive(Clone)]
pub struct PgOrderRepository {
    base: BaseRepository<order::Entity>,
}

impl PgOrderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    async fn details(&self, model: Option<order::Model>) -> OrderResult<Option<OrderDetails>> {
        let Some(model) = model else {
            return Ok(None);
        };
        Ok(load_orders(self.base.db(), vec![model]).await?.pop())
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn create(&self, new_order: NewOrder, items: Vec<NewOrderItem>) -> OrderResult<OrderDetails> {
        let txn = self.base.db().begin().await?;

        let header = repository::insert(&txn, order::ActiveModel::from(new_order)).await?;
        for item in items {
            repository::insert(&txn, order_item::ActiveModel::new(header.id, item)).await?;
        }
        txn.commit().await?;

        tracing::info!(
            order_id = %header.id,
            order_number = %header.order_number,
            user_id = %header.user_id,
            status = %header.status,
            "Created order"
        );

        let id = header.id;
        let details = load_orders(self.base.db(), vec![header])
            .await?
            .pop()
            .ok_or(DbErr::RecordNotFound(id.to_string()))?;
        Ok(details)
    }

    async fn get_by_id(&self, id: Uuid) -> OrderResult<Option<OrderDetails>> {
        let model = self.base.find_by_id(id).await?;
        self.details(model).await
    }

    async fn get_receipt(&self, order_number: &str) -> OrderResult<Option<OrderReceipt>> {
        let model = self
            .base
            .query()
            .filter(order::Column::OrderNumber.eq(order_number))
            .one(self.base.db())
            .await?;
        let Some(details) = self.details(model).await? else {
            return Ok(None);
        };

        let customer = repository::find_by_id::<domain_users::entity::Entity, _>(
            self.base.db(),
            details.order.user_id,
        )
        .await?
        .map(|user| domain_users::User::from(user).into());

        Ok(Some(OrderReceipt { details, customer }))
    }

    async fn list_by_user(&self, user_id: Uuid) -> OrderResult<Vec<OrderDetails>> {
        let models = self
            .base
            .query()
            .filter(order::Column::UserId.eq(user_id))
            .order_by_desc(order::Column::CreatedAt)
            .order_by_desc(order::Column::Id)
            .all(self.base.db())
            .await?;
        Ok(load_orders(self.base.db(), models).await?)
    }

    async fn update_status(&self, id: Uuid, change: StatusChange) -> OrderResult<Option<Order>> {
        let Some(model) = self.base.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active = model.into_active_model();
        active.status = Set(change.status.to_string());
        active.shipped_date = Set(change.shipped_date.map(|d| d.fixed_offset()));
        active.delivered_date = Set(change.delivered_date.map(|d| d.fixed_offset()));
        let model = self.base.update(active).await?;

        tracing::info!(order_id = %id, status = %change.status, "Updated order status");
        Ok(Some(model.into()))
    }

    async fn delete(&self, id: Uuid) -> OrderResult<bool> {
        let deleted = self.base.soft_delete(id).await?;
        if deleted {
            tracing::info!(order_id = %id, "Deleted order");
        }
        Ok(deleted)
    }

    async fn missing_products(&self, product_ids: Vec<Uuid>) -> OrderResult<Vec<Uuid>> {
        let found: HashSet<Uuid> = product::Entity::find()
            .not_deleted()
            .filter(product::Column::Id.is_in(product_ids.clone()))
            .all(self.base.db())
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect();
        Ok(product_ids
            .into_iter()
            .filter(|id| !found.contains(id))
            .collect())
    }
}
