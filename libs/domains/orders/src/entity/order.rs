use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    #[sea_orm(unique)]
    pub order_number: String,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub sub_total: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub shipping_cost: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub total: Decimal,
    /// `OrderStatus` as PascalCase text
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub shipped_date: Option<DateTimeWithTimeZone>,
    pub delivered_date: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

database::impl_soft_delete!();

impl From<Model> for crate::models::Order {
    fn from(model: Model) -> Self {
        let status = model.status.parse().unwrap_or_else(|_| {
            tracing::warn!(order_id = %model.id, status = %model.status, "Unknown stored order status");
            crate::models::OrderStatus::default()
        });

        Self {
            id: model.id,
            user_id: model.user_id,
            order_number: model.order_number,
            sub_total: model.sub_total,
            shipping_cost: model.shipping_cost,
            total: model.total,
            status,
            notes: model.notes,
            shipped_date: model.shipped_date.map(Into::into),
            delivered_date: model.delivered_date.map(Into::into),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<crate::models::NewOrder> for ActiveModel {
    fn from(input: crate::models::NewOrder) -> Self {
        use sea_orm::ActiveValue::Set;

        ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(input.user_id),
            order_number: Set(input.order_number),
            sub_total: Set(input.sub_total),
            shipping_cost: Set(input.shipping_cost),
            total: Set(input.total),
            status: Set(input.status.to_string()),
            notes: Set(input.notes),
            shipped_date: Set(None),
            delivered_date: Set(None),
            ..Default::default()
        }
    }
}
