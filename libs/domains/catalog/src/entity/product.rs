use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub price: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))", nullable)]
    pub discount_price: Option<Decimal>,
    pub stock_quantity: i32,
    pub sku: Option<String>,
    pub category_id: Uuid,
    pub is_active: bool,
    pub is_featured: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

database::impl_soft_delete!();

impl From<Model> for crate::models::Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            price: model.price,
            discount_price: model.discount_price,
            stock_quantity: model.stock_quantity,
            sku: model.sku,
            category_id: model.category_id,
            is_active: model.is_active,
            is_featured: model.is_featured,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl ActiveModel {
    pub(crate) fn apply(&mut self, input: crate::models::ProductInput) {
        use sea_orm::ActiveValue::Set;

        self.name = Set(input.name);
        self.description = Set(input.description);
        self.price = Set(input.price);
        self.discount_price = Set(input.discount_price);
        self.stock_quantity = Set(input.stock_quantity);
        self.sku = Set(input.sku);
        self.category_id = Set(input.category_id);
        self.is_active = Set(input.is_active);
        self.is_featured = Set(input.is_featured);
    }
}

impl From<crate::models::ProductInput> for ActiveModel {
    fn from(input: crate::models::ProductInput) -> Self {
        let mut model = ActiveModel {
            id: sea_orm::ActiveValue::Set(Uuid::now_v7()),
            ..Default::default()
        };
        model.apply(input);
        model
    }
}
