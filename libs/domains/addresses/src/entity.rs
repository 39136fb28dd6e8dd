use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "addresses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub street: String,
    pub city: String,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub apartment: Option<String>,
    pub phone_number: Option<String>,
    pub is_default: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

database::impl_soft_delete!();

impl From<Model> for crate::models::Address {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            street: model.street,
            city: model.city,
            postal_code: model.postal_code,
            country: model.country,
            apartment: model.apartment,
            phone_number: model.phone_number,
            is_default: model.is_default,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl ActiveModel {
    /// A new address owned by `user_id`
    pub(crate) fn new(user_id: Uuid, input: crate::models::AddressInput) -> Self {
        let mut model = ActiveModel {
            id: sea_orm::ActiveValue::Set(Uuid::now_v7()),
            user_id: sea_orm::ActiveValue::Set(user_id),
            ..Default::default()
        };
        model.apply(input);
        model
    }

    /// Overwrite the editable columns. The owner never changes.
    pub(crate) fn apply(&mut self, input: crate::models::AddressInput) {
        use sea_orm::ActiveValue::Set;

        self.street = Set(input.street);
        self.city = Set(input.city);
        self.postal_code = Set(input.postal_code);
        self.country = Set(input.country);
        self.apartment = Set(input.apartment);
        self.phone_number = Set(input.phone_number);
        self.is_default = Set(input.is_default);
    }
}
