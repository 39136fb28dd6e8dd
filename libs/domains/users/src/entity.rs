use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// `ADMIN` or `CUSTOMER`
    pub role: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

database::impl_soft_delete!();

impl From<Model> for crate::models::User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            password_hash: model.password_hash,
            first_name: model.first_name,
            last_name: model.last_name,
            role: model.role.parse().unwrap_or(axum_helpers::Role::Customer),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<crate::models::NewUser> for ActiveModel {
    fn from(input: crate::models::NewUser) -> Self {
        use sea_orm::ActiveValue::Set;

        ActiveModel {
            id: Set(Uuid::now_v7()),
            username: Set(input.username),
            email: Set(input.email),
            password_hash: Set(input.password_hash),
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            role: Set(input.role.to_string()),
            ..Default::default()
        }
    }
}
