use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub parent_id: Option<Uuid>,
    /// Position among siblings
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

database::impl_soft_delete!();

impl From<Model> for crate::models::Category {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            parent_id: model.parent_id,
            sort_order: model.sort_order,
            is_active: model.is_active,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl ActiveModel {
    /// Overwrite every caller-editable column.
    pub(crate) fn apply(&mut self, input: crate::models::CategoryInput) {
        use sea_orm::ActiveValue::Set;

        self.name = Set(input.name);
        self.description = Set(input.description);
        self.parent_id = Set(input.parent_id);
        self.sort_order = Set(input.sort_order);
        self.is_active = Set(input.is_active);
    }
}

impl From<crate::models::CategoryInput> for ActiveModel {
    fn from(input: crate::models::CategoryInput) -> Self {
        let mut model = ActiveModel {
            id: sea_orm::ActiveValue::Set(Uuid::now_v7()),
            ..Default::default()
        };
        model.apply(input);
        model
    }
}
