use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "uploads")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub size_mb: f64,
    pub file_path: String,
    pub content_type: String,
    pub extension: String,
    pub uploader_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

database::impl_soft_delete!();

impl From<Model> for crate::models::Upload {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            size_mb: model.size_mb,
            file_path: model.file_path,
            content_type: model.content_type,
            extension: model.extension,
            uploader_id: model.uploader_id,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<crate::models::NewUpload> for ActiveModel {
    fn from(input: crate::models::NewUpload) -> Self {
        use sea_orm::ActiveValue::Set;

        ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(input.name),
            size_mb: Set(input.size_mb),
            file_path: Set(input.file_path),
            content_type: Set(input.content_type),
            extension: Set(input.extension),
            uploader_id: Set(input.uploader_id),
            ..Default::default()
        }
    }
}
