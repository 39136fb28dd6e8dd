//! Soft-delete aware CRUD shared by every domain repository.
//!
//! Rows are never physically removed. Every entity carries `id`, `created_at`,
//! `updated_at` and `is_deleted`; reads go through [`NotDeleted::not_deleted`]
//! so the "not deleted" predicate is written exactly once.
//!
//! The free functions take any [`ConnectionTrait`], so the same primitives run
//! against the pool or inside a `DatabaseTransaction`.
//!
//! ```ignore
//! // in an entity module
//! database::impl_soft_delete!();
//!
//! let base = BaseRepository::<category::Entity>::new(db);
//! let active = base.query().filter(category::Column::IsActive.eq(true)).all(base.db()).await?;
//! ```

use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DbErr, EntityTrait, IntoActiveModel, QueryFilter, Select, UpdateMany,
};
use std::marker::PhantomData;
use uuid::Uuid;

/// An entity with the shared base shape.
pub trait SoftDeleteEntity: EntityTrait {
    fn id_column() -> Self::Column;
    fn is_deleted_column() -> Self::Column;
}

/// Audit stamping for an entity's active model.
pub trait AuditedActiveModel: ActiveModelTrait {
    fn stamp_created(&mut self, now: DateTimeWithTimeZone);
    fn stamp_updated(&mut self, now: DateTimeWithTimeZone);
    fn mark_deleted(&mut self);
}

/// The single soft-delete filter.
pub trait NotDeleted {
    fn not_deleted(self) -> Self;
}

impl<E: SoftDeleteEntity> NotDeleted for Select<E> {
    fn not_deleted(self) -> Self {
        self.filter(E::is_deleted_column().eq(false))
    }
}

impl<E: SoftDeleteEntity> NotDeleted for UpdateMany<E> {
    fn not_deleted(self) -> Self {
        self.filter(E::is_deleted_column().eq(false))
    }
}

/// Current time in the representation stored in audit columns.
pub fn now() -> DateTimeWithTimeZone {
    Utc::now().fixed_offset()
}

/// Implement [`SoftDeleteEntity`] and [`AuditedActiveModel`] for the
/// `Entity`/`ActiveModel`/`Column` triple in the calling module.
#[macro_export]
macro_rules! impl_soft_delete {
    () => {
        impl $crate::repository::SoftDeleteEntity for Entity {
            fn id_column() -> Column {
                Column::Id
            }

            fn is_deleted_column() -> Column {
                Column::IsDeleted
            }
        }

        impl $crate::repository::AuditedActiveModel for ActiveModel {
            fn stamp_created(&mut self, now: ::sea_orm::prelude::DateTimeWithTimeZone) {
                self.created_at = ::sea_orm::ActiveValue::Set(now);
                self.updated_at = ::sea_orm::ActiveValue::Set(now);
                self.is_deleted = ::sea_orm::ActiveValue::Set(false);
            }

            fn stamp_updated(&mut self, now: ::sea_orm::prelude::DateTimeWithTimeZone) {
                self.updated_at = ::sea_orm::ActiveValue::Set(now);
            }

            fn mark_deleted(&mut self) {
                self.is_deleted = ::sea_orm::ActiveValue::Set(true);
            }
        }
    };
}

pub async fn find_all<E, C>(conn: &C) -> Result<Vec<E::Model>, DbErr>
where
    E: SoftDeleteEntity,
    C: ConnectionTrait,
{
    E::find().not_deleted().all(conn).await
}

pub async fn find_by_id<E, C>(conn: &C, id: Uuid) -> Result<Option<E::Model>, DbErr>
where
    E: SoftDeleteEntity,
    C: ConnectionTrait,
{
    E::find()
        .not_deleted()
        .filter(E::id_column().eq(id))
        .one(conn)
        .await
}

/// Stamp both timestamps and insert. The identifier comes from the caller.
pub async fn insert<A, C>(
    conn: &C,
    mut model: A,
) -> Result<<A::Entity as EntityTrait>::Model, DbErr>
where
    A: AuditedActiveModel + ActiveModelBehavior + Send,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    C: ConnectionTrait,
{
    model.stamp_created(now());
    model.insert(conn).await
}

/// Restamp `updated_at` and persist the changed columns. Last writer wins.
pub async fn update<A, C>(
    conn: &C,
    mut model: A,
) -> Result<<A::Entity as EntityTrait>::Model, DbErr>
where
    A: AuditedActiveModel + ActiveModelBehavior + Send,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    C: ConnectionTrait,
{
    model.stamp_updated(now());
    model.update(conn).await
}

/// Flip `is_deleted`. Returns `false` when no live row has this id.
pub async fn soft_delete<E, C>(conn: &C, id: Uuid) -> Result<bool, DbErr>
where
    E: SoftDeleteEntity,
    E::Model: IntoActiveModel<E::ActiveModel>,
    E::ActiveModel: AuditedActiveModel + Send,
    C: ConnectionTrait,
{
    let Some(model) = find_by_id::<E, C>(conn, id).await? else {
        return Ok(false);
    };

    let mut active = model.into_active_model();
    active.mark_deleted();
    update(conn, active).await?;
    Ok(true)
}

/// Generic CRUD over one soft-delete entity, bound to the connection pool.
pub struct BaseRepository<E> {
    db: DatabaseConnection,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for BaseRepository<E> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E> BaseRepository<E>
where
    E: SoftDeleteEntity,
    E::Model: IntoActiveModel<E::ActiveModel>,
    E::ActiveModel: AuditedActiveModel + Send,
{
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// `SELECT` over live rows, ready for further filters.
    pub fn query(&self) -> Select<E> {
        E::find().not_deleted()
    }

    pub async fn find_all(&self) -> Result<Vec<E::Model>, DbErr> {
        find_all::<E, _>(&self.db).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<E::Model>, DbErr> {
        find_by_id::<E, _>(&self.db, id).await
    }

    pub async fn insert(&self, model: E::ActiveModel) -> Result<E::Model, DbErr> {
        insert(&self.db, model).await
    }

    pub async fn update(&self, model: E::ActiveModel) -> Result<E::Model, DbErr> {
        update(&self.db, model).await
    }

    pub async fn soft_delete(&self, id: Uuid) -> Result<bool, DbErr> {
        soft_delete::<E, _>(&self.db, id).await
    }
}
