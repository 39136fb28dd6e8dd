use axum_helpers::Actor;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{AddressError, AddressResult};
use crate::models::{Address, AddressInput};
use crate::repository::AddressRepository;

/// Address book of the calling user
#[derive(Clone)]
pub struct AddressService<R: AddressRepository> {
    repository: Arc<R>,
}

impl<R: AddressRepository> AddressService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self), fields(user_id = %actor.user_id))]
    pub async fn list(&self, actor: Actor) -> AddressResult<Vec<Address>> {
        self.repository.list_by_user(actor.user_id).await
    }

    #[instrument(skip(self), fields(user_id = %actor.user_id))]
    pub async fn get_default(&self, actor: Actor) -> AddressResult<Address> {
        self.repository
            .get_default(actor.user_id)
            .await?
            .ok_or(AddressError::NoDefault)
    }

    #[instrument(skip(self), fields(user_id = %actor.user_id))]
    pub async fn get(&self, actor: Actor, id: Uuid) -> AddressResult<Address> {
        self.owned(actor, id).await
    }

    #[instrument(skip(self, input), fields(user_id = %actor.user_id))]
    pub async fn create(&self, actor: Actor, input: AddressInput) -> AddressResult<Address> {
        self.repository.create(actor.user_id, input).await
    }

    #[instrument(skip(self, input), fields(user_id = %actor.user_id))]
    pub async fn update(&self, actor: Actor, id: Uuid, input: AddressInput) -> AddressResult<Address> {
        self.owned(actor, id).await?;
        self.repository
            .update(id, input)
            .await?
            .ok_or(AddressError::NotFound(id))
    }

    #[instrument(skip(self), fields(user_id = %actor.user_id))]
    pub async fn delete(&self, actor: Actor, id: Uuid) -> AddressResult<()> {
        self.owned(actor, id).await?;
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(AddressError::NotFound(id))
        }
    }

    /// Checks ownership before touching any flag, then switches the default atomically
    #[instrument(skip(self), fields(user_id = %actor.user_id))]
    pub async fn set_default(&self, actor: Actor, id: Uuid) -> AddressResult<Address> {
        self.owned(actor, id).await?;
        self.repository
            .set_default(id, actor.user_id)
            .await?
            .ok_or(AddressError::NotFound(id))
    }

    async fn owned(&self, actor: Actor, id: Uuid) -> AddressResult<Address> {
        let address = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(AddressError::NotFound(id))?;

        if address.user_id != actor.user_id {
            tracing::warn!(address_id = %id, owner = %address.user_id, "Access to foreign address");
            return Err(AddressError::Forbidden(id));
        }
        Ok(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockAddressRepository;
    use chrono::Utc;

    fn address(id: Uuid, user_id: Uuid, is_default: bool) -> Address {
        Address {
            id,
            user_id,
            street: "1 Main St".into(),
            city: "Springfield".into(),
            postal_code: None,
            country: None,
            apartment: None,
            phone_number: None,
            is_default,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn input(is_default: bool) -> AddressInput {
        AddressInput {
            street: "2 Side St".into(),
            city: "Shelbyville".into(),
            postal_code: None,
            country: None,
            apartment: None,
            phone_number: None,
            is_default,
        }
    }

    #[tokio::test]
    async fn test_set_default_on_foreign_address_changes_nothing() {
        let owner = Uuid::now_v7();
        let id = Uuid::now_v7();

        let mut repo = MockAddressRepository::new();
        repo.expect_get_by_id()
            .returning(move |id| Ok(Some(address(id, owner, false))));
        repo.expect_set_default().never();

        let service = AddressService::new(repo);
        let result = service.set_default(Actor::customer(Uuid::now_v7()), id).await;
        assert!(matches!(result, Err(AddressError::Forbidden(f)) if f == id));
    }

    #[tokio::test]
    async fn test_set_default_on_missing_address() {
        let mut repo = MockAddressRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));
        repo.expect_set_default().never();

        let service = AddressService::new(repo);
        let result = service
            .set_default(Actor::customer(Uuid::now_v7()), Uuid::now_v7())
            .await;
        assert!(matches!(result, Err(AddressError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_set_default_passes_acting_user() {
        let user = Uuid::now_v7();
        let id = Uuid::now_v7();

        let mut repo = MockAddressRepository::new();
        repo.expect_get_by_id()
            .returning(move |id| Ok(Some(address(id, user, false))));
        repo.expect_set_default()
            .withf(move |a, u| *a == id && *u == user)
            .times(1)
            .returning(move |id, user| Ok(Some(address(id, user, true))));

        let service = AddressService::new(repo);
        let updated = service.set_default(Actor::customer(user), id).await.unwrap();
        assert!(updated.is_default);
    }

    #[tokio::test]
    async fn test_admins_get_no_access_to_other_address_books() {
        let mut repo = MockAddressRepository::new();
        repo.expect_get_by_id()
            .returning(|id| Ok(Some(address(id, Uuid::now_v7(), false))));
        repo.expect_delete().never();

        let service = AddressService::new(repo);
        let result = service
            .delete(Actor::admin(Uuid::now_v7()), Uuid::now_v7())
            .await;
        assert!(matches!(result, Err(AddressError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_create_uses_acting_user() {
        let user = Uuid::now_v7();
        let mut repo = MockAddressRepository::new();
        repo.expect_create()
            .withf(move |u, _| *u == user)
            .times(1)
            .returning(|u, input| Ok(address(Uuid::now_v7(), u, input.is_default)));

        let service = AddressService::new(repo);
        let created = service.create(Actor::customer(user), input(true)).await.unwrap();
        assert_eq!(created.user_id, user);
        assert!(created.is_default);
    }

    #[tokio::test]
    async fn test_missing_default() {
        let mut repo = MockAddressRepository::new();
        repo.expect_get_default().returning(|_| Ok(None));

        let service = AddressService::new(repo);
        assert!(matches!(
            service.get_default(Actor::customer(Uuid::now_v7())).await,
            Err(AddressError::NoDefault)
        ));
    }
}
