use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AddressResult;
use crate::models::{Address, AddressInput};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AddressRepository: Send + Sync {
    /// Insert for `user_id`; a default address demotes the user's others
    async fn create(&self, user_id: Uuid, input: AddressInput) -> AddressResult<Address>;

    async fn get_by_id(&self, id: Uuid) -> AddressResult<Option<Address>>;

    /// Default first, then newest first
    async fn list_by_user(&self, user_id: Uuid) -> AddressResult<Vec<Address>>;

    async fn get_default(&self, user_id: Uuid) -> AddressResult<Option<Address>>;

    /// Replace the editable fields; a default address demotes the owner's others
    async fn update(&self, id: Uuid, input: AddressInput) -> AddressResult<Option<Address>>;

    async fn delete(&self, id: Uuid) -> AddressResult<bool>;

    /// Make `id` the only default of `user_id`. `None`, with nothing
    /// changed, when the address is missing or owned by someone else.
    async fn set_default(&self, id: Uuid, user_id: Uuid) -> AddressResult<Option<Address>>;
}
