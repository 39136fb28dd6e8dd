use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Address {
    pub id: Uuid,
    pub user_id: Uuid,
    pub street: String,
    pub city: String,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub apartment: Option<String>,
    pub phone_number: Option<String>,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body for creating an address, and for replacing one on update
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AddressInput {
    #[validate(length(min = 1, max = 500))]
    pub street: String,
    #[validate(length(min = 1, max = 100))]
    pub city: String,
    #[validate(length(max = 20))]
    pub postal_code: Option<String>,
    #[validate(length(max = 100))]
    pub country: Option<String>,
    #[validate(length(max = 50))]
    pub apartment: Option<String>,
    #[validate(length(max = 30))]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}
