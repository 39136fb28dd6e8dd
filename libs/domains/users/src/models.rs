use axum_helpers::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Password policy: at least one digit, one lowercase and one uppercase letter.
fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_lower = password.chars().any(|c| c.is_lowercase());
    let has_upper = password.chars().any(|c| c.is_uppercase());

    if has_digit && has_lower && has_upper {
        Ok(())
    } else {
        let mut err = ValidationError::new("weak_password");
        err.message = Some(
            "Password must contain a digit, a lowercase and an uppercase letter".into(),
        );
        Err(err)
    }
}

/// A stored account
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    /// Argon2 PHC string
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// "First Last" when both are known, otherwise the username.
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.clone(),
            _ => self.username.clone(),
        }
    }
}

/// Public view of a user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Insert payload handed to the repository, password already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Role,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 6), custom(function = "validate_password_strength"))]
    pub password: String,
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    /// Bearer token for the `Authorization` header
    pub token: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
    pub user: UserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(password: &str) -> RegisterRequest {
        RegisterRequest {
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: password.into(),
            first_name: None,
            last_name: None,
        }
    }

    #[test]
    fn test_password_policy() {
        assert!(register("Secret1").validate().is_ok());
        assert!(register("secret1").validate().is_err());
        assert!(register("SECRET1").validate().is_err());
        assert!(register("Secret").validate().is_err());
        assert!(register("Se1").validate().is_err());
    }

    #[test]
    fn test_username_and_email_rules() {
        let mut req = register("Secret1");
        req.username = "al".into();
        assert!(req.validate().is_err());

        let mut req = register("Secret1");
        req.email = "not-an-email".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let mut user = User {
            id: Uuid::now_v7(),
            username: "alice".into(),
            email: "alice@example.com".into(),
            password_hash: String::new(),
            first_name: None,
            last_name: None,
            role: Role::Customer,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(user.display_name(), "alice");

        user.first_name = Some("Alice".into());
        user.last_name = Some("Liddell".into());
        assert_eq!(user.display_name(), "Alice Liddell");
    }
}
