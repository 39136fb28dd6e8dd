use crate::errors::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;

use super::jwt::JwtClaims;

/// The two roles a caller can hold.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Role {
    Admin,
    Customer,
}

/// The authenticated caller, as seen by services.
///
/// Extract it in a handler behind [`jwt_auth_middleware`](super::jwt_auth_middleware)
/// or [`optional_jwt_auth_middleware`](super::optional_jwt_auth_middleware);
/// without verified claims the request is rejected with 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn customer(user_id: Uuid) -> Self {
        Self::new(user_id, Role::Customer)
    }

    pub fn admin(user_id: Uuid) -> Self {
        Self::new(user_id, Role::Admin)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden("Admin role required".to_string()))
        }
    }

    /// Owners see their own records, admins see everything.
    pub fn can_access(&self, owner_id: Uuid) -> bool {
        self.is_admin() || self.user_id == owner_id
    }
}

impl TryFrom<&JwtClaims> for Actor {
    type Error = AppError;

    fn try_from(claims: &JwtClaims) -> Result<Self, Self::Error> {
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid token subject".to_string()))?;
        let role = if claims.roles.contains(&Role::Admin) {
            Role::Admin
        } else {
            Role::Customer
        };
        Ok(Self { user_id, role })
    }
}

impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = parts
            .extensions
            .get::<JwtClaims>()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;
        Actor::try_from(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(roles: Vec<Role>) -> JwtClaims {
        JwtClaims {
            sub: Uuid::nil().to_string(),
            email: "jane@example.com".into(),
            name: "jane".into(),
            roles,
            iss: "ClothStore".into(),
            aud: "ClothStore".into(),
            exp: 0,
            iat: 0,
            jti: "x".into(),
        }
    }

    #[test]
    fn test_role_round_trips_as_uppercase() {
        assert_eq!(Role::Admin.to_string(), "ADMIN");
        assert_eq!("customer".parse::<Role>().unwrap(), Role::Customer);
        assert_eq!(serde_json::to_string(&Role::Customer).unwrap(), "\"CUSTOMER\"");
    }

    #[test]
    fn test_admin_claim_wins() {
        let actor = Actor::try_from(&claims(vec![Role::Customer, Role::Admin])).unwrap();
        assert!(actor.is_admin());
    }

    #[test]
    fn test_customer_cannot_pass_admin_gate_or_see_others() {
        let me = Uuid::now_v7();
        let actor = Actor::customer(me);

        assert!(matches!(actor.require_admin(), Err(AppError::Forbidden(_))));
        assert!(actor.can_access(me));
        assert!(!actor.can_access(Uuid::now_v7()));
        assert!(Actor::admin(Uuid::now_v7()).can_access(me));
    }

    #[test]
    fn test_bad_subject_is_unauthorized() {
        let mut c = claims(vec![Role::Customer]);
        c.sub = "not-a-uuid".into();
        assert!(matches!(Actor::try_from(&c), Err(AppError::Unauthorized(_))));
    }
}
