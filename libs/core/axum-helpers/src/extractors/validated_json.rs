use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body that must pass `validator` rules before the handler runs.
///
/// Malformed JSON keeps axum's rejection status; rule violations become a 400
/// with per-field details.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct Login {
///     #[validate(length(min = 1))]
///     username: String,
/// }
///
/// async fn login(ValidatedJson(body): ValidatedJson<Login>) { /* ... */ }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}
