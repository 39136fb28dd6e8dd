use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    Actor, ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, ConflictResponse, InternalServerErrorResponse,
        NotFoundResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

pub const TAG: &str = "Auth";

#[derive(OpenApi)]
#[openapi(
    paths(register, login, me),
    components(
        schemas(RegisterRequest, LoginRequest, AuthResponse, UserResponse),
        responses(
            BadRequestValidationResponse,
            ConflictResponse,
            UnauthorizedResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "Registration and login"))
)]
pub struct ApiDoc;

/// `/register`, `/login` and `/me`.
///
/// `/me` needs verified claims in the request extensions, so mount this
/// router behind one of the JWT middlewares.
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
        .with_state(Arc::new(service))
}

/// Register a customer account
#[utoipa::path(
    post,
    path = "/register",
    tag = TAG,
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> UserResult<impl IntoResponse> {
    let user = service.register(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Exchange credentials for a bearer token
#[utoipa::path(
    post,
    path = "/login",
    tag = TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = AuthResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn login<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> UserResult<Json<AuthResponse>> {
    Ok(Json(service.login(input).await?))
}

/// Profile of the authenticated caller
#[utoipa::path(
    get,
    path = "/me",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn me<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    actor: Actor,
) -> UserResult<Json<UserResponse>> {
    Ok(Json(service.me(actor.user_id).await?))
}
