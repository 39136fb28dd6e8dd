use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use axum_helpers::{
    Actor, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::AddressResult;
use crate::models::{Address, AddressInput};
use crate::repository::AddressRepository;
use crate::service::AddressService;

pub const TAG: &str = "Addresses";

#[derive(OpenApi)]
#[openapi(
    paths(
        list_addresses,
        get_default,
        get_address,
        create_address,
        update_address,
        delete_address,
        set_default
    ),
    components(
        schemas(Address, AddressInput),
        responses(
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "Address book of the authenticated user"))
)]
pub struct ApiDoc;

type SharedService<R> = Arc<AddressService<R>>;

/// Every route needs an authenticated caller.
pub fn router<R: AddressRepository + 'static>(service: AddressService<R>) -> Router {
    Router::new()
        .route("/", get(list_addresses).post(create_address))
        .route("/default", get(get_default))
        .route(
            "/{id}",
            get(get_address).put(update_address).delete(delete_address),
        )
        .route("/{id}/default", put(set_default))
        .with_state(Arc::new(service))
}

/// The caller's addresses, default first
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Addresses", body = Vec<Address>),
        (status = 401, response = UnauthorizedResponse)
    )
)]
async fn list_addresses<R: AddressRepository>(
    State(service): State<SharedService<R>>,
    actor: Actor,
) -> AddressResult<Json<Vec<Address>>> {
    Ok(Json(service.list(actor).await?))
}

#[utoipa::path(
    get,
    path = "/default",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Default address", body = Address),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_default<R: AddressRepository>(
    State(service): State<SharedService<R>>,
    actor: Actor,
) -> AddressResult<Json<Address>> {
    Ok(Json(service.get_default(actor).await?))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Address ID")),
    responses(
        (status = 200, description = "Address found", body = Address),
        (status = 400, response = BadRequestUuidResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_address<R: AddressRepository>(
    State(service): State<SharedService<R>>,
    actor: Actor,
    UuidPath(id): UuidPath,
) -> AddressResult<Json<Address>> {
    Ok(Json(service.get(actor, id).await?))
}

#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    security(("bearer_auth" = [])),
    request_body = AddressInput,
    responses(
        (status = 201, description = "Address created", body = Address),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse)
    )
)]
async fn create_address<R: AddressRepository>(
    State(service): State<SharedService<R>>,
    actor: Actor,
    ValidatedJson(input): ValidatedJson<AddressInput>,
) -> AddressResult<impl IntoResponse> {
    let address = service.create(actor, input).await?;
    Ok((StatusCode::CREATED, Json(address)))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Address ID")),
    request_body = AddressInput,
    responses(
        (status = 200, description = "Address updated", body = Address),
        (status = 400, response = BadRequestValidationResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn update_address<R: AddressRepository>(
    State(service): State<SharedService<R>>,
    actor: Actor,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<AddressInput>,
) -> AddressResult<Json<Address>> {
    Ok(Json(service.update(actor, id, input).await?))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Address ID")),
    responses(
        (status = 204, description = "Address deleted"),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn delete_address<R: AddressRepository>(
    State(service): State<SharedService<R>>,
    actor: Actor,
    UuidPath(id): UuidPath,
) -> AddressResult<StatusCode> {
    service.delete(actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Make this the caller's only default address
#[utoipa::path(
    put,
    path = "/{id}/default",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Address ID")),
    responses(
        (status = 200, description = "Default switched", body = Address),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn set_default<R: AddressRepository>(
    State(service): State<SharedService<R>>,
    actor: Actor,
    UuidPath(id): UuidPath,
) -> AddressResult<Json<Address>> {
    Ok(Json(service.set_default(actor, id).await?))
}
