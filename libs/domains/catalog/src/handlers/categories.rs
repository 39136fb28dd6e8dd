use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use axum_helpers::{
    Actor, AppError, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CatalogResult;
use crate::models::{Category, CategoryInput};
use crate::repository::CategoryRepository;
use crate::service::CategoryService;

pub const TAG: &str = "Categories";

#[derive(OpenApi)]
#[openapi(
    paths(
        list_categories,
        list_active,
        list_root,
        list_children,
        get_category,
        create_category,
        update_category,
        delete_category
    ),
    components(
        schemas(Category, CategoryInput),
        responses(
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "Category tree"))
)]
pub struct ApiDoc;

type SharedService<R> = Arc<CategoryService<R>>;

pub fn router<R: CategoryRepository + 'static>(service: CategoryService<R>) -> Router {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route("/active", get(list_active))
        .route("/root", get(list_root))
        .route(
            "/{id}",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
        .route("/{id}/children", get(list_children))
        .with_state(Arc::new(service))
}

/// All categories
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "Categories by sort order", body = Vec<Category>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categories<R: CategoryRepository>(
    State(service): State<SharedService<R>>,
) -> CatalogResult<Json<Vec<Category>>> {
    Ok(Json(service.list_all().await?))
}

/// Active categories
#[utoipa::path(
    get,
    path = "/active",
    tag = TAG,
    responses((status = 200, description = "Active categories", body = Vec<Category>))
)]
async fn list_active<R: CategoryRepository>(
    State(service): State<SharedService<R>>,
) -> CatalogResult<Json<Vec<Category>>> {
    Ok(Json(service.list_active().await?))
}

/// Active top-level categories
#[utoipa::path(
    get,
    path = "/root",
    tag = TAG,
    responses((status = 200, description = "Root categories", body = Vec<Category>))
)]
async fn list_root<R: CategoryRepository>(
    State(service): State<SharedService<R>>,
) -> CatalogResult<Json<Vec<Category>>> {
    Ok(Json(service.list_root().await?))
}

/// Active direct children of a category
#[utoipa::path(
    get,
    path = "/{id}/children",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Parent category ID")),
    responses(
        (status = 200, description = "Child categories", body = Vec<Category>),
        (status = 400, response = BadRequestUuidResponse)
    )
)]
async fn list_children<R: CategoryRepository>(
    State(service): State<SharedService<R>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<Vec<Category>>> {
    Ok(Json(service.list_children(id).await?))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category found", body = Category),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_category<R: CategoryRepository>(
    State(service): State<SharedService<R>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<Category>> {
    Ok(Json(service.get(id).await?))
}

/// Create a category (admin)
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    security(("bearer_auth" = [])),
    request_body = CategoryInput,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, description = "Parent category not found")
    )
)]
async fn create_category<R: CategoryRepository>(
    State(service): State<SharedService<R>>,
    actor: Actor,
    ValidatedJson(input): ValidatedJson<CategoryInput>,
) -> Result<impl IntoResponse, AppError> {
    actor.require_admin()?;
    let category = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Replace a category (admin)
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Category ID")),
    request_body = CategoryInput,
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn update_category<R: CategoryRepository>(
    State(service): State<SharedService<R>>,
    actor: Actor,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<CategoryInput>,
) -> Result<Json<Category>, AppError> {
    actor.require_admin()?;
    Ok(Json(service.update(id, input).await?))
}

/// Soft-delete a category (admin)
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn delete_category<R: CategoryRepository>(
    State(service): State<SharedService<R>>,
    actor: Actor,
    UuidPath(id): UuidPath,
) -> Result<StatusCode, AppError> {
    actor.require_admin()?;
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
