use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
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
use crate::models::{
    AddProductImage, Category, Product, ProductDetails, ProductImage, ProductImageDetails,
    ProductInput, SearchQuery, UpdateImageOrder,
};
use crate::repository::{ProductImageRepository, ProductRepository};
use crate::service::{ProductImageService, ProductService};

pub const TAG: &str = "Products";

#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        list_active,
        list_featured,
        search_products,
        list_by_category,
        get_product,
        create_product,
        update_product,
        delete_product,
        list_images,
        add_image,
        delete_image,
        set_primary_image,
        update_image_order
    ),
    components(
        schemas(
            Product,
            ProductDetails,
            ProductInput,
            Category,
            ProductImage,
            ProductImageDetails,
            AddProductImage,
            UpdateImageOrder
        ),
        responses(
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "Products and their images"))
)]
pub struct ApiDoc;

type Products<R> = Arc<ProductService<R>>;
type Images<I> = Arc<ProductImageService<I>>;

/// Product routes plus the image gallery routes under the same prefix
pub fn router<R, I>(products: ProductService<R>, images: ProductImageService<I>) -> Router
where
    R: ProductRepository + 'static,
    I: ProductImageRepository + 'static,
{
    let product_routes = Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/active", get(list_active))
        .route("/featured", get(list_featured))
        .route("/search", get(search_products))
        .route("/by-category/{id}", get(list_by_category))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(Arc::new(products));

    let image_routes = Router::new()
        .route("/{id}/images", get(list_images).post(add_image))
        .route("/images/{id}", axum::routing::delete(delete_image))
        .route("/images/{id}/primary", post(set_primary_image))
        .route("/images/{id}/order", put(update_image_order))
        .with_state(Arc::new(images));

    product_routes.merge(image_routes)
}

/// All products, newest first
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "Products with category and images", body = Vec<ProductDetails>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Products<R>>,
) -> CatalogResult<Json<Vec<ProductDetails>>> {
    Ok(Json(service.list_all().await?))
}

#[utoipa::path(
    get,
    path = "/active",
    tag = TAG,
    responses((status = 200, description = "Active products", body = Vec<ProductDetails>))
)]
async fn list_active<R: ProductRepository>(
    State(service): State<Products<R>>,
) -> CatalogResult<Json<Vec<ProductDetails>>> {
    Ok(Json(service.list_active().await?))
}

#[utoipa::path(
    get,
    path = "/featured",
    tag = TAG,
    responses((status = 200, description = "Active featured products", body = Vec<ProductDetails>))
)]
async fn list_featured<R: ProductRepository>(
    State(service): State<Products<R>>,
) -> CatalogResult<Json<Vec<ProductDetails>>> {
    Ok(Json(service.list_featured().await?))
}

/// Case-insensitive search over name, description and SKU
#[utoipa::path(
    get,
    path = "/search",
    tag = TAG,
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching active products", body = Vec<ProductDetails>),
        (status = 400, description = "Missing or blank search term")
    )
)]
async fn search_products<R: ProductRepository>(
    State(service): State<Products<R>>,
    Query(query): Query<SearchQuery>,
) -> CatalogResult<Json<Vec<ProductDetails>>> {
    let term = query.q.unwrap_or_default();
    Ok(Json(service.search(&term).await?))
}

#[utoipa::path(
    get,
    path = "/by-category/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Active products of the category", body = Vec<ProductDetails>),
        (status = 400, response = BadRequestUuidResponse)
    )
)]
async fn list_by_category<R: ProductRepository>(
    State(service): State<Products<R>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<Vec<ProductDetails>>> {
    Ok(Json(service.list_by_category(id).await?))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product found", body = ProductDetails),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Products<R>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<ProductDetails>> {
    Ok(Json(service.get(id).await?))
}

/// Create a product (admin)
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    security(("bearer_auth" = [])),
    request_body = ProductInput,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, description = "Category not found")
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Products<R>>,
    actor: Actor,
    ValidatedJson(input): ValidatedJson<ProductInput>,
) -> Result<impl IntoResponse, AppError> {
    actor.require_admin()?;
    let product = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Replace a product (admin)
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Products<R>>,
    actor: Actor,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<ProductInput>,
) -> Result<Json<Product>, AppError> {
    actor.require_admin()?;
    Ok(Json(service.update(id, input).await?))
}

/// Soft-delete a product (admin)
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Products<R>>,
    actor: Actor,
    UuidPath(id): UuidPath,
) -> Result<StatusCode, AppError> {
    actor.require_admin()?;
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Images of a product by sort order
#[utoipa::path(
    get,
    path = "/{id}/images",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product images", body = Vec<ProductImageDetails>),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn list_images<I: ProductImageRepository>(
    State(service): State<Images<I>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<Vec<ProductImageDetails>>> {
    Ok(Json(service.list_by_product(id).await?))
}

/// Attach an upload to a product (admin)
#[utoipa::path(
    post,
    path = "/{id}/images",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = AddProductImage,
    responses(
        (status = 201, description = "Image attached, or the existing one for this upload", body = ProductImage),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn add_image<I: ProductImageRepository>(
    State(service): State<Images<I>>,
    actor: Actor,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<AddProductImage>,
) -> Result<impl IntoResponse, AppError> {
    actor.require_admin()?;
    let image = service.add(id, input).await?;
    Ok((StatusCode::CREATED, Json(image)))
}

/// Soft-delete a product image (admin)
#[utoipa::path(
    delete,
    path = "/images/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Product image ID")),
    responses(
        (status = 204, description = "Image deleted"),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn delete_image<I: ProductImageRepository>(
    State(service): State<Images<I>>,
    actor: Actor,
    UuidPath(id): UuidPath,
) -> Result<StatusCode, AppError> {
    actor.require_admin()?;
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Make this the product's only primary image (admin)
#[utoipa::path(
    post,
    path = "/images/{id}/primary",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Product image ID")),
    responses(
        (status = 200, description = "Primary image set", body = ProductImage),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn set_primary_image<I: ProductImageRepository>(
    State(service): State<Images<I>>,
    actor: Actor,
    UuidPath(id): UuidPath,
) -> Result<Json<ProductImage>, AppError> {
    actor.require_admin()?;
    Ok(Json(service.set_primary(id).await?))
}

/// Move an image within the gallery (admin)
#[utoipa::path(
    put,
    path = "/images/{id}/order",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Product image ID")),
    request_body = UpdateImageOrder,
    responses(
        (status = 200, description = "Sort order updated", body = ProductImage),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn update_image_order<I: ProductImageRepository>(
    State(service): State<Images<I>>,
    actor: Actor,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateImageOrder>,
) -> Result<Json<ProductImage>, AppError> {
    actor.require_admin()?;
    Ok(Json(service.update_order(id, input.sort_order).await?))
}
