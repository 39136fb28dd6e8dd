use axum::{
    Json, Router,
    extract::{Path, State},
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

use crate::error::OrderResult;
use crate::models::{
    CreateOrder, CreateOrderItem, Order, OrderDetails, OrderItem, OrderItemDetails, OrderReceipt,
    OrderStatus, UpdateOrderStatus,
};
use crate::repository::OrderRepository;
use crate::service::OrderService;

pub const TAG: &str = "Orders";

#[derive(OpenApi)]
#[openapi(
    paths(list_my_orders, get_order, get_by_number, create_order, update_status, delete_order),
    components(
        schemas(
            Order,
            OrderItem,
            OrderItemDetails,
            OrderDetails,
            OrderReceipt,
            OrderStatus,
            CreateOrder,
            CreateOrderItem,
            UpdateOrderStatus
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
    tags((name = TAG, description = "Checkout and order history"))
)]
pub struct ApiDoc;

type SharedService<R> = Arc<OrderService<R>>;

/// Every route needs an authenticated caller.
pub fn router<R: OrderRepository + 'static>(service: OrderService<R>) -> Router {
    Router::new()
        .route("/", get(list_my_orders).post(create_order))
        .route("/number/{order_number}", get(get_by_number))
        .route("/{id}", get(get_order).delete(delete_order))
        .route("/{id}/status", put(update_status))
        .with_state(Arc::new(service))
}

/// The caller's orders, newest first
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Orders with items", body = Vec<OrderDetails>),
        (status = 401, response = UnauthorizedResponse)
    )
)]
async fn list_my_orders<R: OrderRepository>(
    State(service): State<SharedService<R>>,
    actor: Actor,
) -> OrderResult<Json<Vec<OrderDetails>>> {
    Ok(Json(service.list_mine(actor).await?))
}

/// One order; owners and admins only
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order found", body = OrderDetails),
        (status = 400, response = BadRequestUuidResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_order<R: OrderRepository>(
    State(service): State<SharedService<R>>,
    actor: Actor,
    UuidPath(id): UuidPath,
) -> OrderResult<Json<OrderDetails>> {
    Ok(Json(service.get(actor, id).await?))
}

/// Full receipt by order number; owners and admins only
#[utoipa::path(
    get,
    path = "/number/{order_number}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(("order_number" = String, Path, description = "Order number, e.g. ORD-20260101-1A2B3C4D")),
    responses(
        (status = 200, description = "Receipt", body = OrderReceipt),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_by_number<R: OrderRepository>(
    State(service): State<SharedService<R>>,
    actor: Actor,
    Path(order_number): Path<String>,
) -> OrderResult<Json<OrderReceipt>> {
    Ok(Json(service.get_by_number(actor, &order_number).await?))
}

/// Place an order
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    security(("bearer_auth" = [])),
    request_body = CreateOrder,
    responses(
        (status = 201, description = "Order placed", body = OrderDetails),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_order<R: OrderRepository>(
    State(service): State<SharedService<R>>,
    actor: Actor,
    ValidatedJson(input): ValidatedJson<CreateOrder>,
) -> OrderResult<impl IntoResponse> {
    let order = service.create(actor, input).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// Change the status (admin)
#[utoipa::path(
    put,
    path = "/{id}/status",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Order ID")),
    request_body = UpdateOrderStatus,
    responses(
        (status = 200, description = "Status updated", body = Order),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn update_status<R: OrderRepository>(
    State(service): State<SharedService<R>>,
    actor: Actor,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateOrderStatus>,
) -> OrderResult<Json<Order>> {
    Ok(Json(service.update_status(actor, id, input.status).await?))
}

/// Soft-delete an order (admin)
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn delete_order<R: OrderRepository>(
    State(service): State<SharedService<R>>,
    actor: Actor,
    UuidPath(id): UuidPath,
) -> OrderResult<StatusCode> {
    service.delete(actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
