use chrono::{DateTime, Utc};
use domain_catalog::ProductDetails;
use domain_users::UserResponse;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::error::{OrderError, OrderResult};

/// Amounts are stored as `decimal(18, 2)`.
pub const AMOUNT_SCALE: u32 = 2;

/// Upper bound on a single line's quantity
pub const MAX_QUANTITY: i32 = 10_000;

/// Largest value a `decimal(18, 2)` column holds: 9999999999999999.99
pub fn max_amount() -> Decimal {
    Decimal::new(999_999_999_999_999_999, AMOUNT_SCALE)
}

fn storable_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.normalize().scale() > AMOUNT_SCALE {
        Err(ValidationError::new("amount_has_more_than_two_decimals"))
    } else if *amount > max_amount() {
        Err(ValidationError::new("amount_too_large"))
    } else {
        Ok(())
    }
}

fn positive_amount(amount: &Decimal) -> Result<(), ValidationError> {
    storable_amount(amount)?;
    if *amount > Decimal::ZERO {
        Ok(())
    } else {
        Err(ValidationError::new("amount_must_be_positive"))
    }
}

fn non_negative_amount(amount: &Decimal) -> Result<(), ValidationError> {
    storable_amount(amount)?;
    if amount.is_sign_negative() && !amount.is_zero() {
        Err(ValidationError::new("amount_must_not_be_negative"))
    } else {
        Ok(())
    }
}

/// Lifecycle of an order. Any status may follow any other.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    ToSchema,
)]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Card payments are captured at checkout
    pub fn for_payment_method(method: Option<&str>) -> Self {
        match method {
            Some(m) if m.trim().eq_ignore_ascii_case("card") => Self::Paid,
            _ => Self::Pending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    /// `ORD-<yyyyMMdd>-<8 hex>`
    pub order_number: String,
    pub sub_total: Decimal,
    pub shipping_cost: Decimal,
    pub total: Decimal,
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub shipped_date: Option<DateTime<Utc>>,
    pub delivered_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct OrderItemDetails {
    #[serde(flatten)]
    pub item: OrderItem,
    /// `None` once the product has been deleted
    pub product: Option<ProductDetails>,
}

/// An order with its line items and their products
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct OrderDetails {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItemDetails>,
}

/// Everything needed to render a receipt
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderReceipt {
    #[serde(flatten)]
    pub details: OrderDetails,
    pub customer: Option<UserResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateOrderItem {
    pub product_id: Uuid,
    #[validate(range(min = 1, max = MAX_QUANTITY))]
    pub quantity: i32,
    #[validate(custom(function = "positive_amount"))]
    pub unit_price: Decimal,
}

/// Checkout request. Amounts are taken as sent.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateOrder {
    #[validate(custom(function = "non_negative_amount"))]
    pub sub_total: Decimal,
    #[validate(custom(function = "non_negative_amount"))]
    pub shipping_cost: Decimal,
    #[validate(custom(function = "non_negative_amount"))]
    pub total: Decimal,
    pub notes: Option<String>,
    /// `card` marks the order as paid
    pub payment_method: Option<String>,
    #[validate(length(min = 1), nested)]
    pub items: Vec<CreateOrderItem>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateOrderStatus {
    pub status: OrderStatus,
}

/// Order header as written by the repository
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub user_id: Uuid,
    pub order_number: String,
    pub sub_total: Decimal,
    pub shipping_cost: Decimal,
    pub total: Decimal,
    pub status: OrderStatus,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

/// Computes `total_price = unit_price × quantity`, rejecting lines whose
/// price or total would not be stored exactly.
impl TryFrom<CreateOrderItem> for NewOrderItem {
    type Error = OrderError;

    fn try_from(item: CreateOrderItem) -> OrderResult<Self> {
        let invalid = |reason: &str| {
            OrderError::Validation(format!("Item for product {}: {}", item.product_id, reason))
        };

        if !(1..=MAX_QUANTITY).contains(&item.quantity) {
            return Err(invalid("quantity out of range"));
        }
        if positive_amount(&item.unit_price).is_err() {
            return Err(invalid("unit price must be positive with at most two decimals"));
        }

        let total_price = item
            .unit_price
            .checked_mul(Decimal::from(item.quantity))
            .filter(|total| *total <= max_amount())
            .ok_or_else(|| invalid("line total out of range"))?;

        Ok(Self {
            product_id: item.product_id,
            quantity: item.quantity,
            unit_price: item.unit_price,
            total_price,
        })
    }
}

/// New status plus the full set of delivery dates to store with it
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    pub status: OrderStatus,
    pub shipped_date: Option<DateTime<Utc>>,
    pub delivered_date: Option<DateTime<Utc>>,
}

impl StatusChange {
    /// Shipped and Delivered stamp their date with `now`; other dates carry over.
    pub fn apply(order: &Order, status: OrderStatus, now: DateTime<Utc>) -> Self {
        Self {
            status,
            shipped_date: match status {
                OrderStatus::Shipped => Some(now),
                _ => order.shipped_date,
            },
            delivered_date: match status {
                OrderStatus::Delivered => Some(now),
                _ => order.delivered_date,
            },
        }
    }
}
