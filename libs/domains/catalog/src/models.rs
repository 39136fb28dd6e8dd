use chrono::{DateTime, Utc};
use domain_uploads::Upload;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Prices are stored as `decimal(18, 2)`.
fn storable_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.normalize().scale() > 2 {
        Err(ValidationError::new("price_has_more_than_two_decimals"))
    } else if *price > Decimal::new(999_999_999_999_999_999, 2) {
        Err(ValidationError::new("price_too_large"))
    } else {
        Ok(())
    }
}

fn positive_price(price: &Decimal) -> Result<(), ValidationError> {
    storable_price(price)?;
    if *price > Decimal::ZERO {
        Ok(())
    } else {
        Err(ValidationError::new("price_must_be_positive"))
    }
}

fn non_negative_price(price: &Decimal) -> Result<(), ValidationError> {
    storable_price(price)?;
    if price.is_sign_negative() && !price.is_zero() {
        Err(ValidationError::new("price_must_not_be_negative"))
    } else {
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

// ============================================================================
// Categories
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Absent for root categories
    pub parent_id: Option<Uuid>,
    /// Sibling sort key, ascending
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body for creating a category, and for replacing one on update
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CategoryInput {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<Uuid>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

// ============================================================================
// Products
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    pub stock_quantity: i32,
    pub sku: Option<String>,
    pub category_id: Uuid,
    pub is_active: bool,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body for creating a product, and for replacing one on update
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ProductInput {
    #[validate(length(min = 1, max = 500))]
    pub name: String,
    pub description: Option<String>,
    #[validate(custom(function = "positive_price"))]
    pub price: Decimal,
    #[validate(custom(function = "non_negative_price"))]
    pub discount_price: Option<Decimal>,
    #[validate(range(min = 0))]
    pub stock_quantity: i32,
    #[validate(length(max = 100))]
    pub sku: Option<String>,
    pub category_id: Uuid,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_featured: bool,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Matched against name, description and SKU, ignoring case
    pub q: Option<String>,
}

/// A product with its category and ordered images, for listings and detail pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductDetails {
    #[serde(flatten)]
    pub product: Product,
    /// `None` when the category has been deleted
    pub category: Option<Category>,
    pub images: Vec<ProductImageDetails>,
}

// ============================================================================
// Product images
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductImage {
    pub id: Uuid,
    pub product_id: Uuid,
    pub upload_id: Uuid,
    pub sort_order: i32,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductImageDetails {
    #[serde(flatten)]
    pub image: ProductImage,
    /// `None` when the upload has been deleted
    pub upload: Option<Upload>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AddProductImage {
    pub upload_id: Uuid,
    pub sort_order: Option<i32>,
    pub is_primary: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateImageOrder {
    pub sort_order: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn product(price: &str, discount: Option<&str>) -> ProductInput {
        ProductInput {
            name: "Linen shirt".into(),
            description: None,
            price: Decimal::from_str(price).unwrap(),
            discount_price: discount.map(|d| Decimal::from_str(d).unwrap()),
            stock_quantity: 3,
            sku: None,
            category_id: Uuid::now_v7(),
            is_active: true,
            is_featured: false,
        }
    }

    #[test]
    fn test_price_rules() {
        assert!(product("0.01", None).validate().is_ok());
        assert!(product("0", None).validate().is_err());
        assert!(product("-5", None).validate().is_err());
        assert!(product("10", Some("0")).validate().is_ok());
        assert!(product("10", Some("-1")).validate().is_err());
        assert!(product("9.995", None).validate().is_err());
        assert!(product("9.990", None).validate().is_ok());
        assert!(product("10", Some("4.999")).validate().is_err());
        assert!(product("10000000000000000", None).validate().is_err());
    }

    #[test]
    fn test_input_defaults() {
        let input: ProductInput = serde_json::from_value(serde_json::json!({
            "name": "Boots",
            "price": "59.90",
            "stock_quantity": 1,
            "category_id": Uuid::nil(),
        }))
        .unwrap();
        assert!(input.is_active);
        assert!(!input.is_featured);

        let category: CategoryInput =
            serde_json::from_value(serde_json::json!({ "name": "Shoes" })).unwrap();
        assert!(category.is_active);
        assert_eq!(category.sort_order, 0);
    }
}
