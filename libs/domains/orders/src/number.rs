use chrono::{DateTime, Utc};
use uuid::Uuid;

/// `ORD-<yyyyMMdd>-<8 uppercase hex>`, dated in UTC.
///
/// Uniqueness is left to the random suffix and the unique index on
/// `orders.order_number`.
pub fn generate_order_number(now: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string()[..8].to_uppercase();
    format!("ORD-{}-{}", now.format("%Y%m%d"), suffix)
}
