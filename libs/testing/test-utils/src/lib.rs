//! Shared test infrastructure for the domain crates
//!
//! - [`TestDatabase`]: migrated in-memory SQLite, or Postgres in a container
//!   with the `postgres` feature
//! - [`TestDataBuilder`]: deterministic names and ids derived from the test name
//! - [`money`] and [`assertions`]: small helpers for readable assertions
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn creates_category() {
//!     let db = TestDatabase::new().await;
//!     let data = TestDataBuilder::from_test_name("creates_category");
//!     let name = data.name("category", "root");
//!     // build a repository from db.connection()
//! }
//! ```

mod database;

pub use database::TestDatabase;

use rust_decimal::Decimal;
use uuid::Uuid;

/// Seeded generator for ids and names, stable per test.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from the test's name so reruns produce the same data.
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// The test's primary user
    pub fn user_id(&self) -> Uuid {
        self.uuid(0)
    }

    /// A second, unrelated user
    pub fn other_user_id(&self) -> Uuid {
        self.uuid(1)
    }

    fn uuid(&self, salt: u64) -> Uuid {
        let mut bytes = [0u8; 16];
        bytes[..8].copy_from_slice(&self.seed.to_le_bytes());
        bytes[8..].copy_from_slice(&(self.seed ^ salt.wrapping_mul(0x9E37_79B9_7F4A_7C15)).to_be_bytes());
        Uuid::from_bytes(bytes)
    }

    /// `test-<prefix>-<seed>-<suffix>`
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }
}

/// Parse a decimal literal such as `"19.98"`.
pub fn money(value: &str) -> Decimal {
    value
        .parse()
        .unwrap_or_else(|e| panic!("invalid money literal {value:?}: {e}"))
}

pub mod assertions {
    use rust_decimal::Decimal;
    use uuid::Uuid;

    pub fn assert_uuid_eq(actual: Uuid, expected: Uuid, context: &str) {
        assert_eq!(
            actual, expected,
            "{}: expected UUID {}, got {}",
            context, expected, actual
        );
    }

    /// Compare amounts at cent precision; SQLite stores decimals as REAL.
    pub fn assert_money_eq(actual: Decimal, expected: Decimal, context: &str) {
        assert_eq!(
            actual.round_dp(2),
            expected.round_dp(2),
            "{}: expected {}, got {}",
            context,
            expected,
            actual
        );
    }

    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_builder_is_deterministic() {
        let a = TestDataBuilder::from_test_name("my_test");
        let b = TestDataBuilder::from_test_name("my_test");

        assert_eq!(a.user_id(), b.user_id());
        assert_eq!(a.name("product", "x"), b.name("product", "x"));
    }

    #[test]
    fn test_users_differ_within_and_across_tests() {
        let a = TestDataBuilder::from_test_name("test1");
        let b = TestDataBuilder::from_test_name("test2");

        assert_ne!(a.user_id(), a.other_user_id());
        assert_ne!(a.user_id(), b.user_id());
    }

    #[test]
    fn test_money_parses_cents() {
        assert_eq!(money("19.98").to_string(), "19.98");
    }
}
