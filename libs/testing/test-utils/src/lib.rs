//! Shared test utilities for the domain crates
//!
//! - `TestDatabase`: disposable Postgres with `skeleton_items` (feature: "postgres")
//! - `TestDataBuilder`: owners and names derived from the test name
//! - `assertions`: assertion helpers with context in the panic message
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let owner = builder.user_id();
//!     let item_name = builder.name("item", "main");
//! }
//! ```

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::{SCHEMA, TestDatabase};

/// Deterministic test data keyed by a seed.
///
/// The same seed always yields the same owners and names, so a failing
/// test can be rerun against identical data.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from the test name. Preferred over [`new`](Self::new).
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_item");
    /// assert_ne!(builder.user_id(), builder.other_user_id());
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Owner of the test's items
    pub fn user_id(&self) -> Uuid {
        uuid_from_seed(self.seed)
    }

    /// A second owner, distinct from [`user_id`](Self::user_id), for
    /// cross-owner access tests.
    pub fn other_user_id(&self) -> Uuid {
        uuid_from_seed(!self.seed)
    }

    /// `test-{prefix}-{seed}-{suffix}`, e.g. `builder.name("item", "main")`.
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }
}

fn uuid_from_seed(seed: u64) -> Uuid {
    let half = seed.to_le_bytes();
    let mut bytes = [0u8; 16];
    bytes[..8].copy_from_slice(&half);
    bytes[8..].copy_from_slice(&half);
    Uuid::from_bytes(bytes)
}

/// Test assertion helpers
pub mod assertions {
    use uuid::Uuid;

    pub fn assert_uuid_eq(actual: Uuid, expected: Uuid, context: &str) {
        assert_eq!(
            actual, expected,
            "{}: expected UUID {}, got {}",
            context, expected, actual
        );
    }

    /// Unwrap `value`, panicking with `context` when it is `None`.
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }
}
