use async_trait::async_trait;
use uuid::Uuid;

use crate::error::SkeletonResult;
use crate::models::{Item, UpdateItem};

/// Persistence port for items.
///
/// Ownership is enforced here: list, update and delete only ever touch rows
/// whose `user_id` matches the given owner.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Insert a fully populated item
    async fn create(&self, item: &Item) -> SkeletonResult<()>;

    /// Fetch an item regardless of owner. `NotFound` when absent.
    async fn get_by_id(&self, id: Uuid) -> SkeletonResult<Item>;

    /// One page of the owner's items, newest first, plus the owner's total
    async fn list(&self, user_id: Uuid, limit: i64, offset: i64)
    -> SkeletonResult<(Vec<Item>, i64)>;

    /// Apply the set fields of `updates` and stamp `updated_at`.
    /// `NotFoundOrForbidden` when no row matches both id and owner.
    async fn update(&self, id: Uuid, user_id: Uuid, updates: &UpdateItem) -> SkeletonResult<()>;

    /// `NotFoundOrForbidden` when no row matches both id and owner
    async fn delete(&self, id: Uuid, user_id: Uuid) -> SkeletonResult<()>;
}
