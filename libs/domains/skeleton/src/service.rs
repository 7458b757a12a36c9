use axum_helpers::CallerId;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::config::SkeletonConfig;
use crate::error::{SkeletonError, SkeletonResult};
use crate::models::{CreateItem, Item, ItemList, ListParams, Pagination, UpdateItem};
use crate::repository::ItemRepository;

/// Request orchestration for items: resolves the caller, applies
/// pagination bounds and delegates to the repository.
pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
    config: SkeletonConfig,
}

impl<R: ItemRepository> Clone for ItemService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            config: self.config.clone(),
        }
    }
}

impl<R: ItemRepository> ItemService<R> {
    pub fn new(repository: R, config: SkeletonConfig) -> Self {
        Self {
            repository: Arc::new(repository),
            config,
        }
    }

    pub fn config(&self) -> &SkeletonConfig {
        &self.config
    }

    /// Owner id of the caller. The identity must be a UUID.
    fn resolve_owner(caller: Option<&CallerId>) -> SkeletonResult<Uuid> {
        let caller = caller.ok_or(SkeletonError::Unauthenticated)?;

        Uuid::parse_str(caller.as_str()).map_err(|e| {
            tracing::warn!(user_id = %caller.as_str(), error = %e, "Invalid user ID");
            SkeletonError::Validation("Invalid user ID".to_string())
        })
    }

    pub async fn create_item(
        &self,
        caller: Option<&CallerId>,
        input: CreateItem,
    ) -> SkeletonResult<Item> {
        let user_id = Self::resolve_owner(caller)?;

        input
            .validate()
            .map_err(|e| SkeletonError::Validation(e.to_string()))?;

        let item = Item::new(user_id, input);

        self.repository.create(&item).await?;

        tracing::info!(item_id = %item.id, %user_id, "Item created");
        Ok(item)
    }

    /// Fetch by id. Not owner-scoped: any caller may read any item.
    pub async fn get_item(&self, id: Uuid) -> SkeletonResult<Item> {
        self.repository.get_by_id(id).await
    }

    pub async fn list_items(
        &self,
        caller: Option<&CallerId>,
        params: &ListParams,
    ) -> SkeletonResult<ItemList> {
        let user_id = Self::resolve_owner(caller)?;
        let page = Pagination::resolve(params, self.config.max_items);

        let (items, total) = self
            .repository
            .list(user_id, page.limit, page.offset)
            .await?;

        Ok(ItemList {
            items,
            total,
            limit: page.limit,
            offset: page.offset,
        })
    }

    /// Apply a partial update and return the stored result.
    ///
    /// The re-read is a separate statement: an item deleted in between
    /// surfaces as `NotFound`.
    pub async fn update_item(
        &self,
        caller: Option<&CallerId>,
        id: Uuid,
        input: UpdateItem,
    ) -> SkeletonResult<Item> {
        let user_id = Self::resolve_owner(caller)?;

        if input.is_empty() {
            return Err(SkeletonError::Validation("No fields to update".to_string()));
        }

        input
            .validate()
            .map_err(|e| SkeletonError::Validation(e.to_string()))?;

        self.repository.update(id, user_id, &input).await?;
        let item = self.repository.get_by_id(id).await?;

        tracing::info!(item_id = %id, %user_id, "Item updated");
        Ok(item)
    }

    pub async fn delete_item(&self, caller: Option<&CallerId>, id: Uuid) -> SkeletonResult<()> {
        let user_id = Self::resolve_owner(caller)?;

        self.repository.delete(id, user_id).await?;

        tracing::info!(item_id = %id, %user_id, "Item deleted");
        Ok(())
    }
}
