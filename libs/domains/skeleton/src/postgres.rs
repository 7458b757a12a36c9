use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, FromQueryResult, Statement};
use uuid::Uuid;

use crate::{
    error::{SkeletonError, SkeletonResult},
    models::{Item, UpdateItem},
    repository::ItemRepository,
};

const ITEM_COLUMNS: &str = "id, name, description, user_id, active, created_at, updated_at";

/// Sparse update: NULL parameters keep the stored value.
const UPDATE_SQL: &str = "UPDATE skeleton_items \
    SET name = COALESCE($1, name), \
        description = COALESCE($2, description), \
        active = COALESCE($3, active), \
        updated_at = NOW() \
    WHERE id = $4 AND user_id = $5";

/// PostgreSQL implementation of [`ItemRepository`] over the
/// `skeleton_items` table. Every statement is parameterized.
#[derive(Clone)]
pub struct PgItemRepository {
    db: DatabaseConnection,
}

impl PgItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct ItemRow {
    id: Uuid,
    name: String,
    description: String,
    user_id: Uuid,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            user_id: row.user_id,
            active: row.active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct CountRow {
    total: i64,
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn create(&self, item: &Item) -> SkeletonResult<()> {
        let sql = r#"
            INSERT INTO skeleton_items (id, name, description, user_id, active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
        "#;

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                item.id.into(),
                item.name.as_str().into(),
                item.description.as_str().into(),
                item.user_id.into(),
                item.active.into(),
                item.created_at.into(),
            ],
        );

        self.db
            .execute_raw(stmt)
            .await
            .map_err(|e| SkeletonError::persistence("failed to create item", e))?;

        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> SkeletonResult<Item> {
        let sql = format!("SELECT {ITEM_COLUMNS} FROM skeleton_items WHERE id = $1");

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [id.into()]);

        ItemRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(|e| SkeletonError::persistence("failed to get item", e))?
            .map(Into::into)
            .ok_or(SkeletonError::NotFound(id))
    }

    async fn list(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> SkeletonResult<(Vec<Item>, i64)> {
        let count_stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT COUNT(*) AS total FROM skeleton_items WHERE user_id = $1",
            [user_id.into()],
        );

        let total = CountRow::find_by_statement(count_stmt)
            .one(&self.db)
            .await
            .map_err(|e| SkeletonError::persistence("failed to count items", e))?
            .map(|row| row.total)
            .unwrap_or(0);

        let sql = format!(
            "SELECT {ITEM_COLUMNS} FROM skeleton_items WHERE user_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        );

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [user_id.into(), limit.into(), offset.into()],
        );

        let rows = ItemRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(|e| SkeletonError::persistence("failed to list items", e))?;

        Ok((rows.into_iter().map(Into::into).collect(), total))
    }

    async fn update(&self, id: Uuid, user_id: Uuid, updates: &UpdateItem) -> SkeletonResult<()> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            UPDATE_SQL,
            [
                updates.name.as_deref().into(),
                updates.description.as_deref().into(),
                updates.active.into(),
                id.into(),
                user_id.into(),
            ],
        );

        let result = self
            .db
            .execute_raw(stmt)
            .await
            .map_err(|e| SkeletonError::persistence("failed to update item", e))?;

        if result.rows_affected() == 0 {
            return Err(SkeletonError::NotFoundOrForbidden);
        }

        Ok(())
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> SkeletonResult<()> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "DELETE FROM skeleton_items WHERE id = $1 AND user_id = $2",
            [id.into(), user_id.into()],
        );

        let result = self
            .db
            .execute_raw(stmt)
            .await
            .map_err(|e| SkeletonError::persistence("failed to delete item", e))?;

        if result.rows_affected() == 0 {
            return Err(SkeletonError::NotFoundOrForbidden);
        }

        Ok(())
    }
}
