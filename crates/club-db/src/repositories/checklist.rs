//! PostgreSQL implementation of CheckListRepository
//!
//! A checklist is stored across three tables (`checklists`,
//! `checklist_items`, `item_assigns`). Writes touching more than one of them
//! run in a single transaction.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use club_core::entities::{CheckList, CheckListItem};
use club_core::error::DomainError;
use club_core::traits::{CheckListRepository, RepoResult};
use club_core::value_objects::Snowflake;

use crate::mappers::assemble_checklist;
use crate::models::{CheckListItemModel, CheckListModel, ItemAssignModel};

use super::error::{checklist_not_found, map_constraint_violation, map_db_error};

const SCHEDULE_KEY: &str = "checklists_schedule_id_key";
const ASSIGN_KEY: &str = "item_assigns_item_member_key";

/// PostgreSQL implementation of CheckListRepository
#[derive(Clone)]
pub struct PgCheckListRepository {
    pool: PgPool,
}

impl PgCheckListRepository {
    /// Create a new PgCheckListRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load items and assignments for a checklist row
    async fn load(&self, model: CheckListModel) -> RepoResult<CheckList> {
        let items = sqlx::query_as::<_, CheckListItemModel>(
            r"
            SELECT id, checklist_id, content, category, sequence, is_checked
            FROM checklist_items
            WHERE checklist_id = $1
            ORDER BY sequence, id
            ",
        )
        .bind(model.id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let assigns = sqlx::query_as::<_, ItemAssignModel>(
            r"
            SELECT a.id, a.item_id, a.club_member_id, a.is_checked
            FROM item_assigns a
            JOIN checklist_items i ON i.id = a.item_id
            WHERE i.checklist_id = $1
            ORDER BY a.id
            ",
        )
        .bind(model.id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        assemble_checklist(model, items, assigns)
    }
}

/// Insert items with their assignments inside an open transaction
async fn insert_items(
    tx: &mut Transaction<'_, Postgres>,
    checklist_id: Snowflake,
    items: &[CheckListItem],
) -> RepoResult<()> {
    for item in items {
        sqlx::query(
            r"
            INSERT INTO checklist_items (id, checklist_id, content, category, sequence, is_checked)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(item.id.into_inner())
        .bind(checklist_id.into_inner())
        .bind(&item.content)
        .bind(item.category.as_str())
        .bind(item.sequence)
        .bind(item.is_checked)
        .execute(&mut **tx)
        .await
        .map_err(map_db_error)?;

        for assign in &item.assigns {
            sqlx::query(
                r"
                INSERT INTO item_assigns (id, item_id, club_member_id, is_checked)
                VALUES ($1, $2, $3, $4)
                ",
            )
            .bind(assign.id.into_inner())
            .bind(item.id.into_inner())
            .bind(assign.club_member_id.into_inner())
            .bind(assign.is_checked)
            .execute(&mut **tx)
            .await
            .map_err(|e| {
                map_constraint_violation(e, ASSIGN_KEY, || {
                    DomainError::DuplicateAssignee(assign.club_member_id)
                })
            })?;
        }
    }
    Ok(())
}

#[async_trait]
impl CheckListRepository for PgCheckListRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<CheckList>> {
        let result = sqlx::query_as::<_, CheckListModel>(
            r"
            SELECT id, schedule_id, is_active, created_at, updated_at
            FROM checklists
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match result {
            Some(model) => self.load(model).await.map(Some),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn find_by_schedule(&self, schedule_id: Snowflake) -> RepoResult<Option<CheckList>> {
        let result = sqlx::query_as::<_, CheckListModel>(
            r"
            SELECT id, schedule_id, is_active, created_at, updated_at
            FROM checklists
            WHERE schedule_id = $1
            ",
        )
        .bind(schedule_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match result {
            Some(model) => self.load(model).await.map(Some),
            None => Ok(None),
        }
    }

    #[instrument(skip(self, checklist), fields(checklist_id = %checklist.id, schedule_id = %checklist.schedule_id, items = checklist.items.len()))]
    async fn create(&self, checklist: &CheckList) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO checklists (id, schedule_id, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(checklist.id.into_inner())
        .bind(checklist.schedule_id.into_inner())
        .bind(checklist.is_active)
        .bind(checklist.created_at)
        .bind(checklist.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_constraint_violation(e, SCHEDULE_KEY, || DomainError::CheckListAlreadyExists))?;

        insert_items(&mut tx, checklist.id, &checklist.items).await?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self, items), fields(items = items.len()))]
    async fn replace_items(&self, checklist_id: Snowflake, items: &[CheckListItem]) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result = sqlx::query(r"UPDATE checklists SET updated_at = NOW() WHERE id = $1")
            .bind(checklist_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(checklist_not_found(checklist_id));
        }

        // assignments cascade with their items
        sqlx::query(r"DELETE FROM checklist_items WHERE checklist_id = $1")
            .bind(checklist_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        insert_items(&mut tx, checklist_id, items).await?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(r"DELETE FROM checklists WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(checklist_not_found(id));
        }

        Ok(())
    }
}
