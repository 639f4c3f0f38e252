//! PostgreSQL implementation of PresetRepository
//!
//! Items live in `preset_items`; writes that touch both tables run in one
//! transaction.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use club_core::entities::{Preset, PresetItem};
use club_core::traits::{PresetRepository, RepoResult};
use club_core::value_objects::Snowflake;

use crate::mappers::assemble_presets;
use crate::models::{PresetItemModel, PresetModel};

use super::error::{map_db_error, preset_not_found};

/// PostgreSQL implementation of PresetRepository
#[derive(Clone)]
pub struct PgPresetRepository {
    pool: PgPool,
}

impl PgPresetRepository {
    /// Create a new PgPresetRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load the items of the given preset rows
    async fn load(&self, models: Vec<PresetModel>) -> RepoResult<Vec<Preset>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = models.iter().map(|m| m.id).collect();

        let items = sqlx::query_as::<_, PresetItemModel>(
            r"
            SELECT id, preset_id, content, category, sequence
            FROM preset_items
            WHERE preset_id = ANY($1)
            ORDER BY sequence, id
            ",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        assemble_presets(models, items)
    }
}

async fn insert_items(
    tx: &mut Transaction<'_, Postgres>,
    preset_id: Snowflake,
    items: &[PresetItem],
) -> RepoResult<()> {
    for item in items {
        sqlx::query(
            r"
            INSERT INTO preset_items (id, preset_id, content, category, sequence)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(item.id.into_inner())
        .bind(preset_id.into_inner())
        .bind(&item.content)
        .bind(item.category.as_str())
        .bind(item.sequence)
        .execute(&mut **tx)
        .await
        .map_err(map_db_error)?;
    }
    Ok(())
}

#[async_trait]
impl PresetRepository for PgPresetRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Preset>> {
        let result = sqlx::query_as::<_, PresetModel>(
            r"
            SELECT id, owner_id, name, created_at, updated_at
            FROM presets
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match result {
            Some(model) => Ok(self.load(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn find_by_owner(&self, owner_id: Snowflake) -> RepoResult<Vec<Preset>> {
        let models = sqlx::query_as::<_, PresetModel>(
            r"
            SELECT id, owner_id, name, created_at, updated_at
            FROM presets
            WHERE owner_id = $1
            ORDER BY created_at, id
            ",
        )
        .bind(owner_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        self.load(models).await
    }

    #[instrument(skip(self, preset), fields(preset_id = %preset.id, owner_id = %preset.owner_id, items = preset.items.len()))]
    async fn create(&self, preset: &Preset) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO presets (id, owner_id, name, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(preset.id.into_inner())
        .bind(preset.owner_id.into_inner())
        .bind(&preset.name)
        .bind(preset.created_at)
        .bind(preset.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        insert_items(&mut tx, preset.id, &preset.items).await?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self, preset), fields(preset_id = %preset.id, items = preset.items.len()))]
    async fn update(&self, preset: &Preset) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result = sqlx::query(r"UPDATE presets SET name = $2, updated_at = $3 WHERE id = $1")
            .bind(preset.id.into_inner())
            .bind(&preset.name)
            .bind(preset.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(preset_not_found(preset.id));
        }

        sqlx::query(r"DELETE FROM preset_items WHERE preset_id = $1")
            .bind(preset.id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        insert_items(&mut tx, preset.id, &preset.items).await?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(r"DELETE FROM presets WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(preset_not_found(id));
        }

        Ok(())
    }
}
