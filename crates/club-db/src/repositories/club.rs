//! PostgreSQL implementation of ClubRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use club_core::entities::{Club, ClubMember};
use club_core::traits::{ClubFilter, ClubRepository, RepoResult};
use club_core::value_objects::Snowflake;

use crate::models::ClubModel;

use super::club_member::insert_club_member;
use super::error::{club_not_found, map_db_error};

/// PostgreSQL implementation of ClubRepository
#[derive(Clone)]
pub struct PgClubRepository {
    pool: PgPool,
}

impl PgClubRepository {
    /// Create a new PgClubRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Escape LIKE wildcards in user input
fn like_pattern(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[async_trait]
impl ClubRepository for PgClubRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Club>> {
        let result = sqlx::query_as::<_, ClubModel>(
            r"
            SELECT id, name, bio, category, main_spot, capacity, is_public, recruiting, leader_id,
                   is_active, start_date, end_date, event_type, created_at, updated_at
            FROM clubs
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Club::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_active_by_leader(&self, leader_id: Snowflake) -> RepoResult<Vec<Club>> {
        let results = sqlx::query_as::<_, ClubModel>(
            r"
            SELECT id, name, bio, category, main_spot, capacity, is_public, recruiting, leader_id,
                   is_active, start_date, end_date, event_type, created_at, updated_at
            FROM clubs
            WHERE leader_id = $1 AND is_active
            ORDER BY id DESC
            ",
        )
        .bind(leader_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Club::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn find_public(&self, filter: &ClubFilter) -> RepoResult<Vec<Club>> {
        let limit = filter.limit.clamp(1, 100);
        let offset = filter.offset.max(0);

        let results = sqlx::query_as::<_, ClubModel>(
            r"
            SELECT id, name, bio, category, main_spot, capacity, is_public, recruiting, leader_id,
                   is_active, start_date, end_date, event_type, created_at, updated_at
            FROM clubs
            WHERE is_active AND is_public
              AND ($1::TEXT IS NULL OR name ILIKE $1)
              AND ($2::TEXT IS NULL OR main_spot ILIKE $2)
              AND ($3::TEXT IS NULL OR category = $3)
              AND ($4::TEXT IS NULL OR event_type = $4)
            ORDER BY id DESC
            LIMIT $5 OFFSET $6
            ",
        )
        .bind(filter.name.as_deref().map(like_pattern))
        .bind(filter.main_spot.as_deref().map(like_pattern))
        .bind(filter.category.map(|c| c.as_str()))
        .bind(filter.event_type.map(|e| e.as_str()))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Club::try_from).collect()
    }

    #[instrument(skip(self, club, members), fields(club_id = %club.id, initial_members = members.len()))]
    async fn create(&self, club: &Club, members: &[ClubMember]) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO clubs (id, name, bio, category, main_spot, capacity, is_public, recruiting,
                               leader_id, is_active, start_date, end_date, event_type, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            ",
        )
        .bind(club.id.into_inner())
        .bind(&club.name)
        .bind(&club.bio)
        .bind(club.category.as_str())
        .bind(&club.main_spot)
        .bind(club.capacity)
        .bind(club.is_public)
        .bind(club.recruiting)
        .bind(club.leader_id.into_inner())
        .bind(club.is_active)
        .bind(club.start_date)
        .bind(club.end_date)
        .bind(club.event_type.as_str())
        .bind(club.created_at)
        .bind(club.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        for member in members {
            insert_club_member(&mut tx, member).await?;
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self, club), fields(club_id = %club.id))]
    async fn update(&self, club: &Club) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE clubs
            SET name = $2, bio = $3, category = $4, main_spot = $5, capacity = $6, is_public = $7,
                recruiting = $8, is_active = $9, start_date = $10, end_date = $11, event_type = $12,
                updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(club.id.into_inner())
        .bind(&club.name)
        .bind(&club.bio)
        .bind(club.category.as_str())
        .bind(&club.main_spot)
        .bind(club.capacity)
        .bind(club.is_public)
        .bind(club.recruiting)
        .bind(club.is_active)
        .bind(club.start_date)
        .bind(club.end_date)
        .bind(club.event_type.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(club_not_found(club.id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgClubRepository>();
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("run"), "%run%");
        assert_eq!(like_pattern("100%_fun"), "%100\\%\\_fun%");
    }
}
