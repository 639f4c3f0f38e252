//! PostgreSQL implementation of ClubLinkRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use club_core::entities::ClubLink;
use club_core::error::DomainError;
use club_core::traits::{ClubLinkRepository, RepoResult};
use club_core::value_objects::Snowflake;

use crate::models::ClubLinkModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of ClubLinkRepository
#[derive(Clone)]
pub struct PgClubLinkRepository {
    pool: PgPool,
}

impl PgClubLinkRepository {
    /// Create a new PgClubLinkRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClubLinkRepository for PgClubLinkRepository {
    #[instrument(skip(self, code))]
    async fn find_by_code(&self, code: &str) -> RepoResult<Option<ClubLink>> {
        let result = sqlx::query_as::<_, ClubLinkModel>(
            r"
            SELECT id, club_id, code, created_at, expires_at
            FROM club_links
            WHERE code = $1
            ",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ClubLink::from))
    }

    #[instrument(skip(self))]
    async fn find_valid_by_club(
        &self,
        club_id: Snowflake,
        now: DateTime<Utc>,
    ) -> RepoResult<Option<ClubLink>> {
        let result = sqlx::query_as::<_, ClubLinkModel>(
            r"
            SELECT id, club_id, code, created_at, expires_at
            FROM club_links
            WHERE club_id = $1 AND expires_at > $2
            ORDER BY expires_at DESC
            LIMIT 1
            ",
        )
        .bind(club_id.into_inner())
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ClubLink::from))
    }

    #[instrument(skip(self, link), fields(club_id = %link.club_id))]
    async fn create(&self, link: &ClubLink) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO club_links (id, club_id, code, created_at, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(link.id.into_inner())
        .bind(link.club_id.into_inner())
        .bind(&link.code)
        .bind(link.created_at)
        .bind(link.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || DomainError::InternalError("invite code collision".to_string()))
        })?;

        Ok(())
    }
}
