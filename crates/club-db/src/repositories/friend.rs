//! PostgreSQL implementation of FriendRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use club_core::entities::Friend;
use club_core::error::DomainError;
use club_core::traits::{FriendRepository, RepoResult};
use club_core::value_objects::Snowflake;

use crate::models::FriendModel;

use super::error::{friend_not_found, map_db_error, map_unique_violation};

/// PostgreSQL implementation of FriendRepository
#[derive(Clone)]
pub struct PgFriendRepository {
    pool: PgPool,
}

impl PgFriendRepository {
    /// Create a new PgFriendRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FriendRepository for PgFriendRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Friend>> {
        let result = sqlx::query_as::<_, FriendModel>(
            r"
            SELECT id, member_low_id, member_high_id, requested_by, status, created_at, updated_at
            FROM friends
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Friend::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_pair(&self, low: Snowflake, high: Snowflake) -> RepoResult<Option<Friend>> {
        let result = sqlx::query_as::<_, FriendModel>(
            r"
            SELECT id, member_low_id, member_high_id, requested_by, status, created_at, updated_at
            FROM friends
            WHERE member_low_id = $1 AND member_high_id = $2
            ",
        )
        .bind(low.into_inner())
        .bind(high.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Friend::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_member(&self, member_id: Snowflake) -> RepoResult<Vec<Friend>> {
        let results = sqlx::query_as::<_, FriendModel>(
            r"
            SELECT id, member_low_id, member_high_id, requested_by, status, created_at, updated_at
            FROM friends
            WHERE member_low_id = $1 OR member_high_id = $1
            ",
        )
        .bind(member_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Friend::try_from).collect()
    }

    #[instrument(skip(self, friend), fields(friend_id = %friend.id))]
    async fn create(&self, friend: &Friend) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO friends (id, member_low_id, member_high_id, requested_by, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(friend.id.into_inner())
        .bind(friend.member_low_id.into_inner())
        .bind(friend.member_high_id.into_inner())
        .bind(friend.requested_by.into_inner())
        .bind(friend.status.as_str())
        .bind(friend.created_at)
        .bind(friend.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::FriendRequestAlreadySent))?;

        Ok(())
    }

    #[instrument(skip(self, friend), fields(friend_id = %friend.id))]
    async fn update(&self, friend: &Friend) -> RepoResult<()> {
        let result = sqlx::query(
            r"UPDATE friends SET status = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(friend.id.into_inner())
        .bind(friend.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(friend_not_found(friend.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(r"DELETE FROM friends WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(friend_not_found(id));
        }

        Ok(())
    }
}
