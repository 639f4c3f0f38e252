//! PostgreSQL implementation of ClubMemberRepository

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{instrument, warn};

use club_core::entities::ClubMember;
use club_core::error::DomainError;
use club_core::traits::{ClubMemberRepository, RepoResult};
use club_core::value_objects::{MemberState, Snowflake};

use crate::models::ClubMemberModel;

use super::error::{club_member_not_found, club_not_found, map_db_error, map_unique_violation};

/// PostgreSQL implementation of ClubMemberRepository
#[derive(Clone)]
pub struct PgClubMemberRepository {
    pool: PgPool,
}

impl PgClubMemberRepository {
    /// Create a new PgClubMemberRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Insert a membership row inside an open transaction
pub(super) async fn insert_club_member(
    tx: &mut Transaction<'_, Postgres>,
    member: &ClubMember,
) -> RepoResult<()> {
    sqlx::query(
        r"
        INSERT INTO club_members (id, club_id, member_id, role, state, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ",
    )
    .bind(member.id.into_inner())
    .bind(member.club_id.into_inner())
    .bind(member.member_id.into_inner())
    .bind(member.role.as_str())
    .bind(member.state.as_str())
    .bind(member.created_at)
    .bind(member.updated_at)
    .execute(&mut **tx)
    .await
    .map_err(|e| map_unique_violation(e, || DomainError::AlreadyInvited))?;

    Ok(())
}

fn into_rows(models: Vec<ClubMemberModel>) -> RepoResult<Vec<ClubMember>> {
    models.into_iter().map(ClubMember::try_from).collect()
}

#[async_trait]
impl ClubMemberRepository for PgClubMemberRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<ClubMember>> {
        let result = sqlx::query_as::<_, ClubMemberModel>(
            r"
            SELECT id, club_id, member_id, role, state, created_at, updated_at
            FROM club_members
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(ClubMember::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find(&self, club_id: Snowflake, member_id: Snowflake) -> RepoResult<Option<ClubMember>> {
        let result = sqlx::query_as::<_, ClubMemberModel>(
            r"
            SELECT id, club_id, member_id, role, state, created_at, updated_at
            FROM club_members
            WHERE club_id = $1 AND member_id = $2
            ",
        )
        .bind(club_id.into_inner())
        .bind(member_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(ClubMember::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_club(&self, club_id: Snowflake) -> RepoResult<Vec<ClubMember>> {
        let results = sqlx::query_as::<_, ClubMemberModel>(
            r"
            SELECT id, club_id, member_id, role, state, created_at, updated_at
            FROM club_members
            WHERE club_id = $1
            ORDER BY id
            ",
        )
        .bind(club_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_rows(results)
    }

    #[instrument(skip(self))]
    async fn find_by_member(&self, member_id: Snowflake) -> RepoResult<Vec<ClubMember>> {
        let results = sqlx::query_as::<_, ClubMemberModel>(
            r"
            SELECT id, club_id, member_id, role, state, created_at, updated_at
            FROM club_members
            WHERE member_id = $1
            ORDER BY id DESC
            ",
        )
        .bind(member_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_rows(results)
    }

    #[instrument(skip(self))]
    async fn count_joining(&self, club_id: Snowflake) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r"SELECT COUNT(*) FROM club_members WHERE club_id = $1 AND state = $2",
        )
        .bind(club_id.into_inner())
        .bind(MemberState::Joining.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, member), fields(club_id = %member.club_id, member_id = %member.member_id))]
    async fn create(&self, member: &ClubMember) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        insert_club_member(&mut tx, member).await?;
        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self, member), fields(club_member_id = %member.id))]
    async fn update(&self, member: &ClubMember) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE club_members
            SET role = $2, state = $3, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(member.id.into_inner())
        .bind(member.role.as_str())
        .bind(member.state.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(club_member_not_found());
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(r"DELETE FROM club_members WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(club_member_not_found());
        }

        Ok(())
    }

    #[instrument(skip(self, reinvited, created), fields(reinvited = reinvited.len(), created = created.len()))]
    async fn add_within_capacity(
        &self,
        club_id: Snowflake,
        reinvited: &[ClubMember],
        created: &[ClubMember],
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // serializes concurrent batches for the same club
        let capacity = sqlx::query_scalar::<_, i32>(r"SELECT capacity FROM clubs WHERE id = $1 FOR UPDATE")
            .bind(club_id.into_inner())
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| club_not_found(club_id))?;

        let joining = sqlx::query_scalar::<_, i64>(
            r"SELECT COUNT(*) FROM club_members WHERE club_id = $1 AND state = $2",
        )
        .bind(club_id.into_inner())
        .bind(MemberState::Joining.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if joining + created.len() as i64 > i64::from(capacity) {
            warn!(%club_id, joining, capacity, incoming = created.len(), "Capacity check rejected batch");
            return Err(DomainError::CapacityExceeded { capacity });
        }

        for row in reinvited {
            let result = sqlx::query(
                r"
                UPDATE club_members
                SET role = $2, state = $3, updated_at = NOW()
                WHERE id = $1 AND club_id = $4
                ",
            )
            .bind(row.id.into_inner())
            .bind(row.role.as_str())
            .bind(row.state.as_str())
            .bind(club_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

            if result.rows_affected() == 0 {
                return Err(club_member_not_found());
            }
        }

        for row in created {
            insert_club_member(&mut tx, row).await?;
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn join_within_capacity(
        &self,
        club_id: Snowflake,
        row_id: Snowflake,
        from: MemberState,
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // same lock as add_within_capacity
        let capacity = sqlx::query_scalar::<_, i32>(r"SELECT capacity FROM clubs WHERE id = $1 FOR UPDATE")
            .bind(club_id.into_inner())
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| club_not_found(club_id))?;

        let joining = sqlx::query_scalar::<_, i64>(
            r"SELECT COUNT(*) FROM club_members WHERE club_id = $1 AND state = $2",
        )
        .bind(club_id.into_inner())
        .bind(MemberState::Joining.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if joining >= i64::from(capacity) {
            warn!(%club_id, joining, capacity, "Capacity check rejected join");
            return Err(DomainError::CapacityExceeded { capacity });
        }

        let result = sqlx::query(
            r"
            UPDATE club_members
            SET state = $3, updated_at = NOW()
            WHERE id = $1 AND club_id = $2 AND state = $4
            ",
        )
        .bind(row_id.into_inner())
        .bind(club_id.into_inner())
        .bind(MemberState::Joining.as_str())
        .bind(from.as_str())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(club_member_not_found());
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }
}
