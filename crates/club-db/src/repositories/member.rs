//! PostgreSQL implementation of MemberRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use club_core::entities::{ClubMember, Member};
use club_core::error::DomainError;
use club_core::traits::{MemberRepository, RepoResult};
use club_core::value_objects::{MemberType, Snowflake};

use crate::models::MemberModel;

use super::error::{map_constraint_violation, map_db_error, member_not_found};

const EMAIL_KEY: &str = "members_email_key";

/// PostgreSQL implementation of MemberRepository
#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    /// Create a new PgMemberRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn into_members(models: Vec<MemberModel>) -> RepoResult<Vec<Member>> {
    models.into_iter().map(Member::try_from).collect()
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Member>> {
        let result = sqlx::query_as::<_, MemberModel>(
            r"
            SELECT id, nickname, tag, member_type, email, bio, created_at, updated_at
            FROM members
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Member::try_from).transpose()
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<Member>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let raw: Vec<i64> = ids.iter().map(|id| id.into_inner()).collect();

        let results = sqlx::query_as::<_, MemberModel>(
            r"
            SELECT id, nickname, tag, member_type, email, bio, created_at, updated_at
            FROM members
            WHERE id = ANY($1)
            ",
        )
        .bind(raw)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_members(results)
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Member>> {
        let result = sqlx::query_as::<_, MemberModel>(
            r"
            SELECT id, nickname, tag, member_type, email, bio, created_at, updated_at
            FROM members
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Member::try_from).transpose()
    }

    #[instrument(skip(self, emails), fields(count = emails.len()))]
    async fn find_by_emails(&self, emails: &[String]) -> RepoResult<Vec<Member>> {
        if emails.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, MemberModel>(
            r"
            SELECT id, nickname, tag, member_type, email, bio, created_at, updated_at
            FROM members
            WHERE email = ANY($1)
            ",
        )
        .bind(emails)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_members(results)
    }

    #[instrument(skip(self))]
    async fn find_by_nickname_and_tag(&self, nickname: &str, tag: &str) -> RepoResult<Option<Member>> {
        let result = sqlx::query_as::<_, MemberModel>(
            r"
            SELECT id, nickname, tag, member_type, email, bio, created_at, updated_at
            FROM members
            WHERE nickname = $1 AND tag = $2
            ",
        )
        .bind(nickname)
        .bind(tag)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Member::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_guest_in_club(&self, club_id: Snowflake, nickname: &str) -> RepoResult<Option<Member>> {
        let result = sqlx::query_as::<_, MemberModel>(
            r"
            SELECT m.id, m.nickname, m.tag, m.member_type, m.email, m.bio, m.created_at, m.updated_at
            FROM members m
            JOIN club_members cm ON cm.member_id = m.id
            WHERE cm.club_id = $1 AND m.nickname = $2 AND m.member_type = $3
            LIMIT 1
            ",
        )
        .bind(club_id.into_inner())
        .bind(nickname)
        .bind(MemberType::Guest.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Member::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(r"SELECT EXISTS(SELECT 1 FROM members WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn tag_exists(&self, nickname: &str, tag: &str) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"SELECT EXISTS(SELECT 1 FROM members WHERE nickname = $1 AND tag = $2)",
        )
        .bind(nickname)
        .bind(tag)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, member, password_hash), fields(member_id = %member.id))]
    async fn create(&self, member: &Member, password_hash: &str) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO members (id, nickname, tag, member_type, email, password_hash, bio, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(member.id.into_inner())
        .bind(&member.nickname)
        .bind(&member.tag)
        .bind(member.member_type.as_str())
        .bind(&member.email)
        .bind(password_hash)
        .bind(&member.bio)
        .bind(member.created_at)
        .bind(member.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_constraint_violation(e, EMAIL_KEY, || DomainError::EmailAlreadyExists))?;

        Ok(())
    }

    #[instrument(skip(self, member, password_hash, membership), fields(member_id = %member.id, club_id = %membership.club_id))]
    async fn create_guest(
        &self,
        member: &Member,
        password_hash: &str,
        membership: &ClubMember,
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO members (id, nickname, tag, member_type, email, password_hash, bio, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NULL, $5, NULL, $6, $7)
            ",
        )
        .bind(member.id.into_inner())
        .bind(&member.nickname)
        .bind(&member.tag)
        .bind(member.member_type.as_str())
        .bind(password_hash)
        .bind(member.created_at)
        .bind(member.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO club_members (id, club_id, member_id, role, state, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(membership.id.into_inner())
        .bind(membership.club_id.into_inner())
        .bind(membership.member_id.into_inner())
        .bind(membership.role.as_str())
        .bind(membership.state.as_str())
        .bind(membership.created_at)
        .bind(membership.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self, member), fields(member_id = %member.id))]
    async fn update(&self, member: &Member) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE members
            SET nickname = $2, tag = $3, bio = $4, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(member.id.into_inner())
        .bind(&member.nickname)
        .bind(&member.tag)
        .bind(&member.bio)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(member_not_found(member.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        // memberships, assignments and friendships cascade
        let result = sqlx::query(r"DELETE FROM members WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(member_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>> {
        sqlx::query_scalar::<_, String>(r"SELECT password_hash FROM members WHERE id = $1")
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, password_hash))]
    async fn update_password(&self, id: Snowflake, password_hash: &str) -> RepoResult<()> {
        let result = sqlx::query(
            r"UPDATE members SET password_hash = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id.into_inner())
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(member_not_found(id));
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
        assert_send_sync::<PgMemberRepository>();
    }
}
