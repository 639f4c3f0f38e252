//! PostgreSQL implementation of ScheduleRepository

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::PgPool;
use tracing::instrument;

use club_core::entities::Schedule;
use club_core::traits::{RepoResult, ScheduleRepository};
use club_core::value_objects::{MemberState, Snowflake};

use crate::models::ScheduleModel;

use super::error::{map_db_error, schedule_not_found};

/// PostgreSQL implementation of ScheduleRepository
#[derive(Clone)]
pub struct PgScheduleRepository {
    pool: PgPool,
}

impl PgScheduleRepository {
    /// Create a new PgScheduleRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScheduleRepository for PgScheduleRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Schedule>> {
        let result = sqlx::query_as::<_, ScheduleModel>(
            r"
            SELECT s.id, s.club_id, s.title, s.content, s.start_at, s.end_at, s.spot, s.is_active,
                   c.id AS checklist_id, s.created_at, s.updated_at
            FROM schedules s
            LEFT JOIN checklists c ON c.schedule_id = s.id
            WHERE s.id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Schedule::from))
    }

    #[instrument(skip(self))]
    async fn find_by_club_in_range(
        &self,
        club_id: Snowflake,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> RepoResult<Vec<Schedule>> {
        let results = sqlx::query_as::<_, ScheduleModel>(
            r"
            SELECT s.id, s.club_id, s.title, s.content, s.start_at, s.end_at, s.spot, s.is_active,
                   c.id AS checklist_id, s.created_at, s.updated_at
            FROM schedules s
            LEFT JOIN checklists c ON c.schedule_id = s.id
            WHERE s.club_id = $1 AND s.is_active
              AND s.start_at < $3 AND s.end_at >= $2
            ORDER BY s.start_at, s.id
            ",
        )
        .bind(club_id.into_inner())
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Schedule::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_member_in_range(
        &self,
        member_id: Snowflake,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> RepoResult<Vec<Schedule>> {
        let results = sqlx::query_as::<_, ScheduleModel>(
            r"
            SELECT s.id, s.club_id, s.title, s.content, s.start_at, s.end_at, s.spot, s.is_active,
                   c.id AS checklist_id, s.created_at, s.updated_at
            FROM schedules s
            JOIN clubs cl ON cl.id = s.club_id AND cl.is_active
            JOIN club_members cm ON cm.club_id = s.club_id AND cm.member_id = $1 AND cm.state = $4
            LEFT JOIN checklists c ON c.schedule_id = s.id
            WHERE s.is_active
              AND s.start_at < $3 AND s.end_at >= $2
            ORDER BY s.start_at, s.id
            ",
        )
        .bind(member_id.into_inner())
        .bind(start)
        .bind(end)
        .bind(MemberState::Joining.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Schedule::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_club(&self, club_id: Snowflake) -> RepoResult<Vec<Schedule>> {
        let results = sqlx::query_as::<_, ScheduleModel>(
            r"
            SELECT s.id, s.club_id, s.title, s.content, s.start_at, s.end_at, s.spot, s.is_active,
                   c.id AS checklist_id, s.created_at, s.updated_at
            FROM schedules s
            LEFT JOIN checklists c ON c.schedule_id = s.id
            WHERE s.club_id = $1
            ORDER BY s.start_at, s.id
            ",
        )
        .bind(club_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Schedule::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_latest_by_club(&self, club_id: Snowflake) -> RepoResult<Option<Schedule>> {
        let result = sqlx::query_as::<_, ScheduleModel>(
            r"
            SELECT s.id, s.club_id, s.title, s.content, s.start_at, s.end_at, s.spot, s.is_active,
                   c.id AS checklist_id, s.created_at, s.updated_at
            FROM schedules s
            LEFT JOIN checklists c ON c.schedule_id = s.id
            WHERE s.club_id = $1 AND s.is_active
            ORDER BY s.id DESC
            LIMIT 1
            ",
        )
        .bind(club_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Schedule::from))
    }

    #[instrument(skip(self))]
    async fn count_by_club(&self, club_id: Snowflake) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r"SELECT COUNT(*) FROM schedules WHERE club_id = $1 AND is_active",
        )
        .bind(club_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, schedule), fields(schedule_id = %schedule.id, club_id = %schedule.club_id))]
    async fn create(&self, schedule: &Schedule) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO schedules (id, club_id, title, content, start_at, end_at, spot, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(schedule.id.into_inner())
        .bind(schedule.club_id.into_inner())
        .bind(&schedule.title)
        .bind(&schedule.content)
        .bind(schedule.start_at)
        .bind(schedule.end_at)
        .bind(&schedule.spot)
        .bind(schedule.is_active)
        .bind(schedule.created_at)
        .bind(schedule.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, schedule), fields(schedule_id = %schedule.id))]
    async fn update(&self, schedule: &Schedule) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE schedules
            SET title = $2, content = $3, start_at = $4, end_at = $5, spot = $6, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(schedule.id.into_inner())
        .bind(&schedule.title)
        .bind(&schedule.content)
        .bind(schedule.start_at)
        .bind(schedule.end_at)
        .bind(&schedule.spot)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(schedule_not_found(schedule.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_or_deactivate(&self, id: Snowflake) -> RepoResult<bool> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // a concurrent checklist insert holds a key-share lock on this row
        // until it commits, so the existence check below sees it
        sqlx::query_scalar::<_, i64>(r"SELECT id FROM schedules WHERE id = $1 FOR UPDATE")
            .bind(id.into_inner())
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| schedule_not_found(id))?;

        let result = sqlx::query(
            r"
            DELETE FROM schedules
            WHERE id = $1
              AND NOT EXISTS (SELECT 1 FROM checklists WHERE schedule_id = $1)
            ",
        )
        .bind(id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 1 {
            tx.commit().await.map_err(map_db_error)?;
            return Ok(true);
        }

        sqlx::query(r"UPDATE schedules SET is_active = FALSE, updated_at = NOW() WHERE id = $1")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        sqlx::query(
            r"UPDATE checklists SET is_active = FALSE, updated_at = NOW() WHERE schedule_id = $1",
        )
        .bind(id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(false)
    }
}
