//! Schedule service
//!
//! Handles the schedule lifecycle and calendar queries.

use club_core::entities::{Schedule, ScheduleFields};
use club_core::value_objects::ScheduleWindow;
use club_core::Snowflake;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{ScheduleRangeQuery, ScheduleRequest, ScheduleResponse};

use super::authorization::AuthorizationChecker;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Schedule service
pub struct ScheduleService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ScheduleService<'a> {
    /// Create a new ScheduleService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn window(&self, query: ScheduleRangeQuery) -> ServiceResult<ScheduleWindow> {
        Ok(ScheduleWindow::resolve(query.start, query.end, self.ctx.today())?)
    }

    /// Create a schedule in a club the actor manages
    #[instrument(skip(self, request))]
    pub async fn create_schedule(
        &self,
        club_id: Snowflake,
        actor: Snowflake,
        request: ScheduleRequest,
    ) -> ServiceResult<ScheduleResponse> {
        request.validate()?;

        let auth = AuthorizationChecker::new(self.ctx);
        auth.require_manager_or_host(club_id, actor).await?;

        let schedule = Schedule::new(self.ctx.generate_id(), club_id, ScheduleFields::from(request))?;
        self.ctx.schedule_repo().create(&schedule).await?;

        info!(club_id = %club_id, schedule_id = %schedule.id, "Schedule created");

        Ok(ScheduleResponse::from(schedule))
    }

    /// Overwrite a schedule's fields
    #[instrument(skip(self, request))]
    pub async fn modify_schedule(
        &self,
        schedule_id: Snowflake,
        actor: Snowflake,
        request: ScheduleRequest,
    ) -> ServiceResult<ScheduleResponse> {
        request.validate()?;

        let auth = AuthorizationChecker::new(self.ctx);
        let (mut schedule, _) = auth.require_schedule_manager(schedule_id, actor).await?;

        schedule.modify(ScheduleFields::from(request))?;
        self.ctx.schedule_repo().update(&schedule).await?;

        info!(schedule_id = %schedule_id, "Schedule modified");

        Ok(ScheduleResponse::from(schedule))
    }

    /// Delete a schedule.
    ///
    /// Without a checklist the row is removed; otherwise the schedule and its
    /// checklist are both deactivated in one write.
    #[instrument(skip(self))]
    pub async fn delete_schedule(&self, schedule_id: Snowflake, actor: Snowflake) -> ServiceResult<()> {
        let auth = AuthorizationChecker::new(self.ctx);
        auth.require_schedule_manager(schedule_id, actor).await?;

        if self.ctx.schedule_repo().delete_or_deactivate(schedule_id).await? {
            info!(schedule_id = %schedule_id, "Schedule deleted");
        } else {
            info!(schedule_id = %schedule_id, "Schedule and checklist deactivated");
        }

        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get_schedule(&self, schedule_id: Snowflake, actor: Snowflake) -> ServiceResult<ScheduleResponse> {
        let auth = AuthorizationChecker::new(self.ctx);
        let schedule = auth.require_schedule_member(schedule_id, actor).await?;
        Ok(ScheduleResponse::from(schedule))
    }

    /// Club schedules overlapping the requested window (default: this month)
    #[instrument(skip(self))]
    pub async fn list_club_schedules(
        &self,
        club_id: Snowflake,
        actor: Snowflake,
        query: ScheduleRangeQuery,
    ) -> ServiceResult<Vec<ScheduleResponse>> {
        let auth = AuthorizationChecker::new(self.ctx);
        auth.require_club_member(club_id, actor).await?;

        let window = self.window(query)?;
        let schedules = self
            .ctx
            .schedule_repo()
            .find_by_club_in_range(club_id, window.start, window.end)
            .await?;

        Ok(schedules.into_iter().map(ScheduleResponse::from).collect())
    }

    /// Schedules of every club the actor is JOINING
    #[instrument(skip(self))]
    pub async fn list_my_schedules(
        &self,
        actor: Snowflake,
        query: ScheduleRangeQuery,
    ) -> ServiceResult<Vec<ScheduleResponse>> {
        let window = self.window(query)?;
        let schedules = self
            .ctx
            .schedule_repo()
            .find_by_member_in_range(actor, window.start, window.end)
            .await?;

        Ok(schedules.into_iter().map(ScheduleResponse::from).collect())
    }

    /// Most recently created schedule of a club
    #[instrument(skip(self))]
    pub async fn latest_club_schedule(
        &self,
        club_id: Snowflake,
        actor: Snowflake,
    ) -> ServiceResult<Option<ScheduleResponse>> {
        let auth = AuthorizationChecker::new(self.ctx);
        auth.require_club_member(club_id, actor).await?;

        let latest = self.ctx.schedule_repo().find_latest_by_club(club_id).await?;
        Ok(latest.map(ScheduleResponse::from))
    }

    #[instrument(skip(self))]
    pub async fn count_club_schedules(&self, club_id: Snowflake, actor: Snowflake) -> ServiceResult<i64> {
        let auth = AuthorizationChecker::new(self.ctx);
        auth.require_club_member(club_id, actor).await?;

        Ok(self.ctx.schedule_repo().count_by_club(club_id).await?)
    }
}
