//! Authorization checker
//!
//! Read-only predicates answering whether an actor may act on a club,
//! schedule or checklist. Every predicate resolves its target first and
//! fails closed: a missing (or required-but-inactive) target is a NotFound
//! error, never `false`. The `require_*` forms turn a `false` into
//! Forbidden and hand back the resolved target.

use club_core::entities::{CheckList, Club, ClubMember, Schedule};
use club_core::{DomainError, Snowflake};
use tracing::{debug, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Club membership row counts as current membership
fn is_member(membership: Option<&ClubMember>) -> bool {
    membership.is_some_and(ClubMember::is_joining)
}

/// Leader, or a current MANAGER/HOST row
fn is_elevated(club: &Club, actor: Snowflake, membership: Option<&ClubMember>) -> bool {
    club.is_leader(actor) || membership.is_some_and(|m| m.is_joining() && m.can_manage())
}

/// Authorization checker for club-scoped operations
pub struct AuthorizationChecker<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthorizationChecker<'a> {
    /// Create a new AuthorizationChecker
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// Any club, active or not
    pub async fn club(&self, club_id: Snowflake) -> ServiceResult<Club> {
        Ok(self
            .ctx
            .club_repo()
            .find_by_id(club_id)
            .await?
            .ok_or(DomainError::ClubNotFound(club_id))?)
    }

    /// A club that has not been deleted
    pub async fn active_club(&self, club_id: Snowflake) -> ServiceResult<Club> {
        let club = self.club(club_id).await?;
        if !club.is_active {
            return Err(DomainError::ClubNotFound(club_id).into());
        }
        Ok(club)
    }

    /// An active club whose end date has not passed
    pub async fn operational_club(&self, club_id: Snowflake) -> ServiceResult<Club> {
        let club = self.club(club_id).await?;
        if !club.is_operational(self.ctx.today()) {
            return Err(DomainError::ClubNotFound(club_id).into());
        }
        Ok(club)
    }

    async fn membership(&self, club_id: Snowflake, actor: Snowflake) -> ServiceResult<Option<ClubMember>> {
        Ok(self.ctx.club_member_repo().find(club_id, actor).await?)
    }

    /// An active schedule
    pub async fn active_schedule(&self, schedule_id: Snowflake) -> ServiceResult<Schedule> {
        let schedule = self
            .ctx
            .schedule_repo()
            .find_by_id(schedule_id)
            .await?
            .filter(|s| s.is_active)
            .ok_or(DomainError::ScheduleNotFound(schedule_id))?;
        Ok(schedule)
    }

    /// An active checklist together with its active schedule.
    ///
    /// A schedule pointing at a different checklist is a consistency
    /// conflict rather than a missing resource.
    pub async fn active_checklist(&self, checklist_id: Snowflake) -> ServiceResult<(CheckList, Schedule)> {
        let checklist = self
            .ctx
            .checklist_repo()
            .find_by_id(checklist_id)
            .await?
            .filter(|c| c.is_active)
            .ok_or(DomainError::CheckListNotFound(checklist_id))?;

        let schedule = self.active_schedule(checklist.schedule_id).await?;
        if schedule.checklist_id != Some(checklist.id) {
            return Err(DomainError::CheckListMismatch.into());
        }
        Ok((checklist, schedule))
    }

    // ========================================================================
    // Club predicates
    // ========================================================================

    /// Actor is the club's leader; the club may be inactive
    #[instrument(skip(self))]
    pub async fn is_host(&self, club_id: Snowflake, actor: Snowflake) -> ServiceResult<bool> {
        let club = self.club(club_id).await?;
        Ok(club.is_leader(actor))
    }

    /// Actor leads an active, not yet ended club
    #[instrument(skip(self))]
    pub async fn is_active_club_host(&self, club_id: Snowflake, actor: Snowflake) -> ServiceResult<bool> {
        let club = self.operational_club(club_id).await?;
        Ok(club.is_leader(actor))
    }

    /// Actor has a JOINING row in an active club
    #[instrument(skip(self))]
    pub async fn is_club_member(&self, club_id: Snowflake, actor: Snowflake) -> ServiceResult<bool> {
        self.active_club(club_id).await?;
        let membership = self.membership(club_id, actor).await?;
        Ok(is_member(membership.as_ref()))
    }

    /// Actor is a current MANAGER or HOST of an active, not yet ended club
    #[instrument(skip(self))]
    pub async fn is_manager_or_host(&self, club_id: Snowflake, actor: Snowflake) -> ServiceResult<bool> {
        let club = self.operational_club(club_id).await?;
        let membership = self.membership(club_id, actor).await?;
        Ok(is_elevated(&club, actor, membership.as_ref()))
    }

    // ========================================================================
    // Schedule / checklist predicates
    // ========================================================================

    #[instrument(skip(self))]
    pub async fn is_club_member_by_schedule(&self, schedule_id: Snowflake, actor: Snowflake) -> ServiceResult<bool> {
        let schedule = self.active_schedule(schedule_id).await?;
        self.is_club_member(schedule.club_id, actor).await
    }

    #[instrument(skip(self))]
    pub async fn is_manager_or_host_by_schedule(
        &self,
        schedule_id: Snowflake,
        actor: Snowflake,
    ) -> ServiceResult<bool> {
        let schedule = self.active_schedule(schedule_id).await?;
        self.is_manager_or_host(schedule.club_id, actor).await
    }

    #[instrument(skip(self))]
    pub async fn is_club_member_by_checklist(&self, checklist_id: Snowflake, actor: Snowflake) -> ServiceResult<bool> {
        let (_, schedule) = self.active_checklist(checklist_id).await?;
        self.is_club_member(schedule.club_id, actor).await
    }

    #[instrument(skip(self))]
    pub async fn is_manager_or_host_by_checklist(
        &self,
        checklist_id: Snowflake,
        actor: Snowflake,
    ) -> ServiceResult<bool> {
        let (_, schedule) = self.active_checklist(checklist_id).await?;
        self.is_manager_or_host(schedule.club_id, actor).await
    }

    // ========================================================================
    // Require forms
    // ========================================================================

    /// Leader of the club, active or not
    pub async fn require_host(&self, club_id: Snowflake, actor: Snowflake) -> ServiceResult<Club> {
        let club = self.club(club_id).await?;
        if !club.is_leader(actor) {
            debug!(%club_id, %actor, "Denied: not the club host");
            return Err(DomainError::NotClubHost.into());
        }
        Ok(club)
    }

    /// Leader of an active, not yet ended club
    pub async fn require_active_club_host(&self, club_id: Snowflake, actor: Snowflake) -> ServiceResult<Club> {
        let club = self.operational_club(club_id).await?;
        if !club.is_leader(actor) {
            debug!(%club_id, %actor, "Denied: not the host of an active club");
            return Err(DomainError::NotClubHost.into());
        }
        Ok(club)
    }

    /// JOINING member of an active club; returns the club and the row
    pub async fn require_club_member(
        &self,
        club_id: Snowflake,
        actor: Snowflake,
    ) -> ServiceResult<(Club, ClubMember)> {
        let club = self.active_club(club_id).await?;
        match self.membership(club_id, actor).await? {
            Some(row) if row.is_joining() => Ok((club, row)),
            _ => {
                debug!(%club_id, %actor, "Denied: not a club member");
                Err(DomainError::NotClubMember.into())
            }
        }
    }

    /// Current MANAGER or HOST of an active, not yet ended club
    pub async fn require_manager_or_host(&self, club_id: Snowflake, actor: Snowflake) -> ServiceResult<Club> {
        let club = self.operational_club(club_id).await?;
        let membership = self.membership(club_id, actor).await?;
        if !is_elevated(&club, actor, membership.as_ref()) {
            debug!(%club_id, %actor, "Denied: not a manager or host");
            return Err(DomainError::NotClubManagerOrHost.into());
        }
        Ok(club)
    }

    /// JOINING member of the club owning an active schedule
    pub async fn require_schedule_member(&self, schedule_id: Snowflake, actor: Snowflake) -> ServiceResult<Schedule> {
        let schedule = self.active_schedule(schedule_id).await?;
        self.require_club_member(schedule.club_id, actor).await?;
        Ok(schedule)
    }

    /// MANAGER or HOST of the club owning an active schedule
    pub async fn require_schedule_manager(
        &self,
        schedule_id: Snowflake,
        actor: Snowflake,
    ) -> ServiceResult<(Schedule, Club)> {
        let schedule = self.active_schedule(schedule_id).await?;
        let club = self.require_manager_or_host(schedule.club_id, actor).await?;
        Ok((schedule, club))
    }

    /// JOINING member of the club owning an active checklist
    pub async fn require_checklist_member(
        &self,
        checklist_id: Snowflake,
        actor: Snowflake,
    ) -> ServiceResult<(CheckList, Schedule)> {
        let (checklist, schedule) = self.active_checklist(checklist_id).await?;
        self.require_club_member(schedule.club_id, actor).await?;
        Ok((checklist, schedule))
    }

    /// MANAGER or HOST of the club owning an active checklist
    pub async fn require_checklist_manager(
        &self,
        checklist_id: Snowflake,
        actor: Snowflake,
    ) -> ServiceResult<(CheckList, Schedule)> {
        let (checklist, schedule) = self.active_checklist(checklist_id).await?;
        self.require_manager_or_host(schedule.club_id, actor).await?;
        Ok((checklist, schedule))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{context, seed_club, seed_member};
    use crate::services::ServiceError;
    use club_core::value_objects::{ClubRole, MemberState};
    use club_core::ErrorKind;

    #[tokio::test]
    async fn test_missing_club_is_not_found() {
        let ctx = context();
        let checker = AuthorizationChecker::new(&ctx);
        let err = checker.is_club_member(Snowflake::new(404), Snowflake::new(1)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_roles_and_states() {
        let ctx = context();
        let host = seed_member(&ctx, "host").await;
        let manager = seed_member(&ctx, "manager").await;
        let invited = seed_member(&ctx, "invited").await;
        let club = seed_club(&ctx, host.id, 10).await;

        let mut row = ClubMember::invited(ctx.generate_id(), club.id, manager.id, ClubRole::Manager);
        row.set_state(MemberState::Joining);
        ctx.club_member_repo().create(&row).await.unwrap();
        let pending = ClubMember::invited(ctx.generate_id(), club.id, invited.id, ClubRole::Manager);
        ctx.club_member_repo().create(&pending).await.unwrap();

        let checker = AuthorizationChecker::new(&ctx);
        assert!(checker.is_host(club.id, host.id).await.unwrap());
        assert!(!checker.is_host(club.id, manager.id).await.unwrap());
        assert!(checker.is_manager_or_host(club.id, manager.id).await.unwrap());
        assert!(checker.is_club_member(club.id, manager.id).await.unwrap());

        // an invited manager is not yet a manager
        assert!(!checker.is_manager_or_host(club.id, invited.id).await.unwrap());
        assert!(!checker.is_club_member(club.id, invited.id).await.unwrap());

        let err = checker.require_manager_or_host(club.id, invited.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::NotClubManagerOrHost)));
    }

    #[tokio::test]
    async fn test_inactive_club_only_visible_to_is_host() {
        let ctx = context();
        let host = seed_member(&ctx, "host").await;
        let mut club = seed_club(&ctx, host.id, 10).await;
        club.deactivate();
        ctx.club_repo().update(&club).await.unwrap();

        let checker = AuthorizationChecker::new(&ctx);
        assert!(checker.is_host(club.id, host.id).await.unwrap());
        let err = checker.is_active_club_host(club.id, host.id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
