//! My club service
//!
//! Membership operations a member performs on their own row: applying,
//! answering invitations, cancelling and leaving.

use club_core::entities::ClubMember;
use club_core::value_objects::{ClubRole, MemberState};
use club_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{ApplyOutcome, MyClubResponse};

use super::authorization::AuthorizationChecker;
use super::club_member::ClubMemberService;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Create or resurrect an APPLYING row for `actor`.
///
/// An existing non-WITHDRAWN row is reported as an outcome and left
/// untouched. Visibility is the caller's concern.
pub(crate) async fn submit_application(
    ctx: &ServiceContext,
    club_id: Snowflake,
    actor: Snowflake,
) -> ServiceResult<ApplyOutcome> {
    match ctx.club_member_repo().find(club_id, actor).await? {
        Some(row) => match row.state {
            MemberState::Joining => Ok(ApplyOutcome::AlreadyJoined),
            MemberState::Applying => Ok(ApplyOutcome::AlreadyApplying),
            MemberState::Invited => Ok(ApplyOutcome::AlreadyInvited),
            MemberState::Withdrawn => {
                let mut row = row;
                row.set_role(ClubRole::Participant);
                row.set_state(MemberState::Applying);
                ctx.club_member_repo().update(&row).await?;
                Ok(ApplyOutcome::Applied)
            }
        },
        None => {
            let row = ClubMember::applying(ctx.generate_id(), club_id, actor);
            ctx.club_member_repo().create(&row).await?;
            Ok(ApplyOutcome::Applied)
        }
    }
}

/// My club service
pub struct MyClubService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MyClubService<'a> {
    /// Create a new MyClubService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn own_row(&self, club_id: Snowflake, actor: Snowflake) -> ServiceResult<ClubMember> {
        Ok(self
            .ctx
            .club_member_repo()
            .find(club_id, actor)
            .await?
            .ok_or(DomainError::ClubMemberNotFound)?)
    }

    /// Apply to a public club
    #[instrument(skip(self))]
    pub async fn apply_to_club(&self, actor: Snowflake, club_id: Snowflake) -> ServiceResult<()> {
        let auth = AuthorizationChecker::new(self.ctx);
        let club = auth.active_club(club_id).await?;
        if !club.is_public {
            return Err(DomainError::PrivateClub.into());
        }

        match submit_application(self.ctx, club_id, actor).await? {
            ApplyOutcome::Applied => {
                info!(club_id = %club_id, member_id = %actor, "Application submitted");
                Ok(())
            }
            ApplyOutcome::AlreadyJoined => Err(DomainError::AlreadyJoined.into()),
            ApplyOutcome::AlreadyApplying => Err(DomainError::AlreadyApplying.into()),
            ApplyOutcome::AlreadyInvited => Err(DomainError::AlreadyInvited.into()),
        }
    }

    /// Accept or decline an invitation.
    ///
    /// Accepting needs a free seat; declining deletes the row.
    #[instrument(skip(self))]
    pub async fn respond_to_invitation(
        &self,
        actor: Snowflake,
        club_id: Snowflake,
        accept: bool,
    ) -> ServiceResult<()> {
        let auth = AuthorizationChecker::new(self.ctx);
        auth.active_club(club_id).await?;

        let row = self.own_row(club_id, actor).await?;
        match row.state {
            MemberState::Invited => {}
            MemberState::Joining => return Err(DomainError::AlreadyJoined.into()),
            _ => return Err(DomainError::NotInvited.into()),
        }

        if accept {
            self.ctx
                .club_member_repo()
                .join_within_capacity(club_id, row.id, MemberState::Invited)
                .await?;
            info!(club_id = %club_id, member_id = %actor, "Invitation accepted");
        } else {
            self.ctx.club_member_repo().delete(row.id).await?;
            info!(club_id = %club_id, member_id = %actor, "Invitation declined");
        }

        Ok(())
    }

    /// Cancel a pending application
    #[instrument(skip(self))]
    pub async fn cancel_application(&self, actor: Snowflake, club_id: Snowflake) -> ServiceResult<()> {
        let row = self.own_row(club_id, actor).await?;
        if row.state != MemberState::Applying {
            return Err(DomainError::NotApplying.into());
        }

        self.ctx.club_member_repo().delete(row.id).await?;

        info!(club_id = %club_id, member_id = %actor, "Application cancelled");

        Ok(())
    }

    /// Withdraw from a club; the host cannot leave
    #[instrument(skip(self))]
    pub async fn leave_club(&self, actor: Snowflake, club_id: Snowflake) -> ServiceResult<()> {
        ClubMemberService::new(self.ctx).withdraw(club_id, actor, actor).await
    }

    /// Every active club the actor has a non-WITHDRAWN row in
    #[instrument(skip(self))]
    pub async fn get_my_clubs(&self, actor: Snowflake) -> ServiceResult<Vec<MyClubResponse>> {
        let rows = self.ctx.club_member_repo().find_by_member(actor).await?;

        let mut clubs = Vec::with_capacity(rows.len());
        for row in rows.iter().filter(|row| row.state.is_listed()) {
            if let Some(club) = self.ctx.club_repo().find_by_id(row.club_id).await? {
                if club.is_active {
                    clubs.push(MyClubResponse::from((&club, row)));
                }
            }
        }

        Ok(clubs)
    }

    /// The actor's role and state in one club
    #[instrument(skip(self))]
    pub async fn get_my_club_info(&self, actor: Snowflake, club_id: Snowflake) -> ServiceResult<MyClubResponse> {
        let auth = AuthorizationChecker::new(self.ctx);
        let club = auth.active_club(club_id).await?;

        let row = self.own_row(club_id, actor).await?;
        if row.is_withdrawn() {
            return Err(DomainError::ClubMemberNotFound.into());
        }

        Ok(MyClubResponse::from((&club, &row)))
    }
}
