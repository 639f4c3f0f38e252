//! Club member service
//!
//! Host-side membership management: bulk invites, withdrawal, role
//! changes and application review.

use club_core::entities::{ClubMember, Member};
use club_core::value_objects::{ClubRole, MemberState};
use club_core::{DomainError, Snowflake};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{AddMembersRequest, ChangeRoleRequest, ClubMemberResponse, ClubMemberWithProfile};

use super::authorization::AuthorizationChecker;
use super::club::dedupe_by_email;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Club member service
pub struct ClubMemberService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ClubMemberService<'a> {
    /// Create a new ClubMemberService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn row(&self, club_id: Snowflake, member_id: Snowflake) -> ServiceResult<ClubMember> {
        Ok(self
            .ctx
            .club_member_repo()
            .find(club_id, member_id)
            .await?
            .ok_or(DomainError::ClubMemberNotFound)?)
    }

    /// Invite members by email.
    ///
    /// Repeated emails keep their last role. Existing WITHDRAWN rows are
    /// re-invited, rows in any other state are left alone, and unknown
    /// members get a new INVITED row. New rows are only written when
    /// `JOINING + new rows <= capacity`; otherwise nothing is written.
    #[instrument(skip(self, request))]
    pub async fn add_members(
        &self,
        club_id: Snowflake,
        actor: Snowflake,
        request: AddMembersRequest,
    ) -> ServiceResult<Vec<ClubMemberResponse>> {
        request.validate()?;
        let invites = dedupe_by_email(&request.members)?;

        let auth = AuthorizationChecker::new(self.ctx);
        let club = auth.require_active_club_host(club_id, actor).await?;

        let emails: Vec<String> = invites.iter().map(|(email, _)| email.clone()).collect();
        let members = self.ctx.member_repo().find_by_emails(&emails).await?;
        let existing = self.ctx.club_member_repo().find_by_club(club_id).await?;

        let mut reinvited = Vec::new();
        let mut created = Vec::new();
        for (email, role) in invites {
            let member = members
                .iter()
                .find(|m| m.email.as_deref() == Some(email.as_str()))
                .ok_or_else(|| DomainError::MemberEmailNotFound(email.clone()))?;

            match existing.iter().find(|row| row.member_id == member.id) {
                Some(row) if row.is_withdrawn() => {
                    let mut row = row.clone();
                    row.reinvite(role);
                    reinvited.push(row);
                }
                Some(_) => {}
                None => created.push(ClubMember::invited(self.ctx.generate_id(), club_id, member.id, role)),
            }
        }

        self.ctx
            .club_member_repo()
            .add_within_capacity(club.id, &reinvited, &created)
            .await?;

        info!(
            club_id = %club_id,
            reinvited = reinvited.len(),
            created = created.len(),
            "Members invited"
        );

        Ok(with_profiles(reinvited.iter().chain(created.iter()), &members))
    }

    /// Withdraw a member from the club.
    ///
    /// The host can never be withdrawn. Anyone else may be withdrawn by the
    /// host, or may withdraw themself.
    #[instrument(skip(self))]
    pub async fn withdraw(&self, club_id: Snowflake, target: Snowflake, actor: Snowflake) -> ServiceResult<()> {
        let auth = AuthorizationChecker::new(self.ctx);
        let club = auth.active_club(club_id).await?;

        if club.is_leader(target) {
            return Err(DomainError::HostCannotWithdraw.into());
        }
        if actor != target && !club.is_leader(actor) {
            return Err(DomainError::NotClubHost.into());
        }

        let mut row = self.row(club_id, target).await?;
        if row.role == ClubRole::Host {
            warn!(club_id = %club_id, member_id = %target, "HOST row held by a non-leader");
            return Err(DomainError::HostCannotWithdraw.into());
        }
        if row.is_withdrawn() {
            return Err(DomainError::ClubMemberNotFound.into());
        }

        row.set_state(MemberState::Withdrawn);
        self.ctx.club_member_repo().update(&row).await?;

        info!(club_id = %club_id, member_id = %target, by = %actor, "Member withdrawn");

        Ok(())
    }

    /// Change another member's role; HOST cannot be handed out here
    #[instrument(skip(self, request))]
    pub async fn change_role(
        &self,
        club_id: Snowflake,
        target: Snowflake,
        actor: Snowflake,
        request: ChangeRoleRequest,
    ) -> ServiceResult<ClubMemberResponse> {
        let role = ClubRole::parse(&request.role)?;
        if target == actor {
            return Err(DomainError::CannotChangeOwnRole.into());
        }
        if !role.is_assignable() {
            return Err(DomainError::HostRoleNotAssignable.into());
        }

        let auth = AuthorizationChecker::new(self.ctx);
        auth.require_active_club_host(club_id, actor).await?;

        let mut row = self.row(club_id, target).await?;
        if row.is_withdrawn() {
            return Err(DomainError::ClubMemberNotFound.into());
        }

        row.set_role(role);
        self.ctx.club_member_repo().update(&row).await?;

        info!(club_id = %club_id, member_id = %target, role = %role, "Role changed");

        let member = self
            .ctx
            .member_repo()
            .find_by_id(target)
            .await?
            .ok_or(DomainError::MemberNotFound(target))?;

        Ok(ClubMemberResponse::from(ClubMemberWithProfile {
            membership: &row,
            member: &member,
        }))
    }

    /// Approve or reject a pending application.
    ///
    /// Approval makes the applicant JOINING and needs a free seat; rejection
    /// deletes the row.
    #[instrument(skip(self))]
    pub async fn handle_application(
        &self,
        club_id: Snowflake,
        target: Snowflake,
        actor: Snowflake,
        approve: bool,
    ) -> ServiceResult<()> {
        let auth = AuthorizationChecker::new(self.ctx);
        auth.require_active_club_host(club_id, actor).await?;

        let row = self.row(club_id, target).await?;
        match row.state {
            MemberState::Applying => {}
            MemberState::Joining => return Err(DomainError::AlreadyJoined.into()),
            _ => return Err(DomainError::NotApplying.into()),
        }

        if approve {
            self.ctx
                .club_member_repo()
                .join_within_capacity(club_id, row.id, MemberState::Applying)
                .await?;
            info!(club_id = %club_id, member_id = %target, "Application approved");
        } else {
            self.ctx.club_member_repo().delete(row.id).await?;
            info!(club_id = %club_id, member_id = %target, "Application rejected");
        }

        Ok(())
    }
}

fn with_profiles<'r>(rows: impl Iterator<Item = &'r ClubMember>, members: &[Member]) -> Vec<ClubMemberResponse> {
    rows.filter_map(|membership| {
        let member = members.iter().find(|m| m.id == membership.member_id)?;
        Some(ClubMemberResponse::from(ClubMemberWithProfile { membership, member }))
    })
    .collect()
}
