//! Club link service
//!
//! Invite links: managers share a code, anyone holding it can preview the
//! club and apply, private clubs included.

use chrono::Utc;
use club_core::entities::{generate_invite_code, ClubLink};
use club_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{club_link_response, ApplyByTokenResponse, ClubLinkResponse, ClubPreviewResponse, ClubWithCount};

use super::authorization::AuthorizationChecker;
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::my_club::submit_application;

/// Club link service
pub struct ClubLinkService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ClubLinkService<'a> {
    /// Create a new ClubLinkService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn response(&self, link: &ClubLink) -> ClubLinkResponse {
        club_link_response(link, &self.ctx.settings().invite_link_base_url)
    }

    /// Unexpired link for a code
    async fn valid_link(&self, token: &str) -> ServiceResult<ClubLink> {
        let link = self
            .ctx
            .club_link_repo()
            .find_by_code(token)
            .await?
            .ok_or(DomainError::InviteLinkNotFound)?;
        if link.is_expired() {
            return Err(DomainError::InviteLinkExpired.into());
        }
        Ok(link)
    }

    /// Current link of the club, or a new one when none is valid
    #[instrument(skip(self))]
    pub async fn create_link(&self, club_id: Snowflake, actor: Snowflake) -> ServiceResult<ClubLinkResponse> {
        let auth = AuthorizationChecker::new(self.ctx);
        auth.require_manager_or_host(club_id, actor).await?;

        if let Some(link) = self.ctx.club_link_repo().find_valid_by_club(club_id, Utc::now()).await? {
            return Ok(self.response(&link));
        }

        let link = ClubLink::new(
            self.ctx.generate_id(),
            club_id,
            generate_invite_code(),
            self.ctx.settings().invite_link_ttl_days,
        );
        self.ctx.club_link_repo().create(&link).await?;

        info!(club_id = %club_id, expires_at = %link.expires_at, "Invite link created");

        Ok(self.response(&link))
    }

    #[instrument(skip(self))]
    pub async fn get_link(&self, club_id: Snowflake, actor: Snowflake) -> ServiceResult<ClubLinkResponse> {
        let auth = AuthorizationChecker::new(self.ctx);
        auth.require_manager_or_host(club_id, actor).await?;

        let link = self
            .ctx
            .club_link_repo()
            .find_valid_by_club(club_id, Utc::now())
            .await?
            .ok_or(DomainError::InviteLinkNotFound)?;

        Ok(self.response(&link))
    }

    /// Preview the club behind an invite code
    #[instrument(skip(self))]
    pub async fn club_by_token(&self, token: &str) -> ServiceResult<ClubPreviewResponse> {
        let link = self.valid_link(token).await?;

        let auth = AuthorizationChecker::new(self.ctx);
        let club = auth.active_club(link.club_id).await?;
        let member_count = self.ctx.club_member_repo().count_joining(club.id).await?;

        Ok(ClubPreviewResponse::from(ClubWithCount { club, member_count }))
    }

    /// Apply through an invite code.
    ///
    /// An existing membership is reported in the outcome, not as an error.
    #[instrument(skip(self))]
    pub async fn apply_by_token(&self, actor: Snowflake, token: &str) -> ServiceResult<ApplyByTokenResponse> {
        let link = self.valid_link(token).await?;

        let auth = AuthorizationChecker::new(self.ctx);
        let club = auth.active_club(link.club_id).await?;

        let outcome = submit_application(self.ctx, club.id, actor).await?;

        info!(club_id = %club.id, member_id = %actor, ?outcome, "Applied by invite link");

        Ok(ApplyByTokenResponse {
            club_id: club.id.to_string(),
            outcome,
        })
    }
}
