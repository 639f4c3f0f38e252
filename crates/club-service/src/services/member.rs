//! Member service
//!
//! Handles account registration (members and club guests), login checks,
//! profile updates and account withdrawal.

use club_common::validate_password_strength;
use club_core::entities::{generate_member_tag, ClubMember, Member};
use club_core::{DomainError, Snowflake};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{
    GuestLoginRequest, GuestRegisterRequest, LoginRequest, MemberResponse, MemberSummaryResponse,
    RegisterRequest, UpdateMemberRequest,
};

use super::authorization::AuthorizationChecker;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Attempts at finding a free `(nickname, tag)` pair
const MAX_TAG_ATTEMPTS: usize = 10;

/// Member service
pub struct MemberService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemberService<'a> {
    /// Create a new MemberService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Generate a tag not yet used with `nickname`
    async fn unique_tag(&self, nickname: &str) -> ServiceResult<String> {
        let len = self.ctx.settings().member_tag_length;
        for _ in 0..MAX_TAG_ATTEMPTS {
            let tag = generate_member_tag(len);
            if !self.ctx.member_repo().tag_exists(nickname, &tag).await? {
                return Ok(tag);
            }
        }
        warn!(nickname, "No free member tag found");
        Err(ServiceError::internal("could not allocate a member tag"))
    }

    async fn member(&self, member_id: Snowflake) -> ServiceResult<Member> {
        Ok(self
            .ctx
            .member_repo()
            .find_by_id(member_id)
            .await?
            .ok_or(DomainError::MemberNotFound(member_id))?)
    }

    /// Register a new member
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<MemberResponse> {
        request.validate()?;
        validate_password_strength(&request.password)?;

        if self.ctx.member_repo().email_exists(&request.email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let tag = self.unique_tag(&request.nickname).await?;
        let password_hash = self.ctx.password_service().hash(&request.password)?;

        let mut member = Member::new(self.ctx.generate_id(), request.nickname, tag, request.email);
        member.bio = request.bio;

        self.ctx.member_repo().create(&member, &password_hash).await?;

        info!(member_id = %member.id, "Member registered");

        Ok(MemberResponse::from(member))
    }

    /// Register a guest who applies to `club_id` in the same write
    #[instrument(skip(self, request))]
    pub async fn register_guest(
        &self,
        club_id: Snowflake,
        request: GuestRegisterRequest,
    ) -> ServiceResult<MemberResponse> {
        request.validate()?;

        let auth = AuthorizationChecker::new(self.ctx);
        auth.active_club(club_id).await?;

        if self
            .ctx
            .member_repo()
            .find_guest_in_club(club_id, &request.nickname)
            .await?
            .is_some()
        {
            return Err(DomainError::GuestNicknameTaken.into());
        }

        let tag = self.unique_tag(&request.nickname).await?;
        let password_hash = self.ctx.password_service().hash(&request.password)?;

        let guest = Member::guest(self.ctx.generate_id(), request.nickname, tag);
        let membership = ClubMember::applying(self.ctx.generate_id(), club_id, guest.id);

        self.ctx
            .member_repo()
            .create_guest(&guest, &password_hash, &membership)
            .await?;

        info!(member_id = %guest.id, club_id = %club_id, "Guest registered");

        Ok(MemberResponse::from(guest))
    }

    /// Check email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<MemberResponse> {
        request.validate()?;

        let member = self.ctx.member_repo().find_by_email(&request.email).await?;
        let hash = match &member {
            Some(member) => self.ctx.member_repo().get_password_hash(member.id).await?,
            None => None,
        };

        self.ctx
            .password_service()
            .verify_login(&request.password, hash.as_deref())?;

        let member = member.ok_or(DomainError::InvalidCredentials)?;
        info!(member_id = %member.id, "Member logged in");

        Ok(MemberResponse::from(member))
    }

    /// Check a guest's nickname and password within their club
    #[instrument(skip(self, request))]
    pub async fn login_guest(&self, club_id: Snowflake, request: GuestLoginRequest) -> ServiceResult<MemberResponse> {
        request.validate()?;

        let guest = self
            .ctx
            .member_repo()
            .find_guest_in_club(club_id, &request.nickname)
            .await?;
        let hash = match &guest {
            Some(guest) => self.ctx.member_repo().get_password_hash(guest.id).await?,
            None => None,
        };

        self.ctx
            .password_service()
            .verify_login(&request.password, hash.as_deref())?;

        let guest = guest.ok_or(DomainError::InvalidCredentials)?;
        info!(member_id = %guest.id, club_id = %club_id, "Guest logged in");

        Ok(MemberResponse::from(guest))
    }

    #[instrument(skip(self))]
    pub async fn get_member_info(&self, member_id: Snowflake) -> ServiceResult<MemberResponse> {
        Ok(MemberResponse::from(self.member(member_id).await?))
    }

    /// Look a member up by `nickname#tag`
    #[instrument(skip(self))]
    pub async fn find_by_nickname_and_tag(&self, nickname: &str, tag: &str) -> ServiceResult<MemberSummaryResponse> {
        let member = self
            .ctx
            .member_repo()
            .find_by_nickname_and_tag(nickname, tag)
            .await?
            .ok_or_else(|| ServiceError::not_found("Member", format!("{nickname}#{tag}")))?;

        Ok(MemberSummaryResponse::from(&member))
    }

    /// Update own profile; a new nickname gets a new tag
    #[instrument(skip(self, request))]
    pub async fn update_member_info(
        &self,
        member_id: Snowflake,
        request: UpdateMemberRequest,
    ) -> ServiceResult<MemberResponse> {
        request.validate()?;

        let mut member = self.member(member_id).await?;

        if let Some(nickname) = request.nickname {
            if nickname != member.nickname {
                let tag = self.unique_tag(&nickname).await?;
                member.rename(nickname, tag);
            }
        }
        if let Some(bio) = request.bio {
            member.set_bio(Some(bio));
        }
        self.ctx.member_repo().update(&member).await?;

        if let Some(password) = request.password {
            if !member.is_guest() {
                validate_password_strength(&password)?;
            }
            let password_hash = self.ctx.password_service().hash(&password)?;
            self.ctx.member_repo().update_password(member_id, &password_hash).await?;
            info!(member_id = %member_id, "Password changed");
        }

        info!(member_id = %member_id, "Member updated");

        Ok(MemberResponse::from(member))
    }

    /// Whether `password` matches the stored hash
    #[instrument(skip(self, password))]
    pub async fn check_password(&self, member_id: Snowflake, password: &str) -> ServiceResult<bool> {
        let hash = self
            .ctx
            .member_repo()
            .get_password_hash(member_id)
            .await?
            .ok_or(DomainError::MemberNotFound(member_id))?;

        Ok(self.ctx.password_service().verify(password, &hash)?)
    }

    /// Delete the account with its memberships, friendships and assignments.
    ///
    /// A member still leading an active club must hand it over or delete it
    /// first.
    #[instrument(skip(self))]
    pub async fn withdraw_member(&self, member_id: Snowflake) -> ServiceResult<()> {
        self.member(member_id).await?;

        let led = self.ctx.club_repo().find_active_by_leader(member_id).await?;
        if !led.is_empty() {
            return Err(DomainError::MemberLeadsClub.into());
        }

        self.ctx.member_repo().delete(member_id).await?;

        info!(member_id = %member_id, "Member withdrawn");

        Ok(())
    }
}
