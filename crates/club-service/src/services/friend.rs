//! Friend service
//!
//! Friend requests between members. One row per unordered pair; the
//! receiving side answers, either side of an accepted friendship may end it.

use club_core::entities::Friend;
use club_core::value_objects::FriendStatus;
use club_core::{friend_pair, DomainError, Snowflake};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{FriendFilter, FriendRequest, FriendResponse, FriendView};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Friend service
pub struct FriendService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FriendService<'a> {
    /// Create a new FriendService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn friendship(&self, friend_id: Snowflake, actor: Snowflake) -> ServiceResult<Friend> {
        let friend = self
            .ctx
            .friend_repo()
            .find_by_id(friend_id)
            .await?
            .ok_or(DomainError::FriendNotFound(friend_id))?;
        if !friend.involves(actor) {
            return Err(DomainError::NotFriendParticipant.into());
        }
        Ok(friend)
    }

    /// Pending request the actor received
    async fn incoming(&self, friend_id: Snowflake, actor: Snowflake) -> ServiceResult<Friend> {
        let friend = self.friendship(friend_id, actor).await?;
        if friend.is_requester(actor) {
            return Err(DomainError::NotFriendRequestRecipient.into());
        }
        if friend.status != FriendStatus::Pending {
            return Err(DomainError::FriendRequestNotPending.into());
        }
        Ok(friend)
    }

    /// Send a friend request to the member registered under `email`
    #[instrument(skip(self, request))]
    pub async fn request(&self, actor: Snowflake, request: FriendRequest) -> ServiceResult<FriendResponse> {
        request.validate()?;

        let target = self
            .ctx
            .member_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| DomainError::MemberEmailNotFound(request.email.clone()))?;
        if target.id == actor {
            return Err(DomainError::CannotFriendSelf.into());
        }

        let (low, high) = friend_pair(actor, target.id);
        if let Some(existing) = self.ctx.friend_repo().find_pair(low, high).await? {
            let err = match existing.status {
                FriendStatus::Pending if existing.is_requester(actor) => DomainError::FriendRequestAlreadySent,
                FriendStatus::Pending => DomainError::FriendRequestAlreadyReceived,
                FriendStatus::Accepted => DomainError::AlreadyFriends,
                FriendStatus::Rejected => DomainError::FriendRequestRejected,
            };
            return Err(err.into());
        }

        let friend = Friend::request(self.ctx.generate_id(), actor, target.id);
        self.ctx.friend_repo().create(&friend).await?;

        info!(friend_id = %friend.id, from = %actor, to = %target.id, "Friend request sent");

        Ok(FriendResponse::from(FriendView {
            friend: &friend,
            actor,
            other: &target,
        }))
    }

    #[instrument(skip(self))]
    pub async fn accept(&self, actor: Snowflake, friend_id: Snowflake) -> ServiceResult<()> {
        let mut friend = self.incoming(friend_id, actor).await?;
        friend.set_status(FriendStatus::Accepted);
        self.ctx.friend_repo().update(&friend).await?;

        info!(friend_id = %friend_id, "Friend request accepted");

        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn reject(&self, actor: Snowflake, friend_id: Snowflake) -> ServiceResult<()> {
        let mut friend = self.incoming(friend_id, actor).await?;
        friend.set_status(FriendStatus::Rejected);
        self.ctx.friend_repo().update(&friend).await?;

        info!(friend_id = %friend_id, "Friend request rejected");

        Ok(())
    }

    /// End an accepted friendship
    #[instrument(skip(self))]
    pub async fn delete(&self, actor: Snowflake, friend_id: Snowflake) -> ServiceResult<()> {
        let friend = self.friendship(friend_id, actor).await?;
        if friend.status != FriendStatus::Accepted {
            return Err(DomainError::NotFriends.into());
        }

        self.ctx.friend_repo().delete(friend_id).await?;

        info!(friend_id = %friend_id, "Friendship ended");

        Ok(())
    }

    /// Friendships of the actor, sorted by the other member's nickname
    #[instrument(skip(self))]
    pub async fn list(&self, actor: Snowflake, filter: FriendFilter) -> ServiceResult<Vec<FriendResponse>> {
        let friends: Vec<Friend> = self
            .ctx
            .friend_repo()
            .find_by_member(actor)
            .await?
            .into_iter()
            .filter(|f| match filter {
                FriendFilter::Accepted => f.status == FriendStatus::Accepted,
                FriendFilter::Sent => f.status == FriendStatus::Pending && f.is_requester(actor),
                FriendFilter::Received => f.status == FriendStatus::Pending && !f.is_requester(actor),
                FriendFilter::All => true,
            })
            .collect();

        let others: Vec<Snowflake> = friends.iter().filter_map(|f| f.other(actor)).collect();
        let members = self.ctx.member_repo().find_by_ids(&others).await?;

        let mut responses: Vec<FriendResponse> = friends
            .iter()
            .filter_map(|friend| {
                let other_id = friend.other(actor)?;
                let other = members.iter().find(|m| m.id == other_id)?;
                Some(FriendResponse::from(FriendView { friend, actor, other }))
            })
            .collect();
        responses.sort_by(|a, b| a.member.nickname.cmp(&b.member.nickname));

        Ok(responses)
    }
}
