//! Club service
//!
//! Handles club creation, management, and queries.

use std::collections::HashMap;

use club_core::entities::{Club, ClubMember};
use club_core::traits::ClubFilter;
use club_core::value_objects::{ClubCategory, ClubRole, EventType, MemberState};
use club_core::{DomainError, Snowflake};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{
    ClubInfoResponse, ClubMemberRequest, ClubMemberResponse, ClubMemberWithProfile, ClubResponse,
    ClubSearchRequest, ClubWithCount, CreateClubRequest, PageResponse, UpdateClubRequest,
};

use super::authorization::AuthorizationChecker;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// De-duplicate requested members by email, keeping the last role given for
/// each address and the position of its first appearance.
pub(crate) fn dedupe_by_email(members: &[ClubMemberRequest]) -> Result<Vec<(String, ClubRole)>, DomainError> {
    let mut order: Vec<(String, ClubRole)> = Vec::with_capacity(members.len());
    let mut index: HashMap<String, usize> = HashMap::new();

    for request in members {
        let role = request.parsed_role()?;
        if !role.is_assignable() {
            return Err(DomainError::HostRoleNotAssignable);
        }
        let email = request.email.trim().to_string();
        match index.get(&email) {
            Some(&i) => order[i].1 = role,
            None => {
                index.insert(email.clone(), order.len());
                order.push((email, role));
            }
        }
    }

    Ok(order)
}

/// Club service
pub struct ClubService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ClubService<'a> {
    /// Create a new ClubService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a club led by `founder`.
    ///
    /// The founder gets the HOST row; listed members are invited with their
    /// requested role. The club and every row are written together.
    #[instrument(skip(self, request))]
    pub async fn create_club(
        &self,
        founder: Snowflake,
        request: CreateClubRequest,
    ) -> ServiceResult<ClubInfoResponse> {
        request.validate()?;
        let category = request.parsed_category()?;
        let event_type = request.parsed_event_type()?;
        let invites = dedupe_by_email(&request.members)?;

        self.ctx
            .member_repo()
            .find_by_id(founder)
            .await?
            .ok_or(DomainError::MemberNotFound(founder))?;

        let emails: Vec<String> = invites.iter().map(|(email, _)| email.clone()).collect();
        let found = self.ctx.member_repo().find_by_emails(&emails).await?;

        let club_id = self.ctx.generate_id();
        let mut rows = vec![ClubMember::host(self.ctx.generate_id(), club_id, founder)];
        for (email, role) in invites {
            let member = found
                .iter()
                .find(|m| m.email.as_deref() == Some(email.as_str()))
                .ok_or_else(|| DomainError::MemberEmailNotFound(email.clone()))?;
            if member.id == founder {
                continue;
            }
            rows.push(ClubMember::invited(self.ctx.generate_id(), club_id, member.id, role));
        }

        // host row plus every invite must fit
        if rows.len() as i64 > i64::from(request.capacity) {
            return Err(DomainError::CapacityExceeded {
                capacity: request.capacity,
            }
            .into());
        }

        let mut club = Club::new(
            club_id,
            request.name,
            category,
            request.capacity,
            request.is_public,
            founder,
            request.start_date,
            request.end_date,
            event_type,
        );
        club.bio = request.bio;
        club.main_spot = request.main_spot;

        self.ctx.club_repo().create(&club, &rows).await?;

        info!(club_id = %club_id, founder = %founder, invited = rows.len() - 1, "Club created");

        Ok(ClubInfoResponse::from(ClubWithCount {
            club,
            member_count: 1,
        }))
    }

    /// Update club settings; absent fields are left untouched
    #[instrument(skip(self, request))]
    pub async fn update_club(
        &self,
        club_id: Snowflake,
        actor: Snowflake,
        request: UpdateClubRequest,
    ) -> ServiceResult<ClubInfoResponse> {
        request.validate()?;

        let auth = AuthorizationChecker::new(self.ctx);
        let mut club = auth.require_active_club_host(club_id, actor).await?;
        let joining = self.ctx.club_member_repo().count_joining(club_id).await?;

        if let Some(name) = request.name {
            club.name = name;
        }
        if let Some(bio) = request.bio {
            club.bio = Some(bio);
        }
        if let Some(category) = request.category {
            club.category = ClubCategory::parse(&category)?;
        }
        if let Some(main_spot) = request.main_spot {
            club.main_spot = Some(main_spot);
        }
        if let Some(capacity) = request.capacity {
            if i64::from(capacity) < joining {
                return Err(DomainError::CapacityBelowMembers { joining }.into());
            }
            club.capacity = capacity;
        }
        if let Some(is_public) = request.is_public {
            club.is_public = is_public;
        }
        if let Some(recruiting) = request.recruiting {
            club.recruiting = recruiting;
        }
        if let Some(start_date) = request.start_date {
            club.start_date = start_date;
        }
        if let Some(end_date) = request.end_date {
            club.end_date = end_date;
        }
        if let Some(event_type) = request.event_type {
            club.event_type = EventType::parse(&event_type)?;
        }
        if club.start_date > club.end_date {
            return Err(DomainError::InvalidDateRange.into());
        }

        club.touch();
        self.ctx.club_repo().update(&club).await?;

        info!(club_id = %club_id, "Club updated");

        Ok(ClubInfoResponse::from(ClubWithCount {
            club,
            member_count: joining,
        }))
    }

    /// Soft delete a club
    #[instrument(skip(self))]
    pub async fn delete_club(&self, club_id: Snowflake, actor: Snowflake) -> ServiceResult<()> {
        let auth = AuthorizationChecker::new(self.ctx);
        let mut club = auth.require_active_club_host(club_id, actor).await?;

        club.deactivate();
        self.ctx.club_repo().update(&club).await?;

        info!(club_id = %club_id, "Club deactivated");

        Ok(())
    }

    /// Club details with the JOINING head-count.
    ///
    /// Private clubs are only visible to their JOINING members.
    #[instrument(skip(self))]
    pub async fn get_club_info(
        &self,
        club_id: Snowflake,
        actor: Option<Snowflake>,
    ) -> ServiceResult<ClubInfoResponse> {
        let auth = AuthorizationChecker::new(self.ctx);
        let club = auth.active_club(club_id).await?;

        if !club.is_public {
            let visible = match actor {
                Some(actor) => auth.is_club_member(club_id, actor).await?,
                None => false,
            };
            if !visible {
                return Err(DomainError::PrivateClub.into());
            }
        }

        let member_count = self.ctx.club_member_repo().count_joining(club_id).await?;

        Ok(ClubInfoResponse::from(ClubWithCount { club, member_count }))
    }

    /// Browse active public clubs, newest first
    #[instrument(skip(self, request))]
    pub async fn list_public_clubs(
        &self,
        request: ClubSearchRequest,
    ) -> ServiceResult<PageResponse<ClubResponse>> {
        request.validate()?;

        let filter = ClubFilter {
            name: request.name,
            main_spot: request.main_spot,
            category: request.category.as_deref().map(ClubCategory::parse).transpose()?,
            event_type: request.event_type.as_deref().map(EventType::parse).transpose()?,
            limit: request.size,
            offset: request.page * request.size,
        };

        let clubs = self.ctx.club_repo().find_public(&filter).await?;
        let data = clubs.iter().map(ClubResponse::from).collect();

        Ok(PageResponse::new(data, request.page, request.size))
    }

    /// Club roster; WITHDRAWN rows are never listed
    #[instrument(skip(self))]
    pub async fn get_club_members(
        &self,
        club_id: Snowflake,
        actor: Snowflake,
        state: Option<MemberState>,
    ) -> ServiceResult<Vec<ClubMemberResponse>> {
        let auth = AuthorizationChecker::new(self.ctx);
        auth.require_club_member(club_id, actor).await?;

        let rows: Vec<ClubMember> = self
            .ctx
            .club_member_repo()
            .find_by_club(club_id)
            .await?
            .into_iter()
            .filter(|row| row.state.is_listed() && state.is_none_or(|s| s == row.state))
            .collect();

        let ids: Vec<Snowflake> = rows.iter().map(|row| row.member_id).collect();
        let members = self.ctx.member_repo().find_by_ids(&ids).await?;

        Ok(rows
            .iter()
            .filter_map(|membership| {
                let member = members.iter().find(|m| m.id == membership.member_id)?;
                Some(ClubMemberResponse::from(ClubMemberWithProfile { membership, member }))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{context, seed_club, seed_member, seed_row};
    use chrono::Duration;
    use club_core::ErrorKind;

    fn create_request(ctx: &ServiceContext, capacity: i32, members: Vec<ClubMemberRequest>) -> CreateClubRequest {
        let today = ctx.today();
        CreateClubRequest {
            name: "Morning Runners".to_string(),
            bio: Some("5k every weekday".to_string()),
            category: "sports".to_string(),
            main_spot: Some("Riverside".to_string()),
            capacity,
            is_public: true,
            start_date: today,
            end_date: today + Duration::days(90),
            event_type: "LONG_TERM".to_string(),
            members,
        }
    }

    fn invite(email: &str, role: &str) -> ClubMemberRequest {
        ClubMemberRequest {
            email: email.to_string(),
            role: role.to_string(),
        }
    }

    #[test]
    fn test_dedupe_keeps_last_role() {
        let deduped = dedupe_by_email(&[
            invite("a@example.com", "PARTICIPANT"),
            invite("b@example.com", "PARTICIPANT"),
            invite("a@example.com", "MANAGER"),
        ])
        .unwrap();
        assert_eq!(
            deduped,
            vec![
                ("a@example.com".to_string(), ClubRole::Manager),
                ("b@example.com".to_string(), ClubRole::Participant),
            ]
        );
    }

    #[test]
    fn test_dedupe_rejects_host() {
        let err = dedupe_by_email(&[invite("a@example.com", "host")]).unwrap_err();
        assert!(matches!(err, DomainError::HostRoleNotAssignable));
    }

    #[tokio::test]
    async fn test_create_club_with_invites() {
        let ctx = context();
        let founder = seed_member(&ctx, "founder").await;
        let friend = seed_member(&ctx, "friend").await;

        let service = ClubService::new(&ctx);
        let response = service
            .create_club(
                founder.id,
                create_request(
                    &ctx,
                    10,
                    vec![
                        invite("friend@example.com", "MANAGER"),
                        invite("founder@example.com", "PARTICIPANT"),
                    ],
                ),
            )
            .await
            .unwrap();
        assert_eq!(response.member_count, 1);
        assert_eq!(response.club.leader_id, founder.id.to_string());

        let club_id: Snowflake = response.club.id.parse().unwrap();
        let rows = ctx.club_member_repo().find_by_club(club_id).await.unwrap();
        assert_eq!(rows.len(), 2);

        let host = rows.iter().find(|r| r.member_id == founder.id).unwrap();
        assert_eq!((host.role, host.state), (ClubRole::Host, MemberState::Joining));
        let invited = rows.iter().find(|r| r.member_id == friend.id).unwrap();
        assert_eq!((invited.role, invited.state), (ClubRole::Manager, MemberState::Invited));
    }

    #[tokio::test]
    async fn test_create_club_rejects_unknown_email_and_host_role() {
        let ctx = context();
        let founder = seed_member(&ctx, "founder").await;
        let service = ClubService::new(&ctx);

        let err = service
            .create_club(founder.id, create_request(&ctx, 10, vec![invite("ghost@example.com", "PARTICIPANT")]))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = service
            .create_club(founder.id, create_request(&ctx, 10, vec![invite("founder@example.com", "HOST")]))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_create_club_checks_capacity() {
        let ctx = context();
        let founder = seed_member(&ctx, "founder").await;
        seed_member(&ctx, "one").await;
        seed_member(&ctx, "two").await;

        let err = ClubService::new(&ctx)
            .create_club(
                founder.id,
                create_request(
                    &ctx,
                    2,
                    vec![invite("one@example.com", "PARTICIPANT"), invite("two@example.com", "PARTICIPANT")],
                ),
            )
            .await
            .unwrap_err();
        assert!(matches!(err.as_domain(), Some(DomainError::CapacityExceeded { capacity: 2 })));
    }

    #[tokio::test]
    async fn test_update_club_capacity_floor() {
        let ctx = context();
        let host = seed_member(&ctx, "host").await;
        let other = seed_member(&ctx, "other").await;
        let club = seed_club(&ctx, host.id, 5).await;
        seed_row(&ctx, club.id, other.id, ClubRole::Participant, MemberState::Joining).await;

        let service = ClubService::new(&ctx);
        let err = service
            .update_club(
                club.id,
                host.id,
                UpdateClubRequest {
                    capacity: Some(1),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err.as_domain(), Some(DomainError::CapacityBelowMembers { joining: 2 })));

        let updated = service
            .update_club(
                club.id,
                host.id,
                UpdateClubRequest {
                    name: Some("Renamed".to_string()),
                    capacity: Some(2),
                    recruiting: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.club.name, "Renamed");
        assert_eq!(updated.club.capacity, 2);
        assert!(!updated.club.recruiting);
        assert_eq!(updated.member_count, 2);

        let err = service
            .update_club(club.id, other.id, UpdateClubRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_update_club_rejects_reversed_dates() {
        let ctx = context();
        let host = seed_member(&ctx, "host").await;
        let club = seed_club(&ctx, host.id, 5).await;

        let err = ClubService::new(&ctx)
            .update_club(
                club.id,
                host.id,
                UpdateClubRequest {
                    end_date: Some(club.start_date - Duration::days(1)),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err.as_domain(), Some(DomainError::InvalidDateRange)));
    }

    #[tokio::test]
    async fn test_delete_club_hides_it() {
        let ctx = context();
        let host = seed_member(&ctx, "host").await;
        let club = seed_club(&ctx, host.id, 5).await;

        let service = ClubService::new(&ctx);
        service.delete_club(club.id, host.id).await.unwrap();

        let err = service.get_club_info(club.id, Some(host.id)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        let err = service.delete_club(club.id, host.id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_private_club_visible_to_members_only() {
        let ctx = context();
        let host = seed_member(&ctx, "host").await;
        let outsider = seed_member(&ctx, "outsider").await;
        let mut club = seed_club(&ctx, host.id, 5).await;
        club.is_public = false;
        ctx.club_repo().update(&club).await.unwrap();

        let service = ClubService::new(&ctx);
        assert!(service.get_club_info(club.id, Some(host.id)).await.is_ok());

        let err = service.get_club_info(club.id, Some(outsider.id)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
        let err = service.get_club_info(club.id, None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_list_public_clubs_pages() {
        let ctx = context();
        let host = seed_member(&ctx, "host").await;
        for _ in 0..3 {
            seed_club(&ctx, host.id, 5).await;
        }

        let service = ClubService::new(&ctx);
        let first = service
            .list_public_clubs(ClubSearchRequest {
                name: Some("test".to_string()),
                size: 2,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(first.data.len(), 2);
        assert!(first.has_more);

        let second = service
            .list_public_clubs(ClubSearchRequest {
                page: 1,
                size: 2,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(second.data.len(), 1);
        assert!(!second.has_more);

        let err = service
            .list_public_clubs(ClubSearchRequest {
                category: Some("knitting".to_string()),
                size: 2,
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_get_club_members_skips_withdrawn() {
        let ctx = context();
        let host = seed_member(&ctx, "host").await;
        let invited = seed_member(&ctx, "invited").await;
        let gone = seed_member(&ctx, "gone").await;
        let club = seed_club(&ctx, host.id, 5).await;
        seed_row(&ctx, club.id, invited.id, ClubRole::Participant, MemberState::Invited).await;
        seed_row(&ctx, club.id, gone.id, ClubRole::Participant, MemberState::Withdrawn).await;

        let service = ClubService::new(&ctx);
        let all = service.get_club_members(club.id, host.id, None).await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|m| m.member_id != gone.id.to_string()));

        let pending = service
            .get_club_members(club.id, host.id, Some(MemberState::Invited))
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].nickname, "invited");

        let err = service.get_club_members(club.id, invited.id, None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
    }
}
