//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use club_core::entities::{
    CheckList, CheckListItem, Club, ClubLink, ClubMember, Friend, ItemAssign, Member, Preset,
    PresetItem, Schedule,
};
use club_core::Snowflake;

use super::responses::{
    CheckListItemResponse, CheckListResponse, ClubInfoResponse, ClubLinkResponse, ClubMemberResponse,
    ClubPreviewResponse, ClubResponse, FriendResponse, ItemAssignResponse, MemberResponse,
    MemberSummaryResponse, MyClubResponse, PresetItemResponse, PresetResponse, ScheduleResponse,
};

// ============================================================================
// Member Mappers
// ============================================================================

impl From<&Member> for MemberResponse {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id.to_string(),
            nickname: member.nickname.clone(),
            tag: member.tag.clone(),
            member_type: member.member_type,
            email: member.email.clone(),
            bio: member.bio.clone(),
            created_at: member.created_at,
        }
    }
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self::from(&member)
    }
}

impl From<&Member> for MemberSummaryResponse {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id.to_string(),
            nickname: member.nickname.clone(),
            tag: member.tag.clone(),
        }
    }
}

// ============================================================================
// Club Mappers
// ============================================================================

impl From<&Club> for ClubResponse {
    fn from(club: &Club) -> Self {
        Self {
            id: club.id.to_string(),
            name: club.name.clone(),
            bio: club.bio.clone(),
            category: club.category,
            main_spot: club.main_spot.clone(),
            capacity: club.capacity,
            is_public: club.is_public,
            recruiting: club.recruiting,
            leader_id: club.leader_id.to_string(),
            start_date: club.start_date,
            end_date: club.end_date,
            event_type: club.event_type,
            created_at: club.created_at,
        }
    }
}

impl From<Club> for ClubResponse {
    fn from(club: Club) -> Self {
        Self::from(&club)
    }
}

/// Club with its JOINING head-count
#[derive(Debug)]
pub struct ClubWithCount {
    pub club: Club,
    pub member_count: i64,
}

impl From<ClubWithCount> for ClubInfoResponse {
    fn from(data: ClubWithCount) -> Self {
        Self {
            club: ClubResponse::from(&data.club),
            member_count: data.member_count,
        }
    }
}

impl From<ClubWithCount> for ClubPreviewResponse {
    fn from(data: ClubWithCount) -> Self {
        Self {
            id: data.club.id.to_string(),
            name: data.club.name,
            bio: data.club.bio,
            category: data.club.category,
            is_public: data.club.is_public,
            member_count: data.member_count,
        }
    }
}

/// Membership row with the member profile
#[derive(Debug)]
pub struct ClubMemberWithProfile<'a> {
    pub membership: &'a ClubMember,
    pub member: &'a Member,
}

impl From<ClubMemberWithProfile<'_>> for ClubMemberResponse {
    fn from(data: ClubMemberWithProfile<'_>) -> Self {
        Self {
            id: data.membership.id.to_string(),
            member_id: data.member.id.to_string(),
            nickname: data.member.nickname.clone(),
            tag: data.member.tag.clone(),
            role: data.membership.role,
            state: data.membership.state,
        }
    }
}

impl From<(&Club, &ClubMember)> for MyClubResponse {
    fn from((club, membership): (&Club, &ClubMember)) -> Self {
        Self {
            club: ClubResponse::from(club),
            role: membership.role,
            state: membership.state,
        }
    }
}

// ============================================================================
// Schedule / Checklist Mappers
// ============================================================================

impl From<&Schedule> for ScheduleResponse {
    fn from(schedule: &Schedule) -> Self {
        Self {
            id: schedule.id.to_string(),
            club_id: schedule.club_id.to_string(),
            title: schedule.title.clone(),
            content: schedule.content.clone(),
            start_at: schedule.start_at,
            end_at: schedule.end_at,
            spot: schedule.spot.clone(),
            checklist_id: schedule.checklist_id.map(|id| id.to_string()),
        }
    }
}

impl From<Schedule> for ScheduleResponse {
    fn from(schedule: Schedule) -> Self {
        Self::from(&schedule)
    }
}

impl From<&ItemAssign> for ItemAssignResponse {
    fn from(assign: &ItemAssign) -> Self {
        Self {
            id: assign.id.to_string(),
            club_member_id: assign.club_member_id.to_string(),
            is_checked: assign.is_checked,
        }
    }
}

impl From<&CheckListItem> for CheckListItemResponse {
    fn from(item: &CheckListItem) -> Self {
        Self {
            id: item.id.to_string(),
            content: item.content.clone(),
            category: item.category,
            sequence: item.sequence,
            is_checked: item.is_checked,
            assigns: item.assigns.iter().map(ItemAssignResponse::from).collect(),
        }
    }
}

impl From<&CheckList> for CheckListResponse {
    fn from(checklist: &CheckList) -> Self {
        Self {
            id: checklist.id.to_string(),
            schedule_id: checklist.schedule_id.to_string(),
            is_active: checklist.is_active,
            items: checklist.items.iter().map(CheckListItemResponse::from).collect(),
        }
    }
}

impl From<CheckList> for CheckListResponse {
    fn from(checklist: CheckList) -> Self {
        Self::from(&checklist)
    }
}

// ============================================================================
// Preset Mappers
// ============================================================================

impl From<&PresetItem> for PresetItemResponse {
    fn from(item: &PresetItem) -> Self {
        Self {
            id: item.id.to_string(),
            content: item.content.clone(),
            category: item.category,
            sequence: item.sequence,
        }
    }
}

impl From<&Preset> for PresetResponse {
    fn from(preset: &Preset) -> Self {
        Self {
            id: preset.id.to_string(),
            name: preset.name.clone(),
            items: preset.items.iter().map(PresetItemResponse::from).collect(),
        }
    }
}

impl From<Preset> for PresetResponse {
    fn from(preset: Preset) -> Self {
        Self::from(&preset)
    }
}

// ============================================================================
// Friend / Link Mappers
// ============================================================================

/// Friendship seen from one side
#[derive(Debug)]
pub struct FriendView<'a> {
    pub friend: &'a Friend,
    pub actor: Snowflake,
    pub other: &'a Member,
}

impl From<FriendView<'_>> for FriendResponse {
    fn from(view: FriendView<'_>) -> Self {
        Self {
            id: view.friend.id.to_string(),
            member: MemberSummaryResponse::from(view.other),
            status: view.friend.status,
            requested_by_me: view.friend.is_requester(view.actor),
        }
    }
}

/// Link response needs the configured base URL
pub fn club_link_response(link: &ClubLink, base_url: &str) -> ClubLinkResponse {
    ClubLinkResponse {
        code: link.code.clone(),
        url: link.url(base_url),
        expires_at: link.expires_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use club_core::value_objects::ClubRole;

    #[test]
    fn test_ids_are_strings() {
        let member = Member::new(
            Snowflake::new(123_456_789_012),
            "runner".to_string(),
            "a1b2c3".to_string(),
            "r@example.com".to_string(),
        );
        let response = MemberResponse::from(&member);
        assert_eq!(response.id, "123456789012");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["id"], "123456789012");
        assert_eq!(json["member_type"], "MEMBER");
    }

    #[test]
    fn test_club_member_profile_mapping() {
        let member = Member::guest(Snowflake::new(5), "guest".to_string(), "zzzzzz".to_string());
        let row = ClubMember::invited(Snowflake::new(9), Snowflake::new(1), member.id, ClubRole::Manager);
        let response = ClubMemberResponse::from(ClubMemberWithProfile {
            membership: &row,
            member: &member,
        });
        assert_eq!(response.id, "9");
        assert_eq!(response.member_id, "5");
        assert_eq!(response.role, ClubRole::Manager);
    }
}
