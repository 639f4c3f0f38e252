//! Response DTOs
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use club_core::value_objects::{
    CheckListItemCategory, ClubCategory, ClubRole, EventType, FriendStatus, MemberState, MemberType,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// Common Response Types
// ============================================================================

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Offset-paginated list
#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    pub data: Vec<T>,
    pub page: i64,
    pub size: i64,
    /// Whether the next page may hold results
    pub has_more: bool,
}

impl<T> PageResponse<T> {
    pub fn new(data: Vec<T>, page: i64, size: i64) -> Self {
        let has_more = data.len() as i64 == size;
        Self {
            data,
            page,
            size,
            has_more,
        }
    }
}

// ============================================================================
// Member Responses
// ============================================================================

/// Member account as seen by its owner
#[derive(Debug, Clone, Serialize)]
pub struct MemberResponse {
    pub id: String,
    pub nickname: String,
    pub tag: String,
    pub member_type: MemberType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Public profile (no email)
#[derive(Debug, Clone, Serialize)]
pub struct MemberSummaryResponse {
    pub id: String,
    pub nickname: String,
    pub tag: String,
}

// ============================================================================
// Club Responses
// ============================================================================

/// Club details
#[derive(Debug, Clone, Serialize)]
pub struct ClubResponse {
    pub id: String,
    pub name: String,
    pub bio: Option<String>,
    pub category: ClubCategory,
    pub main_spot: Option<String>,
    pub capacity: i32,
    pub is_public: bool,
    pub recruiting: bool,
    pub leader_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub event_type: EventType,
    pub created_at: DateTime<Utc>,
}

/// Club details with the JOINING head-count
#[derive(Debug, Clone, Serialize)]
pub struct ClubInfoResponse {
    #[serde(flatten)]
    pub club: ClubResponse,
    pub member_count: i64,
}

/// Membership row joined with the member profile
#[derive(Debug, Clone, Serialize)]
pub struct ClubMemberResponse {
    pub id: String,
    pub member_id: String,
    pub nickname: String,
    pub tag: String,
    pub role: ClubRole,
    pub state: MemberState,
}

/// A club from the actor's point of view
#[derive(Debug, Clone, Serialize)]
pub struct MyClubResponse {
    pub club: ClubResponse,
    pub role: ClubRole,
    pub state: MemberState,
}

// ============================================================================
// Schedule / Checklist Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ScheduleResponse {
    pub id: String,
    pub club_id: String,
    pub title: String,
    pub content: Option<String>,
    pub start_at: NaiveDateTime,
    pub end_at: NaiveDateTime,
    pub spot: Option<String>,
    pub checklist_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemAssignResponse {
    pub id: String,
    pub club_member_id: String,
    pub is_checked: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckListItemResponse {
    pub id: String,
    pub content: String,
    pub category: CheckListItemCategory,
    pub sequence: i32,
    pub is_checked: bool,
    pub assigns: Vec<ItemAssignResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckListResponse {
    pub id: String,
    pub schedule_id: String,
    pub is_active: bool,
    pub items: Vec<CheckListItemResponse>,
}

// ============================================================================
// Preset Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct PresetItemResponse {
    pub id: String,
    pub content: String,
    pub category: CheckListItemCategory,
    pub sequence: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PresetResponse {
    pub id: String,
    pub name: String,
    pub items: Vec<PresetItemResponse>,
}

/// Item of a bundled platform preset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformPresetItem {
    pub content: String,
    pub category: CheckListItemCategory,
    pub sequence: i32,
}

/// Bundled template offered for one club category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformPresetResponse {
    pub name: String,
    pub items: Vec<PlatformPresetItem>,
}

// ============================================================================
// Friend Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct FriendResponse {
    pub id: String,
    /// The other side of the relationship
    pub member: MemberSummaryResponse,
    pub status: FriendStatus,
    /// The actor sent the request
    pub requested_by_me: bool,
}

// ============================================================================
// Invite Link Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ClubLinkResponse {
    pub code: String,
    pub url: String,
    pub expires_at: DateTime<Utc>,
}

/// What an invite link reveals about its club
#[derive(Debug, Clone, Serialize)]
pub struct ClubPreviewResponse {
    pub id: String,
    pub name: String,
    pub bio: Option<String>,
    pub category: ClubCategory,
    pub is_public: bool,
    pub member_count: i64,
}

/// Result of applying through an invite link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplyOutcome {
    Applied,
    AlreadyJoined,
    AlreadyApplying,
    AlreadyInvited,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplyByTokenResponse {
    pub club_id: String,
    pub outcome: ApplyOutcome,
}
