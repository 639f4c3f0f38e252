//! Request DTOs
//!
//! All request DTOs implement `Deserialize` and `Validate` for input
//! validation. Element types of length-checked lists also implement
//! `Serialize`, which validator needs to report the rejected value.
//! Enumerated values arrive as strings and are parsed with the domain
//! `parse` functions, which report unknown literals as validation
//! errors.

use chrono::{NaiveDate, NaiveDateTime};
use club_core::entities::ScheduleFields;
use club_core::value_objects::{CheckListItemCategory, ClubCategory, ClubRole, EventType};
use club_core::{DomainError, Snowflake};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

fn default_page_size() -> i64 {
    20
}

fn no_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

// ============================================================================
// Member Requests
// ============================================================================

/// Member registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,

    #[validate(
        length(min = 1, max = 20, message = "Nickname must be 1-20 characters"),
        custom(function = "no_blank")
    )]
    pub nickname: String,

    #[validate(length(max = 500, message = "Bio must be at most 500 characters"))]
    pub bio: Option<String>,
}

/// Guest joining a single club
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GuestRegisterRequest {
    #[validate(
        length(min = 1, max = 20, message = "Nickname must be 1-20 characters"),
        custom(function = "no_blank")
    )]
    pub nickname: String,

    #[validate(length(min = 4, max = 72, message = "Password must be 4-72 characters"))]
    pub password: String,
}

/// Member login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

/// Guest login request, scoped to the club the guest joined
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GuestLoginRequest {
    #[validate(length(min = 1, max = 20))]
    pub nickname: String,

    pub password: String,
}

/// Update own account; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMemberRequest {
    #[validate(
        length(min = 1, max = 20, message = "Nickname must be 1-20 characters"),
        custom(function = "no_blank")
    )]
    pub nickname: Option<String>,

    #[validate(length(max = 500, message = "Bio must be at most 500 characters"))]
    pub bio: Option<String>,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: Option<String>,
}

// ============================================================================
// Club Requests
// ============================================================================

/// Member to add by email with a role literal
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ClubMemberRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// PARTICIPANT or MANAGER, case-insensitive
    pub role: String,
}

impl ClubMemberRequest {
    pub fn parsed_role(&self) -> Result<ClubRole, DomainError> {
        ClubRole::parse(&self.role)
    }
}

/// Create club request
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_club_dates", skip_on_field_errors = true))]
pub struct CreateClubRequest {
    #[validate(
        length(min = 1, max = 50, message = "Club name must be 1-50 characters"),
        custom(function = "no_blank")
    )]
    pub name: String,

    #[validate(length(max = 1000, message = "Bio must be at most 1000 characters"))]
    pub bio: Option<String>,

    pub category: String,

    #[validate(length(max = 255))]
    pub main_spot: Option<String>,

    #[validate(range(min = 1, max = 1000, message = "Capacity must be 1-1000"))]
    pub capacity: i32,

    #[serde(default)]
    pub is_public: bool,

    pub start_date: NaiveDate,

    pub end_date: NaiveDate,

    pub event_type: String,

    /// Initial members, invited on creation
    #[serde(default)]
    #[validate(nested)]
    pub members: Vec<ClubMemberRequest>,
}

fn validate_club_dates(request: &CreateClubRequest) -> Result<(), ValidationError> {
    if request.start_date > request.end_date {
        return Err(ValidationError::new("start_date_after_end_date"));
    }
    Ok(())
}

impl CreateClubRequest {
    pub fn parsed_category(&self) -> Result<ClubCategory, DomainError> {
        ClubCategory::parse(&self.category)
    }

    pub fn parsed_event_type(&self) -> Result<EventType, DomainError> {
        EventType::parse(&self.event_type)
    }
}

/// Update club request; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateClubRequest {
    #[validate(
        length(min = 1, max = 50, message = "Club name must be 1-50 characters"),
        custom(function = "no_blank")
    )]
    pub name: Option<String>,

    #[validate(length(max = 1000))]
    pub bio: Option<String>,

    pub category: Option<String>,

    #[validate(length(max = 255))]
    pub main_spot: Option<String>,

    #[validate(range(min = 1, max = 1000, message = "Capacity must be 1-1000"))]
    pub capacity: Option<i32>,

    pub is_public: Option<bool>,

    pub recruiting: Option<bool>,

    pub start_date: Option<NaiveDate>,

    pub end_date: Option<NaiveDate>,

    pub event_type: Option<String>,
}

/// Bulk add members request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddMembersRequest {
    #[validate(length(min = 1, max = 100), nested)]
    pub members: Vec<ClubMemberRequest>,
}

/// Role change request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangeRoleRequest {
    pub role: String,
}

/// Public club search
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ClubSearchRequest {
    #[validate(length(max = 50))]
    pub name: Option<String>,

    #[validate(length(max = 255))]
    pub main_spot: Option<String>,

    pub category: Option<String>,

    pub event_type: Option<String>,

    /// Zero-based page
    #[serde(default)]
    #[validate(range(min = 0))]
    pub page: i64,

    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100))]
    pub size: i64,
}

// ============================================================================
// Schedule Requests
// ============================================================================

/// Create or modify a schedule
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ScheduleRequest {
    #[validate(
        length(min = 1, max = 100, message = "Title must be 1-100 characters"),
        custom(function = "no_blank")
    )]
    pub title: String,

    #[validate(length(max = 2000))]
    pub content: Option<String>,

    pub start_at: NaiveDateTime,

    pub end_at: NaiveDateTime,

    #[validate(length(max = 255))]
    pub spot: Option<String>,
}

impl From<ScheduleRequest> for ScheduleFields {
    fn from(request: ScheduleRequest) -> Self {
        Self {
            title: request.title,
            content: request.content,
            start_at: request.start_at,
            end_at: request.end_at,
            spot: request.spot,
        }
    }
}

/// Optional date bounds of a schedule listing
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ScheduleRangeQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

// ============================================================================
// Checklist Requests
// ============================================================================

/// Club member assigned to an item
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ItemAssignRequest {
    pub club_member_id: Snowflake,

    #[serde(default)]
    pub is_checked: bool,
}

/// Checklist line item
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckListItemRequest {
    #[validate(
        length(min = 1, max = 200, message = "Item content must be 1-200 characters"),
        custom(function = "no_blank")
    )]
    pub content: String,

    pub category: String,

    #[serde(default)]
    pub sequence: i32,

    #[serde(default)]
    pub is_checked: bool,

    #[serde(default)]
    #[validate(nested)]
    pub assigns: Vec<ItemAssignRequest>,
}

impl CheckListItemRequest {
    pub fn parsed_category(&self) -> Result<CheckListItemCategory, DomainError> {
        CheckListItemCategory::parse(&self.category)
    }
}

/// Full item set of a checklist; replaces any existing items
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CheckListRequest {
    #[serde(default)]
    #[validate(length(max = 200), nested)]
    pub items: Vec<CheckListItemRequest>,
}

// ============================================================================
// Preset Requests
// ============================================================================

/// Preset line item
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PresetItemRequest {
    #[validate(
        length(min = 1, max = 200, message = "Item content must be 1-200 characters"),
        custom(function = "no_blank")
    )]
    pub content: String,

    pub category: String,

    #[serde(default)]
    pub sequence: i32,
}

impl PresetItemRequest {
    pub fn parsed_category(&self) -> Result<CheckListItemCategory, DomainError> {
        CheckListItemCategory::parse(&self.category)
    }
}

/// Preset name and full item set; an update replaces every item
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PresetRequest {
    #[validate(
        length(min = 1, max = 100, message = "Preset name must be 1-100 characters"),
        custom(function = "no_blank")
    )]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 200), nested)]
    pub items: Vec<PresetItemRequest>,
}

// ============================================================================
// Friend Requests
// ============================================================================

/// Friend request by email
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FriendRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Which side of the friend list to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FriendFilter {
    /// Accepted friendships
    #[default]
    Accepted,
    /// Pending requests the actor sent
    Sent,
    /// Pending requests waiting for the actor
    Received,
    All,
}
