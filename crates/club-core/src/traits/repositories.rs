//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Every method is a single atomic unit: the
//! multi-row operations (club creation, capacity-guarded membership batches,
//! schedule deactivation, checklist writes) must commit all rows or none.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};

use crate::entities::{
    CheckList, CheckListItem, Club, ClubLink, ClubMember, Friend, Member, Preset, Schedule,
};
use crate::error::DomainError;
use crate::value_objects::{ClubCategory, EventType, MemberState, Snowflake};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Member Repository
// ============================================================================

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Find member by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Member>>;

    /// Find members by ID (unknown ids are skipped)
    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<Member>>;

    /// Find registered member by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Member>>;

    /// Find registered members for a set of emails (unknown emails are skipped)
    async fn find_by_emails(&self, emails: &[String]) -> RepoResult<Vec<Member>>;

    /// Find member by nickname and tag
    async fn find_by_nickname_and_tag(&self, nickname: &str, tag: &str) -> RepoResult<Option<Member>>;

    /// Find a guest of the given club by nickname
    async fn find_guest_in_club(&self, club_id: Snowflake, nickname: &str) -> RepoResult<Option<Member>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Check if nickname + tag combination is taken
    async fn tag_exists(&self, nickname: &str, tag: &str) -> RepoResult<bool>;

    /// Create a new member
    async fn create(&self, member: &Member, password_hash: &str) -> RepoResult<()>;

    /// Create a guest together with its club membership
    async fn create_guest(
        &self,
        member: &Member,
        password_hash: &str,
        membership: &ClubMember,
    ) -> RepoResult<()>;

    /// Update nickname, tag and bio
    async fn update(&self, member: &Member) -> RepoResult<()>;

    /// Hard delete; memberships, friendships and assignments go with it
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;

    /// Update password hash
    async fn update_password(&self, id: Snowflake, password_hash: &str) -> RepoResult<()>;
}

// ============================================================================
// Club Repository
// ============================================================================

/// Filters for browsing public clubs
#[derive(Debug, Clone, Default)]
pub struct ClubFilter {
    /// Case-insensitive substring of the club name
    pub name: Option<String>,
    /// Case-insensitive substring of the main spot
    pub main_spot: Option<String>,
    pub category: Option<ClubCategory>,
    pub event_type: Option<EventType>,
    pub limit: i64,
    pub offset: i64,
}

impl ClubFilter {
    /// Whether a club satisfies the optional criteria (visibility not included)
    pub fn matches(&self, club: &Club) -> bool {
        fn contains(haystack: Option<&str>, needle: Option<&String>) -> bool {
            match needle {
                None => true,
                Some(needle) => haystack
                    .is_some_and(|h| h.to_lowercase().contains(&needle.to_lowercase())),
            }
        }

        contains(Some(&club.name), self.name.as_ref())
            && contains(club.main_spot.as_deref(), self.main_spot.as_ref())
            && self.category.is_none_or(|c| c == club.category)
            && self.event_type.is_none_or(|e| e == club.event_type)
    }
}

#[async_trait]
pub trait ClubRepository: Send + Sync {
    /// Find club by ID (active or not)
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Club>>;

    /// Active clubs led by the member
    async fn find_active_by_leader(&self, leader_id: Snowflake) -> RepoResult<Vec<Club>>;

    /// Active public clubs matching the filter, newest first
    async fn find_public(&self, filter: &ClubFilter) -> RepoResult<Vec<Club>>;

    /// Create a club together with its initial membership rows
    async fn create(&self, club: &Club, members: &[ClubMember]) -> RepoResult<()>;

    /// Update an existing club (including the active flag)
    async fn update(&self, club: &Club) -> RepoResult<()>;
}

// ============================================================================
// ClubMember Repository
// ============================================================================

#[async_trait]
pub trait ClubMemberRepository: Send + Sync {
    /// Find membership row by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<ClubMember>>;

    /// Find the membership row of a member in a club
    async fn find(&self, club_id: Snowflake, member_id: Snowflake) -> RepoResult<Option<ClubMember>>;

    /// All rows of a club, any state
    async fn find_by_club(&self, club_id: Snowflake) -> RepoResult<Vec<ClubMember>>;

    /// All rows of a member, any state
    async fn find_by_member(&self, member_id: Snowflake) -> RepoResult<Vec<ClubMember>>;

    /// Number of JOINING rows in a club
    async fn count_joining(&self, club_id: Snowflake) -> RepoResult<i64>;

    /// Create a single row
    async fn create(&self, member: &ClubMember) -> RepoResult<()>;

    /// Update role and state of a row
    async fn update(&self, member: &ClubMember) -> RepoResult<()>;

    /// Physically remove a row
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Apply a batch of re-invited and new rows under the club's capacity.
    ///
    /// Implementations serialize concurrent batches per club, then check
    /// `JOINING count + created.len() <= capacity` before writing anything.
    /// Fails with `DomainError::CapacityExceeded` and persists nothing when
    /// the check fails.
    async fn add_within_capacity(
        &self,
        club_id: Snowflake,
        reinvited: &[ClubMember],
        created: &[ClubMember],
    ) -> RepoResult<()>;

    /// Move one row from `from` to JOINING when the club has a free seat.
    ///
    /// Serialized with `add_within_capacity` for the same club. Fails with
    /// `DomainError::CapacityExceeded` when `JOINING count >= capacity`, and
    /// with `DomainError::ClubMemberNotFound` when the row is no longer in
    /// `from`.
    async fn join_within_capacity(
        &self,
        club_id: Snowflake,
        row_id: Snowflake,
        from: MemberState,
    ) -> RepoResult<()>;
}

// ============================================================================
// Schedule Repository
// ============================================================================

#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// Find schedule by ID (active or not), with its checklist reference
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Schedule>>;

    /// Active schedules of a club overlapping `[start, end)`, ordered by start
    async fn find_by_club_in_range(
        &self,
        club_id: Snowflake,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> RepoResult<Vec<Schedule>>;

    /// Active schedules of every club the member is JOINING, ordered by start
    async fn find_by_member_in_range(
        &self,
        member_id: Snowflake,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> RepoResult<Vec<Schedule>>;

    /// Every schedule of a club, active or not
    async fn find_by_club(&self, club_id: Snowflake) -> RepoResult<Vec<Schedule>>;

    /// Most recently created active schedule of a club
    async fn find_latest_by_club(&self, club_id: Snowflake) -> RepoResult<Option<Schedule>>;

    /// Number of active schedules in a club
    async fn count_by_club(&self, club_id: Snowflake) -> RepoResult<i64>;

    /// Create a new schedule
    async fn create(&self, schedule: &Schedule) -> RepoResult<()>;

    /// Update editable fields
    async fn update(&self, schedule: &Schedule) -> RepoResult<()>;

    /// Remove a schedule that has no checklist. One that has a checklist is
    /// deactivated together with it instead, and the checklist row stays.
    ///
    /// The checklist lookup and the write are a single atomic step. Returns
    /// `true` when the row was removed.
    async fn delete_or_deactivate(&self, id: Snowflake) -> RepoResult<bool>;
}

// ============================================================================
// CheckList Repository
// ============================================================================

#[async_trait]
pub trait CheckListRepository: Send + Sync {
    /// Find checklist by ID with items and assignments
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<CheckList>>;

    /// Find the checklist attached to a schedule
    async fn find_by_schedule(&self, schedule_id: Snowflake) -> RepoResult<Option<CheckList>>;

    /// Insert checklist, items and assignments.
    ///
    /// Fails with `DomainError::CheckListAlreadyExists` if the schedule
    /// already owns a checklist.
    async fn create(&self, checklist: &CheckList) -> RepoResult<()>;

    /// Drop every existing item and insert the given ones
    async fn replace_items(&self, checklist_id: Snowflake, items: &[CheckListItem]) -> RepoResult<()>;

    /// Hard delete with items and assignments
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Friend Repository
// ============================================================================

#[async_trait]
pub trait FriendRepository: Send + Sync {
    /// Find relationship by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Friend>>;

    /// Find relationship by canonical pair
    async fn find_pair(&self, low: Snowflake, high: Snowflake) -> RepoResult<Option<Friend>>;

    /// Every relationship involving the member
    async fn find_by_member(&self, member_id: Snowflake) -> RepoResult<Vec<Friend>>;

    /// Create a new relationship
    async fn create(&self, friend: &Friend) -> RepoResult<()>;

    /// Update status
    async fn update(&self, friend: &Friend) -> RepoResult<()>;

    /// Delete relationship
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// ClubLink Repository
// ============================================================================

#[async_trait]
pub trait ClubLinkRepository: Send + Sync {
    /// Find link by code
    async fn find_by_code(&self, code: &str) -> RepoResult<Option<ClubLink>>;

    /// Find a link of the club still valid at `now`
    async fn find_valid_by_club(
        &self,
        club_id: Snowflake,
        now: DateTime<Utc>,
    ) -> RepoResult<Option<ClubLink>>;

    /// Create a new link
    async fn create(&self, link: &ClubLink) -> RepoResult<()>;
}

// ============================================================================
// Preset Repository
// ============================================================================

#[async_trait]
pub trait PresetRepository: Send + Sync {
    /// Find preset by ID, with items
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Preset>>;

    /// Every preset of the owner, oldest first
    async fn find_by_owner(&self, owner_id: Snowflake) -> RepoResult<Vec<Preset>>;

    /// Create a preset and its items
    async fn create(&self, preset: &Preset) -> RepoResult<()>;

    /// Store the name and replace every item of an existing preset
    async fn update(&self, preset: &Preset) -> RepoResult<()>;

    /// Delete a preset and its items
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}
