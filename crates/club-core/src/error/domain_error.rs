//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Coarse classification callers map to external responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    Forbidden,
    Conflict,
    Validation,
    Unauthorized,
    Internal,
}

impl ErrorKind {
    /// HTTP status conventionally used for this kind
    pub fn status_code(self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::Forbidden => 403,
            Self::Conflict => 409,
            Self::Validation => 400,
            Self::Unauthorized => 401,
            Self::Internal => 500,
        }
    }
}

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Member not found: {0}")]
    MemberNotFound(Snowflake),

    #[error("No member registered with email: {0}")]
    MemberEmailNotFound(String),

    #[error("Club not found: {0}")]
    ClubNotFound(Snowflake),

    #[error("Club membership not found")]
    ClubMemberNotFound,

    #[error("Schedule not found: {0}")]
    ScheduleNotFound(Snowflake),

    #[error("Checklist not found: {0}")]
    CheckListNotFound(Snowflake),

    #[error("Friend relationship not found: {0}")]
    FriendNotFound(Snowflake),

    #[error("Invite link not found")]
    InviteLinkNotFound,

    #[error("Preset not found: {0}")]
    PresetNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unknown {kind}: {value}")]
    UnknownLiteral { kind: &'static str, value: String },

    #[error("Start must not be after end")]
    InvalidDateRange,

    #[error("HOST role can only be assigned when the club is created")]
    HostRoleNotAssignable,

    #[error("Club member {0} does not belong to this club")]
    ClubMemberNotInClub(Snowflake),

    #[error("Club member {0} is assigned to the same item twice")]
    DuplicateAssignee(Snowflake),

    #[error("Cannot send a friend request to yourself")]
    CannotFriendSelf,

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not a member of this club")]
    NotClubMember,

    #[error("Not the host of this club")]
    NotClubHost,

    #[error("Requires club manager or host")]
    NotClubManagerOrHost,

    #[error("Club is private")]
    PrivateClub,

    #[error("Only the receiving member can respond to this friend request")]
    NotFriendRequestRecipient,

    #[error("Not part of this friend relationship")]
    NotFriendParticipant,

    #[error("Preset belongs to another member")]
    NotPresetOwner,

    #[error("Invalid credentials")]
    InvalidCredentials,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Guest nickname already used in this club")]
    GuestNicknameTaken,

    #[error("Already joined this club")]
    AlreadyJoined,

    #[error("Already applying to this club")]
    AlreadyApplying,

    #[error("Already invited to this club, accept the invitation instead")]
    AlreadyInvited,

    #[error("Not applying to this club")]
    NotApplying,

    #[error("Not invited to this club")]
    NotInvited,

    #[error("Club capacity of {capacity} would be exceeded")]
    CapacityExceeded { capacity: i32 },

    #[error("Capacity cannot be lower than the {joining} current members")]
    CapacityBelowMembers { joining: i64 },

    #[error("Host cannot withdraw from the club")]
    HostCannotWithdraw,

    #[error("Member still leads an active club")]
    MemberLeadsClub,

    #[error("Cannot change your own role")]
    CannotChangeOwnRole,

    #[error("Schedule already has a checklist")]
    CheckListAlreadyExists,

    #[error("Schedule is linked to a different checklist")]
    CheckListMismatch,

    #[error("Friend request already sent")]
    FriendRequestAlreadySent,

    #[error("Friend request already received from this member")]
    FriendRequestAlreadyReceived,

    #[error("Already friends")]
    AlreadyFriends,

    #[error("Friend request was rejected")]
    FriendRequestRejected,

    #[error("Friend request is not pending")]
    FriendRequestNotPending,

    #[error("Not friends")]
    NotFriends,

    #[error("Invite link has expired")]
    InviteLinkExpired,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::MemberNotFound(_) | Self::MemberEmailNotFound(_) => "UNKNOWN_MEMBER",
            Self::ClubNotFound(_) => "UNKNOWN_CLUB",
            Self::ClubMemberNotFound => "UNKNOWN_CLUB_MEMBER",
            Self::ScheduleNotFound(_) => "UNKNOWN_SCHEDULE",
            Self::CheckListNotFound(_) => "UNKNOWN_CHECKLIST",
            Self::FriendNotFound(_) => "UNKNOWN_FRIEND",
            Self::InviteLinkNotFound => "UNKNOWN_INVITE_LINK",
            Self::PresetNotFound(_) => "UNKNOWN_PRESET",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::UnknownLiteral { .. } => "UNKNOWN_LITERAL",
            Self::InvalidDateRange => "INVALID_DATE_RANGE",
            Self::HostRoleNotAssignable => "HOST_ROLE_NOT_ASSIGNABLE",
            Self::ClubMemberNotInClub(_) => "CLUB_MEMBER_NOT_IN_CLUB",
            Self::DuplicateAssignee(_) => "DUPLICATE_ASSIGNEE",
            Self::CannotFriendSelf => "CANNOT_FRIEND_SELF",
            Self::WeakPassword(_) => "WEAK_PASSWORD",

            // Authorization
            Self::NotClubMember => "NOT_CLUB_MEMBER",
            Self::NotClubHost => "NOT_CLUB_HOST",
            Self::NotClubManagerOrHost => "NOT_CLUB_MANAGER_OR_HOST",
            Self::PrivateClub => "PRIVATE_CLUB",
            Self::NotFriendRequestRecipient => "NOT_FRIEND_REQUEST_RECIPIENT",
            Self::NotFriendParticipant => "NOT_FRIEND_PARTICIPANT",
            Self::NotPresetOwner => "NOT_PRESET_OWNER",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::GuestNicknameTaken => "GUEST_NICKNAME_TAKEN",
            Self::AlreadyJoined => "ALREADY_JOINED",
            Self::AlreadyApplying => "ALREADY_APPLYING",
            Self::AlreadyInvited => "ALREADY_INVITED",
            Self::NotApplying => "NOT_APPLYING",
            Self::NotInvited => "NOT_INVITED",
            Self::CapacityExceeded { .. } => "CAPACITY_EXCEEDED",
            Self::CapacityBelowMembers { .. } => "CAPACITY_BELOW_MEMBERS",
            Self::HostCannotWithdraw => "HOST_CANNOT_WITHDRAW",
            Self::MemberLeadsClub => "MEMBER_LEADS_CLUB",
            Self::CannotChangeOwnRole => "CANNOT_CHANGE_OWN_ROLE",
            Self::CheckListAlreadyExists => "CHECKLIST_ALREADY_EXISTS",
            Self::CheckListMismatch => "CHECKLIST_MISMATCH",
            Self::FriendRequestAlreadySent => "FRIEND_REQUEST_ALREADY_SENT",
            Self::FriendRequestAlreadyReceived => "FRIEND_REQUEST_ALREADY_RECEIVED",
            Self::AlreadyFriends => "ALREADY_FRIENDS",
            Self::FriendRequestRejected => "FRIEND_REQUEST_REJECTED",
            Self::FriendRequestNotPending => "FRIEND_REQUEST_NOT_PENDING",
            Self::NotFriends => "NOT_FRIENDS",
            Self::InviteLinkExpired => "INVITE_LINK_EXPIRED",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MemberNotFound(_)
            | Self::MemberEmailNotFound(_)
            | Self::ClubNotFound(_)
            | Self::ClubMemberNotFound
            | Self::ScheduleNotFound(_)
            | Self::CheckListNotFound(_)
            | Self::FriendNotFound(_)
            | Self::InviteLinkNotFound
            | Self::PresetNotFound(_) => ErrorKind::NotFound,

            Self::ValidationError(_)
            | Self::UnknownLiteral { .. }
            | Self::InvalidDateRange
            | Self::HostRoleNotAssignable
            | Self::ClubMemberNotInClub(_)
            | Self::DuplicateAssignee(_)
            | Self::CannotFriendSelf
            | Self::WeakPassword(_) => ErrorKind::Validation,

            Self::NotClubMember
            | Self::NotClubHost
            | Self::NotClubManagerOrHost
            | Self::PrivateClub
            | Self::NotFriendRequestRecipient
            | Self::NotFriendParticipant
            | Self::NotPresetOwner => ErrorKind::Forbidden,

            Self::InvalidCredentials => ErrorKind::Unauthorized,

            Self::EmailAlreadyExists
            | Self::GuestNicknameTaken
            | Self::AlreadyJoined
            | Self::AlreadyApplying
            | Self::AlreadyInvited
            | Self::NotApplying
            | Self::NotInvited
            | Self::CapacityExceeded { .. }
            | Self::CapacityBelowMembers { .. }
            | Self::HostCannotWithdraw
            | Self::MemberLeadsClub
            | Self::CannotChangeOwnRole
            | Self::CheckListAlreadyExists
            | Self::CheckListMismatch
            | Self::FriendRequestAlreadySent
            | Self::FriendRequestAlreadyReceived
            | Self::AlreadyFriends
            | Self::FriendRequestRejected
            | Self::FriendRequestNotPending
            | Self::NotFriends
            | Self::InviteLinkExpired => ErrorKind::Conflict,

            Self::DatabaseError(_) | Self::InternalError(_) => ErrorKind::Internal,
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        self.kind() == ErrorKind::Forbidden
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        self.kind() == ErrorKind::Conflict
    }
}
