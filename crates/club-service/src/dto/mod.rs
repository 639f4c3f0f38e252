//! Data transfer objects for requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for inputs
//! - Response DTOs for serializing outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    AddMembersRequest, ChangeRoleRequest, CheckListItemRequest, CheckListRequest,
    ClubMemberRequest, ClubSearchRequest, CreateClubRequest, FriendFilter, FriendRequest,
    GuestLoginRequest, GuestRegisterRequest, ItemAssignRequest, LoginRequest, PresetItemRequest,
    PresetRequest, RegisterRequest, ScheduleRangeQuery, ScheduleRequest, UpdateClubRequest,
    UpdateMemberRequest,
};

// Re-export commonly used response types
pub use responses::{
    ApiResponse, ApplyByTokenResponse, ApplyOutcome, CheckListItemResponse, CheckListResponse,
    ClubInfoResponse, ClubLinkResponse, ClubMemberResponse, ClubPreviewResponse, ClubResponse,
    FriendResponse, ItemAssignResponse, MemberResponse, MemberSummaryResponse, MyClubResponse,
    PageResponse, PlatformPresetItem, PlatformPresetResponse, PresetItemResponse, PresetResponse,
    ScheduleResponse,
};

// Re-export mappers and helper structs
pub use mappers::{club_link_response, ClubMemberWithProfile, ClubWithCount, FriendView};
