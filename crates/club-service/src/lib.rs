//! # club-service
//!
//! Application layer containing business logic, services, and DTOs.
//!
//! Services borrow a [`ServiceContext`] and take an already authenticated
//! actor id; resolving who is calling is left to the caller.

pub mod dto;
pub mod services;

pub use services::{
    AuthorizationChecker, CheckListService, ClubLinkService, ClubMemberService, ClubService,
    FriendService, MemberService, MyClubService, PlatformPresets, PresetService, ScheduleService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
};
