//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod authorization;
pub mod checklist;
pub mod club;
pub mod club_link;
pub mod club_member;
pub mod context;
pub mod error;
pub mod friend;
pub mod member;
pub mod my_club;
pub mod preset;
pub mod schedule;

#[cfg(test)]
pub(crate) mod testing;

// Re-export all services for convenience
pub use authorization::AuthorizationChecker;
pub use checklist::CheckListService;
pub use club::ClubService;
pub use club_link::ClubLinkService;
pub use club_member::ClubMemberService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use friend::FriendService;
pub use member::MemberService;
pub use my_club::MyClubService;
pub use preset::{PlatformPresets, PresetService};
pub use schedule::ScheduleService;
