//! # club-core
//!
//! Domain layer containing entities, value objects and repository traits for
//! clubs, memberships, schedules, checklists and friendships.
//! This crate has zero dependencies on infrastructure (database, logging, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    friend_pair, generate_invite_code, generate_member_tag, CheckList, CheckListItem, Club,
    ClubLink, ClubMember, Friend, ItemAssign, Member, Preset, PresetItem, Schedule, ScheduleFields,
};
pub use error::{DomainError, ErrorKind};
pub use traits::{
    CheckListRepository, ClubFilter, ClubLinkRepository, ClubMemberRepository, ClubRepository,
    FriendRepository, MemberRepository, PresetRepository, RepoResult, ScheduleRepository,
};
pub use value_objects::{
    CheckListItemCategory, ClubCategory, ClubRole, EventType, FriendStatus, MemberState,
    MemberType, ScheduleWindow, Snowflake, SnowflakeGenerator, SnowflakeParseError,
};
