//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in club-core.
//! Each repository handles database operations for a specific domain entity.

mod checklist;
mod club;
mod club_link;
mod club_member;
mod error;
mod friend;
mod member;
mod preset;
mod schedule;

pub use checklist::PgCheckListRepository;
pub use club::PgClubRepository;
pub use club_link::PgClubLinkRepository;
pub use club_member::PgClubMemberRepository;
pub use friend::PgFriendRepository;
pub use member::PgMemberRepository;
pub use preset::PgPresetRepository;
pub use schedule::PgScheduleRepository;
