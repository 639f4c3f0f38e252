//! Domain entities - core business objects

mod checklist;
mod club;
mod club_link;
mod club_member;
mod friend;
mod member;
mod preset;
mod schedule;

pub use checklist::{CheckList, CheckListItem, ItemAssign};
pub use club::Club;
pub use club_link::{generate_invite_code, ClubLink};
pub use club_member::ClubMember;
pub use friend::{friend_pair, Friend};
pub use member::{generate_member_tag, Member};
pub use preset::{Preset, PresetItem};
pub use schedule::{Schedule, ScheduleFields};
