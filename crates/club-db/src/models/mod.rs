//! Database models - SQLx-compatible structs for PostgreSQL tables

mod checklist;
mod club;
mod club_link;
mod club_member;
mod friend;
mod member;
mod preset;
mod schedule;

pub use checklist::{CheckListItemModel, CheckListModel, ItemAssignModel};
pub use club::ClubModel;
pub use club_link::ClubLinkModel;
pub use club_member::ClubMemberModel;
pub use friend::FriendModel;
pub use member::MemberModel;
pub use preset::{PresetItemModel, PresetModel};
pub use schedule::ScheduleModel;
