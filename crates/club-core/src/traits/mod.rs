//! Repository traits (ports)

mod repositories;

pub use repositories::{
    CheckListRepository, ClubFilter, ClubLinkRepository, ClubMemberRepository, ClubRepository,
    FriendRepository, MemberRepository, PresetRepository, RepoResult, ScheduleRepository,
};
