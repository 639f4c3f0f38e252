//! Shared fixtures for service unit tests

use chrono::Duration;
use club_core::entities::{Club, ClubMember, Member};
use club_core::value_objects::{ClubCategory, ClubRole, EventType, MemberState};
use club_core::Snowflake;
use club_db::MemoryStore;

use super::context::ServiceContext;

pub(crate) fn context() -> ServiceContext {
    ServiceContext::builder()
        .store(MemoryStore::new())
        .build()
        .unwrap()
}

/// Registered member with email `<nickname>@example.com` and password `Password1`
pub(crate) async fn seed_member(ctx: &ServiceContext, nickname: &str) -> Member {
    let member = Member::new(
        ctx.generate_id(),
        nickname.to_string(),
        "0000aa".to_string(),
        format!("{nickname}@example.com"),
    );
    let hash = ctx.password_service().hash("Password1").unwrap();
    ctx.member_repo().create(&member, &hash).await.unwrap();
    member
}

/// Active public club running for the next 30 days, led by `host`
pub(crate) async fn seed_club(ctx: &ServiceContext, host: Snowflake, capacity: i32) -> Club {
    let today = ctx.today();
    let club = Club::new(
        ctx.generate_id(),
        "Test Club".to_string(),
        ClubCategory::Hobby,
        capacity,
        true,
        host,
        today,
        today + Duration::days(30),
        EventType::ShortTerm,
    );
    let row = ClubMember::host(ctx.generate_id(), club.id, host);
    ctx.club_repo().create(&club, &[row]).await.unwrap();
    club
}

/// Add a row in the given role and state
pub(crate) async fn seed_row(
    ctx: &ServiceContext,
    club: Snowflake,
    member: Snowflake,
    role: ClubRole,
    state: MemberState,
) -> ClubMember {
    let row = ClubMember::new(ctx.generate_id(), club, member, role, state);
    ctx.club_member_repo().create(&row).await.unwrap();
    row
}
