//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests. Every generated name
//! and email is unique across test runs so scenarios can share a database.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

use chrono::{Duration, NaiveDateTime, Utc};
use club_core::Snowflake;
use club_service::dto::{
    CheckListItemRequest, CheckListRequest, ClubMemberRequest, CreateClubRequest,
    ItemAssignRequest, MemberResponse, RegisterRequest, ScheduleRequest,
};
use club_service::{ClubService, MemberService, ServiceContext};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Password satisfying the strength rules
pub const TEST_PASSWORD: &str = "TestPass123";

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    static RUN: OnceLock<u64> = OnceLock::new();
    let run = *RUN.get_or_init(|| (Utc::now().timestamp_millis() % 10_000_000) as u64);
    run * 100_000 + COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Parse an id returned in a response
pub fn id(value: &str) -> Snowflake {
    value.parse().expect("snowflake id")
}

/// Registered member as seen by tests
#[derive(Debug, Clone)]
pub struct TestMember {
    pub id: Snowflake,
    pub email: String,
    pub nickname: String,
}

impl From<MemberResponse> for TestMember {
    fn from(response: MemberResponse) -> Self {
        Self {
            id: id(&response.id),
            email: response.email.unwrap_or_default(),
            nickname: response.nickname,
        }
    }
}

/// Registration request with a unique email and nickname
pub fn register_request() -> RegisterRequest {
    let suffix = unique_suffix();
    RegisterRequest {
        email: format!("member{suffix}@example.com"),
        password: TEST_PASSWORD.to_string(),
        nickname: format!("m{suffix}"),
        bio: None,
    }
}

/// Register a member through the service layer
pub async fn register_member(ctx: &ServiceContext) -> TestMember {
    MemberService::new(ctx)
        .register(register_request())
        .await
        .expect("register member")
        .into()
}

/// Member entry of a club request
pub fn member_entry(email: &str, role: &str) -> ClubMemberRequest {
    ClubMemberRequest {
        email: email.to_string(),
        role: role.to_string(),
    }
}

/// Public long-term club running for the next 60 days
pub fn club_request(capacity: i32, members: Vec<ClubMemberRequest>) -> CreateClubRequest {
    let today = Utc::now().date_naive();
    CreateClubRequest {
        name: format!("Test Club {}", unique_suffix()),
        bio: Some("Integration test club".to_string()),
        category: "HOBBY".to_string(),
        main_spot: Some("Community center".to_string()),
        capacity,
        is_public: true,
        start_date: today,
        end_date: today + Duration::days(60),
        event_type: "LONG_TERM".to_string(),
        members,
    }
}

/// Create a club led by `host` and return its id
pub async fn create_club(ctx: &ServiceContext, host: &TestMember, capacity: i32) -> Snowflake {
    let response = ClubService::new(ctx)
        .create_club(host.id, club_request(capacity, vec![]))
        .await
        .expect("create club");
    id(&response.club.id)
}

/// Schedule starting at `start_at` and lasting `hours`
pub fn schedule_request(title: &str, start_at: NaiveDateTime, hours: i64) -> ScheduleRequest {
    ScheduleRequest {
        title: title.to_string(),
        content: Some("Bring water".to_string()),
        start_at,
        end_at: start_at + Duration::hours(hours),
        spot: None,
    }
}

/// Today at the given hour
pub fn today_at(hour: u32) -> NaiveDateTime {
    Utc::now()
        .date_naive()
        .and_hms_opt(hour, 0, 0)
        .expect("valid hour")
}

/// Checklist item assigned to the given club member rows
pub fn checklist_item(content: &str, sequence: i32, assignees: &[Snowflake]) -> CheckListItemRequest {
    CheckListItemRequest {
        content: content.to_string(),
        category: "PREPARATION".to_string(),
        sequence,
        is_checked: false,
        assigns: assignees
            .iter()
            .map(|&club_member_id| ItemAssignRequest {
                club_member_id,
                is_checked: false,
            })
            .collect(),
    }
}

pub fn checklist_request(items: Vec<CheckListItemRequest>) -> CheckListRequest {
    CheckListRequest { items }
}
