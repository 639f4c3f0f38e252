//! ClubMember database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the club_members table
#[derive(Debug, Clone, FromRow)]
pub struct ClubMemberModel {
    pub id: i64,
    pub club_id: i64,
    pub member_id: i64,
    pub role: String,
    pub state: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
