//! Member database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the members table (password hash excluded)
#[derive(Debug, Clone, FromRow)]
pub struct MemberModel {
    pub id: i64,
    pub nickname: String,
    pub tag: String,
    pub member_type: String,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
