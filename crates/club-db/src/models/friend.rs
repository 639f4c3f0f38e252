//! Friend database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the friends table
#[derive(Debug, Clone, FromRow)]
pub struct FriendModel {
    pub id: i64,
    pub member_low_id: i64,
    pub member_high_id: i64,
    pub requested_by: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
