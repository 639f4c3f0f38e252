//! ClubLink database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the club_links table
#[derive(Debug, Clone, FromRow)]
pub struct ClubLinkModel {
    pub id: i64,
    pub club_id: i64,
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
