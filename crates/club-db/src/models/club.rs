//! Club database model

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Database model for the clubs table
#[derive(Debug, Clone, FromRow)]
pub struct ClubModel {
    pub id: i64,
    pub name: String,
    pub bio: Option<String>,
    pub category: String,
    pub main_spot: Option<String>,
    pub capacity: i32,
    pub is_public: bool,
    pub recruiting: bool,
    pub leader_id: i64,
    pub is_active: bool,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub event_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
