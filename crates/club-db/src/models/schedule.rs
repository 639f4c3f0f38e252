//! Schedule database model

use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::FromRow;

/// Database model for the schedules table, joined with its checklist id
#[derive(Debug, Clone, FromRow)]
pub struct ScheduleModel {
    pub id: i64,
    pub club_id: i64,
    pub title: String,
    pub content: Option<String>,
    pub start_at: NaiveDateTime,
    pub end_at: NaiveDateTime,
    pub spot: Option<String>,
    pub is_active: bool,
    /// From `LEFT JOIN checklists`
    pub checklist_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
