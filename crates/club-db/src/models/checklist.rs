//! Checklist database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the checklists table
#[derive(Debug, Clone, FromRow)]
pub struct CheckListModel {
    pub id: i64,
    pub schedule_id: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for the checklist_items table
#[derive(Debug, Clone, FromRow)]
pub struct CheckListItemModel {
    pub id: i64,
    pub checklist_id: i64,
    pub content: String,
    pub category: String,
    pub sequence: i32,
    pub is_checked: bool,
}

/// Database model for the item_assigns table
#[derive(Debug, Clone, FromRow)]
pub struct ItemAssignModel {
    pub id: i64,
    pub item_id: i64,
    pub club_member_id: i64,
    pub is_checked: bool,
}
