//! Preset database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the presets table
#[derive(Debug, Clone, FromRow)]
pub struct PresetModel {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for the preset_items table
#[derive(Debug, Clone, FromRow)]
pub struct PresetItemModel {
    pub id: i64,
    pub preset_id: i64,
    pub content: String,
    pub category: String,
    pub sequence: i32,
}
