//! Preset - a member's reusable checklist template

use chrono::{DateTime, Utc};

use crate::value_objects::{CheckListItemCategory, Snowflake};

/// Named item list owned by one member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    pub id: Snowflake,
    pub owner_id: Snowflake,
    pub name: String,
    /// Ordered by `sequence`
    pub items: Vec<PresetItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetItem {
    pub id: Snowflake,
    pub preset_id: Snowflake,
    pub content: String,
    pub category: CheckListItemCategory,
    pub sequence: i32,
}

impl Preset {
    pub fn new(id: Snowflake, owner_id: Snowflake, name: String, items: Vec<PresetItem>) -> Self {
        let now = Utc::now();
        let mut preset = Self {
            id,
            owner_id,
            name,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        preset.replace_items(items);
        preset
    }

    pub fn is_owned_by(&self, member_id: Snowflake) -> bool {
        self.owner_id == member_id
    }

    pub fn rename(&mut self, name: String) {
        self.name = name;
        self.updated_at = Utc::now();
    }

    /// Discard every item and take the given set
    pub fn replace_items(&mut self, mut items: Vec<PresetItem>) {
        items.sort_by_key(|item| item.sequence);
        self.items = items;
        self.updated_at = Utc::now();
    }
}
