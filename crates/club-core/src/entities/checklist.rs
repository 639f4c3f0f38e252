//! Checklist aggregate - one per schedule, with items and per-item assignments

use chrono::{DateTime, Utc};

use crate::value_objects::{CheckListItemCategory, Snowflake};

/// Checklist owned by exactly one schedule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckList {
    pub id: Snowflake,
    pub schedule_id: Snowflake,
    pub is_active: bool,
    /// Ordered by `sequence`
    pub items: Vec<CheckListItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Line item of a checklist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckListItem {
    pub id: Snowflake,
    pub checklist_id: Snowflake,
    pub content: String,
    pub category: CheckListItemCategory,
    pub sequence: i32,
    pub is_checked: bool,
    pub assigns: Vec<ItemAssign>,
}

/// Assignment of a club member to an item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemAssign {
    pub id: Snowflake,
    pub item_id: Snowflake,
    pub club_member_id: Snowflake,
    pub is_checked: bool,
}

impl CheckList {
    pub fn new(id: Snowflake, schedule_id: Snowflake, items: Vec<CheckListItem>) -> Self {
        let now = Utc::now();
        let mut checklist = Self {
            id,
            schedule_id,
            is_active: true,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        checklist.replace_items(items);
        checklist
    }

    /// Discard every item and take the given set
    pub fn replace_items(&mut self, mut items: Vec<CheckListItem>) {
        items.sort_by_key(|item| item.sequence);
        self.items = items;
        self.updated_at = Utc::now();
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    /// Distinct club members assigned anywhere in the checklist
    pub fn assigned_club_members(&self) -> Vec<Snowflake> {
        let mut ids: Vec<Snowflake> = self
            .items
            .iter()
            .flat_map(|item| item.assigns.iter().map(|a| a.club_member_id))
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

impl CheckListItem {
    pub fn is_assigned_to(&self, club_member_id: Snowflake) -> bool {
        self.assigns.iter().any(|a| a.club_member_id == club_member_id)
    }
}
