//! CheckList aggregate <-> models mapper

use std::collections::HashMap;

use club_core::entities::{CheckList, CheckListItem, ItemAssign};
use club_core::error::DomainError;
use club_core::value_objects::{CheckListItemCategory, Snowflake};

use crate::models::{CheckListItemModel, CheckListModel, ItemAssignModel};

impl From<ItemAssignModel> for ItemAssign {
    fn from(model: ItemAssignModel) -> Self {
        ItemAssign {
            id: Snowflake::new(model.id),
            item_id: Snowflake::new(model.item_id),
            club_member_id: Snowflake::new(model.club_member_id),
            is_checked: model.is_checked,
        }
    }
}

/// Rebuild the aggregate from its three tables
pub fn assemble_checklist(
    model: CheckListModel,
    items: Vec<CheckListItemModel>,
    assigns: Vec<ItemAssignModel>,
) -> Result<CheckList, DomainError> {
    let mut by_item: HashMap<i64, Vec<ItemAssign>> = HashMap::new();
    for assign in assigns {
        by_item.entry(assign.item_id).or_default().push(assign.into());
    }

    let mut built = Vec::with_capacity(items.len());
    for item in items {
        built.push(CheckListItem {
            id: Snowflake::new(item.id),
            checklist_id: Snowflake::new(item.checklist_id),
            category: CheckListItemCategory::parse(&item.category)?,
            assigns: by_item.remove(&item.id).unwrap_or_default(),
            content: item.content,
            sequence: item.sequence,
            is_checked: item.is_checked,
        });
    }
    built.sort_by_key(|item| item.sequence);

    Ok(CheckList {
        id: Snowflake::new(model.id),
        schedule_id: Snowflake::new(model.schedule_id),
        is_active: model.is_active,
        items: built,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}
