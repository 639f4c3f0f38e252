//! Preset <-> models mapper

use std::collections::HashMap;

use club_core::entities::{Preset, PresetItem};
use club_core::error::DomainError;
use club_core::value_objects::{CheckListItemCategory, Snowflake};

use crate::models::{PresetItemModel, PresetModel};

impl TryFrom<PresetItemModel> for PresetItem {
    type Error = DomainError;

    fn try_from(model: PresetItemModel) -> Result<Self, Self::Error> {
        Ok(PresetItem {
            id: Snowflake::new(model.id),
            preset_id: Snowflake::new(model.preset_id),
            category: CheckListItemCategory::parse(&model.category)?,
            content: model.content,
            sequence: model.sequence,
        })
    }
}

/// Attach item rows to their presets, keeping the order of `models`
pub fn assemble_presets(
    models: Vec<PresetModel>,
    items: Vec<PresetItemModel>,
) -> Result<Vec<Preset>, DomainError> {
    let mut by_preset: HashMap<i64, Vec<PresetItem>> = HashMap::new();
    for item in items {
        by_preset.entry(item.preset_id).or_default().push(item.try_into()?);
    }

    Ok(models
        .into_iter()
        .map(|model| {
            let mut items = by_preset.remove(&model.id).unwrap_or_default();
            items.sort_by_key(|item| item.sequence);
            Preset {
                id: Snowflake::new(model.id),
                owner_id: Snowflake::new(model.owner_id),
                name: model.name,
                items,
                created_at: model.created_at,
                updated_at: model.updated_at,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn model(id: i64) -> PresetModel {
        let now = Utc::now();
        PresetModel {
            id,
            owner_id: 7,
            name: format!("preset {id}"),
            created_at: now,
            updated_at: now,
        }
    }

    fn item(id: i64, preset_id: i64, category: &str, sequence: i32) -> PresetItemModel {
        PresetItemModel {
            id,
            preset_id,
            content: "rope".to_string(),
            category: category.to_string(),
            sequence,
        }
    }

    #[test]
    fn test_items_land_on_their_preset() {
        let presets = assemble_presets(
            vec![model(1), model(2)],
            vec![item(10, 2, "ETC", 2), item(11, 2, "PRE_WORK", 1), item(12, 1, "RESERVATION", 0)],
        )
        .unwrap();

        assert_eq!(presets[0].items.len(), 1);
        assert_eq!(presets[1].items[0].id, Snowflake::new(11));
        assert_eq!(presets[1].items[0].category, CheckListItemCategory::PreWork);
        assert_eq!(presets[1].owner_id, Snowflake::new(7));
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let err = assemble_presets(vec![model(1)], vec![item(10, 1, "SNACKS", 0)]).unwrap_err();
        assert_eq!(err.code(), "UNKNOWN_LITERAL");
    }
}
