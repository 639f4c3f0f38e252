//! Club entity <-> model mapper

use club_core::entities::Club;
use club_core::error::DomainError;
use club_core::value_objects::{ClubCategory, EventType, Snowflake};

use crate::models::ClubModel;

impl TryFrom<ClubModel> for Club {
    type Error = DomainError;

    fn try_from(model: ClubModel) -> Result<Self, Self::Error> {
        Ok(Club {
            id: Snowflake::new(model.id),
            name: model.name,
            bio: model.bio,
            category: ClubCategory::parse(&model.category)?,
            main_spot: model.main_spot,
            capacity: model.capacity,
            is_public: model.is_public,
            recruiting: model.recruiting,
            leader_id: Snowflake::new(model.leader_id),
            is_active: model.is_active,
            start_date: model.start_date,
            end_date: model.end_date,
            event_type: EventType::parse(&model.event_type)?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
