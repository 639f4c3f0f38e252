//! Schedule entity <-> model mapper

use club_core::entities::Schedule;
use club_core::value_objects::Snowflake;

use crate::models::ScheduleModel;

impl From<ScheduleModel> for Schedule {
    fn from(model: ScheduleModel) -> Self {
        Schedule {
            id: Snowflake::new(model.id),
            club_id: Snowflake::new(model.club_id),
            title: model.title,
            content: model.content,
            start_at: model.start_at,
            end_at: model.end_at,
            spot: model.spot,
            is_active: model.is_active,
            checklist_id: model.checklist_id.map(Snowflake::new),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
