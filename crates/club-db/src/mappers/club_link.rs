//! ClubLink entity <-> model mapper

use club_core::entities::ClubLink;
use club_core::value_objects::Snowflake;

use crate::models::ClubLinkModel;

impl From<ClubLinkModel> for ClubLink {
    fn from(model: ClubLinkModel) -> Self {
        ClubLink {
            id: Snowflake::new(model.id),
            club_id: Snowflake::new(model.club_id),
            code: model.code,
            created_at: model.created_at,
            expires_at: model.expires_at,
        }
    }
}
