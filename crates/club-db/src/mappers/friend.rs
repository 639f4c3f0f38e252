//! Friend entity <-> model mapper

use club_core::entities::Friend;
use club_core::error::DomainError;
use club_core::value_objects::{FriendStatus, Snowflake};

use crate::models::FriendModel;

impl TryFrom<FriendModel> for Friend {
    type Error = DomainError;

    fn try_from(model: FriendModel) -> Result<Self, Self::Error> {
        Ok(Friend {
            id: Snowflake::new(model.id),
            member_low_id: Snowflake::new(model.member_low_id),
            member_high_id: Snowflake::new(model.member_high_id),
            requested_by: Snowflake::new(model.requested_by),
            status: FriendStatus::parse(&model.status)?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
