//! Member entity <-> model mapper

use club_core::entities::Member;
use club_core::error::DomainError;
use club_core::value_objects::{MemberType, Snowflake};

use crate::models::MemberModel;

impl TryFrom<MemberModel> for Member {
    type Error = DomainError;

    fn try_from(model: MemberModel) -> Result<Self, Self::Error> {
        Ok(Member {
            id: Snowflake::new(model.id),
            nickname: model.nickname,
            tag: model.tag,
            member_type: MemberType::parse(&model.member_type)?,
            email: model.email,
            bio: model.bio,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
