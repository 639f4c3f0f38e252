//! ClubMember entity <-> model mapper

use club_core::entities::ClubMember;
use club_core::error::DomainError;
use club_core::value_objects::{ClubRole, MemberState, Snowflake};

use crate::models::ClubMemberModel;

impl TryFrom<ClubMemberModel> for ClubMember {
    type Error = DomainError;

    fn try_from(model: ClubMemberModel) -> Result<Self, Self::Error> {
        Ok(ClubMember {
            id: Snowflake::new(model.id),
            club_id: Snowflake::new(model.club_id),
            member_id: Snowflake::new(model.member_id),
            role: ClubRole::parse(&model.role)?,
            state: MemberState::parse(&model.state)?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn model(role: &str, state: &str) -> ClubMemberModel {
        ClubMemberModel {
            id: 1,
            club_id: 2,
            member_id: 3,
            role: role.to_string(),
            state: state.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_known_literals() {
        let row = ClubMember::try_from(model("MANAGER", "JOINING")).unwrap();
        assert_eq!(row.role, ClubRole::Manager);
        assert!(row.can_manage());
    }

    #[test]
    fn test_unknown_literal_is_rejected() {
        let err = ClubMember::try_from(model("OWNER", "JOINING")).unwrap_err();
        assert!(matches!(err, DomainError::UnknownLiteral { .. }));
    }
}
