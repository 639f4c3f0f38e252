//! ClubMember entity - binds a member to a club with a role and a state

use chrono::{DateTime, Utc};

use crate::value_objects::{ClubRole, MemberState, Snowflake};

/// Membership row for one (club, member) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClubMember {
    pub id: Snowflake,
    pub club_id: Snowflake,
    pub member_id: Snowflake,
    pub role: ClubRole,
    pub state: MemberState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ClubMember {
    pub fn new(
        id: Snowflake,
        club_id: Snowflake,
        member_id: Snowflake,
        role: ClubRole,
        state: MemberState,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            club_id,
            member_id,
            role,
            state,
            created_at: now,
            updated_at: now,
        }
    }

    /// The founder's row
    pub fn host(id: Snowflake, club_id: Snowflake, member_id: Snowflake) -> Self {
        Self::new(id, club_id, member_id, ClubRole::Host, MemberState::Joining)
    }

    /// A host-added row waiting for acceptance
    pub fn invited(id: Snowflake, club_id: Snowflake, member_id: Snowflake, role: ClubRole) -> Self {
        Self::new(id, club_id, member_id, role, MemberState::Invited)
    }

    /// A self-service application
    pub fn applying(id: Snowflake, club_id: Snowflake, member_id: Snowflake) -> Self {
        Self::new(id, club_id, member_id, ClubRole::Participant, MemberState::Applying)
    }

    #[inline]
    pub fn is_joining(&self) -> bool {
        self.state.is_active_member()
    }

    #[inline]
    pub fn is_withdrawn(&self) -> bool {
        self.state == MemberState::Withdrawn
    }

    /// JOINING with an elevated role
    #[inline]
    pub fn can_manage(&self) -> bool {
        self.is_joining() && self.role.is_elevated()
    }

    pub fn set_state(&mut self, state: MemberState) {
        self.state = state;
        self.updated_at = Utc::now();
    }

    pub fn set_role(&mut self, role: ClubRole) {
        self.role = role;
        self.updated_at = Utc::now();
    }

    /// Re-invite a withdrawn row with a new role
    pub fn reinvite(&mut self, role: ClubRole) {
        self.role = role;
        self.state = MemberState::Invited;
        self.updated_at = Utc::now();
    }
}
