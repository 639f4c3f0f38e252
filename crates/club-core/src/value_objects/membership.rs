//! Club membership roles and states

literal_enum! {
    /// Role of a member inside a club, in ascending privilege order.
    ///
    /// HOST is unique per club and only assigned when the club is created.
    #[derive(PartialOrd, Ord)]
    pub enum ClubRole as "club member role" {
        Participant => "PARTICIPANT",
        Manager => "MANAGER",
        Host => "HOST",
    }
}

impl ClubRole {
    /// MANAGER and HOST may run the club's schedules and checklists
    #[inline]
    pub fn is_elevated(self) -> bool {
        self >= Self::Manager
    }

    /// Whether the role-change operation may hand out this role
    #[inline]
    pub fn is_assignable(self) -> bool {
        self != Self::Host
    }
}

literal_enum! {
    /// Lifecycle state of a club membership row
    pub enum MemberState as "club member state" {
        /// Added by the host, waiting for the member to accept
        Invited => "INVITED",
        /// Self-service application waiting for host approval
        Applying => "APPLYING",
        /// Current effective member
        Joining => "JOINING",
        Withdrawn => "WITHDRAWN",
    }
}

impl MemberState {
    /// Only JOINING counts for capacity, visibility and authorization
    #[inline]
    pub fn is_active_member(self) -> bool {
        self == Self::Joining
    }

    /// States listed when browsing a club's roster
    #[inline]
    pub fn is_listed(self) -> bool {
        self != Self::Withdrawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainError;

    #[test]
    fn test_role_ordering() {
        assert!(ClubRole::Participant < ClubRole::Manager);
        assert!(ClubRole::Manager < ClubRole::Host);
        assert!(ClubRole::Host.is_elevated());
        assert!(ClubRole::Manager.is_elevated());
        assert!(!ClubRole::Participant.is_elevated());
        assert!(!ClubRole::Host.is_assignable());
    }

    #[test]
    fn test_role_parse_is_case_insensitive() {
        assert_eq!(ClubRole::parse("manager").unwrap(), ClubRole::Manager);
        assert_eq!(ClubRole::parse(" Participant ").unwrap(), ClubRole::Participant);
        assert_eq!("HOST".parse::<ClubRole>().unwrap(), ClubRole::Host);
    }

    #[test]
    fn test_unknown_literal_is_validation_error() {
        let err = ClubRole::parse("owner").unwrap_err();
        assert!(err.is_validation());
        assert!(matches!(err, DomainError::UnknownLiteral { kind: "club member role", .. }));
        assert_eq!(err.to_string(), "Unknown club member role: owner");
    }

    #[test]
    fn test_state_predicates() {
        assert!(MemberState::Joining.is_active_member());
        assert!(!MemberState::Invited.is_active_member());
        assert!(!MemberState::Withdrawn.is_listed());
        assert!(MemberState::Applying.is_listed());
    }

    #[test]
    fn test_serde_uses_literals() {
        assert_eq!(serde_json::to_string(&MemberState::Joining).unwrap(), "\"JOINING\"");
        let role: ClubRole = serde_json::from_str("\"MANAGER\"").unwrap();
        assert_eq!(role, ClubRole::Manager);
    }
}
