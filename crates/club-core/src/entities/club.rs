//! Club entity - a community with a leader, capacity and visibility

use chrono::{DateTime, NaiveDate, Utc};

use crate::value_objects::{ClubCategory, EventType, Snowflake};

/// Club (community) entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Club {
    pub id: Snowflake,
    pub name: String,
    pub bio: Option<String>,
    pub category: ClubCategory,
    pub main_spot: Option<String>,
    /// Maximum number of JOINING members
    pub capacity: i32,
    pub is_public: bool,
    pub recruiting: bool,
    /// Member holding the club's single HOST membership
    pub leader_id: Snowflake,
    pub is_active: bool,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub event_type: EventType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Club {
    /// Create a new active club
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Snowflake,
        name: String,
        category: ClubCategory,
        capacity: i32,
        is_public: bool,
        leader_id: Snowflake,
        start_date: NaiveDate,
        end_date: NaiveDate,
        event_type: EventType,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            bio: None,
            category,
            main_spot: None,
            capacity,
            is_public,
            recruiting: true,
            leader_id,
            is_active: true,
            start_date,
            end_date,
            event_type,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_leader(&self, member_id: Snowflake) -> bool {
        self.leader_id == member_id
    }

    /// Ended clubs are read-only for management operations
    #[inline]
    pub fn has_ended(&self, today: NaiveDate) -> bool {
        self.end_date < today
    }

    /// Active and not past its end date
    #[inline]
    pub fn is_operational(&self, today: NaiveDate) -> bool {
        self.is_active && !self.has_ended(today)
    }

    /// Soft delete
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn club() -> Club {
        Club::new(
            Snowflake::new(1),
            "Hikers".to_string(),
            ClubCategory::Sports,
            10,
            true,
            Snowflake::new(100),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            EventType::LongTerm,
        )
    }

    #[test]
    fn test_club_creation() {
        let club = club();
        assert!(club.is_active);
        assert!(club.recruiting);
        assert!(club.is_leader(Snowflake::new(100)));
        assert!(!club.is_leader(Snowflake::new(200)));
    }

    #[test]
    fn test_operational_window() {
        let mut club = club();
        let inside = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        let after = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert!(club.is_operational(inside));
        assert!(!club.is_operational(after));

        club.deactivate();
        assert!(!club.is_operational(inside));
    }
}
