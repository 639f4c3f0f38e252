//! Friend entity - one row per unordered pair of members

use chrono::{DateTime, Utc};

use crate::value_objects::{FriendStatus, Snowflake};

/// Friendship stored with canonical `(lower id, higher id)` ordering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Friend {
    pub id: Snowflake,
    pub member_low_id: Snowflake,
    pub member_high_id: Snowflake,
    pub requested_by: Snowflake,
    pub status: FriendStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Canonical ordering for a pair of members
#[inline]
pub fn friend_pair(a: Snowflake, b: Snowflake) -> (Snowflake, Snowflake) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl Friend {
    /// New pending request from `requester` to `target`
    pub fn request(id: Snowflake, requester: Snowflake, target: Snowflake) -> Self {
        let (low, high) = friend_pair(requester, target);
        let now = Utc::now();
        Self {
            id,
            member_low_id: low,
            member_high_id: high,
            requested_by: requester,
            status: FriendStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn involves(&self, member_id: Snowflake) -> bool {
        self.member_low_id == member_id || self.member_high_id == member_id
    }

    /// The member on the other side, if `member_id` is part of the pair
    pub fn other(&self, member_id: Snowflake) -> Option<Snowflake> {
        if self.member_low_id == member_id {
            Some(self.member_high_id)
        } else if self.member_high_id == member_id {
            Some(self.member_low_id)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_requester(&self, member_id: Snowflake) -> bool {
        self.requested_by == member_id
    }

    pub fn set_status(&mut self, status: FriendStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}
