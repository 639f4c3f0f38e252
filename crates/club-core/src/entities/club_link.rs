//! ClubLink entity - shareable invite code for a club

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::value_objects::Snowflake;

/// Invite link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClubLink {
    pub id: Snowflake,
    pub club_id: Snowflake,
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl ClubLink {
    /// Create a link valid for `ttl_days` from now
    pub fn new(id: Snowflake, club_id: Snowflake, code: String, ttl_days: i64) -> Self {
        let now = Utc::now();
        Self {
            id,
            club_id,
            code,
            created_at: now,
            expires_at: now + Duration::days(ttl_days),
        }
    }

    #[inline]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Full URL under the given base
    pub fn url(&self, base_url: &str) -> String {
        format!("{}?token={}", base_url.trim_end_matches('/'), self.code)
    }
}

/// Generate a random invite code
pub fn generate_invite_code() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    const CODE_LEN: usize = 22;

    let mut rng = rand::thread_rng();
    (0..CODE_LEN)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}
