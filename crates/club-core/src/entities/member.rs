//! Member entity - an account, either registered or a club guest

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::value_objects::{MemberType, Snowflake};

/// Characters used for member tags
const TAG_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Member account.
///
/// `(nickname, tag)` is unique; the tag disambiguates duplicate nicknames.
/// Guests have no email and belong to the club they were registered through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: Snowflake,
    pub nickname: String,
    pub tag: String,
    pub member_type: MemberType,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    /// Create a registered member
    pub fn new(id: Snowflake, nickname: String, tag: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            nickname,
            tag,
            member_type: MemberType::Member,
            email: Some(email),
            bio: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a guest member
    pub fn guest(id: Snowflake, nickname: String, tag: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            nickname,
            tag,
            member_type: MemberType::Guest,
            email: None,
            bio: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_guest(&self) -> bool {
        self.member_type == MemberType::Guest
    }

    /// `nickname#tag`
    pub fn handle(&self) -> String {
        format!("{}#{}", self.nickname, self.tag)
    }

    /// Change nickname together with its freshly generated tag
    pub fn rename(&mut self, nickname: String, tag: String) {
        self.nickname = nickname;
        self.tag = tag;
        self.updated_at = Utc::now();
    }

    pub fn set_bio(&mut self, bio: Option<String>) {
        self.bio = bio;
        self.updated_at = Utc::now();
    }
}

/// Generate a random lower-case alphanumeric tag
pub fn generate_member_tag(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| TAG_CHARSET[rng.gen_range(0..TAG_CHARSET.len())] as char)
        .collect()
}
