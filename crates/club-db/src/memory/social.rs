use async_trait::async_trait;
use chrono::{DateTime, Utc};

use club_core::entities::{ClubLink, Friend};
use club_core::error::DomainError;
use club_core::traits::{ClubLinkRepository, FriendRepository, RepoResult};
use club_core::value_objects::Snowflake;

use super::MemoryStore;

#[async_trait]
impl FriendRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Friend>> {
        Ok(self.tables.read().friends.get(&id).cloned())
    }

    async fn find_pair(&self, low: Snowflake, high: Snowflake) -> RepoResult<Option<Friend>> {
        Ok(self
            .tables
            .read()
            .friends
            .values()
            .find(|f| f.member_low_id == low && f.member_high_id == high)
            .cloned())
    }

    async fn find_by_member(&self, member_id: Snowflake) -> RepoResult<Vec<Friend>> {
        Ok(self
            .tables
            .read()
            .friends
            .values()
            .filter(|f| f.involves(member_id))
            .cloned()
            .collect())
    }

    async fn create(&self, friend: &Friend) -> RepoResult<()> {
        let mut tables = self.tables.write();
        let duplicate = tables.friends.values().any(|f| {
            f.member_low_id == friend.member_low_id && f.member_high_id == friend.member_high_id
        });
        if duplicate {
            return Err(DomainError::FriendRequestAlreadySent);
        }
        tables.friends.insert(friend.id, friend.clone());
        Ok(())
    }

    async fn update(&self, friend: &Friend) -> RepoResult<()> {
        let mut tables = self.tables.write();
        let stored = tables
            .friends
            .get_mut(&friend.id)
            .ok_or(DomainError::FriendNotFound(friend.id))?;
        stored.status = friend.status;
        stored.updated_at = friend.updated_at;
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.tables
            .write()
            .friends
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::FriendNotFound(id))
    }
}

#[async_trait]
impl ClubLinkRepository for MemoryStore {
    async fn find_by_code(&self, code: &str) -> RepoResult<Option<ClubLink>> {
        Ok(self
            .tables
            .read()
            .links
            .values()
            .find(|link| link.code == code)
            .cloned())
    }

    async fn find_valid_by_club(
        &self,
        club_id: Snowflake,
        now: DateTime<Utc>,
    ) -> RepoResult<Option<ClubLink>> {
        Ok(self
            .tables
            .read()
            .links
            .values()
            .filter(|link| link.club_id == club_id && !link.is_expired_at(now))
            .max_by_key(|link| link.expires_at)
            .cloned())
    }

    async fn create(&self, link: &ClubLink) -> RepoResult<()> {
        let mut tables = self.tables.write();
        if !tables.clubs.contains_key(&link.club_id) {
            return Err(DomainError::ClubNotFound(link.club_id));
        }
        if tables.links.values().any(|existing| existing.code == link.code) {
            return Err(DomainError::InternalError("invite code collision".to_string()));
        }
        tables.links.insert(link.id, link.clone());
        Ok(())
    }
}
