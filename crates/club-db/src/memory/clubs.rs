use async_trait::async_trait;
use tracing::warn;

use club_core::entities::{Club, ClubMember};
use club_core::error::DomainError;
use club_core::traits::{ClubFilter, ClubMemberRepository, ClubRepository, RepoResult};
use club_core::value_objects::{MemberState, Snowflake};

use super::{MemoryStore, Tables};

impl Tables {
    fn insert_club_member(&mut self, row: &ClubMember) -> RepoResult<()> {
        let duplicate = self
            .club_members
            .values()
            .any(|existing| existing.club_id == row.club_id && existing.member_id == row.member_id);
        if duplicate {
            return Err(DomainError::AlreadyInvited);
        }
        self.club_members.insert(row.id, row.clone());
        Ok(())
    }

    fn count_joining(&self, club_id: Snowflake) -> i64 {
        self.club_members
            .values()
            .filter(|row| row.club_id == club_id && row.is_joining())
            .count() as i64
    }
}

#[async_trait]
impl ClubRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Club>> {
        Ok(self.tables.read().clubs.get(&id).cloned())
    }

    async fn find_active_by_leader(&self, leader_id: Snowflake) -> RepoResult<Vec<Club>> {
        Ok(self
            .tables
            .read()
            .clubs
            .values()
            .rev()
            .filter(|club| club.is_active && club.leader_id == leader_id)
            .cloned()
            .collect())
    }

    async fn find_public(&self, filter: &ClubFilter) -> RepoResult<Vec<Club>> {
        let limit = filter.limit.clamp(1, 100) as usize;
        let offset = filter.offset.max(0) as usize;

        Ok(self
            .tables
            .read()
            .clubs
            .values()
            .rev()
            .filter(|club| club.is_active && club.is_public && filter.matches(club))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn create(&self, club: &Club, members: &[ClubMember]) -> RepoResult<()> {
        let mut tables = self.tables.write();
        if tables.clubs.contains_key(&club.id) {
            return Err(DomainError::DatabaseError("duplicate club id".to_string()));
        }

        // validate the whole batch before touching the tables
        for (i, row) in members.iter().enumerate() {
            let repeated = members[..i].iter().any(|prev| prev.member_id == row.member_id);
            if repeated {
                return Err(DomainError::AlreadyInvited);
            }
        }

        tables.clubs.insert(club.id, club.clone());
        for row in members {
            tables.club_members.insert(row.id, row.clone());
        }
        Ok(())
    }

    async fn update(&self, club: &Club) -> RepoResult<()> {
        let mut tables = self.tables.write();
        let stored = tables
            .clubs
            .get_mut(&club.id)
            .ok_or(DomainError::ClubNotFound(club.id))?;
        // leader and creation time are immutable
        let leader_id = stored.leader_id;
        let created_at = stored.created_at;
        *stored = club.clone();
        stored.leader_id = leader_id;
        stored.created_at = created_at;
        Ok(())
    }
}

#[async_trait]
impl ClubMemberRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<ClubMember>> {
        Ok(self.tables.read().club_members.get(&id).cloned())
    }

    async fn find(&self, club_id: Snowflake, member_id: Snowflake) -> RepoResult<Option<ClubMember>> {
        Ok(self
            .tables
            .read()
            .club_members
            .values()
            .find(|row| row.club_id == club_id && row.member_id == member_id)
            .cloned())
    }

    async fn find_by_club(&self, club_id: Snowflake) -> RepoResult<Vec<ClubMember>> {
        Ok(self
            .tables
            .read()
            .club_members
            .values()
            .filter(|row| row.club_id == club_id)
            .cloned()
            .collect())
    }

    async fn find_by_member(&self, member_id: Snowflake) -> RepoResult<Vec<ClubMember>> {
        Ok(self
            .tables
            .read()
            .club_members
            .values()
            .rev()
            .filter(|row| row.member_id == member_id)
            .cloned()
            .collect())
    }

    async fn count_joining(&self, club_id: Snowflake) -> RepoResult<i64> {
        Ok(self.tables.read().count_joining(club_id))
    }

    async fn create(&self, member: &ClubMember) -> RepoResult<()> {
        self.tables.write().insert_club_member(member)
    }

    async fn update(&self, member: &ClubMember) -> RepoResult<()> {
        let mut tables = self.tables.write();
        let stored = tables
            .club_members
            .get_mut(&member.id)
            .ok_or(DomainError::ClubMemberNotFound)?;
        stored.role = member.role;
        stored.state = member.state;
        stored.updated_at = member.updated_at;
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.tables
            .write()
            .remove_club_member(id)
            .map(|_| ())
            .ok_or(DomainError::ClubMemberNotFound)
    }

    async fn add_within_capacity(
        &self,
        club_id: Snowflake,
        reinvited: &[ClubMember],
        created: &[ClubMember],
    ) -> RepoResult<()> {
        let mut tables = self.tables.write();

        let capacity = tables
            .clubs
            .get(&club_id)
            .map(|club| club.capacity)
            .ok_or(DomainError::ClubNotFound(club_id))?;

        let joining = tables.count_joining(club_id);
        if joining + created.len() as i64 > i64::from(capacity) {
            warn!(%club_id, joining, capacity, incoming = created.len(), "Capacity check rejected batch");
            return Err(DomainError::CapacityExceeded { capacity });
        }

        let all_reinvited_exist = reinvited.iter().all(|row| {
            tables
                .club_members
                .get(&row.id)
                .is_some_and(|stored| stored.club_id == club_id)
        });
        if !all_reinvited_exist {
            return Err(DomainError::ClubMemberNotFound);
        }
        let clash = created.iter().enumerate().any(|(i, row)| {
            created[..i].iter().any(|prev| prev.member_id == row.member_id)
                || tables
                    .club_members
                    .values()
                    .any(|existing| existing.club_id == club_id && existing.member_id == row.member_id)
        });
        if clash {
            return Err(DomainError::AlreadyInvited);
        }

        for row in reinvited {
            if let Some(stored) = tables.club_members.get_mut(&row.id) {
                stored.role = row.role;
                stored.state = row.state;
                stored.updated_at = row.updated_at;
            }
        }
        for row in created {
            tables.club_members.insert(row.id, row.clone());
        }
        Ok(())
    }

    async fn join_within_capacity(
        &self,
        club_id: Snowflake,
        row_id: Snowflake,
        from: MemberState,
    ) -> RepoResult<()> {
        let mut tables = self.tables.write();

        let capacity = tables
            .clubs
            .get(&club_id)
            .map(|club| club.capacity)
            .ok_or(DomainError::ClubNotFound(club_id))?;

        let joining = tables.count_joining(club_id);
        if joining >= i64::from(capacity) {
            warn!(%club_id, joining, capacity, "Capacity check rejected join");
            return Err(DomainError::CapacityExceeded { capacity });
        }

        let row = tables
            .club_members
            .get_mut(&row_id)
            .filter(|row| row.club_id == club_id && row.state == from)
            .ok_or(DomainError::ClubMemberNotFound)?;
        row.set_state(MemberState::Joining);
        Ok(())
    }
}
