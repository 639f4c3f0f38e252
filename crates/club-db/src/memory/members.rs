use async_trait::async_trait;

use club_core::entities::{ClubMember, Member};
use club_core::error::DomainError;
use club_core::traits::{MemberRepository, RepoResult};
use club_core::value_objects::Snowflake;

use super::{MemoryStore, StoredMember, Tables};

impl Tables {
    fn check_member_unique(&self, member: &Member) -> RepoResult<()> {
        for stored in self.members.values() {
            let existing = &stored.member;
            if member.email.is_some() && existing.email == member.email {
                return Err(DomainError::EmailAlreadyExists);
            }
            if existing.nickname == member.nickname && existing.tag == member.tag {
                return Err(DomainError::DatabaseError(
                    "duplicate key value violates unique constraint \"members_nickname_tag_key\"".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl MemberRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Member>> {
        Ok(self.tables.read().members.get(&id).map(|s| s.member.clone()))
    }

    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<Member>> {
        let tables = self.tables.read();
        Ok(ids
            .iter()
            .filter_map(|id| tables.members.get(id))
            .map(|s| s.member.clone())
            .collect())
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Member>> {
        Ok(self
            .tables
            .read()
            .members
            .values()
            .find(|s| s.member.email.as_deref() == Some(email))
            .map(|s| s.member.clone()))
    }

    async fn find_by_emails(&self, emails: &[String]) -> RepoResult<Vec<Member>> {
        let tables = self.tables.read();
        Ok(tables
            .members
            .values()
            .filter(|s| s.member.email.as_ref().is_some_and(|e| emails.contains(e)))
            .map(|s| s.member.clone())
            .collect())
    }

    async fn find_by_nickname_and_tag(&self, nickname: &str, tag: &str) -> RepoResult<Option<Member>> {
        Ok(self
            .tables
            .read()
            .members
            .values()
            .find(|s| s.member.nickname == nickname && s.member.tag == tag)
            .map(|s| s.member.clone()))
    }

    async fn find_guest_in_club(&self, club_id: Snowflake, nickname: &str) -> RepoResult<Option<Member>> {
        let tables = self.tables.read();
        Ok(tables
            .club_members
            .values()
            .filter(|row| row.club_id == club_id)
            .filter_map(|row| tables.members.get(&row.member_id))
            .find(|s| s.member.is_guest() && s.member.nickname == nickname)
            .map(|s| s.member.clone()))
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self
            .tables
            .read()
            .members
            .values()
            .any(|s| s.member.email.as_deref() == Some(email)))
    }

    async fn tag_exists(&self, nickname: &str, tag: &str) -> RepoResult<bool> {
        Ok(self
            .tables
            .read()
            .members
            .values()
            .any(|s| s.member.nickname == nickname && s.member.tag == tag))
    }

    async fn create(&self, member: &Member, password_hash: &str) -> RepoResult<()> {
        let mut tables = self.tables.write();
        tables.check_member_unique(member)?;
        tables.members.insert(
            member.id,
            StoredMember {
                member: member.clone(),
                password_hash: password_hash.to_string(),
            },
        );
        Ok(())
    }

    async fn create_guest(
        &self,
        member: &Member,
        password_hash: &str,
        membership: &ClubMember,
    ) -> RepoResult<()> {
        let mut tables = self.tables.write();
        tables.check_member_unique(member)?;
        if !tables.clubs.contains_key(&membership.club_id) {
            return Err(DomainError::ClubNotFound(membership.club_id));
        }
        tables.members.insert(
            member.id,
            StoredMember {
                member: member.clone(),
                password_hash: password_hash.to_string(),
            },
        );
        tables.club_members.insert(membership.id, membership.clone());
        Ok(())
    }

    async fn update(&self, member: &Member) -> RepoResult<()> {
        let mut tables = self.tables.write();
        let clash = tables.members.values().any(|s| {
            s.member.id != member.id && s.member.nickname == member.nickname && s.member.tag == member.tag
        });
        if clash {
            return Err(DomainError::DatabaseError(
                "duplicate key value violates unique constraint \"members_nickname_tag_key\"".to_string(),
            ));
        }
        let stored = tables
            .members
            .get_mut(&member.id)
            .ok_or(DomainError::MemberNotFound(member.id))?;
        stored.member.nickname.clone_from(&member.nickname);
        stored.member.tag.clone_from(&member.tag);
        stored.member.bio.clone_from(&member.bio);
        stored.member.updated_at = member.updated_at;
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut tables = self.tables.write();
        if tables.members.remove(&id).is_none() {
            return Err(DomainError::MemberNotFound(id));
        }
        let rows: Vec<Snowflake> = tables
            .club_members
            .values()
            .filter(|row| row.member_id == id)
            .map(|row| row.id)
            .collect();
        for row in rows {
            tables.remove_club_member(row);
        }
        tables.friends.retain(|_, f| !f.involves(id));
        tables.presets.retain(|_, p| !p.is_owned_by(id));
        Ok(())
    }

    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>> {
        Ok(self
            .tables
            .read()
            .members
            .get(&id)
            .map(|s| s.password_hash.clone()))
    }

    async fn update_password(&self, id: Snowflake, password_hash: &str) -> RepoResult<()> {
        let mut tables = self.tables.write();
        let stored = tables
            .members
            .get_mut(&id)
            .ok_or(DomainError::MemberNotFound(id))?;
        stored.password_hash = password_hash.to_string();
        Ok(())
    }
}
