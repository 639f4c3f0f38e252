use std::collections::HashSet;

use async_trait::async_trait;
use chrono::NaiveDateTime;

use club_core::entities::{CheckList, CheckListItem, Schedule};
use club_core::error::DomainError;
use club_core::traits::{CheckListRepository, RepoResult, ScheduleRepository};
use club_core::value_objects::Snowflake;

use super::{MemoryStore, Tables};

fn overlaps(schedule: &Schedule, start: NaiveDateTime, end: NaiveDateTime) -> bool {
    schedule.start_at < end && schedule.end_at >= start
}

impl Tables {
    fn sorted_schedules<F>(&self, keep: F) -> Vec<Schedule>
    where
        F: Fn(&Schedule) -> bool,
    {
        let mut found: Vec<Schedule> = self
            .schedules
            .values()
            .filter(|s| keep(s))
            .map(|s| self.project_schedule(s))
            .collect();
        found.sort_by_key(|s| (s.start_at, s.id));
        found
    }

    fn is_joining_member(&self, club_id: Snowflake, member_id: Snowflake) -> bool {
        let club_active = self.clubs.get(&club_id).is_some_and(|c| c.is_active);
        club_active
            && self
                .club_members
                .values()
                .any(|row| row.club_id == club_id && row.member_id == member_id && row.is_joining())
    }

    /// Foreign keys of item assignments must point at rows that exist, and
    /// a row is assigned to an item at most once
    fn check_assign_targets(&self, items: &[CheckListItem]) -> RepoResult<()> {
        for item in items {
            let mut assigned = HashSet::with_capacity(item.assigns.len());
            for assign in &item.assigns {
                if !self.club_members.contains_key(&assign.club_member_id) {
                    return Err(DomainError::ClubMemberNotInClub(assign.club_member_id));
                }
                if !assigned.insert(assign.club_member_id) {
                    return Err(DomainError::DuplicateAssignee(assign.club_member_id));
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ScheduleRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Schedule>> {
        let tables = self.tables.read();
        Ok(tables.schedules.get(&id).map(|s| tables.project_schedule(s)))
    }

    async fn find_by_club_in_range(
        &self,
        club_id: Snowflake,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> RepoResult<Vec<Schedule>> {
        Ok(self
            .tables
            .read()
            .sorted_schedules(|s| s.club_id == club_id && s.is_active && overlaps(s, start, end)))
    }

    async fn find_by_member_in_range(
        &self,
        member_id: Snowflake,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> RepoResult<Vec<Schedule>> {
        let tables = self.tables.read();
        Ok(tables.sorted_schedules(|s| {
            s.is_active && overlaps(s, start, end) && tables.is_joining_member(s.club_id, member_id)
        }))
    }

    async fn find_by_club(&self, club_id: Snowflake) -> RepoResult<Vec<Schedule>> {
        Ok(self.tables.read().sorted_schedules(|s| s.club_id == club_id))
    }

    async fn find_latest_by_club(&self, club_id: Snowflake) -> RepoResult<Option<Schedule>> {
        let tables = self.tables.read();
        Ok(tables
            .schedules
            .values()
            .rev()
            .find(|s| s.club_id == club_id && s.is_active)
            .map(|s| tables.project_schedule(s)))
    }

    async fn count_by_club(&self, club_id: Snowflake) -> RepoResult<i64> {
        Ok(self
            .tables
            .read()
            .schedules
            .values()
            .filter(|s| s.club_id == club_id && s.is_active)
            .count() as i64)
    }

    async fn create(&self, schedule: &Schedule) -> RepoResult<()> {
        let mut tables = self.tables.write();
        if !tables.clubs.contains_key(&schedule.club_id) {
            return Err(DomainError::ClubNotFound(schedule.club_id));
        }
        if schedule.start_at > schedule.end_at {
            return Err(DomainError::InvalidDateRange);
        }
        let mut stored = schedule.clone();
        stored.checklist_id = None;
        tables.schedules.insert(stored.id, stored);
        Ok(())
    }

    async fn update(&self, schedule: &Schedule) -> RepoResult<()> {
        if schedule.start_at > schedule.end_at {
            return Err(DomainError::InvalidDateRange);
        }
        let mut tables = self.tables.write();
        let stored = tables
            .schedules
            .get_mut(&schedule.id)
            .ok_or(DomainError::ScheduleNotFound(schedule.id))?;
        stored.title.clone_from(&schedule.title);
        stored.content.clone_from(&schedule.content);
        stored.start_at = schedule.start_at;
        stored.end_at = schedule.end_at;
        stored.spot.clone_from(&schedule.spot);
        stored.updated_at = schedule.updated_at;
        Ok(())
    }

    async fn delete_or_deactivate(&self, id: Snowflake) -> RepoResult<bool> {
        let mut tables = self.tables.write();
        if !tables.schedules.contains_key(&id) {
            return Err(DomainError::ScheduleNotFound(id));
        }

        let checklists: Vec<Snowflake> = tables
            .checklists
            .values()
            .filter(|c| c.schedule_id == id)
            .map(|c| c.id)
            .collect();
        if checklists.is_empty() {
            tables.schedules.remove(&id);
            return Ok(true);
        }

        if let Some(schedule) = tables.schedules.get_mut(&id) {
            schedule.deactivate();
        }
        for checklist_id in checklists {
            if let Some(checklist) = tables.checklists.get_mut(&checklist_id) {
                checklist.deactivate();
            }
        }
        Ok(false)
    }
}

#[async_trait]
impl CheckListRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<CheckList>> {
        Ok(self.tables.read().checklists.get(&id).cloned())
    }

    async fn find_by_schedule(&self, schedule_id: Snowflake) -> RepoResult<Option<CheckList>> {
        Ok(self
            .tables
            .read()
            .checklists
            .values()
            .find(|c| c.schedule_id == schedule_id)
            .cloned())
    }

    async fn create(&self, checklist: &CheckList) -> RepoResult<()> {
        let mut tables = self.tables.write();
        if !tables.schedules.contains_key(&checklist.schedule_id) {
            return Err(DomainError::ScheduleNotFound(checklist.schedule_id));
        }
        if tables.checklists.values().any(|c| c.schedule_id == checklist.schedule_id) {
            return Err(DomainError::CheckListAlreadyExists);
        }
        tables.check_assign_targets(&checklist.items)?;
        tables.checklists.insert(checklist.id, checklist.clone());
        Ok(())
    }

    async fn replace_items(&self, checklist_id: Snowflake, items: &[CheckListItem]) -> RepoResult<()> {
        let mut tables = self.tables.write();
        tables.check_assign_targets(items)?;
        let checklist = tables
            .checklists
            .get_mut(&checklist_id)
            .ok_or(DomainError::CheckListNotFound(checklist_id))?;
        checklist.replace_items(items.to_vec());
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.tables
            .write()
            .checklists
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::CheckListNotFound(id))
    }
}
