//! In-memory implementation of every repository trait
//!
//! All tables live behind one `parking_lot::RwLock`, so each trait call is a
//! single atomic unit just like a Postgres transaction. Foreign-key cascades
//! and unique constraints of the SQL schema are reproduced by hand.

mod checklists;
mod clubs;
mod members;
mod presets;
mod social;

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;

use club_core::entities::{
    CheckList, Club, ClubLink, ClubMember, Friend, Member, Preset, Schedule,
};
use club_core::value_objects::Snowflake;

/// Member row with its credential
#[derive(Debug, Clone)]
struct StoredMember {
    member: Member,
    password_hash: String,
}

#[derive(Debug, Default)]
struct Tables {
    members: BTreeMap<Snowflake, StoredMember>,
    clubs: BTreeMap<Snowflake, Club>,
    club_members: BTreeMap<Snowflake, ClubMember>,
    /// Stored without the checklist projection
    schedules: BTreeMap<Snowflake, Schedule>,
    checklists: BTreeMap<Snowflake, CheckList>,
    friends: BTreeMap<Snowflake, Friend>,
    links: BTreeMap<Snowflake, ClubLink>,
    presets: BTreeMap<Snowflake, Preset>,
}

impl Tables {
    /// Schedule with `checklist_id` filled from the checklist table
    fn project_schedule(&self, schedule: &Schedule) -> Schedule {
        let mut projected = schedule.clone();
        projected.checklist_id = self
            .checklists
            .values()
            .find(|c| c.schedule_id == schedule.id)
            .map(|c| c.id);
        projected
    }

    /// Drop a membership row and the assignments referencing it
    fn remove_club_member(&mut self, id: Snowflake) -> Option<ClubMember> {
        let removed = self.club_members.remove(&id)?;
        for checklist in self.checklists.values_mut() {
            for item in &mut checklist.items {
                item.assigns.retain(|a| a.club_member_id != id);
            }
        }
        Some(removed)
    }
}

/// Thread-safe in-memory store; clones share the same tables
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}
