use async_trait::async_trait;

use club_core::entities::Preset;
use club_core::error::DomainError;
use club_core::traits::{PresetRepository, RepoResult};
use club_core::value_objects::Snowflake;

use super::MemoryStore;

#[async_trait]
impl PresetRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Preset>> {
        Ok(self.tables.read().presets.get(&id).cloned())
    }

    async fn find_by_owner(&self, owner_id: Snowflake) -> RepoResult<Vec<Preset>> {
        let mut found: Vec<Preset> = self
            .tables
            .read()
            .presets
            .values()
            .filter(|p| p.is_owned_by(owner_id))
            .cloned()
            .collect();
        found.sort_by_key(|p| (p.created_at, p.id));
        Ok(found)
    }

    async fn create(&self, preset: &Preset) -> RepoResult<()> {
        let mut tables = self.tables.write();
        if !tables.members.contains_key(&preset.owner_id) {
            return Err(DomainError::MemberNotFound(preset.owner_id));
        }
        tables.presets.insert(preset.id, preset.clone());
        Ok(())
    }

    async fn update(&self, preset: &Preset) -> RepoResult<()> {
        let mut tables = self.tables.write();
        let stored = tables
            .presets
            .get_mut(&preset.id)
            .ok_or(DomainError::PresetNotFound(preset.id))?;
        stored.name = preset.name.clone();
        stored.items = preset.items.clone();
        stored.updated_at = preset.updated_at;
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.tables
            .write()
            .presets
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::PresetNotFound(id))
    }
}
