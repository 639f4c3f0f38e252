//! Preset service
//!
//! Members keep private checklist templates. Every operation on a stored
//! preset resolves it first (404) and then checks ownership (403). Platform
//! presets are a fixed catalog per club category, bundled with the crate.

use std::collections::HashMap;

use club_core::entities::{Preset, PresetItem};
use club_core::value_objects::ClubCategory;
use club_core::{DomainError, Snowflake};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{PlatformPresetResponse, PresetItemRequest, PresetRequest, PresetResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

const BUNDLED_PLATFORM_PRESETS: &str = include_str!("../../presets/platform.json");

/// Platform presets keyed by club category
#[derive(Debug, Clone, Default)]
pub struct PlatformPresets {
    by_category: HashMap<ClubCategory, Vec<PlatformPresetResponse>>,
}

impl PlatformPresets {
    /// Parse a catalog of the form `{"TRAVEL": [{"name": .., "items": [..]}]}`
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if the catalog is malformed
    pub fn from_json(raw: &str) -> ServiceResult<Self> {
        let mut by_category: HashMap<ClubCategory, Vec<PlatformPresetResponse>> =
            serde_json::from_str(raw)
                .map_err(|e| ServiceError::internal(format!("invalid platform presets: {e}")))?;
        for presets in by_category.values_mut() {
            for preset in presets.iter_mut() {
                preset.items.sort_by_key(|item| item.sequence);
            }
        }
        Ok(Self { by_category })
    }

    /// The catalog shipped in `presets/platform.json`
    pub fn bundled() -> ServiceResult<Self> {
        Self::from_json(BUNDLED_PLATFORM_PRESETS)
    }

    /// Presets for the category; empty when the catalog has none
    pub fn for_category(&self, category: ClubCategory) -> &[PlatformPresetResponse] {
        self.by_category.get(&category).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Preset service
pub struct PresetService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PresetService<'a> {
    /// Create a new PresetService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn build_items(
        &self,
        preset_id: Snowflake,
        requests: Vec<PresetItemRequest>,
    ) -> ServiceResult<Vec<PresetItem>> {
        requests
            .into_iter()
            .map(|request| -> ServiceResult<PresetItem> {
                Ok(PresetItem {
                    id: self.ctx.generate_id(),
                    preset_id,
                    category: request.parsed_category()?,
                    content: request.content,
                    sequence: request.sequence,
                })
            })
            .collect()
    }

    /// Preset the actor owns
    async fn owned(&self, preset_id: Snowflake, actor: Snowflake) -> ServiceResult<Preset> {
        let preset = self
            .ctx
            .preset_repo()
            .find_by_id(preset_id)
            .await?
            .ok_or(DomainError::PresetNotFound(preset_id))?;
        if !preset.is_owned_by(actor) {
            return Err(DomainError::NotPresetOwner.into());
        }
        Ok(preset)
    }

    /// Save a new preset owned by the actor
    #[instrument(skip(self, request))]
    pub async fn write_preset(&self, actor: Snowflake, request: PresetRequest) -> ServiceResult<PresetResponse> {
        request.validate()?;

        self.ctx
            .member_repo()
            .find_by_id(actor)
            .await?
            .ok_or(DomainError::MemberNotFound(actor))?;

        let preset_id = self.ctx.generate_id();
        let items = self.build_items(preset_id, request.items)?;
        let preset = Preset::new(preset_id, actor, request.name, items);
        self.ctx.preset_repo().create(&preset).await?;

        info!(preset_id = %preset_id, owner_id = %actor, items = preset.items.len(), "Preset created");

        Ok(PresetResponse::from(preset))
    }

    #[instrument(skip(self))]
    pub async fn get_preset(&self, preset_id: Snowflake, actor: Snowflake) -> ServiceResult<PresetResponse> {
        Ok(PresetResponse::from(self.owned(preset_id, actor).await?))
    }

    /// Every preset the actor owns, oldest first
    #[instrument(skip(self))]
    pub async fn list_presets(&self, actor: Snowflake) -> ServiceResult<Vec<PresetResponse>> {
        let presets = self.ctx.preset_repo().find_by_owner(actor).await?;
        Ok(presets.iter().map(PresetResponse::from).collect())
    }

    /// Rename the preset and replace all of its items
    #[instrument(skip(self, request))]
    pub async fn update_preset(
        &self,
        preset_id: Snowflake,
        actor: Snowflake,
        request: PresetRequest,
    ) -> ServiceResult<PresetResponse> {
        request.validate()?;

        let mut preset = self.owned(preset_id, actor).await?;
        let items = self.build_items(preset_id, request.items)?;
        preset.rename(request.name);
        preset.replace_items(items);
        self.ctx.preset_repo().update(&preset).await?;

        info!(preset_id = %preset_id, items = preset.items.len(), "Preset updated");

        Ok(PresetResponse::from(preset))
    }

    #[instrument(skip(self))]
    pub async fn delete_preset(&self, preset_id: Snowflake, actor: Snowflake) -> ServiceResult<()> {
        self.owned(preset_id, actor).await?;
        self.ctx.preset_repo().delete(preset_id).await?;

        info!(preset_id = %preset_id, "Preset deleted");
        Ok(())
    }

    /// Platform presets for a club category
    pub fn platform_presets(&self, category: ClubCategory) -> Vec<PlatformPresetResponse> {
        self.ctx.platform_presets().for_category(category).to_vec()
    }
}
