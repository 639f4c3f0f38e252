//! Service context - dependency container for services
//!
//! Holds all repositories, the password service, the id generator, the
//! platform preset catalog and the club settings needed by services.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use club_common::{ClubSettings, PasswordService};
use club_core::traits::{
    CheckListRepository, ClubLinkRepository, ClubMemberRepository, ClubRepository,
    FriendRepository, MemberRepository, PresetRepository, ScheduleRepository,
};
use club_core::{Snowflake, SnowflakeGenerator};

use super::error::{ServiceError, ServiceResult};
use super::preset::PlatformPresets;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// Repositories are trait objects so the same services run over Postgres or
/// the in-memory store.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    member_repo: Arc<dyn MemberRepository>,
    club_repo: Arc<dyn ClubRepository>,
    club_member_repo: Arc<dyn ClubMemberRepository>,
    schedule_repo: Arc<dyn ScheduleRepository>,
    checklist_repo: Arc<dyn CheckListRepository>,
    friend_repo: Arc<dyn FriendRepository>,
    club_link_repo: Arc<dyn ClubLinkRepository>,
    preset_repo: Arc<dyn PresetRepository>,

    // Services
    password_service: PasswordService,
    snowflake_generator: Arc<SnowflakeGenerator>,

    platform_presets: Arc<PlatformPresets>,
    settings: ClubSettings,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        member_repo: Arc<dyn MemberRepository>,
        club_repo: Arc<dyn ClubRepository>,
        club_member_repo: Arc<dyn ClubMemberRepository>,
        schedule_repo: Arc<dyn ScheduleRepository>,
        checklist_repo: Arc<dyn CheckListRepository>,
        friend_repo: Arc<dyn FriendRepository>,
        club_link_repo: Arc<dyn ClubLinkRepository>,
        preset_repo: Arc<dyn PresetRepository>,
        snowflake_generator: Arc<SnowflakeGenerator>,
        platform_presets: Arc<PlatformPresets>,
        settings: ClubSettings,
    ) -> Self {
        Self {
            member_repo,
            club_repo,
            club_member_repo,
            schedule_repo,
            checklist_repo,
            friend_repo,
            club_link_repo,
            preset_repo,
            password_service: PasswordService::new(),
            snowflake_generator,
            platform_presets,
            settings,
        }
    }

    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Repositories ===

    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    pub fn club_repo(&self) -> &dyn ClubRepository {
        self.club_repo.as_ref()
    }

    pub fn club_member_repo(&self) -> &dyn ClubMemberRepository {
        self.club_member_repo.as_ref()
    }

    pub fn schedule_repo(&self) -> &dyn ScheduleRepository {
        self.schedule_repo.as_ref()
    }

    pub fn checklist_repo(&self) -> &dyn CheckListRepository {
        self.checklist_repo.as_ref()
    }

    pub fn friend_repo(&self) -> &dyn FriendRepository {
        self.friend_repo.as_ref()
    }

    pub fn club_link_repo(&self) -> &dyn ClubLinkRepository {
        self.club_link_repo.as_ref()
    }

    pub fn preset_repo(&self) -> &dyn PresetRepository {
        self.preset_repo.as_ref()
    }

    // === Services ===

    /// Get the password hashing service
    pub fn password_service(&self) -> &PasswordService {
        &self.password_service
    }

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }

    /// Bundled checklist templates per club category
    pub fn platform_presets(&self) -> &PlatformPresets {
        self.platform_presets.as_ref()
    }

    /// Club-related settings (invite links, member tags)
    pub fn settings(&self) -> &ClubSettings {
        &self.settings
    }

    /// Current calendar date in UTC
    pub fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("snowflake_generator", &self.snowflake_generator)
            .field("settings", &self.settings)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    member_repo: Option<Arc<dyn MemberRepository>>,
    club_repo: Option<Arc<dyn ClubRepository>>,
    club_member_repo: Option<Arc<dyn ClubMemberRepository>>,
    schedule_repo: Option<Arc<dyn ScheduleRepository>>,
    checklist_repo: Option<Arc<dyn CheckListRepository>>,
    friend_repo: Option<Arc<dyn FriendRepository>>,
    club_link_repo: Option<Arc<dyn ClubLinkRepository>>,
    preset_repo: Option<Arc<dyn PresetRepository>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    platform_presets: Option<PlatformPresets>,
    settings: Option<ClubSettings>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use one store for every repository
    pub fn store<S>(self, store: S) -> Self
    where
        S: MemberRepository
            + ClubRepository
            + ClubMemberRepository
            + ScheduleRepository
            + CheckListRepository
            + FriendRepository
            + ClubLinkRepository
            + PresetRepository
            + 'static,
    {
        let store = Arc::new(store);
        self.member_repo(store.clone())
            .club_repo(store.clone())
            .club_member_repo(store.clone())
            .schedule_repo(store.clone())
            .checklist_repo(store.clone())
            .friend_repo(store.clone())
            .club_link_repo(store.clone())
            .preset_repo(store)
    }

    pub fn member_repo(mut self, repo: Arc<dyn MemberRepository>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn club_repo(mut self, repo: Arc<dyn ClubRepository>) -> Self {
        self.club_repo = Some(repo);
        self
    }

    pub fn club_member_repo(mut self, repo: Arc<dyn ClubMemberRepository>) -> Self {
        self.club_member_repo = Some(repo);
        self
    }

    pub fn schedule_repo(mut self, repo: Arc<dyn ScheduleRepository>) -> Self {
        self.schedule_repo = Some(repo);
        self
    }

    pub fn checklist_repo(mut self, repo: Arc<dyn CheckListRepository>) -> Self {
        self.checklist_repo = Some(repo);
        self
    }

    pub fn friend_repo(mut self, repo: Arc<dyn FriendRepository>) -> Self {
        self.friend_repo = Some(repo);
        self
    }

    pub fn club_link_repo(mut self, repo: Arc<dyn ClubLinkRepository>) -> Self {
        self.club_link_repo = Some(repo);
        self
    }

    pub fn preset_repo(mut self, repo: Arc<dyn PresetRepository>) -> Self {
        self.preset_repo = Some(repo);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn platform_presets(mut self, presets: PlatformPresets) -> Self {
        self.platform_presets = Some(presets);
        self
    }

    pub fn settings(mut self, settings: ClubSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Build the ServiceContext
    ///
    /// The generator defaults to worker 0, the platform presets to the
    /// bundled catalog and the settings to `ClubSettings::default()`.
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any repository is missing, and
    /// `ServiceError::Internal` if the bundled catalog cannot be parsed
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let missing = |name: &str| ServiceError::validation(format!("{name} is required"));
        let platform_presets = match self.platform_presets {
            Some(presets) => presets,
            None => PlatformPresets::bundled()?,
        };

        Ok(ServiceContext::new(
            self.member_repo.ok_or_else(|| missing("member_repo"))?,
            self.club_repo.ok_or_else(|| missing("club_repo"))?,
            self.club_member_repo.ok_or_else(|| missing("club_member_repo"))?,
            self.schedule_repo.ok_or_else(|| missing("schedule_repo"))?,
            self.checklist_repo.ok_or_else(|| missing("checklist_repo"))?,
            self.friend_repo.ok_or_else(|| missing("friend_repo"))?,
            self.club_link_repo.ok_or_else(|| missing("club_link_repo"))?,
            self.preset_repo.ok_or_else(|| missing("preset_repo"))?,
            self.snowflake_generator
                .unwrap_or_else(|| Arc::new(SnowflakeGenerator::default())),
            Arc::new(platform_presets),
            self.settings.unwrap_or_default(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use club_db::MemoryStore;

    #[test]
    fn test_build_requires_repositories() {
        let err = ServiceContextBuilder::new().build().unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn test_store_fills_every_repository() {
        let ctx = ServiceContext::builder()
            .store(MemoryStore::new())
            .snowflake_generator(Arc::new(SnowflakeGenerator::new(3)))
            .build()
            .unwrap();
        assert_eq!(ctx.snowflake_generator().worker_id(), 3);
        assert_eq!(ctx.settings().invite_link_ttl_days, 7);
        assert_ne!(ctx.generate_id(), ctx.generate_id());
        assert!(!ctx.platform_presets().for_category(club_core::ClubCategory::Sports).is_empty());
    }
}
