//! Test helpers for integration tests
//!
//! Provides the service context under test, backed by either the in-memory
//! store or PostgreSQL, and assertions on service errors.

use std::sync::Arc;

use anyhow::Result;
use club_common::{try_init_tracing_with_config, ClubSettings, TracingConfig};
use club_core::{ErrorKind, SnowflakeGenerator};
use club_db::{
    create_pool, run_migrations, DatabaseConfig, MemoryStore, PgCheckListRepository,
    PgClubLinkRepository, PgClubMemberRepository, PgClubRepository, PgFriendRepository,
    PgMemberRepository, PgPresetRepository, PgScheduleRepository,
};
use club_service::{ServiceContext, ServiceResult};

/// Worker id used by integration tests, apart from the db crate's tests
const TEST_WORKER_ID: u16 = 9;

/// Which store a [`TestApp`] runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Memory,
    Postgres,
}

/// Service context under test
pub struct TestApp {
    pub backend: Backend,
    pub ctx: ServiceContext,
}

impl TestApp {
    /// App over a fresh in-memory store
    pub fn memory() -> Self {
        init_test_tracing();
        let ctx = ServiceContext::builder()
            .store(MemoryStore::new())
            .snowflake_generator(Arc::new(SnowflakeGenerator::new(TEST_WORKER_ID)))
            .settings(test_settings())
            .build()
            .expect("memory context");
        Self {
            backend: Backend::Memory,
            ctx,
        }
    }

    /// App over the database named by `DATABASE_URL`
    pub async fn postgres() -> Result<Self> {
        init_test_tracing();
        dotenvy::dotenv().ok();

        let pool = create_pool(&DatabaseConfig::from_env()).await?;
        run_migrations(&pool).await?;

        let ctx = ServiceContext::builder()
            .member_repo(Arc::new(PgMemberRepository::new(pool.clone())))
            .club_repo(Arc::new(PgClubRepository::new(pool.clone())))
            .club_member_repo(Arc::new(PgClubMemberRepository::new(pool.clone())))
            .schedule_repo(Arc::new(PgScheduleRepository::new(pool.clone())))
            .checklist_repo(Arc::new(PgCheckListRepository::new(pool.clone())))
            .friend_repo(Arc::new(PgFriendRepository::new(pool.clone())))
            .club_link_repo(Arc::new(PgClubLinkRepository::new(pool.clone())))
            .preset_repo(Arc::new(PgPresetRepository::new(pool)))
            .snowflake_generator(Arc::new(SnowflakeGenerator::new(TEST_WORKER_ID)))
            .settings(test_settings())
            .build()
            .map_err(|e| anyhow::anyhow!("Context error: {e}"))?;

        Ok(Self {
            backend: Backend::Postgres,
            ctx,
        })
    }

    /// The in-memory app, plus a PostgreSQL one when the environment has a
    /// database
    pub async fn all() -> Vec<Self> {
        let mut apps = vec![Self::memory()];
        if check_test_env() {
            match Self::postgres().await {
                Ok(app) => apps.push(app),
                Err(e) => eprintln!("Skipping PostgreSQL backend: {e}"),
            }
        }
        apps
    }
}

/// Club settings for tests
pub fn test_settings() -> ClubSettings {
    ClubSettings {
        invite_link_base_url: "http://localhost:3000/invite".to_string(),
        ..ClubSettings::default()
    }
}

/// Install a subscriber once; later calls are no-ops
pub fn init_test_tracing() {
    let _ = try_init_tracing_with_config(TracingConfig::development());
}

/// Helper to check if a database is configured
pub fn check_test_env() -> bool {
    dotenvy::dotenv().ok();
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping PostgreSQL backend: DATABASE_URL not set");
        return false;
    }
    true
}

/// Assert a service call failed with the expected kind
pub fn assert_kind<T: std::fmt::Debug>(result: ServiceResult<T>, expected: ErrorKind) -> Result<()> {
    match result {
        Ok(value) => anyhow::bail!("Expected {expected:?} error, got Ok({value:?})"),
        Err(err) if err.kind() == expected => Ok(()),
        Err(err) => anyhow::bail!(
            "Expected {:?}, got {:?} ({}): {}",
            expected,
            err.kind(),
            err.error_code(),
            err
        ),
    }
}
