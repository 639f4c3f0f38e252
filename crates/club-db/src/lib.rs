//! # club-db
//!
//! Database layer implementing the club-core repository traits.
//!
//! ## Overview
//!
//! - Connection pool management and SQL migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - PostgreSQL repository implementations
//! - [`MemoryStore`], an in-process implementation of every repository trait
//!
//! ## Usage
//!
//! ```rust,ignore
//! use club_db::pool::{create_pool, run_migrations, DatabaseConfig};
//! use club_db::repositories::PgClubRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::from_env()).await?;
//!     run_migrations(&pool).await?;
//!     let clubs = PgClubRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::MemoryStore;
pub use pool::{create_pool, create_pool_from_env, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgCheckListRepository, PgClubLinkRepository, PgClubMemberRepository, PgClubRepository,
    PgFriendRepository, PgMemberRepository, PgPresetRepository, PgScheduleRepository,
};
