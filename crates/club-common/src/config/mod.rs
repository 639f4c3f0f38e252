//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ClubSettings, ConfigError, DatabaseConfig, Environment,
    SnowflakeConfig,
};
