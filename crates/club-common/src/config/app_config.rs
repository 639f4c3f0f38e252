//! Application configuration structs
//!
//! Loads configuration from environment variables, or from a config file
//! layered under `CLUB__*` environment overrides.

use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub snowflake: SnowflakeConfig,
    #[serde(default)]
    pub club: ClubSettings,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            env: default_env(),
        }
    }
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Snowflake ID generator configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnowflakeConfig {
    #[serde(default)]
    pub worker_id: u16,
}

/// Club domain settings
#[derive(Debug, Clone, Deserialize)]
pub struct ClubSettings {
    /// Base URL invite codes are appended to as `?token=<code>`
    #[serde(default = "default_invite_link_base_url")]
    pub invite_link_base_url: String,
    /// Days an invite link stays valid
    #[serde(default = "default_invite_link_ttl_days")]
    pub invite_link_ttl_days: i64,
    /// Length of the generated member tag
    #[serde(default = "default_member_tag_length")]
    pub member_tag_length: usize,
}

impl Default for ClubSettings {
    fn default() -> Self {
        Self {
            invite_link_base_url: default_invite_link_base_url(),
            invite_link_ttl_days: default_invite_link_ttl_days(),
            member_tag_length: default_member_tag_length(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "club-server".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_invite_link_base_url() -> String {
    "http://localhost:3000/clubs/invite".to_string()
}

fn default_invite_link_ttl_days() -> i64 {
    7
}

fn default_member_tag_length() -> usize {
    6
}

/// Parse an optional variable, falling back to `default` when unset
fn var_or<T: FromStr>(name: &'static str, default: impl FnOnce() -> T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name, raw)),
        Err(_) => Ok(default()),
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    /// or a provided value cannot be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let env = match env::var("APP_ENV") {
            Ok(raw) => Environment::parse(&raw).ok_or(ConfigError::InvalidValue("APP_ENV", raw))?,
            Err(_) => default_env(),
        };

        let config = Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env,
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: var_or("DATABASE_MAX_CONNECTIONS", default_max_connections)?,
                min_connections: var_or("DATABASE_MIN_CONNECTIONS", default_min_connections)?,
            },
            snowflake: SnowflakeConfig {
                worker_id: var_or("WORKER_ID", || 0)?,
            },
            club: ClubSettings {
                invite_link_base_url: env::var("CLUB_INVITE_LINK_BASE_URL")
                    .unwrap_or_else(|_| default_invite_link_base_url()),
                invite_link_ttl_days: var_or("CLUB_INVITE_LINK_TTL_DAYS", default_invite_link_ttl_days)?,
                member_tag_length: var_or("MEMBER_TAG_LENGTH", default_member_tag_length)?,
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file (any format the `config` crate detects
    /// from the extension), overridden by `CLUB__SECTION__KEY` variables.
    ///
    /// # Errors
    /// Returns an error if the sources cannot be read or deserialized
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let config: Self = ::config::Config::builder()
            .add_source(::config::File::with_name(path).required(false))
            .add_source(
                ::config::Environment::with_prefix("CLUB")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .and_then(::config::Config::try_deserialize)
            .map_err(|e| ConfigError::Load(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.snowflake.worker_id >= 1024 {
            return Err(ConfigError::InvalidValue(
                "WORKER_ID",
                self.snowflake.worker_id.to_string(),
            ));
        }
        if self.club.invite_link_ttl_days <= 0 {
            return Err(ConfigError::InvalidValue(
                "CLUB_INVITE_LINK_TTL_DAYS",
                self.club.invite_link_ttl_days.to_string(),
            ));
        }
        if self.club.member_tag_length == 0 {
            return Err(ConfigError::InvalidValue("MEMBER_TAG_LENGTH", "0".to_string()));
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),

    #[error("Failed to load configuration: {0}")]
    Load(String),
}
