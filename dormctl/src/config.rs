//! Configuration loading and validation.
//!
//! Settings come from three places, later ones winning: a YAML file
//! (`config.yaml` by default, `-f`/`DORMCTL_CONFIG` to point elsewhere),
//! environment variables prefixed with `DORMCTL_` (double underscores mark
//! nesting, so `DORMCTL_DATABASE__POOL__MAX_CONNECTIONS=20` reaches
//! `database.pool.max_connections`), and finally the bare `DATABASE_URL`
//! convention, which replaces `database.url` wherever the rest of the
//! database section came from.
//!
//! ```no_run
//! use clap::Parser;
//! use dormctl::config::{Args, Config};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let args = Args::parse();
//! let config = Config::load(&args)?;
//! println!("binding to {}", config.bind_address());
//! # Ok(())
//! # }
//! ```
//!
//! Everything has a default, so the server starts with no config file at
//! all; a real deployment usually provides at least `database.url` and its
//! room inventory.

use clap::Parser;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};
use url::Url;

/// Command line surface: where the config file lives, plus `--validate`
/// for deploy pipelines that want to reject broken config before rollout.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the YAML configuration file
    #[arg(short = 'f', long, env = "DORMCTL_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Check the configuration and exit instead of serving
    #[arg(long)]
    pub validate: bool,
}

/// Root configuration for the dormitory backend.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Interface the HTTP server binds to
    pub host: String,
    /// Port the HTTP server binds to
    pub port: u16,
    /// Landing spot for the bare `DATABASE_URL` environment variable;
    /// folded into `database.url` by [`Config::load`] and empty afterwards
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,
    /// PostgreSQL connection and pool settings
    pub database: DatabaseSettings,
    /// Room inventory, created at startup when missing.
    ///
    /// There is no room-creation endpoint; this list is the only way rooms
    /// come into existence. Seeding never alters a room that already
    /// exists, so capacity edits here do not touch occupied rooms.
    pub rooms: Vec<RoomSeed>,
    /// Cross-origin policy for the browser frontend
    pub cors: CorsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            database_url: None,
            database: DatabaseSettings::default(),
            // Enough inventory to click around a dev setup
            rooms: vec![
                RoomSeed {
                    number: "101".to_string(),
                    capacity: 2,
                },
                RoomSeed {
                    number: "102".to_string(),
                    capacity: 2,
                },
                RoomSeed {
                    number: "103".to_string(),
                    capacity: 3,
                },
            ],
            cors: CorsConfig::default(),
        }
    }
}

/// Where the data lives and how eagerly we connect to it.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseSettings {
    /// PostgreSQL connection string
    pub url: String,
    /// Pool sizing and connection lifetimes
    pub pool: PoolSettings,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "postgres://localhost:5432/dormitory".to_string(),
            pool: PoolSettings::default(),
        }
    }
}

/// Pool sizing and timeouts, in seconds where applicable.
///
/// `idle_timeout_secs` and `max_lifetime_secs` treat 0 as "never";
/// `acquire_timeout_secs` must be positive so a saturated pool produces a
/// timeout error instead of a hung request.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 0,
            acquire_timeout_secs: 30,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
        }
    }
}

/// One room in the seeded inventory.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RoomSeed {
    /// Business key administrators see (e.g. "101")
    pub number: String,
    /// Maximum occupants; must be at least 1
    pub capacity: i32,
}

/// Cross-origin policy applied to every route.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsConfig {
    /// Origins allowed to call the API from a browser
    pub allowed_origins: Vec<CorsOrigin>,
    /// Whether cookies may accompany cross-origin requests
    pub allow_credentials: bool,
    /// Preflight cache lifetime in seconds
    pub max_age: Option<u64>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            // The Vite dev server of the admin frontend
            allowed_origins: vec![CorsOrigin::Url(Url::parse("http://localhost:5173").unwrap())],
            allow_credentials: false,
            max_age: Some(3600),
        }
    }
}

/// An allowed origin: the wildcard `*`, or one concrete URL.
///
/// Written in config as a plain string either way; anything that is not
/// `*` must parse as a URL.
#[derive(Debug, Clone, PartialEq)]
pub enum CorsOrigin {
    Wildcard,
    Url(Url),
}

impl Serialize for CorsOrigin {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            CorsOrigin::Wildcard => serializer.serialize_str("*"),
            CorsOrigin::Url(url) => serializer.serialize_str(url.as_str()),
        }
    }
}

impl<'de> Deserialize<'de> for CorsOrigin {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if raw == "*" {
            return Ok(CorsOrigin::Wildcard);
        }
        Url::parse(&raw).map(CorsOrigin::Url).map_err(serde::de::Error::custom)
    }
}

impl Config {
    /// Assemble, fold in `DATABASE_URL`, and validate.
    #[allow(clippy::result_large_err)]
    pub fn load(args: &Args) -> Result<Self, figment::Error> {
        let mut config: Self = Self::figment(args).extract()?;

        // Only the URL moves over; pool settings from the file survive
        if let Some(url) = config.database_url.take() {
            config.database.url = url;
        }

        match config.validate() {
            Ok(()) => Ok(config),
            Err(e) => Err(figment::Error::from(e.to_string())),
        }
    }

    /// Reject configurations the server could start with but should not.
    pub fn validate(&self) -> anyhow::Result<()> {
        let mut seen = std::collections::HashSet::new();
        for room in &self.rooms {
            if room.number.trim().is_empty() {
                anyhow::bail!("Config validation: room numbers cannot be empty");
            }
            if room.capacity < 1 {
                anyhow::bail!(
                    "Config validation: room {} has capacity {}, must be at least 1",
                    room.number,
                    room.capacity
                );
            }
            if !seen.insert(room.number.as_str()) {
                anyhow::bail!("Config validation: room {} is listed more than once", room.number);
            }
        }

        if self.database.pool.acquire_timeout_secs == 0 {
            anyhow::bail!("Config validation: database.pool.acquire_timeout_secs must be positive");
        }

        if self.cors.allowed_origins.is_empty() {
            anyhow::bail!("Config validation: cors.allowed_origins cannot be empty");
        }
        let has_wildcard = self.cors.allowed_origins.contains(&CorsOrigin::Wildcard);
        if has_wildcard && self.cors.allow_credentials {
            anyhow::bail!("Config validation: the wildcard origin '*' cannot be combined with allow_credentials");
        }

        Ok(())
    }

    /// The three configuration sources, in override order.
    pub fn figment(args: &Args) -> Figment {
        Figment::new()
            .merge(Yaml::file(&args.config))
            .merge(Env::prefixed("DORMCTL_").split("__"))
            .merge(Env::raw().only(&["DATABASE_URL"]))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
