use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

/// Server configuration, read from the environment with logged defaults
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub cors_origin: String,
    pub static_dir: String,
    pub enforce_roles: bool,
    pub log_filter: String,
}

impl Config {
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `load` passes the process environment
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            host: try_load(&lookup, "NETCOMPASSION_HOST", "127.0.0.1".to_string()),
            port: try_load(&lookup, "NETCOMPASSION_PORT", 4000),
            database_url: try_load(
                &lookup,
                "NETCOMPASSION_DATABASE_URL",
                "sqlite:netcompassion.db".to_string(),
            ),
            cors_origin: try_load(
                &lookup,
                "NETCOMPASSION_CORS_ORIGIN",
                "http://localhost:8080".to_string(),
            ),
            static_dir: try_load(&lookup, "NETCOMPASSION_STATIC_DIR", "../frontend/dist".to_string()),
            enforce_roles: try_load(&lookup, "NETCOMPASSION_ENFORCE_ROLES", false),
            log_filter: try_load(&lookup, "NETCOMPASSION_LOG", "info".to_string()),
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn try_load<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        info!("{key} not set, using default: {default}");
        return default;
    };

    raw.parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
        default
    })
}
