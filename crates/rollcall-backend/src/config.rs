//! Runtime settings, read from the environment.

use std::net::SocketAddr;

use chrono::TimeDelta;

pub const ADDR_VAR: &str = "ROLLCALL_ADDR";
pub const SESSION_TTL_VAR: &str = "ROLLCALL_SESSION_TTL_MINUTES";
pub const ALLOWED_ORIGINS_VAR: &str = "ROLLCALL_ALLOWED_ORIGINS";

const DEFAULT_ADDR: &str = "127.0.0.1:8000";
const DEFAULT_SESSION_TTL_MINUTES: i64 = 120;
const DEV_PORTS: [u16; 5] = [3000, 5173, 8000, 8080, 8081];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("ROLLCALL_ADDR is not a socket address: {0}")]
    Addr(String),
    #[error("ROLLCALL_SESSION_TTL_MINUTES must be a positive number of minutes, got {0:?}")]
    SessionTtl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub addr: SocketAddr,
    pub session_ttl: TimeDelta,
    pub allowed_origins: Vec<String>,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any key lookup; unset or blank keys take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let addr = get(ADDR_VAR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr: SocketAddr = addr
            .trim()
            .parse()
            .map_err(|_| ConfigError::Addr(addr.clone()))?;

        let session_ttl = match get(SESSION_TTL_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|minutes| *minutes > 0)
                .map(TimeDelta::minutes)
                .ok_or(ConfigError::SessionTtl(raw))?,
            None => TimeDelta::minutes(DEFAULT_SESSION_TTL_MINUTES),
        };

        let allowed_origins = match get(ALLOWED_ORIGINS_VAR) {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(|origin| origin.trim_end_matches('/').to_string())
                .collect(),
            None => dev_origins(),
        };

        Ok(Self {
            addr,
            session_ttl,
            allowed_origins,
        })
    }
}

fn dev_origins() -> Vec<String> {
    DEV_PORTS
        .iter()
        .flat_map(|port| {
            [
                format!("http://localhost:{port}"),
                format!("http://127.0.0.1:{port}"),
            ]
        })
        .collect()
}
