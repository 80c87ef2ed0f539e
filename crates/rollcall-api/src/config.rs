//! Server configuration read from the environment.

use std::fmt::Display;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use rollcall_draw::domain::animation::AnimationConfig;

use crate::error::AppError;

/// Runtime configuration of the API server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// YAML file holding the roster.
    pub roster_file: PathBuf,
    /// Animation cadence and length.
    pub animation: AnimationConfig,
    /// Initial pick count; clamped against the roster when the session starts.
    pub pick_count: usize,
    /// Initial hide mode.
    pub hide_names: bool,
}

impl AppConfig {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, falling back to defaults for
    /// absent keys.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a value cannot be parsed or the
    /// animation timing is invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 = parse_var(&lookup, "PORT", 3000)?;
        let roster_file = lookup("ROSTER_FILE")
            .map_or_else(|| PathBuf::from("config/roster.yaml"), PathBuf::from);
        let tick_ms: u64 = parse_var(&lookup, "TICK_INTERVAL_MS", 50)?;
        let duration_ms: u64 = parse_var(&lookup, "DRAW_DURATION_MS", 1500)?;
        let pick_count: usize = parse_var(&lookup, "PICK_COUNT", 1)?;
        let hide_names = match lookup("HIDE_NAMES") {
            Some(raw) => parse_flag(&raw)
                .ok_or_else(|| AppError::Config(format!("HIDE_NAMES must be a boolean: {raw}")))?,
            None => false,
        };

        let animation = AnimationConfig::new(
            Duration::from_millis(tick_ms),
            Duration::from_millis(duration_ms),
        )
        .map_err(|e| AppError::Config(format!("TICK_INTERVAL_MS: {e}")))?;

        Ok(Self {
            host,
            port,
            roster_file,
            animation,
            pick_count,
            hide_names,
        })
    }

    /// Returns the socket address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST:PORT` is not a valid address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{key} is invalid ({raw}): {e}"))),
        None => Ok(default),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
