use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "Musaaf";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const ENV_ADDR: &str = "MUSAAF_ADDR";
pub const ENV_MODELS_DIR: &str = "MUSAAF_MODELS_DIR";
pub const ENV_LEXICON: &str = "MUSAAF_LEXICON";
pub const ENV_EXTRACT_TIMEOUT_MS: &str = "MUSAAF_EXTRACT_TIMEOUT_MS";

const DEFAULT_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_MODELS_DIR: &str = "models";
const DEFAULT_EXTRACT_TIMEOUT_MS: u64 = 2000;

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "musaaf=debug,musaaf_lib=debug,tower_http=debug"
    } else {
        "musaaf=info,musaaf_lib=info,tower_http=info"
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid {var} '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime configuration, read once at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub addr: SocketAddr,
    /// Holds `<field>.json` for each classified field.
    pub models_dir: PathBuf,
    /// Replaces the built-in keyword lexicon when set.
    pub lexicon_path: Option<PathBuf>,
    pub extract_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            models_dir: PathBuf::from(DEFAULT_MODELS_DIR),
            lexicon_path: None,
            extract_timeout: Duration::from_millis(DEFAULT_EXTRACT_TIMEOUT_MS),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let raw_addr = get(ENV_ADDR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = raw_addr
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                var: ENV_ADDR,
                value: raw_addr.clone(),
                reason: e.to_string(),
            })?;

        let models_dir = get(ENV_MODELS_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODELS_DIR));

        let lexicon_path = get(ENV_LEXICON).map(PathBuf::from);

        let extract_timeout = match get(ENV_EXTRACT_TIMEOUT_MS) {
            None => Duration::from_millis(DEFAULT_EXTRACT_TIMEOUT_MS),
            Some(raw) => {
                let ms = raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                    var: ENV_EXTRACT_TIMEOUT_MS,
                    value: raw.clone(),
                    reason: e.to_string(),
                })?;
                if ms == 0 {
                    return Err(ConfigError::Invalid {
                        var: ENV_EXTRACT_TIMEOUT_MS,
                        value: raw,
                        reason: "must be greater than zero".into(),
                    });
                }
                Duration::from_millis(ms)
            }
        };

        Ok(Self {
            addr,
            models_dir,
            lexicon_path,
            extract_timeout,
        })
    }
}
