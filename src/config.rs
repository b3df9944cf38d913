//! Runtime configuration for the `blockfall` binary, read from the environment.

use std::env;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::FRAME_MS;

pub const SEED_VAR: &str = "BLOCKFALL_SEED";
pub const FRAME_MS_VAR: &str = "BLOCKFALL_FRAME_MS";
pub const LOG_PATH_VAR: &str = "BLOCKFALL_LOG_PATH";

/// Accepted frame period range in milliseconds
pub const FRAME_MS_RANGE: (u64, u64) = (1, 250);

/// Binary configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Piece sequence seed.
    pub seed: u32,
    /// Input poll timeout / redraw period.
    pub frame_ms: u64,
    /// Log file; no logger is installed when unset.
    pub log_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: clock_seed(),
            frame_ms: FRAME_MS as u64,
            log_path: None,
        }
    }
}

impl AppConfig {
    /// Create from environment variables. Invalid values fall back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed = lookup(SEED_VAR)
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        let frame_ms = lookup(FRAME_MS_VAR)
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(|ms| ms.clamp(FRAME_MS_RANGE.0, FRAME_MS_RANGE.1))
            .unwrap_or(FRAME_MS as u64);

        let log_path = lookup(LOG_PATH_VAR)
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            seed,
            frame_ms,
            log_path,
        }
    }
}

fn clock_seed() -> u32 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(d) => (d.as_secs() as u32) ^ d.subsec_nanos(),
        Err(_) => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let cfg = config(&[]);
        assert_eq!(cfg.frame_ms, 16);
        assert_eq!(cfg.log_path, None);
    }

    #[test]
    fn test_parses_values() {
        let cfg = config(&[
            (SEED_VAR, "42"),
            (FRAME_MS_VAR, " 33 "),
            (LOG_PATH_VAR, "/tmp/blockfall.log"),
        ]);
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.frame_ms, 33);
        assert_eq!(cfg.log_path.as_deref(), Some("/tmp/blockfall.log"));
    }

    #[test]
    fn test_frame_ms_is_clamped() {
        assert_eq!(config(&[(FRAME_MS_VAR, "0")]).frame_ms, 1);
        assert_eq!(config(&[(FRAME_MS_VAR, "10000")]).frame_ms, 250);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let cfg = config(&[(FRAME_MS_VAR, "fast"), (LOG_PATH_VAR, "   ")]);
        assert_eq!(cfg.frame_ms, 16);
        assert_eq!(cfg.log_path, None);
    }
}
