//! Patrol daemon configuration, loaded from environment variables with
//! defaults — same shape as `oj-daemon::lifecycle::Config::load()`: one
//! base dir, everything else derived or overridable, no config file
//! required to start.

use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct PatrolConfig {
    pub patrol_interval: Duration,
    pub health_timeout: Duration,
    pub callback_dir: Option<PathBuf>,
    pub stale_threshold: chrono::Duration,
}

impl Default for PatrolConfig {
    fn default() -> Self {
        Self {
            patrol_interval: Duration::from_secs(60),
            health_timeout: Duration::from_secs(10),
            callback_dir: None,
            stale_threshold: chrono::Duration::days(7),
        }
    }
}

impl PatrolConfig {
    pub fn load() -> Self {
        let defaults = Self::default();
        Self {
            patrol_interval: Duration::from_secs(env_u64("HAL9000_PATROL_INTERVAL_SECS", defaults.patrol_interval.as_secs())),
            health_timeout: Duration::from_secs(env_u64("HAL9000_HEALTH_TIMEOUT_SECS", defaults.health_timeout.as_secs())),
            callback_dir: std::env::var("HAL9000_CALLBACK_DIR").ok().map(PathBuf::from).or_else(|| Some(hal9000_watchers::runtime_dir::runtime_dir().join("callbacks"))),
            stale_threshold: chrono::Duration::days(env_u64("HAL9000_STALE_THRESHOLD_DAYS", 7) as i64),
        }
    }
}

fn env_u64(var: &str, default: u64) -> u64 {
    std::env::var(var).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}
