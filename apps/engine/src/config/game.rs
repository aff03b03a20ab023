//! Engine timing and housekeeping configuration.
//!
//! Everything has a sensible default; `from_env` lets deployments tune the
//! windows without a rebuild. Per-session bounds (max rounds / players) are
//! request data, not configuration — see `domain::rules`.

use std::env;
use std::time::Duration;

/// Timing knobs for the phase state machine and the session sweep.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Round banner countdown before card selection opens.
    pub round_intro: Duration,
    /// Card submission window.
    pub selection_window: Duration,
    /// Results display before auto-advancing to the next round.
    pub results_delay: Duration,
    /// Sessions idle past this are evicted by the sweep.
    pub idle_timeout: Duration,
    /// Interval between sweep passes.
    pub sweep_interval: Duration,
    /// Outbound event channel capacity.
    pub event_capacity: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            round_intro: Duration::from_secs(5),
            selection_window: Duration::from_secs(45),
            results_delay: Duration::from_secs(4),
            idle_timeout: Duration::from_secs(10 * 60),
            sweep_interval: Duration::from_secs(60),
            event_capacity: 256,
        }
    }
}

impl GameConfig {
    /// Build from environment variables, falling back to defaults for any
    /// that are unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            round_intro: secs_var("ENGINE_ROUND_INTRO_SECS", defaults.round_intro),
            selection_window: secs_var("ENGINE_SELECTION_WINDOW_SECS", defaults.selection_window),
            results_delay: secs_var("ENGINE_RESULTS_DELAY_SECS", defaults.results_delay),
            idle_timeout: secs_var("ENGINE_IDLE_TIMEOUT_SECS", defaults.idle_timeout),
            sweep_interval: secs_var("ENGINE_SWEEP_INTERVAL_SECS", defaults.sweep_interval),
            event_capacity: defaults.event_capacity,
        }
    }
}

fn secs_var(name: &str, default: Duration) -> Duration {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = GameConfig::default();
        assert!(config.selection_window >= Duration::from_secs(30));
        assert!(config.results_delay < config.selection_window);
    }
}
