//! Click-speed test: count clicks against a countdown, or time how long a fixed number of clicks takes.

use serde::{Deserialize, Serialize};

pub use score::*;
pub use session::*;

mod score;
mod session;

/// Length of the countdown in [`ClickMode::Time`].
pub const DEFAULT_TIME_LIMIT: u32 = 5;

/// Clicks needed to finish in [`ClickMode::Clicks`].
pub const DEFAULT_CLICK_TARGET: u32 = 50;

/// Results kept in the score history.
pub const DEFAULT_HISTORY_LEN: usize = 10;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClickMode {
    /// Click as often as possible before the countdown runs out
    #[default]
    Time,
    /// Reach the click target as fast as possible
    Clicks,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickTestConfig {
    pub time_limit: u32,
    pub click_target: u32,
    pub history_len: usize,
}

impl ClickTestConfig {
    pub fn new(time_limit: u32, click_target: u32, history_len: usize) -> Self {
        let config = Self {
            time_limit: time_limit.max(1),
            click_target: click_target.max(1),
            history_len: history_len.max(1),
        };
        if (config.time_limit, config.click_target, config.history_len)
            != (time_limit, click_target, history_len)
        {
            log::warn!("Click test config clamped to {:?}", config);
        }
        config
    }
}

impl Default for ClickTestConfig {
    fn default() -> Self {
        Self {
            time_limit: DEFAULT_TIME_LIMIT,
            click_target: DEFAULT_CLICK_TARGET,
            history_len: DEFAULT_HISTORY_LEN,
        }
    }
}
