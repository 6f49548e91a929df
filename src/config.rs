//! Engine configuration

use std::time::Duration;

/// Default number of plies searched past the current position
pub const DEFAULT_LOOKAHEAD: usize = 6;

/// Default minimum time a computer player appears to think
pub const DEFAULT_MIN_THINK_TIME: Duration = Duration::from_millis(2000);

/// Search and pacing settings shared by the worker and the session.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use ttt3d::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_lookahead(4)
///     .with_min_think_time(Duration::from_millis(250));
/// assert_eq!(config.lookahead, 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Plies searched beyond the cells already filled
    pub lookahead: usize,
    /// Floor on the time between a search request and its reply
    pub min_think_time: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lookahead: DEFAULT_LOOKAHEAD,
            min_think_time: DEFAULT_MIN_THINK_TIME,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_lookahead(mut self, lookahead: usize) -> Self {
        self.lookahead = lookahead;
        self
    }

    #[must_use]
    pub fn with_min_think_time(mut self, min_think_time: Duration) -> Self {
        self.min_think_time = min_think_time;
        self
    }
}
