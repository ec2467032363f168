use crate::media::MediaConstraints;
use std::time::Duration;

/// Per-session tuning.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How long a session may sit in Negotiating before it is failed.
    /// Counted from entering Negotiating; cleared on reaching Active.
    pub negotiation_timeout: Duration,
    /// Constraints used when acquiring the local source.
    pub constraints: MediaConstraints,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            negotiation_timeout: Duration::from_secs(30),
            constraints: MediaConstraints::default(),
        }
    }
}
