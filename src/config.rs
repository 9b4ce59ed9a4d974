use std::time::Duration;

use solana_sdk::commitment_config::CommitmentConfig;

/// Immutable per-operation context: commitment level and confirmation bounds.
///
/// Every vault operation receives this value explicitly; there is no
/// process-wide connection or provider state anywhere in the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientConfig {
    /// Commitment level a transaction must reach to count as confirmed
    pub commitment: CommitmentConfig,
    /// Upper bound on the confirmation wait after broadcast
    pub confirm_timeout: Duration,
    /// Pause between signature status polls
    pub poll_interval: Duration,
}

impl ClientConfig {
    /// Context with the given commitment and the default wait bounds
    pub fn new(commitment: CommitmentConfig) -> Self {
        Self {
            commitment,
            ..Self::default()
        }
    }

    pub fn with_confirm_timeout(mut self, confirm_timeout: Duration) -> Self {
        self.confirm_timeout = confirm_timeout;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            commitment: CommitmentConfig::confirmed(),
            confirm_timeout: Duration::from_secs(60),
            poll_interval: Duration::from_millis(500),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_commitment_is_confirmed() {
        let config = ClientConfig::default();
        assert!(config.commitment.is_confirmed());
        assert!(config.confirm_timeout > Duration::ZERO);
        assert!(config.poll_interval > Duration::ZERO);
    }

    #[test]
    fn test_builders_override_bounds() {
        let config = ClientConfig::new(CommitmentConfig::finalized())
            .with_confirm_timeout(Duration::from_secs(5))
            .with_poll_interval(Duration::from_millis(50));

        assert!(config.commitment.is_finalized());
        assert_eq!(config.confirm_timeout, Duration::from_secs(5));
        assert_eq!(config.poll_interval, Duration::from_millis(50));
    }
}
