//! Frontend configuration

/// Session polling configuration
pub struct SessionConfig;

impl SessionConfig {
    /// Session check interval in milliseconds
    pub const POLL_INTERVAL_MS: u32 = 60_000; // 1 minute

    /// `interval_ms`, or the default when it is zero
    pub const fn interval_or_default(interval_ms: u32) -> u32 {
        if interval_ms == 0 {
            Self::POLL_INTERVAL_MS
        } else {
            interval_ms
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_interval_falls_back_to_default() {
        assert_eq!(SessionConfig::interval_or_default(0), 60_000);
        assert_eq!(SessionConfig::interval_or_default(5_000), 5_000);
    }
}
