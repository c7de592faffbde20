//! Callback freshness window

use std::time::Duration;

use crate::error::VerificationError;

/// Default maximum callback age
pub const DEFAULT_MAX_AGE_MINUTES: u64 = 2;

/// Accepts only timestamps in `[now - max_age, now]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreshnessPolicy {
    max_age: Duration,
}

impl FreshnessPolicy {
    pub fn from_minutes(minutes: u64) -> Self {
        Self {
            max_age: Duration::from_secs(minutes.saturating_mul(60)),
        }
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    /// Check a signed timestamp against the verifier's clock
    ///
    /// Timestamps ahead of `now` are rejected as well.
    pub fn check(&self, timestamp: u64, now: u64) -> Result<(), VerificationError> {
        let max_age_secs = self.max_age.as_secs();
        let fresh = timestamp <= now && now - timestamp <= max_age_secs;

        if fresh {
            Ok(())
        } else {
            Err(VerificationError::StaleSignature {
                timestamp,
                now,
                max_age_secs,
            })
        }
    }
}

impl Default for FreshnessPolicy {
    fn default() -> Self {
        Self::from_minutes(DEFAULT_MAX_AGE_MINUTES)
    }
}
