#[cfg(test)]
#[path = "poll_policy_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;

use crate::configuration::Config;
use crate::configuration::ConfigKey;

/// How often and for how long a run is polled before giving up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_interval: Duration,
    pub timeout: Duration,
}

impl Default for PollPolicy {
    fn default() -> PollPolicy {
        return PollPolicy {
            interval: Duration::from_millis(250),
            max_interval: Duration::from_millis(2000),
            timeout: Duration::from_millis(120_000),
        };
    }
}

fn millis(key: ConfigKey, val: &str) -> Result<Duration> {
    let ms = val
        .parse::<u64>()
        .map_err(|err| return anyhow::anyhow!("{key} must be a number of milliseconds, got '{val}': {err}"))?;

    return Ok(Duration::from_millis(ms));
}

impl PollPolicy {
    pub fn from_config() -> Result<PollPolicy> {
        return PollPolicy::parse(
            &Config::get(ConfigKey::PollInterval),
            &Config::get(ConfigKey::PollMaxInterval),
            &Config::get(ConfigKey::PollTimeout),
        );
    }

    /// Builds a policy from millisecond strings. The interval must be at
    /// least one millisecond, otherwise every delay would stay at zero.
    pub fn parse(interval: &str, max_interval: &str, timeout: &str) -> Result<PollPolicy> {
        let interval = millis(ConfigKey::PollInterval, interval)?;
        if interval.is_zero() {
            bail!("{} must be at least 1 millisecond", ConfigKey::PollInterval);
        }

        return Ok(PollPolicy {
            interval,
            max_interval: millis(ConfigKey::PollMaxInterval, max_interval)?,
            timeout: millis(ConfigKey::PollTimeout, timeout)?,
        });
    }

    /// Delay to use after waiting `current`. Doubles until it hits the cap.
    pub fn next_delay(&self, current: Duration) -> Duration {
        let cap = self.max_interval.max(self.interval);
        return current.saturating_mul(2).min(cap);
    }
}
