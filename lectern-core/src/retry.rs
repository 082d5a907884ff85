//! Retry policy for transient write-path failures.
//!
//! Explicit max attempts, multiplicative backoff, deterministic jitter.
//! Replaces ad hoc fixed-sleep retry loops.

use std::time::Duration;

use tracing::warn;

/// A reusable retry policy for operations that can fail transiently.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Delay before the second attempt.
    pub base_delay: Duration,
    /// Ceiling on any single delay.
    pub max_delay: Duration,
    /// Backoff multiplier applied per attempt.
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(50),
            max_delay: Duration::from_secs(2),
            multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Delay before attempt `n` (0-based; attempt 0 has no delay).
    /// Jitter is derived from an FNV-1a hash of the attempt counter so the
    /// schedule is deterministic but not lockstep across callers.
    pub fn delay_for_attempt(&self, attempt: u32, seed: u64) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        let exp = self.multiplier.powi(attempt as i32 - 1);
        let raw = self.base_delay.as_millis() as f64 * exp;
        let capped = raw.min(self.max_delay.as_millis() as f64);

        let mut h: u64 = 0xcbf29ce484222325;
        for b in seed.to_le_bytes().iter().chain(&attempt.to_le_bytes()) {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        // Jitter in [0.5, 1.0) of the capped delay.
        let jitter = 0.5 + (h % 1000) as f64 / 2000.0;
        Duration::from_millis((capped * jitter) as u64)
    }

    /// Run `op` until it succeeds or attempts are exhausted, sleeping the
    /// scheduled delay between attempts. `is_transient` decides whether an
    /// error is worth retrying; permanent errors return immediately.
    pub fn run<T, E, F, P>(&self, label: &str, mut op: F, is_transient: P) -> Result<T, E>
    where
        F: FnMut() -> Result<T, E>,
        P: Fn(&E) -> bool,
        E: std::fmt::Display,
    {
        let seed = self as *const Self as u64;
        let mut attempt = 0;
        loop {
            match op() {
                Ok(value) => return Ok(value),
                Err(e) if attempt + 1 < self.max_attempts && is_transient(&e) => {
                    attempt += 1;
                    let delay = self.delay_for_attempt(attempt, seed);
                    warn!(
                        op = label,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "transient failure, retrying"
                    );
                    std::thread::sleep(delay);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn succeeds_after_transient_failures() {
        let policy = RetryPolicy {
            base_delay: Duration::from_millis(1),
            ..Default::default()
        };
        let calls = Cell::new(0u32);
        let result: Result<u32, String> = policy.run(
            "test",
            || {
                calls.set(calls.get() + 1);
                if calls.get() < 3 {
                    Err("busy".to_string())
                } else {
                    Ok(7)
                }
            },
            |_| true,
        );
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn permanent_errors_do_not_retry() {
        let policy = RetryPolicy::default();
        let calls = Cell::new(0u32);
        let result: Result<(), String> = policy.run(
            "test",
            || {
                calls.set(calls.get() + 1);
                Err("corrupt".to_string())
            },
            |_| false,
        );
        assert!(result.is_err());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn attempts_are_exhausted() {
        let policy = RetryPolicy {
            max_attempts: 4,
            base_delay: Duration::from_millis(1),
            ..Default::default()
        };
        let calls = Cell::new(0u32);
        let result: Result<(), String> = policy.run(
            "test",
            || {
                calls.set(calls.get() + 1);
                Err("busy".to_string())
            },
            |_| true,
        );
        assert!(result.is_err());
        assert_eq!(calls.get(), 4);
    }

    #[test]
    fn delay_grows_and_respects_cap() {
        let policy = RetryPolicy {
            max_attempts: 10,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(400),
            multiplier: 2.0,
        };
        assert_eq!(policy.delay_for_attempt(0, 1), Duration::ZERO);
        let d1 = policy.delay_for_attempt(1, 1);
        let d8 = policy.delay_for_attempt(8, 1);
        assert!(d1 >= Duration::from_millis(50));
        assert!(d8 <= Duration::from_millis(400));
    }
}
