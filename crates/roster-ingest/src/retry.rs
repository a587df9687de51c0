//! Retry with exponential backoff, as an explicit state machine.
//!
//! ```text
//! Attempting(n) --ok--------------------------------> Succeeded(n)
//! Attempting(n) --err, retryable, n < max-----------> Waiting(n, delay) --> Attempting(n + 1)
//! Attempting(n) --err, terminal or n == max---------> Exhausted(n)
//! ```
//!
//! The machine never sleeps itself; whoever drives it hands `Waiting` delays
//! to a [`Sleeper`].

use std::thread;
use std::time::Duration;

use roster_model::FetchOptions;

use crate::error::FetchError;

/// Attempt budget and base delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    pub fn from_options(options: &FetchOptions) -> Self {
        Self::new(options.max_retries, options.base_delay())
    }

    /// Delay after failed attempt `attempt` (1-based): `base * 2^(attempt - 1)`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.base_delay.saturating_mul(1u32 << exponent)
    }

    pub fn start(&self) -> RetryState {
        RetryState::Attempting(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryState {
    Attempting(u32),
    Waiting { attempt: u32, delay: Duration },
    Succeeded { attempts: u32 },
    Exhausted { attempts: u32 },
}

impl RetryState {
    /// Transition after the current attempt finished.
    ///
    /// Only `Attempting` reacts to an outcome; every other state is returned
    /// unchanged.
    #[must_use]
    pub fn on_outcome(self, policy: &RetryPolicy, outcome: Result<(), &FetchError>) -> Self {
        let RetryState::Attempting(attempt) = self else {
            return self;
        };
        match outcome {
            Ok(()) => RetryState::Succeeded { attempts: attempt },
            Err(err) if err.is_retryable() && attempt < policy.max_attempts => {
                RetryState::Waiting {
                    attempt,
                    delay: policy.delay_for(attempt),
                }
            }
            Err(_) => RetryState::Exhausted { attempts: attempt },
        }
    }

    /// Leave `Waiting` once the delay has elapsed.
    #[must_use]
    pub fn resume(self) -> Self {
        match self {
            RetryState::Waiting { attempt, .. } => RetryState::Attempting(attempt + 1),
            other => other,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RetryState::Succeeded { .. } | RetryState::Exhausted { .. }
        )
    }
}

/// Blocking pause capability.
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

impl<S: Sleeper + ?Sized> Sleeper for &S {
    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration);
    }
}

/// Sleeps the current thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            thread::sleep(duration);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> RetryPolicy {
        RetryPolicy::new(3, Duration::from_millis(1000))
    }

    fn timeout() -> FetchError {
        FetchError::Timeout {
            url: "u".to_string(),
        }
    }

    #[test]
    fn delays_double() {
        let policy = policy();
        assert_eq!(policy.delay_for(1), Duration::from_millis(1000));
        assert_eq!(policy.delay_for(2), Duration::from_millis(2000));
        assert_eq!(policy.delay_for(3), Duration::from_millis(4000));
    }

    #[test]
    fn failure_waits_then_attempts_again() {
        let policy = policy();
        let err = timeout();
        let state = policy.start().on_outcome(&policy, Err(&err));
        assert_eq!(
            state,
            RetryState::Waiting {
                attempt: 1,
                delay: Duration::from_millis(1000)
            }
        );
        assert_eq!(state.resume(), RetryState::Attempting(2));
    }

    #[test]
    fn last_attempt_exhausts_without_waiting() {
        let policy = policy();
        let err = timeout();
        let state = RetryState::Attempting(3).on_outcome(&policy, Err(&err));
        assert_eq!(state, RetryState::Exhausted { attempts: 3 });
        assert!(state.is_terminal());
    }

    #[test]
    fn terminal_error_skips_retries() {
        let policy = policy();
        let err = FetchError::InvalidRequest("bad url".to_string());
        let state = policy.start().on_outcome(&policy, Err(&err));
        assert_eq!(state, RetryState::Exhausted { attempts: 1 });
    }

    #[test]
    fn zero_budget_is_clamped_to_one_attempt() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts, 1);
    }
}
