//! Failed-attempt lockout
//!
//! Counts consecutive failures and locks further attempts for a fixed window
//! once the limit is reached. Storage is the caller's concern; this module only
//! does the arithmetic.

use std::time::Duration;

/// Lockout configuration
#[derive(Debug, Clone)]
pub struct LockoutPolicy {
    /// Failures allowed before locking
    pub max_attempts: u32,
    /// How long a lockout lasts
    pub lockout: Duration,
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            lockout: Duration::from_secs(15 * 60),
        }
    }
}

impl LockoutPolicy {
    pub fn new(max_attempts: u32, lockout_secs: u64) -> Self {
        Self {
            max_attempts,
            lockout: Duration::from_secs(lockout_secs),
        }
    }

    pub fn lockout_ms(&self) -> i64 {
        self.lockout.as_millis() as i64
    }

    pub fn lockout_minutes(&self) -> u64 {
        self.lockout.as_secs().div_ceil(60)
    }
}

/// Attempt counter plus optional lock deadline (epoch ms)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LockoutState {
    pub attempts: u32,
    pub locked_until_ms: Option<i64>,
}

/// Outcome of recording one failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureOutcome {
    /// Still below the limit
    Counted { attempts: u32 },
    /// This failure reached the limit
    LockedUntil(i64),
}

impl LockoutState {
    /// Whether attempts are blocked at `now_ms`
    pub fn is_locked(&self, now_ms: i64) -> bool {
        self.locked_until_ms.is_some_and(|until| now_ms < until)
    }

    /// Whether a lock deadline exists but has passed
    pub fn is_expired_lock(&self, now_ms: i64) -> bool {
        self.locked_until_ms.is_some_and(|until| now_ms >= until)
    }

    /// Whole minutes left on the lock, rounded up; zero when not locked
    pub fn remaining_minutes(&self, now_ms: i64) -> i64 {
        match self.locked_until_ms {
            Some(until) if now_ms < until => {
                let remaining = until - now_ms;
                (remaining + 59_999) / 60_000
            }
            _ => 0,
        }
    }

    /// Record a failed attempt
    pub fn record_failure(&mut self, policy: &LockoutPolicy, now_ms: i64) -> FailureOutcome {
        self.attempts = self.attempts.saturating_add(1);
        if self.attempts >= policy.max_attempts {
            let until = now_ms + policy.lockout_ms();
            self.locked_until_ms = Some(until);
            FailureOutcome::LockedUntil(until)
        } else {
            FailureOutcome::Counted {
                attempts: self.attempts,
            }
        }
    }

    /// Forget the lock deadline but keep the attempt count
    pub fn clear_lock(&mut self) {
        self.locked_until_ms = None;
    }

    /// Reset after a success
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = LockoutPolicy::default();
        assert_eq!(policy.max_attempts, 10);
        assert_eq!(policy.lockout_ms(), 15 * 60 * 1000);
        assert_eq!(policy.lockout_minutes(), 15);
    }

    #[test]
    fn test_locks_on_limit() {
        let policy = LockoutPolicy::new(3, 60);
        let mut state = LockoutState::default();

        assert_eq!(
            state.record_failure(&policy, 0),
            FailureOutcome::Counted { attempts: 1 }
        );
        assert_eq!(
            state.record_failure(&policy, 0),
            FailureOutcome::Counted { attempts: 2 }
        );
        assert_eq!(
            state.record_failure(&policy, 1_000),
            FailureOutcome::LockedUntil(61_000)
        );
        assert!(state.is_locked(60_999));
        assert!(!state.is_locked(61_000));
        assert!(state.is_expired_lock(61_000));
    }

    #[test]
    fn test_remaining_minutes_rounds_up() {
        let state = LockoutState {
            attempts: 10,
            locked_until_ms: Some(15 * 60_000),
        };
        assert_eq!(state.remaining_minutes(0), 15);
        assert_eq!(state.remaining_minutes(1), 15);
        assert_eq!(state.remaining_minutes(14 * 60_000 + 1), 1);
        assert_eq!(state.remaining_minutes(15 * 60_000), 0);
    }

    #[test]
    fn test_reset() {
        let mut state = LockoutState {
            attempts: 4,
            locked_until_ms: Some(10),
        };
        state.reset();
        assert_eq!(state, LockoutState::default());
    }
}
