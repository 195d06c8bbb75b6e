//! Limits on how long a single search may run

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use thiserror::Error;

/// How often (in steps) the wall clock is consulted
const CLOCK_CHECK_INTERVAL: u64 = 1024;

/// Why a search stopped before reaching a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BudgetExhausted {
    /// The step limit was reached
    #[error("step limit of {0} reached")]
    Steps(u64),
    /// The time limit elapsed
    #[error("time limit of {0:?} elapsed")]
    Timeout(Duration),
    /// The cancellation flag was raised
    #[error("search cancelled")]
    Cancelled,
}

/// Step, time and cancellation limits for one [`Packer::solve`] call
///
/// A step is one attempted placement of an orientation at an anchor. The
/// default budget is unlimited.
///
/// # Example
///
/// ```
/// use region_packer::SearchBudget;
/// use std::time::Duration;
///
/// let budget = SearchBudget::unlimited()
///     .with_max_steps(1_000_000)
///     .with_timeout(Duration::from_secs(2));
/// assert_eq!(budget.max_steps(), Some(1_000_000));
/// ```
///
/// [`Packer::solve`]: crate::Packer::solve
#[derive(Debug, Clone, Default)]
pub struct SearchBudget {
    max_steps: Option<u64>,
    timeout: Option<Duration>,
    cancel: Option<Arc<AtomicBool>>,
}

impl SearchBudget {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Stop the search as soon as `flag` becomes `true`
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn max_steps(&self) -> Option<u64> {
        self.max_steps
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn is_unlimited(&self) -> bool {
        self.max_steps.is_none() && self.timeout.is_none() && self.cancel.is_none()
    }

    /// Start the clock for one search
    pub(crate) fn start(&self) -> Limiter<'_> {
        Limiter {
            max_steps: self.max_steps,
            // A timeout too far out to represent never expires
            deadline: self
                .timeout
                .and_then(|t| Some((Instant::now().checked_add(t)?, t))),
            cancel: self.cancel.as_deref(),
        }
    }
}

/// Running view of a [`SearchBudget`] during one search
pub(crate) struct Limiter<'b> {
    max_steps: Option<u64>,
    deadline: Option<(Instant, Duration)>,
    cancel: Option<&'b AtomicBool>,
}

impl Limiter<'_> {
    /// Check whether one more step may be taken after `steps` steps
    pub fn check(&self, steps: u64) -> Result<(), BudgetExhausted> {
        if let Some(max) = self.max_steps
            && steps >= max
        {
            return Err(BudgetExhausted::Steps(max));
        }
        if self.cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            return Err(BudgetExhausted::Cancelled);
        }
        if let Some((deadline, timeout)) = self.deadline
            && steps % CLOCK_CHECK_INTERVAL == 0
            && Instant::now() >= deadline
        {
            return Err(BudgetExhausted::Timeout(timeout));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlimited_never_stops() {
        let budget = SearchBudget::unlimited();
        let limiter = budget.start();

        assert!(budget.is_unlimited());
        assert!(limiter.check(0).is_ok());
        assert!(limiter.check(u64::MAX - 1).is_ok());
    }

    #[test]
    fn test_step_limit() {
        let budget = SearchBudget::unlimited().with_max_steps(3);
        let limiter = budget.start();

        assert!(limiter.check(2).is_ok());
        assert_eq!(limiter.check(3), Err(BudgetExhausted::Steps(3)));
    }

    #[test]
    fn test_zero_timeout_trips_on_first_check() {
        let budget = SearchBudget::unlimited().with_timeout(Duration::ZERO);
        let limiter = budget.start();

        assert_eq!(
            limiter.check(0),
            Err(BudgetExhausted::Timeout(Duration::ZERO))
        );
    }

    #[test]
    fn test_cancel_flag() {
        let flag = Arc::new(AtomicBool::new(false));
        let budget = SearchBudget::unlimited().with_cancel_flag(flag.clone());
        let limiter = budget.start();

        assert!(limiter.check(5).is_ok());
        flag.store(true, Ordering::Relaxed);
        assert_eq!(limiter.check(6), Err(BudgetExhausted::Cancelled));
    }

    #[test]
    fn test_huge_timeout_never_trips() {
        let timeout = Duration::from_secs(9_467_280_000_000_000_000);
        let budget = SearchBudget::unlimited().with_timeout(timeout);
        let limiter = budget.start();

        assert_eq!(budget.timeout(), Some(timeout));
        assert!(limiter.check(0).is_ok());
        assert!(limiter.check(CLOCK_CHECK_INTERVAL).is_ok());
    }
}
