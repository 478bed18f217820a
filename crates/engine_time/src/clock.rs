//! Steady clock sources.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

/// A monotonic time source with microsecond resolution.
///
/// Readings never decrease. The absolute value is meaningless; only the
/// difference between two readings is.
pub trait SteadyClock: Send + Sync + std::fmt::Debug {
    /// Microseconds since the clock's origin.
    fn microsec(&self) -> u64;
}

/// Real time, backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Create a clock whose origin is now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// The process-wide system clock shared by every timer that is not
    /// given a clock explicitly.
    #[must_use]
    pub fn shared() -> Arc<dyn SteadyClock> {
        static SHARED: OnceLock<Arc<SystemClock>> = OnceLock::new();
        SHARED.get_or_init(|| Arc::new(Self::new())).clone()
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SteadyClock for SystemClock {
    fn microsec(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_micros()).unwrap_or(u64::MAX)
    }
}

/// A clock that only moves when told to.
///
/// Useful for fixed-timestep hosts and for tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    /// Create a clock reading zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        let micros = u64::try_from(delta.as_micros()).unwrap_or(u64::MAX);
        self.now
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |now| {
                Some(now.saturating_add(micros))
            })
            .ok();
    }

    /// Move the clock to `micros`. Ignored if that would go backwards.
    pub fn set_microsec(&self, micros: u64) {
        self.now.fetch_max(micros, Ordering::AcqRel);
    }
}

impl SteadyClock for ManualClock {
    fn microsec(&self) -> u64 {
        self.now.load(Ordering::Acquire)
    }
}
