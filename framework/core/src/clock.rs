use nix::time::{clock_gettime, ClockId};

use crate::error::PlatformError;

const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Nanoseconds since an arbitrary, process-local epoch.
///
/// Only meaningful when compared with another timestamp from the same clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const fn from_nanos(nanos: u64) -> Self {
        Self(nanos)
    }

    pub const fn as_nanos(self) -> u64 {
        self.0
    }

    /// Nanoseconds elapsed between `earlier` and this timestamp.
    pub fn nanos_since(self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

/// A non-decreasing time source.
///
/// The harness only ever talks to this trait so that tests can substitute a scripted clock.
pub trait Clock {
    fn now(&self) -> Result<Timestamp, PlatformError>;
}

/// `CLOCK_MONOTONIC`, read through `clock_gettime`.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    _private: (),
}

impl MonotonicClock {
    /// Check that the monotonic clock can be read before handing it out.
    ///
    /// Without a working clock no measurement means anything, so the error from this should
    /// end the run.
    pub fn new() -> Result<Self, PlatformError> {
        let clock = Self { _private: () };
        let first = clock.now()?;
        log::trace!("Monotonic clock available, first reading {}ns", first.as_nanos());
        Ok(clock)
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn now(&self) -> Result<Timestamp, PlatformError> {
        let t = clock_gettime(ClockId::CLOCK_MONOTONIC)
            .map_err(|e| PlatformError::new("clock_gettime", e))?;
        Ok(Timestamp(
            t.tv_sec() as u64 * NANOS_PER_SEC + t.tv_nsec() as u64,
        ))
    }
}
