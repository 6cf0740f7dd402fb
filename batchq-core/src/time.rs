//! Time sources for the elapsed-time flush trigger
//!
//! The buffer never reads a clock directly; it is handed a [`TimeSource`]
//! at construction. This keeps the core portable and makes the time-based
//! flush trigger deterministic under test:
//! - [`SystemTime`]: wall clock (requires `std`)
//! - [`MonotonicTime`]: monotonic clock, immune to NTP jumps (requires `std`)
//! - [`FixedTime`]: manually advanced clock for tests

/// Timestamp in milliseconds since epoch (or an arbitrary origin for
/// monotonic sources)
pub type Timestamp = u64;

/// Source of time for the buffer
///
/// `now()` only ever feeds elapsed-time calculations, so the origin does
/// not matter; monotonicity does. Wall clocks can be adjusted backwards,
/// which delays the time trigger until the clock catches up. Prefer a
/// monotonic source where one is available.
pub trait TimeSource {
    /// Get current timestamp in milliseconds
    fn now(&self) -> Timestamp;

    /// Check if this source provides wall clock time (vs monotonic)
    fn is_wall_clock(&self) -> bool;
}

/// System wall clock time source (requires `std`)
#[cfg(feature = "std")]
#[derive(Debug, Clone, Default)]
pub struct SystemTime;

#[cfg(feature = "std")]
impl TimeSource for SystemTime {
    fn now(&self) -> Timestamp {
        use std::time::{SystemTime as StdSystemTime, UNIX_EPOCH};

        StdSystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as Timestamp
    }

    fn is_wall_clock(&self) -> bool {
        true
    }
}

/// Monotonic time source backed by [`std::time::Instant`]
///
/// Starts at 0 when constructed, always increases.
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct MonotonicTime {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl MonotonicTime {
    /// Create a monotonic source with its origin at the current instant
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl TimeSource for MonotonicTime {
    fn now(&self) -> Timestamp {
        self.origin.elapsed().as_millis() as Timestamp
    }

    fn is_wall_clock(&self) -> bool {
        false
    }
}

/// Fixed time source for testing
#[derive(Debug, Clone)]
pub struct FixedTime {
    timestamp: Timestamp,
}

impl FixedTime {
    /// Create a fixed source reporting the given timestamp
    pub fn new(timestamp: Timestamp) -> Self {
        Self { timestamp }
    }

    /// Set the reported timestamp
    pub fn set(&mut self, timestamp: Timestamp) {
        self.timestamp = timestamp;
    }

    /// Advance the reported timestamp by `ms` milliseconds
    pub fn advance(&mut self, ms: u64) {
        self.timestamp += ms;
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> Timestamp {
        self.timestamp
    }

    fn is_wall_clock(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_time_advances() {
        let mut time = FixedTime::new(1000);
        assert_eq!(time.now(), 1000);

        time.advance(500);
        assert_eq!(time.now(), 1500);
    }

    #[cfg(feature = "std")]
    #[test]
    fn monotonic_time_is_not_wall_clock() {
        let time = MonotonicTime::new();
        assert!(!time.is_wall_clock());
        assert!(SystemTime.is_wall_clock());
    }
}
