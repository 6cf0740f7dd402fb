//! Error Types for Buffer and Configuration Failures
//!
//! ## Design Philosophy
//!
//! batchq's error system keeps the buffering hot path cheap:
//!
//! 1. **Small Size**: Construction errors carry only inline integers and
//!    `&'static str` field names, no heap allocation.
//!
//! 2. **Copy Semantics**: `ConfigError` implements `Copy` so it can be
//!    returned and stored without move complications.
//!
//! 3. **Callback Transparency**: a failed flush propagates the sink's own
//!    error type verbatim inside [`BufferError::Callback`]. The buffer never
//!    wraps, stringifies, or retries it.
//!
//! ## Error Categories
//!
//! - [`ConfigError`]: construction-time validation failure. The buffer is
//!   never built; there is no partially-initialized state.
//! - [`BufferError::Full`]: `store` rejected at capacity. Recoverable by
//!   flushing or discarding; nothing was mutated.
//! - [`BufferError::Callback`]: the flush sink reported failure. Cursors are
//!   untouched, so a retry re-selects the same batch.

use core::fmt;

use thiserror_no_std::Error;

/// Result type for configuration validation
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for buffer operations, generic over the sink's error
pub type BufferResult<T, E> = Result<T, BufferError<E>>;

/// Construction-time configuration errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A threshold field was zero or missing
    #[error("{field} must be a positive integer")]
    ZeroThreshold {
        /// Name of the offending configuration field
        field: &'static str,
    },

    /// Frequency threshold larger than capacity would make the frequency
    /// trigger unreachable before the capacity trigger fires
    #[error("frequency threshold {frequency} exceeds rollover threshold {capacity}")]
    FrequencyExceedsCapacity {
        /// Configured maximum batch size
        frequency: usize,
        /// Configured total capacity
        capacity: usize,
    },
}

/// Buffer operation errors, generic over the flush sink's error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError<E> {
    /// `store` rejected because the buffer is at capacity
    Full {
        /// Occupied length at the time of rejection
        len: usize,
        /// Total capacity (rollover threshold)
        capacity: usize,
    },
    /// The flush sink reported failure; buffer state is unchanged
    Callback(E),
}

impl<E: fmt::Display> fmt::Display for BufferError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full { len, capacity } => {
                write!(f, "Buffer full: {} of {} slots occupied", len, capacity)
            }
            Self::Callback(e) => write!(f, "Flush callback failed: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl<E: fmt::Debug + fmt::Display> std::error::Error for BufferError<E> {}

/// Errors from loading a configuration file (requires `std`)
#[cfg(feature = "std")]
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    /// Reading the file failed
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The file was not valid JSON for a [`BatchConfig`](crate::BatchConfig)
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    /// The parsed thresholds violate the configuration invariants
    #[error("Invalid config: {0}")]
    Invalid(#[from] ConfigError),
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::ZeroThreshold { field } => {
                defmt::write!(fmt, "{} must be a positive integer", field)
            }
            Self::FrequencyExceedsCapacity { frequency, capacity } => {
                defmt::write!(fmt, "frequency {} exceeds capacity {}", frequency, capacity)
            }
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for BufferError<E> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Full { len, capacity } => {
                defmt::write!(fmt, "Buffer full: {}/{}", len, capacity)
            }
            Self::Callback(e) => defmt::write!(fmt, "Flush callback failed: {}", e),
        }
    }
}
