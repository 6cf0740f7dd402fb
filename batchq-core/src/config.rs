//! Buffer configuration
//!
//! [`BatchConfig`] carries the three thresholds that drive the buffer's
//! flush policy. The buffer takes a validated config *value* at
//! construction; it never reads files or environment variables itself.
//! Deployments that keep thresholds in a JSON file can use the std-only
//! [`BatchConfig::from_json_file`] loader, which expects:
//!
//! ```json
//! {
//!     "frequency_threshold": 1000,
//!     "rollover_threshold": 10000,
//!     "time_threshold_in_secs": 5
//! }
//! ```

use crate::constants::{
    DEFAULT_FREQUENCY_THRESHOLD, DEFAULT_ROLLOVER_THRESHOLD, DEFAULT_TIME_THRESHOLD_SECS,
};
use crate::errors::{ConfigError, ConfigResult};

/// Flush policy thresholds, immutable after construction
///
/// Invariants, checked by [`validate`](Self::validate):
/// - all three fields are positive
/// - `frequency_threshold <= rollover_threshold` (a batch size larger than
///   capacity would make the frequency trigger unreachable)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatchConfig {
    /// Maximum messages returned per flush batch; buffered length reaching
    /// this is one of the two should-flush triggers
    pub frequency_threshold: usize,

    /// Total buffer capacity; `store` fails once the occupied length
    /// reaches this
    pub rollover_threshold: usize,

    /// Elapsed seconds since the last flush that triggers should-flush
    /// regardless of occupancy
    #[cfg_attr(feature = "serde", serde(rename = "time_threshold_in_secs"))]
    pub time_threshold_secs: u32,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            frequency_threshold: DEFAULT_FREQUENCY_THRESHOLD,
            rollover_threshold: DEFAULT_ROLLOVER_THRESHOLD,
            time_threshold_secs: DEFAULT_TIME_THRESHOLD_SECS,
        }
    }
}

impl BatchConfig {
    /// Create a config from the three thresholds
    pub fn new(
        frequency_threshold: usize,
        rollover_threshold: usize,
        time_threshold_secs: u32,
    ) -> Self {
        Self {
            frequency_threshold,
            rollover_threshold,
            time_threshold_secs,
        }
    }

    /// Check the configuration invariants
    pub fn validate(&self) -> ConfigResult<()> {
        if self.frequency_threshold == 0 {
            return Err(ConfigError::ZeroThreshold {
                field: "frequency_threshold",
            });
        }
        if self.rollover_threshold == 0 {
            return Err(ConfigError::ZeroThreshold {
                field: "rollover_threshold",
            });
        }
        if self.time_threshold_secs == 0 {
            return Err(ConfigError::ZeroThreshold {
                field: "time_threshold_in_secs",
            });
        }
        if self.frequency_threshold > self.rollover_threshold {
            return Err(ConfigError::FrequencyExceedsCapacity {
                frequency: self.frequency_threshold,
                capacity: self.rollover_threshold,
            });
        }
        Ok(())
    }

    /// Time threshold converted to milliseconds for elapsed comparisons
    pub(crate) fn time_threshold_ms(&self) -> u64 {
        u64::from(self.time_threshold_secs) * 1000
    }
}

#[cfg(feature = "std")]
impl BatchConfig {
    /// Parse and validate a config from JSON bytes
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, crate::errors::ConfigLoadError> {
        let config: Self = serde_json::from_slice(bytes)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a config file
    pub fn from_json_file(
        path: impl AsRef<std::path::Path>,
    ) -> Result<Self, crate::errors::ConfigLoadError> {
        let bytes = std::fs::read(path)?;
        Self::from_json_slice(&bytes)
    }
}
