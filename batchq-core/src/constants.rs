//! Default Threshold Values
//!
//! Defaults for deployments that do not ship their own configuration file.
//! Sized for a typical single-process ingestion stage feeding a log or
//! network sink.

/// Default maximum batch size per flush.
///
/// 1000 messages per batch keeps flush callbacks chunky enough to amortize
/// sink overhead (syscalls, network round trips) without holding large
/// amounts of data hostage to a slow sink.
pub const DEFAULT_FREQUENCY_THRESHOLD: usize = 1000;

/// Default total buffer capacity.
///
/// 10x the batch size gives the flush side room to fall behind for several
/// batches before producers start seeing `Full` rejections.
pub const DEFAULT_ROLLOVER_THRESHOLD: usize = 10_000;

/// Default elapsed-time flush trigger in seconds.
///
/// Bounds the latency of a trickle of messages that never reaches the
/// frequency threshold on its own.
pub const DEFAULT_TIME_THRESHOLD_SECS: u32 = 5;
