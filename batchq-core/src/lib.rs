//! Core buffering engine for batchq
//!
//! A bounded, in-memory batching buffer: callers push individual messages,
//! the buffer accumulates them in a fixed-capacity circular store and hands
//! ordered batches to a caller-supplied flush sink based on size, capacity,
//! and time thresholds. It is the buffering stage of a batch-ingestion
//! pipeline (accumulating events before writing them to a log, network
//! sink, or file).
//!
//! Key constraints:
//! - No reallocation after construction; cursors advance, slots recycle
//! - Single caller drives `store`/`flush`; no internal locking
//! - Sink failures propagate verbatim; no internal retry
//!
//! ```rust
//! use batchq_core::{BatchConfig, CircularBuffer, MemorySink};
//! use batchq_core::time::FixedTime;
//!
//! let config = BatchConfig::new(100, 1000, 5);
//! let mut buffer = CircularBuffer::new(config, MemorySink::new(), FixedTime::new(0)).unwrap();
//!
//! buffer.store("event").unwrap();
//! if buffer.should_flush() {
//!     buffer.flush().unwrap();
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod buffer;
pub mod config;
pub mod constants;
pub mod errors;
pub mod sink;
pub mod time;

// Public API
pub use buffer::{BufferStats, CircularBuffer};
pub use config::BatchConfig;
pub use errors::{BufferError, BufferResult, ConfigError, ConfigResult};
pub use sink::{FlushSink, MemorySink};

#[cfg(feature = "std")]
pub use errors::ConfigLoadError;

/// Crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
