//! Bounded Circular Buffer with Threshold-Driven Batch Flushing
//!
//! ## Overview
//!
//! This module implements the buffering stage of a batch-ingestion
//! pipeline. Callers push individual messages with [`CircularBuffer::store`];
//! the buffer accumulates them in a fixed backing store and hands ordered
//! batches to a caller-supplied [`FlushSink`] when [`CircularBuffer::flush`]
//! is invoked. Two advisory triggers decide *when* a flush is due and one
//! cap decides *how much* each flush moves:
//!
//! - **frequency threshold**: buffered length reaching this value signals
//!   should-flush, and every batch is capped at this many messages
//! - **time threshold**: elapsed time since the last successful flush
//!   signals should-flush regardless of occupancy
//! - **rollover threshold**: total capacity; `store` rejects once reached
//!
//! Nothing in this module calls `flush` automatically. The decision to poll
//! [`CircularBuffer::should_flush`] and act on it belongs to an external
//! driver (a periodic ticker, or a caller checking after every `store`),
//! which keeps the buffer itself free of timing and concurrency concerns.
//!
//! ## Cursor Arithmetic
//!
//! The backing store has `rollover_threshold + 1` slots; the spare slot
//! lets `stop` advance past the last occupied position without colliding
//! with `start`. Both cursors move in one direction only and wrap modulo
//! the slot count, so the occupied range `[start, stop)` stays well defined
//! across arbitrarily many store/flush cycles with no reallocation and no
//! compaction:
//!
//! ```text
//! capacity = 4 (5 slots, one spare)
//!
//! ┌───┬───┬───┬───┬───┐
//! │ A │ B │ C │   │   │      len = 3
//! └───┴───┴───┴───┴───┘
//!   ↑           ↑
//! start        stop
//!
//! after flush with frequency threshold 2 (A, B handed to the sink):
//!
//! ┌───┬───┬───┬───┬───┐
//! │   │   │ C │   │   │      len = 1
//! └───┴───┴───┴───┴───┘
//!           ↑   ↑
//!        start  stop
//! ```
//!
//! ## Delivery Semantics
//!
//! A failed sink call leaves both cursors untouched, so the next flush
//! re-selects the same batch: the sink sees every message at least once,
//! never exactly once. Retry policy is entirely the caller's concern.
//!
//! ## Thread Safety
//!
//! Not safe for concurrent callers. One caller drives `store`/`flush` at a
//! time; wrap the buffer in a mutex or give it to a single owning task if
//! producers are concurrent.
//!
//! ## Usage Example
//!
//! ```rust
//! use batchq_core::{BatchConfig, CircularBuffer, MemorySink};
//! use batchq_core::time::FixedTime;
//!
//! let config = BatchConfig::new(2, 4, 5);
//! let mut buffer = CircularBuffer::new(config, MemorySink::new(), FixedTime::new(0)).unwrap();
//!
//! buffer.store("a").unwrap();
//! buffer.store("b").unwrap();
//! assert!(buffer.should_flush());
//!
//! let flushed = buffer.flush().unwrap();
//! assert_eq!(flushed, 2);
//! assert!(buffer.is_empty());
//! ```

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::config::BatchConfig;
use crate::errors::{BufferError, BufferResult, ConfigResult};
use crate::sink::FlushSink;
use crate::time::{TimeSource, Timestamp};

// Macros for optional logging
#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

/// Operation counters for monitoring buffer health
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BufferStats {
    /// Messages accepted by `store`
    pub stored: u64,
    /// Messages handed to the sink by successful flushes
    pub flushed: u64,
    /// Messages rejected because the buffer was full
    pub rejected: u64,
    /// Flushes where the sink reported failure
    pub failed_flushes: u32,
    /// Successful flush batches, including empty ones
    pub batches: u32,
}

/// Bounded batching buffer over an opaque message type
///
/// Generic over the message `M`, the flush sink `F`, and the time source
/// `T` driving the elapsed-time trigger. Messages must be `Clone` for the
/// flush operations: a batch is cloned out so that a failed sink call
/// leaves the buffered originals untouched.
///
/// ## Internal Invariants
///
/// - `slots.len() == rollover_threshold + 1`, fixed at construction
/// - `start < slots.len()` and `stop < slots.len()` at all times
/// - `0 <= len() <= rollover_threshold`
/// - exactly the slots in `[start, stop)` (mod wraparound) are `Some`
///
/// ## Thread Safety
///
/// Not safe for concurrent callers; see the module docs.
pub struct CircularBuffer<M, F, T>
where
    F: FlushSink<M>,
    T: TimeSource,
{
    /// Backing store, `rollover_threshold + 1` slots, never reallocated
    slots: Vec<Option<M>>,

    /// Oldest occupied slot (inclusive); advances on successful flush
    start: usize,

    /// Next write position (exclusive end of the occupied range);
    /// advances on store
    stop: usize,

    config: BatchConfig,
    sink: F,
    clock: T,

    /// Time of the most recent successful flush, seeded from the clock at
    /// construction
    last_flush: Timestamp,

    stats: BufferStats,
}

impl<M, F, T> CircularBuffer<M, F, T>
where
    F: FlushSink<M>,
    T: TimeSource,
{
    /// Create a buffer from a validated configuration, a flush sink, and a
    /// time source
    ///
    /// Fails fast with a [`ConfigError`](crate::ConfigError) if the
    /// thresholds are zero or the frequency threshold exceeds the capacity.
    pub fn new(config: BatchConfig, sink: F, clock: T) -> ConfigResult<Self> {
        config.validate()?;

        let slot_count = config.rollover_threshold + 1;
        let mut slots = Vec::with_capacity(slot_count);
        slots.resize_with(slot_count, || None);

        let last_flush = clock.now();

        Ok(Self {
            slots,
            start: 0,
            stop: 0,
            config,
            sink,
            clock,
            last_flush,
            stats: BufferStats::default(),
        })
    }

    /// Append a message at the `stop` cursor
    ///
    /// Fails with [`BufferError::Full`] once the occupied length has
    /// reached the rollover threshold; the message is dropped and no state
    /// changes. On success the length grows by exactly one.
    pub fn store(&mut self, message: M) -> BufferResult<(), F::Error> {
        let len = self.len();
        if len >= self.config.rollover_threshold {
            self.stats.rejected += 1;
            log_warn!("store rejected: buffer full at {} messages", len);
            return Err(BufferError::Full {
                len,
                capacity: self.config.rollover_threshold,
            });
        }

        self.slots[self.stop] = Some(message);
        self.stop = self.wrap(self.stop + 1);
        self.stats.stored += 1;
        Ok(())
    }

    /// Number of buffered, unflushed messages
    pub fn len(&self) -> usize {
        let slot_count = self.slots.len();
        (self.stop + slot_count - self.start) % slot_count
    }

    /// Check if no messages are buffered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if the buffer is at capacity and `store` would be rejected
    pub fn is_full(&self) -> bool {
        self.len() >= self.config.rollover_threshold
    }

    /// Check if the buffered length has reached the frequency threshold
    pub fn frequency_threshold_reached(&self) -> bool {
        self.len() >= self.config.frequency_threshold
    }

    /// Check if more than the configured time has elapsed since the last
    /// successful flush
    ///
    /// Elapsed time saturates at zero if the clock moves backwards, so a
    /// wall-clock adjustment delays the trigger rather than firing it.
    pub fn time_threshold_elapsed(&self) -> bool {
        let elapsed = self.clock.now().saturating_sub(self.last_flush);
        elapsed > self.config.time_threshold_ms()
    }

    /// Advisory flush signal: either threshold predicate holds
    ///
    /// `store` never consults this and nothing flushes automatically; an
    /// external driver polls it and calls [`flush`](Self::flush).
    pub fn should_flush(&self) -> bool {
        self.time_threshold_elapsed() || self.frequency_threshold_reached()
    }

    /// The next batch: the oldest `min(len, frequency_threshold)` messages
    /// in insertion order
    ///
    /// Pure with respect to the cursors; messages are cloned out and remain
    /// buffered until a flush succeeds.
    pub fn batch(&self) -> Vec<M>
    where
        M: Clone,
    {
        let size = self.len().min(self.config.frequency_threshold);
        let mut batch = Vec::with_capacity(size);
        for offset in 0..size {
            let idx = self.wrap(self.start + offset);
            if let Some(message) = self.slots[idx].as_ref() {
                batch.push(message.clone());
            }
        }
        batch
    }

    /// Hand the next batch to the sink and, on success, advance past it
    ///
    /// Sink failure is propagated verbatim and leaves every cursor and
    /// message in place, so the failed batch is re-selected by the next
    /// call. On success the `start` cursor advances by the batch size, the
    /// flushed slots are released, and the time-threshold timer resets.
    /// Flushing an empty buffer is legal: the sink receives an empty slice
    /// and only the timer resets.
    ///
    /// Returns the number of messages flushed.
    pub fn flush(&mut self) -> BufferResult<usize, F::Error>
    where
        M: Clone,
    {
        let batch = self.batch();
        let size = batch.len();

        if let Err(e) = self.sink.flush(&batch) {
            self.stats.failed_flushes += 1;
            log_warn!("flush of {} messages failed, batch retained", size);
            return Err(BufferError::Callback(e));
        }

        for offset in 0..size {
            let idx = self.wrap(self.start + offset);
            self.slots[idx] = None;
        }
        self.start = self.wrap(self.start + size);
        self.last_flush = self.clock.now();
        self.stats.flushed += size as u64;
        self.stats.batches += 1;
        log_debug!("flushed batch of {} messages, {} still buffered", size, self.len());
        Ok(size)
    }

    /// Flush repeatedly until the buffer is empty
    ///
    /// Always flushes at least once, so an empty buffer still produces
    /// exactly one empty sink call. Stops at the first sink failure,
    /// leaving the remaining messages buffered for a later retry.
    ///
    /// Returns the total number of messages flushed.
    pub fn flush_all(&mut self) -> BufferResult<usize, F::Error>
    where
        M: Clone,
    {
        let mut total = 0;
        loop {
            total += self.flush()?;
            if self.is_empty() {
                return Ok(total);
            }
        }
    }

    /// Discard all buffered messages without flushing
    ///
    /// The time-threshold timer is not reset; only a flush counts as one.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.start = 0;
        self.stop = 0;
    }

    /// Total capacity (the rollover threshold)
    pub fn capacity(&self) -> usize {
        self.config.rollover_threshold
    }

    /// The configuration this buffer was built with
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Operation counters
    pub fn stats(&self) -> &BufferStats {
        &self.stats
    }

    /// Timestamp of the most recent successful flush
    pub fn last_flush(&self) -> Timestamp {
        self.last_flush
    }

    /// Shared access to the flush sink
    pub fn sink(&self) -> &F {
        &self.sink
    }

    /// Exclusive access to the flush sink
    pub fn sink_mut(&mut self) -> &mut F {
        &mut self.sink
    }

    /// Translate a logical position to a physical slot index
    fn wrap(&self, idx: usize) -> usize {
        idx % self.slots.len()
    }
}
