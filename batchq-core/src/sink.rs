//! Flush sink abstraction
//!
//! A [`FlushSink`] receives each ordered batch the buffer flushes. The
//! buffer calls it synchronously and retains ownership of the batch; sinks
//! must copy anything they want to keep beyond the call.
//!
//! Any `FnMut(&[M]) -> Result<(), E>` closure is a sink, so simple callers
//! never need a named type. [`MemorySink`] collects batches in memory and
//! is intended for tests and examples.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::convert::Infallible;

/// Destination for flushed batches
///
/// Implementations report failure through their own error type; the buffer
/// propagates it verbatim and leaves the batch buffered for a retry. The
/// sink must not assume a batch it rejected is gone.
pub trait FlushSink<M> {
    /// Error the sink reports when it cannot accept a batch
    type Error;

    /// Accept one ordered batch of messages
    ///
    /// The slice may be empty: a flush of an empty buffer still invokes the
    /// sink so that periodic drivers can treat every flush uniformly.
    fn flush(&mut self, batch: &[M]) -> Result<(), Self::Error>;
}

impl<M, E, F> FlushSink<M> for F
where
    F: FnMut(&[M]) -> Result<(), E>,
{
    type Error = E;

    fn flush(&mut self, batch: &[M]) -> Result<(), E> {
        (self)(batch)
    }
}

/// In-memory sink for testing
///
/// Keeps every batch it receives, in arrival order, including empty ones.
#[derive(Debug, Clone, Default)]
pub struct MemorySink<M> {
    batches: Vec<Vec<M>>,
}

impl<M> MemorySink<M> {
    /// Create an empty sink
    pub fn new() -> Self {
        Self { batches: Vec::new() }
    }

    /// All batches received so far
    pub fn batches(&self) -> &[Vec<M>] {
        &self.batches
    }

    /// Total messages received across all batches
    pub fn message_count(&self) -> usize {
        self.batches.iter().map(Vec::len).sum()
    }

    /// Take the received batches, leaving the sink empty
    pub fn take_batches(&mut self) -> Vec<Vec<M>> {
        core::mem::take(&mut self.batches)
    }
}

impl<M: Clone> FlushSink<M> for MemorySink<M> {
    type Error = Infallible;

    fn flush(&mut self, batch: &[M]) -> Result<(), Infallible> {
        self.batches.push(batch.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_collects_batches() {
        let mut sink = MemorySink::new();
        sink.flush(&[1, 2, 3]).unwrap();
        sink.flush(&[]).unwrap();
        sink.flush(&[4]).unwrap();

        assert_eq!(sink.batches().len(), 3);
        assert_eq!(sink.message_count(), 4);
        assert_eq!(sink.take_batches(), vec![vec![1, 2, 3], vec![], vec![4]]);
        assert!(sink.batches().is_empty());
    }

    #[test]
    fn closures_are_sinks() {
        let mut seen = 0usize;
        {
            let mut sink = |batch: &[u32]| -> Result<(), &'static str> {
                seen += batch.len();
                Ok(())
            };
            sink.flush(&[1, 2]).unwrap();
        }
        assert_eq!(seen, 2);
    }

    #[test]
    fn closure_sink_failure_propagates() {
        let mut sink = |_: &[u32]| -> Result<(), &'static str> { Err("sink offline") };
        assert_eq!(sink.flush(&[1]), Err("sink offline"));
    }
}
