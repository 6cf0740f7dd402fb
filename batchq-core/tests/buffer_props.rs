//! Property tests for the flush policy and cursor bookkeeping
//!
//! These exercise the buffer across randomized configurations and
//! store/flush interleavings, checking the FIFO contract, the batch-size
//! cap, capacity rejection, and failure atomicity against a flat reference
//! model.

use batchq_core::time::FixedTime;
use batchq_core::{BatchConfig, BufferError, CircularBuffer, MemorySink};

use proptest::prelude::*;

use std::cell::Cell;
use std::rc::Rc;

fn buffer(frequency: usize, capacity: usize) -> CircularBuffer<u64, MemorySink<u64>, FixedTime> {
    CircularBuffer::new(
        BatchConfig::new(frequency, capacity, 5),
        MemorySink::new(),
        FixedTime::new(0),
    )
    .expect("valid test config")
}

proptest! {
    #[test]
    fn store_succeeds_up_to_capacity_then_rejects(
        frequency in 1usize..=8,
        extra in 0usize..=8,
    ) {
        let capacity = frequency + extra;
        let mut buf = buffer(frequency, capacity);

        for i in 0..capacity as u64 {
            prop_assert_eq!(buf.len(), i as usize);
            prop_assert!(buf.store(i).is_ok());
        }
        prop_assert!(buf.is_full());

        let err = buf.store(u64::MAX).unwrap_err();
        prop_assert_eq!(err, BufferError::Full { len: capacity, capacity });
        prop_assert_eq!(buf.len(), capacity);
    }

    #[test]
    fn flush_drains_at_most_threshold_in_order(
        frequency in 1usize..=8,
        surplus in 0usize..=8,
        extra in 0usize..=8,
    ) {
        let stored = frequency + surplus;
        let capacity = stored + extra;
        let mut buf = buffer(frequency, capacity);
        for i in 0..stored as u64 {
            buf.store(i).unwrap();
        }

        let flushed = buf.flush().unwrap();
        prop_assert_eq!(flushed, frequency.min(stored));
        prop_assert_eq!(buf.len(), stored - flushed);

        let oldest: Vec<u64> = (0..flushed as u64).collect();
        prop_assert_eq!(buf.sink().batches(), &[oldest]);
    }

    #[test]
    fn refill_after_flushing_full_buffer(
        frequency in 1usize..=8,
        extra in 0usize..=8,
        m in 0usize..=8,
    ) {
        prop_assume!(m <= frequency);
        let capacity = frequency + extra;
        let mut buf = buffer(frequency, capacity);
        for i in 0..capacity as u64 {
            buf.store(i).unwrap();
        }

        buf.flush().unwrap();
        for i in 0..m as u64 {
            prop_assert!(buf.store(1000 + i).is_ok());
        }
        prop_assert_eq!(buf.len(), capacity - frequency + m);
    }

    #[test]
    fn flush_all_makes_ceil_div_batches(
        frequency in 1usize..=8,
        stored in 0usize..=64,
        extra in 0usize..=8,
    ) {
        let capacity = stored + frequency + extra;
        let mut buf = buffer(frequency, capacity);
        for i in 0..stored as u64 {
            buf.store(i).unwrap();
        }

        prop_assert_eq!(buf.flush_all().unwrap(), stored);
        prop_assert!(buf.is_empty());

        let expected_batches = if stored == 0 {
            1
        } else {
            stored.div_ceil(frequency)
        };
        prop_assert_eq!(buf.sink().batches().len(), expected_batches);

        let delivered: Vec<u64> = buf
            .sink()
            .batches()
            .iter()
            .flat_map(|b| b.iter().copied())
            .collect();
        let inserted: Vec<u64> = (0..stored as u64).collect();
        prop_assert_eq!(delivered, inserted);
    }

    #[test]
    fn flush_all_failure_leaves_unflushed_batches(
        frequency in 1usize..=4,
        stored in 0usize..=32,
        fail_at in 1usize..=8,
    ) {
        let capacity = stored + frequency;
        let calls = Rc::new(Cell::new(0usize));
        let sink = {
            let calls = Rc::clone(&calls);
            move |_: &[u64]| -> Result<(), &'static str> {
                calls.set(calls.get() + 1);
                if calls.get() == fail_at {
                    Err("sink offline")
                } else {
                    Ok(())
                }
            }
        };
        let mut buf = CircularBuffer::new(
            BatchConfig::new(frequency, capacity, 5),
            sink,
            FixedTime::new(0),
        )
        .expect("valid test config");
        for i in 0..stored as u64 {
            buf.store(i).unwrap();
        }

        let total_batches = if stored == 0 {
            1
        } else {
            stored.div_ceil(frequency)
        };
        let result = buf.flush_all();

        if fail_at <= total_batches {
            prop_assert_eq!(result, Err(BufferError::Callback("sink offline")));
            prop_assert_eq!(calls.get(), fail_at);
            let flushed = stored.min((fail_at - 1) * frequency);
            prop_assert_eq!(buf.len(), stored - flushed);
        } else {
            prop_assert_eq!(result, Ok(stored));
            prop_assert!(buf.is_empty());
        }
    }

    #[test]
    fn interleaved_ops_match_flat_model(
        ops in prop::collection::vec(any::<bool>(), 0..100),
        frequency in 1usize..=4,
        extra in 0usize..=4,
    ) {
        let capacity = frequency + extra;
        let mut buf = buffer(frequency, capacity);
        let mut model: Vec<u64> = Vec::new();
        let mut next = 0u64;

        for is_store in ops {
            if is_store {
                let result = buf.store(next);
                if model.len() < capacity {
                    prop_assert!(result.is_ok());
                    model.push(next);
                } else {
                    prop_assert!(result.is_err());
                }
                next += 1;
            } else {
                let expected: Vec<u64> = model.iter().take(frequency).copied().collect();
                let flushed = buf.flush().unwrap();
                prop_assert_eq!(flushed, expected.len());
                prop_assert_eq!(buf.sink().batches().last().unwrap(), &expected);
                model.drain(..expected.len());
            }
            prop_assert_eq!(buf.len(), model.len());
            prop_assert_eq!(buf.is_empty(), model.is_empty());
        }
    }
}
