//! Basic Batching Example
//!
//! This example demonstrates the simplest use case of batchq:
//! accumulating messages and flushing them in bounded batches through a
//! caller-supplied sink.
//!
//! ## What You'll Learn
//!
//! - Configuring the three flush thresholds
//! - Using a closure as the flush sink
//! - Driving the buffer with `should_flush` polling
//! - Draining the remainder with `flush_all`
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_basic_batching
//! ```

use batchq_core::time::MonotonicTime;
use batchq_core::{BatchConfig, CircularBuffer};

fn main() {
    println!("batchq Basic Batching Example");
    println!("=============================\n");

    // Flush policy:
    //   batches of at most 4 messages
    //   reject stores once 16 messages are buffered
    //   signal a flush after 5 idle seconds regardless of occupancy
    let config = BatchConfig::new(4, 16, 5);
    println!("Config:");
    println!("  Frequency threshold: {}", config.frequency_threshold);
    println!("  Rollover threshold:  {}", config.rollover_threshold);
    println!("  Time threshold:      {}s", config.time_threshold_secs);
    println!();

    // Any FnMut(&[M]) -> Result<(), E> works as a sink. A real deployment
    // would write the batch to a log, socket, or file here.
    let sink = |batch: &[String]| -> Result<(), String> {
        println!("  -> sink received batch of {}: {:?}", batch.len(), batch);
        Ok(())
    };

    let mut buffer =
        CircularBuffer::new(config, sink, MonotonicTime::new()).expect("config is valid");

    // Produce a stream of events, flushing whenever the buffer says so
    println!("Storing 10 events:");
    for i in 0..10 {
        let message = format!("event-{}", i);
        println!("  store {}", message);
        buffer.store(message).expect("buffer has capacity");

        if buffer.should_flush() {
            let flushed = buffer.flush().expect("sink accepts batches");
            println!("  flushed {} messages", flushed);
        }
    }

    // Drain whatever is left before shutting down
    let drained = buffer.flush_all().expect("sink accepts batches");
    println!("\nFinal drain flushed {} messages", drained);
    println!("Stats: {:?}", buffer.stats());
}
