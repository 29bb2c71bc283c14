//! Real-world scenario benchmarks.
//!
//! Whole host blocks through the processor, the way a plugin host drives it.

mod processor;

pub use processor::bench_processor;
