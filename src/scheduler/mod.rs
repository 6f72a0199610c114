//! The execution strategies.
//!
//! A batch can be processed by one of three interchangeable strategies:
//! - [`sequential`]: one task at a time, on the calling thread.
//! - [`pipeline`]: a generator feeding a pool of workers through a bounded
//!   task queue, with an aggregator persisting the results.
//! - [`bsp`]: a pool of workers moving in lockstep supersteps over private
//!   per-worker partitions, synchronized by barriers.
//!
//! All three apply every task's effects exactly once, in order, and persist
//! every result exactly once; for the same batch they produce the same set of
//! output files.

pub mod bsp;
pub mod pipeline;
pub mod sequential;

use crate::core::configuration::{Configuration, Strategy};
use crate::err::EditorError;

/// Process the configured batch with the configured strategy.
pub fn run(config: &Configuration) -> Result<(), EditorError> {
    match config.strategy() {
        Strategy::Sequential => sequential::run_sequential(config),
        Strategy::Pipeline => pipeline::run_pipeline(config),
        Strategy::Bsp => bsp::run_bsp(config),
    }
}
