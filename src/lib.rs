//! Pixelpipe is a batch PNG editor: it applies an ordered list of effects to
//! each image of a batch and writes every result, using one of three
//! interchangeable execution strategies.
//!
//! The strategies are a single-threaded baseline ([`scheduler::sequential`]),
//! a channel-mediated worker pool ([`scheduler::pipeline`]) and a
//! bulk-synchronous-parallel scheduler built on barriers ([`scheduler::bsp`]).
//! All three produce the same set of output files for the same batch.

pub mod barrier;
pub mod channel;
pub mod core;
pub mod err;
pub mod image;
pub mod scheduler;
pub mod task;

pub mod prelude {
    //! This module contains the most used types and traits.
    pub use crate::core::configuration::{Configuration, Strategy};
    pub use crate::err::EditorError;
    pub use crate::scheduler::run;
    pub use crate::task::{Task, TaskReader};
}
