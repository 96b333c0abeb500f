//! Command queue module: circular buffer, position tracking and lookahead.

mod core;
mod entry;
mod lookahead;
mod position;

pub use self::core::CommandQueue;
pub use entry::{QueueEnd, QueueEntry, StepperCommand};
