//! # stepper-queue
//!
//! Real-time stepper step/dir command queue with embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Lock-minimal queue**: fixed-capacity circular buffer between a
//!   cooperative planner and a hardware-context consumer
//! - **Position tracking**: unbounded absolute position reconstructed from a
//!   narrow, wrapping hardware snapshot
//! - **Deferred direction toggles**: the DIR output flips exactly when the
//!   entry that needs it begins executing
//! - **Backend-neutral core**: hardware pulse generation sits behind a small
//!   capability trait, testable with a fake backend
//! - **no_std compatible**: core library works without standard library
//! - **Configuration-driven**: define channels in TOML files (std)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stepper_queue::{Channel, SoftTimerBackend, StepperCommand};
//!
//! // Create a channel over the reference backend
//! let backend = SoftTimerBackend::new(step_pin, delay);
//! let mut channel: Channel<_, _, 32> = Channel::new(backend, name);
//! channel.set_direction_pin(dir_pin, true);
//! channel.connect();
//!
//! // Enqueue 100 steps at 4000 ticks/pulse and start the queue
//! let cmd = StepperCommand { ticks: 4000, steps: 100, count_up: true };
//! channel.add_queue_entry(Some(cmd), true)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O, TOML parsing and a critical-section
//!   implementation for host builds
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets
//!
//! On bare-metal targets without `std`, the application must provide a
//! `critical-section` implementation (usually via its HAL crate).

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Core modules
pub mod backend;
pub mod channel;
pub mod config;
pub mod error;
pub mod queue;
pub mod registry;

// Re-exports for ergonomic API
pub use backend::{QueueBackend, SoftTimerBackend};
pub use channel::Channel;
pub use config::{ChannelConfig, SystemConfig, validate_config};
pub use error::{EnqueueError, Error, Result};
pub use queue::{CommandQueue, QueueEnd, QueueEntry, StepperCommand};
pub use registry::QueueRegistry;

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::load_config;

// Tick timing constants
pub use config::timing::{MIN_CMD_TICKS, MIN_DELTA_TICKS, TICKS_PER_S};
