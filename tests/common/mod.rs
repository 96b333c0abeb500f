//! Shared test support: a recording GPIO pin for host-side tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, OutputPin};

/// Output pin that records every level written to it. Clones share state, so
/// a channel can own the pin while the test keeps a handle for assertions.
#[derive(Clone, Default)]
pub struct RecordingPin {
    levels: Rc<RefCell<Vec<bool>>>,
}

impl RecordingPin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every level written, in order.
    pub fn levels(&self) -> Vec<bool> {
        self.levels.borrow().clone()
    }

    /// The most recent level written, if any.
    pub fn last(&self) -> Option<bool> {
        self.levels.borrow().last().copied()
    }

    /// Total number of writes.
    pub fn writes(&self) -> usize {
        self.levels.borrow().len()
    }

    /// Number of rising edges, i.e. step pulses on a STEP pin.
    pub fn pulse_count(&self) -> usize {
        self.levels.borrow().iter().filter(|level| **level).count()
    }
}

impl ErrorType for RecordingPin {
    type Error = core::convert::Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.levels.borrow_mut().push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.levels.borrow_mut().push(true);
        Ok(())
    }
}
