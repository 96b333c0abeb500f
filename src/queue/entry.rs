//! Command and queue entry records.

use crate::config::timing::MIN_CMD_TICKS;
use crate::error::EnqueueError;

/// One motion command as emitted by the planner.
///
/// `ticks` is the time between pulses (or the total delay when `steps` is 0),
/// in hardware tick units. `steps == 0` denotes a pure timing delay with no
/// pulses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepperCommand {
    /// Time between pulses (or total delay if `steps` is 0), in ticks.
    pub ticks: u16,
    /// Number of pulses; 0 means pure delay.
    pub steps: u8,
    /// Whether the position counts up while this command executes.
    pub count_up: bool,
}

impl StepperCommand {
    /// Total execution time of this command in ticks.
    #[inline]
    pub fn command_ticks(&self) -> u32 {
        let steps = if self.steps > 1 { self.steps as u32 } else { 1 };
        self.ticks as u32 * steps
    }

    /// Reject commands too short for the timing mechanism to honor.
    pub fn validate(&self) -> Result<(), EnqueueError> {
        if self.command_ticks() < MIN_CMD_TICKS {
            return Err(EnqueueError::TicksTooLow);
        }
        Ok(())
    }
}

/// One buffer slot, immutable once committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QueueEntry {
    /// Number of pulses; 0 means pure delay.
    pub steps: u8,
    /// Time between pulses (or total delay if `steps` is 0), in ticks.
    pub ticks: u16,
    /// Whether the consumer must flip the direction output when this entry
    /// begins executing, never earlier.
    pub toggle_dir: bool,
    /// Counting direction at commit time.
    pub count_up: bool,
    /// Low 16 bits of the absolute position just before this entry executes.
    ///
    /// Used only for wraparound disambiguation, never as the authoritative
    /// position.
    pub start_pos_last16: u16,
}

impl QueueEntry {
    /// Whether this entry emits any pulses.
    #[inline]
    pub fn has_steps(&self) -> bool {
        self.steps > 0
    }

    /// Whether this entry emits more than one pulse.
    #[inline]
    pub fn more_than_one_step(&self) -> bool {
        self.steps > 1
    }

    /// Total execution time of this entry in ticks.
    #[inline]
    pub fn entry_ticks(&self) -> u32 {
        let steps = if self.steps > 1 { self.steps as u32 } else { 1 };
        self.ticks as u32 * steps
    }
}

impl Default for QueueEntry {
    fn default() -> Self {
        Self {
            steps: 0,
            ticks: 0,
            toggle_dir: false,
            count_up: true,
            start_pos_last16: 0,
        }
    }
}

/// Committed tail state: absolute position and direction once all currently
/// enqueued entries have executed. Written only by the producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QueueEnd {
    /// Absolute committed position, in steps.
    pub pos: i32,
    /// Direction-pin level at the tail.
    pub dir: bool,
    /// Counting direction at the tail.
    pub count_up: bool,
}

impl Default for QueueEnd {
    fn default() -> Self {
        Self {
            pos: 0,
            dir: true,
            count_up: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_ticks_pure_delay() {
        let cmd = StepperCommand {
            ticks: 4000,
            steps: 0,
            count_up: true,
        };
        assert_eq!(cmd.command_ticks(), 4000);
    }

    #[test]
    fn test_command_ticks_multiple_steps() {
        let cmd = StepperCommand {
            ticks: 500,
            steps: 8,
            count_up: true,
        };
        assert_eq!(cmd.command_ticks(), 4000);
    }

    #[test]
    fn test_validate_boundary() {
        // exactly at the minimum is accepted
        let at_min = StepperCommand {
            ticks: (MIN_CMD_TICKS / 4) as u16,
            steps: 4,
            count_up: true,
        };
        assert!(at_min.validate().is_ok());

        // one tick short of the minimum is rejected
        let below = StepperCommand {
            ticks: (MIN_CMD_TICKS - 1) as u16,
            steps: 1,
            count_up: true,
        };
        assert_eq!(below.validate(), Err(EnqueueError::TicksTooLow));
    }

    #[test]
    fn test_validate_delay_uses_ticks_directly() {
        let delay = StepperCommand {
            ticks: MIN_CMD_TICKS as u16,
            steps: 0,
            count_up: true,
        };
        assert!(delay.validate().is_ok());
    }
}
