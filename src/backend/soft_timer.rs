//! Software timer-compare reference backend.
//!
//! Emits step pulses synchronously through an embedded-hal `OutputPin`,
//! pacing them with a `DelayNs` provider. It reports performed pulses for
//! the in-flight entry, so position queries against it are exact. Useful on
//! targets without a dedicated pulse peripheral and as the reference
//! implementation for the backend capability surface.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::timing::ticks_to_ns;
use crate::queue::QueueEntry;

use super::QueueBackend;

/// STEP pulse width in nanoseconds (1-10 us satisfies common drivers).
const PULSE_WIDTH_NS: u32 = 2_000;

/// Reference backend: bit-banged step pulses on a timer-like cadence.
pub struct SoftTimerBackend<STEP, DELAY>
where
    STEP: OutputPin,
    DELAY: DelayNs,
{
    /// STEP pin (pulse to move one step).
    step_pin: STEP,

    /// Delay provider for pulse timing.
    delay: DELAY,

    /// Whether the channel is attached to its pin.
    connected: bool,

    /// Whether the backend is sequencing commands.
    running: bool,

    /// Pulses emitted for the in-flight entry.
    performed: u16,
}

impl<STEP, DELAY> SoftTimerBackend<STEP, DELAY>
where
    STEP: OutputPin,
    DELAY: DelayNs,
{
    /// Create a backend over a STEP pin and delay provider, initially
    /// disconnected.
    pub fn new(step_pin: STEP, delay: DELAY) -> Self {
        Self {
            step_pin,
            delay,
            connected: false,
            running: false,
            performed: 0,
        }
    }

    /// Execute one entry: emit its pulses (or just wait, for a pure delay).
    ///
    /// A failing step pin halts the run; the consumer side never reports
    /// errors, it can only stop and leave the queue state inspectable.
    pub(crate) fn execute_entry(&mut self, entry: &QueueEntry) {
        self.performed = 0;
        let period_ns = ticks_to_ns(entry.ticks as u32);

        if !entry.has_steps() {
            self.delay.delay_ns(period_ns);
            return;
        }

        for _ in 0..entry.steps {
            if self.step_pin.set_high().is_err() {
                self.running = false;
                return;
            }
            self.delay.delay_ns(PULSE_WIDTH_NS);
            if self.step_pin.set_low().is_err() {
                self.running = false;
                return;
            }
            self.delay.delay_ns(period_ns.saturating_sub(PULSE_WIDTH_NS));
            self.performed += 1;
        }
    }

    /// Reset pulse feedback once the finished entry has been popped; the
    /// next in-flight entry has not started yet.
    pub(crate) fn entry_completed(&mut self) {
        self.performed = 0;
    }

    /// Mark the queue drained: stop sequencing until the next start request.
    pub(crate) fn finish_run(&mut self) {
        self.running = false;
        self.performed = 0;
    }
}

impl<STEP, DELAY> QueueBackend for SoftTimerBackend<STEP, DELAY>
where
    STEP: OutputPin,
    DELAY: DelayNs,
{
    fn connect(&mut self) {
        self.connected = true;
    }

    fn disconnect(&mut self) {
        self.connected = false;
        self.running = false;
    }

    fn start_queue(&mut self) {
        if self.connected {
            self.running = true;
        }
    }

    fn force_stop(&mut self) {
        self.running = false;
        self.performed = 0;
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn is_ready_for_commands(&self) -> bool {
        self.connected
    }

    fn performed_pulses(&self) -> Option<u16> {
        Some(self.performed)
    }
}
