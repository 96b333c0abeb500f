//! Hardware backend capability interface.
//!
//! The queue logic is written entirely against [`QueueBackend`] and never
//! branches on backend identity, so a channel can sit on a timer-compare
//! unit, a pulse-counter-fed peripheral, or a fake backend in unit tests.

mod soft_timer;

pub use soft_timer::SoftTimerBackend;

/// Capability surface every hardware backend implements.
///
/// `is_running` and `is_ready_for_commands` are distinct: some backends need
/// a settle period after the prior run stops before they can accept new
/// entries again. Callers must not assume either query always returns
/// `true`.
pub trait QueueBackend {
    /// Attach the channel to its physical pin/peripheral.
    fn connect(&mut self);

    /// Detach the channel from its physical pin/peripheral.
    fn disconnect(&mut self);

    /// Begin sequencing committed entries.
    fn start_queue(&mut self);

    /// Immediate halt, discarding in-flight state.
    fn force_stop(&mut self);

    /// Whether the hardware is actively sequencing commands.
    fn is_running(&self) -> bool;

    /// Whether a new entry can safely be committed right now.
    fn is_ready_for_commands(&self) -> bool;

    /// Pulses actually emitted so far for the in-flight entry.
    ///
    /// Backends without pulse feedback return `None`; the position tracker
    /// then falls back to a pessimistic adjustment.
    fn performed_pulses(&self) -> Option<u16> {
        None
    }
}
