//! Hardware tick timing constants and conversions.
//!
//! All periods and delays in the queue are expressed as integer counts of a
//! fixed-duration hardware tick.

/// Hardware ticks per second (16 MHz timer clock).
pub const TICKS_PER_S: u32 = 16_000_000;

/// Shortest pulse period the timing mechanism can express (50k steps/s).
pub const MIN_DELTA_TICKS: u32 = TICKS_PER_S / 50_000;

/// Shortest acceptable whole command, in ticks.
///
/// A command shorter than this would expire before the consumer can be
/// re-armed for the next one. `add_queue_entry` rejects anything below it
/// with `TicksTooLow`.
pub const MIN_CMD_TICKS: u32 = 10 * MIN_DELTA_TICKS;

/// Default per-channel speed bound: 1000 steps/s expressed as a tick period.
pub const DEFAULT_MAX_SPEED_TICKS: u16 = (TICKS_PER_S / 1_000) as u16;

/// Convert a speed in steps/s to the equivalent tick period.
///
/// Returns `None` for zero speed or a period that does not fit in 16 bits.
pub const fn speed_to_tick_period(steps_per_sec: u32) -> Option<u16> {
    if steps_per_sec == 0 {
        return None;
    }
    let period = TICKS_PER_S / steps_per_sec;
    if period > u16::MAX as u32 {
        None
    } else {
        Some(period as u16)
    }
}

/// Convert a tick count to nanoseconds (62.5 ns per tick at 16 MHz).
#[inline]
pub const fn ticks_to_ns(ticks: u32) -> u32 {
    // 1e9 / 16e6 = 62.5, computed without truncating the half tick
    ticks.saturating_mul(125) / 2
}
