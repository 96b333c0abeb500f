//! Planner-facing lookahead queries.
//!
//! These read the buffer state produced by the producer/consumer protocol;
//! they never mutate it. The in-flight entry is excluded from buffered-time
//! sums because it is partially consumed already.

use super::core::CommandQueue;

impl<const N: usize> CommandQueue<N> {
    /// Buffered execution time, in ticks, of all entries strictly after the
    /// in-flight one.
    pub fn ticks_in_queue(&self) -> u32 {
        let (rp, wp) = self.indices();
        if wp == rp {
            return 0;
        }
        let mut ticks: u32 = 0;
        // skip the currently processed entry
        let mut rp = rp.wrapping_add(1);
        while wp != rp {
            let e = self.entry_at(rp);
            ticks += e.entry_ticks();
            rp = rp.wrapping_add(1);
        }
        ticks
    }

    /// Whether at least `min_ticks` of execution time is buffered after the
    /// in-flight entry.
    ///
    /// Short-circuits as soon as the accumulated ticks reach the threshold,
    /// so cheap refill checks avoid a full summation.
    pub fn has_ticks_in_queue(&self, min_ticks: u32) -> bool {
        let (rp, wp) = self.indices();
        if wp == rp {
            return false;
        }
        let mut remaining = min_ticks;
        let mut rp = rp.wrapping_add(1);
        while wp != rp {
            let ticks = self.entry_at(rp).entry_ticks();
            if ticks >= remaining {
                return true;
            }
            remaining -= ticks;
            rp = rp.wrapping_add(1);
        }
        false
    }

    /// Tick period of the in-flight entry, as an instantaneous step rate.
    ///
    /// Valid only if the entry has pulses and either represents more than
    /// one pulse itself, or the next entry also has pulses; otherwise the
    /// rate would be an artifact of a single isolated step and 0 is returned
    /// for "rate unknown".
    pub fn actual_ticks(&self) -> u16 {
        let (rp, wp) = self.indices();
        if wp == rp {
            return 0;
        }
        let e = self.entry_at(rp);
        if e.has_steps() {
            if e.more_than_one_step() {
                return e.ticks;
            }
            let next = rp.wrapping_add(1);
            if wp != next && self.entry_at(next).has_steps() {
                return e.ticks;
            }
        }
        0
    }
}
