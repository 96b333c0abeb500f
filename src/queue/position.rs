//! Absolute position reconstruction.
//!
//! The hardware-visible position snapshot carried by each entry is only 16
//! bits wide; the unbounded signed position is rebuilt from the committed
//! tail position plus that snapshot, disambiguating at most one 16-bit
//! quadrant (0x4000 steps) of wraparound in either direction.

use super::core::CommandQueue;

/// Rebuild the absolute position at the moment `snapshot16` was taken.
///
/// Classifies the transition between the top two bits of the tail's low 16
/// bits and of the snapshot. Codes on the diagonal need no wrap correction;
/// a snapshot one quadrant ahead of the tail adds 0x4000 to the high
/// portion, one quadrant behind subtracts it. The four remaining codes mean
/// the two values are two quadrants apart, which cannot happen while total
/// in-flight steps stay below one quadrant; they are left uncorrected.
pub(crate) fn reconstruct_position(tail_pos: i32, snapshot16: u16) -> i32 {
    let pos = tail_pos as u32;
    let pos16 = (pos & 0xffff) as u16;
    let transition = ((pos16 >> 12) & 0x0c) | (snapshot16 >> 14);
    let adjusted = match transition {
        0 | 5 | 10 | 15 => pos,
        1 | 6 | 11 | 12 => pos.wrapping_add(0x4000),
        4 | 9 | 14 | 3 => pos.wrapping_sub(0x4000),
        _ => {
            debug_assert!(
                false,
                "impossible quadrant transition {}: tail and snapshot two quadrants apart",
                transition
            );
            pos
        }
    };
    ((adjusted & 0xffff_0000) | snapshot16 as u32) as i32
}

impl<const N: usize> CommandQueue<N> {
    /// Absolute position right now.
    ///
    /// Takes one atomic snapshot of the committed tail, the read index, and
    /// the in-flight entry, plus the backend's performed-pulse count via
    /// `performed_pulses` (evaluated inside the same exclusion window; return
    /// `None` when the backend has no pulse feedback).
    ///
    /// With pulse feedback the in-flight entry's progress is applied
    /// exactly. Without it, the entry's pulses are assumed to not have
    /// happened yet, so the result lags by at most one entry's worth of
    /// steps instead of ever overshooting.
    pub fn current_position(&self, performed_pulses: impl FnOnce() -> Option<u16>) -> i32 {
        let (tail, in_flight, done) = critical_section::with(|_| {
            let tail = self.tail();
            let (rp, wp) = self.indices();
            let in_flight = if rp == wp {
                None
            } else {
                Some(self.entry_at(rp))
            };
            (tail, in_flight, performed_pulses())
        });

        let entry = match in_flight {
            Some(e) => e,
            None => return tail.pos,
        };

        let mut pos = reconstruct_position(tail.pos, entry.start_pos_last16);
        if entry.has_steps() {
            let adjust = match done {
                Some(d) => {
                    if entry.count_up {
                        d as i32
                    } else {
                        -(d as i32)
                    }
                }
                None => {
                    if entry.count_up {
                        -(entry.steps as i32)
                    } else {
                        entry.steps as i32
                    }
                }
            };
            pos = pos.wrapping_add(adjust);
        }
        pos
    }
}
