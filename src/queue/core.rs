//! Fixed-capacity circular command queue.
//!
//! One `CommandQueue` bridges two execution contexts per channel: the
//! producer (planning loop, preemptible) commits entries at the write index,
//! the consumer (hardware-driven, higher priority) drains them strictly in
//! FIFO order from the read index. Both indices are monotonically increasing
//! u8 counters; occupancy is their wrapping difference, so the capacity must
//! stay well below 256.
//!
//! Mutual exclusion covers only the minimal read-modify-write windows, via
//! `critical_section::with`. Entry slots are written before the write index
//! advances and are never mutated while committed.

use core::cell::Cell;
use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use critical_section::Mutex;

use crate::error::EnqueueError;

use super::entry::{QueueEnd, QueueEntry};

/// Circular buffer of motion commands for one stepper channel.
///
/// `N` is the capacity and must be a power of two (mask-based index
/// wrapping) no larger than 128, so that a full queue remains
/// distinguishable from an empty one under u8 index arithmetic.
///
/// All methods take `&self`; the queue is `Sync` and can be shared between
/// the producer and a hardware-context consumer.
pub struct CommandQueue<const N: usize> {
    /// Entry slots. Committed slots are immutable until popped.
    entries: [Mutex<Cell<QueueEntry>>; N],
    /// Oldest unread entry. Written only by the consumer.
    read_idx: AtomicU8,
    /// Next free slot. Written only by the producer, inside the commit
    /// critical section.
    write_idx: AtomicU8,
    /// Set during a forced stop; commits attempted while set fail with
    /// `DeviceNotReady`.
    ignore_commands: AtomicBool,
    /// Committed tail state. Written only by the producer, read by both.
    tail: Mutex<Cell<QueueEnd>>,
}

impl<const N: usize> CommandQueue<N> {
    const CAPACITY_OK: () = assert!(
        N.is_power_of_two() && N <= 128,
        "queue capacity must be a power of two no larger than 128"
    );

    const MASK: u8 = (N - 1) as u8;

    /// Create an empty queue.
    pub fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::CAPACITY_OK;
        Self {
            entries: core::array::from_fn(|_| Mutex::new(Cell::new(QueueEntry::default()))),
            read_idx: AtomicU8::new(0),
            write_idx: AtomicU8::new(0),
            ignore_commands: AtomicBool::new(false),
            tail: Mutex::new(Cell::new(QueueEnd::default())),
        }
    }

    /// Queue capacity.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Torn-free snapshot of `(read_idx, write_idx)`.
    #[inline]
    pub(crate) fn indices(&self) -> (u8, u8) {
        critical_section::with(|_| {
            (
                self.read_idx.load(Ordering::Relaxed),
                self.write_idx.load(Ordering::Relaxed),
            )
        })
    }

    /// Number of committed entries, including the in-flight one.
    pub fn queue_entries(&self) -> u8 {
        let (rp, wp) = self.indices();
        wp.wrapping_sub(rp)
    }

    /// Whether occupancy equals capacity.
    pub fn is_full(&self) -> bool {
        self.queue_entries() as usize == N
    }

    /// Whether nothing is committed.
    pub fn is_empty(&self) -> bool {
        let (rp, wp) = self.indices();
        rp == wp
    }

    /// Read the committed entry at a raw (unmasked) index.
    ///
    /// Valid only for indices between `read_idx` and `write_idx`; committed
    /// entries are immutable, so a per-entry critical section gives a
    /// torn-free copy.
    pub(crate) fn entry_at(&self, idx: u8) -> QueueEntry {
        critical_section::with(|cs| self.entries[(idx & Self::MASK) as usize].borrow(cs).get())
    }

    /// Committed tail state.
    pub fn tail(&self) -> QueueEnd {
        critical_section::with(|cs| self.tail.borrow(cs).get())
    }

    /// Two-phase commit of a new entry.
    ///
    /// The slot is written first; the index advance and tail update then
    /// happen inside one short critical section, where suppression and
    /// backend readiness are re-checked. Readiness can transition
    /// asynchronously between the producer's first check and this point, so
    /// the re-check must share the exclusion window with the commit.
    ///
    /// The caller must have verified the queue is not full.
    pub(crate) fn commit(
        &self,
        entry: QueueEntry,
        new_tail: QueueEnd,
        still_ready: impl FnOnce() -> bool,
    ) -> Result<(), EnqueueError> {
        // Only the producer writes write_idx, so this read cannot race.
        let wp = self.write_idx.load(Ordering::Relaxed);
        critical_section::with(|cs| {
            self.entries[(wp & Self::MASK) as usize].borrow(cs).set(entry);
        });

        critical_section::with(|cs| {
            if self.ignore_commands.load(Ordering::Relaxed) || !still_ready() {
                return Err(EnqueueError::DeviceNotReady);
            }
            self.write_idx.store(wp.wrapping_add(1), Ordering::Relaxed);
            self.tail.borrow(cs).set(new_tail);
            Ok(())
        })
    }

    /// Peek the in-flight entry (oldest unread), if any. Consumer side.
    pub fn head(&self) -> Option<QueueEntry> {
        critical_section::with(|cs| {
            let rp = self.read_idx.load(Ordering::Relaxed);
            let wp = self.write_idx.load(Ordering::Relaxed);
            if rp == wp {
                None
            } else {
                Some(self.entries[(rp & Self::MASK) as usize].borrow(cs).get())
            }
        })
    }

    /// Advance past the in-flight entry after it has fully executed.
    /// Consumer side.
    pub fn pop_front(&self) {
        critical_section::with(|_| {
            let rp = self.read_idx.load(Ordering::Relaxed);
            debug_assert_ne!(rp, self.write_idx.load(Ordering::Relaxed));
            self.read_idx.store(rp.wrapping_add(1), Ordering::Relaxed);
        });
    }

    /// Set or clear the forced-stop suppression flag.
    pub(crate) fn set_ignore_commands(&self, ignore: bool) {
        self.ignore_commands.store(ignore, Ordering::Relaxed);
    }

    /// Whether commits are currently suppressed.
    pub fn commands_ignored(&self) -> bool {
        self.ignore_commands.load(Ordering::Relaxed)
    }

    /// Discard all entries not yet started and set a new absolute position.
    ///
    /// Part of the forced-stop protocol: the caller suppresses commits and
    /// halts the backend first.
    pub(crate) fn clear_and_reposition(&self, position: i32) {
        critical_section::with(|cs| {
            let wp = self.write_idx.load(Ordering::Relaxed);
            self.read_idx.store(wp, Ordering::Relaxed);
            let mut tail = self.tail.borrow(cs).get();
            tail.pos = position;
            self.tail.borrow(cs).set(tail);
        });
    }
}

impl<const N: usize> Default for CommandQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}
