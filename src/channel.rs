//! Stepper channel: command queue plus backend and direction pin.
//!
//! A `Channel` is the producer-facing surface for one stepper. It owns the
//! per-channel [`CommandQueue`], the hardware [`QueueBackend`] and the
//! optional direction output, and enforces the direction invariant: the
//! physical DIR level always matches the entry currently executing.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::backend::{QueueBackend, SoftTimerBackend};
use crate::config::timing::DEFAULT_MAX_SPEED_TICKS;
use crate::config::ChannelConfig;
use crate::error::EnqueueError;
use crate::queue::{CommandQueue, QueueEnd, QueueEntry, StepperCommand};

/// One independent stepper channel.
///
/// Generic over:
/// - `B`: hardware backend (must implement `QueueBackend`)
/// - `DIR`: DIR pin type (must implement `OutputPin`)
/// - `N`: queue capacity (power of two, at most 128)
pub struct Channel<B, DIR, const N: usize>
where
    B: QueueBackend,
    DIR: OutputPin,
{
    /// Command queue shared with the consumer context.
    queue: CommandQueue<N>,

    /// Hardware backend sequencing the committed entries.
    backend: B,

    /// DIR pin, if the driver wiring has one.
    dir_pin: Option<DIR>,

    /// Whether a high DIR level means the position counts up.
    dir_high_counts_up: bool,

    /// Last level driven onto the DIR pin.
    dir_level: bool,

    /// Per-channel speed bound, as the shortest permitted tick period.
    max_speed_in_ticks: u16,

    /// Channel name for logging/debugging.
    name: heapless::String<32>,
}

impl<B, DIR, const N: usize> Channel<B, DIR, N>
where
    B: QueueBackend,
    DIR: OutputPin,
{
    /// Create a channel over a backend, without a direction pin.
    pub fn new(backend: B, name: heapless::String<32>) -> Self {
        Self {
            queue: CommandQueue::new(),
            backend,
            dir_pin: None,
            dir_high_counts_up: true,
            dir_level: true,
            max_speed_in_ticks: DEFAULT_MAX_SPEED_TICKS,
            name,
        }
    }

    /// Create a channel from a named configuration.
    pub fn from_config(config: &ChannelConfig, backend: B) -> Self {
        let mut channel = Self::new(backend, config.name.clone());
        channel.dir_high_counts_up = config.dir_high_counts_up;
        channel.max_speed_in_ticks = config.max_speed_in_ticks();
        channel
    }

    /// Get the channel name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Attach the DIR pin and its polarity.
    pub fn set_direction_pin(&mut self, pin: DIR, high_means_count_up: bool) {
        self.dir_pin = Some(pin);
        self.dir_high_counts_up = high_means_count_up;
    }

    /// The shared command queue (consumer/lookahead access).
    #[inline]
    pub fn queue(&self) -> &CommandQueue<N> {
        &self.queue
    }

    /// The hardware backend.
    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Speed bound as the shortest permitted tick period.
    #[inline]
    pub fn max_speed_in_ticks(&self) -> u16 {
        self.max_speed_in_ticks
    }

    /// Set the speed bound (shortest permitted tick period).
    pub fn set_max_speed_in_ticks(&mut self, ticks: u16) {
        self.max_speed_in_ticks = ticks;
    }

    /// Validate and commit one command, per the enqueue protocol.
    ///
    /// `command = None` with `start = true` is a control-only call: begin
    /// executing if not already running. It fails with `EmptyQueueToStart`
    /// when nothing is committed, and otherwise never mutates the buffer.
    ///
    /// With a command, validation happens before any mutation: backend
    /// readiness, occupancy, then the minimum-tick bound. On success the
    /// entry is written and committed under a brief exclusion window where
    /// suppression and readiness are re-checked; if `start` is set and the
    /// channel is not running, a queue start is requested after the commit.
    ///
    /// Committing the first entry into an empty queue drives the DIR pin
    /// immediately, since no prior in-flight entry can carry the toggle; all
    /// later direction changes are deferred as the entry's `toggle_dir`
    /// flag, applied by the consumer when that entry begins.
    pub fn add_queue_entry(
        &mut self,
        command: Option<StepperCommand>,
        start: bool,
    ) -> Result<(), EnqueueError> {
        if !self.backend.is_ready_for_commands() {
            return Err(EnqueueError::DeviceNotReady);
        }

        let cmd = match command {
            Some(cmd) => cmd,
            None => {
                if start && !self.backend.is_running() {
                    if self.queue.is_empty() {
                        return Err(EnqueueError::EmptyQueueToStart);
                    }
                    self.backend.start_queue();
                }
                return Ok(());
            }
        };

        if self.queue.is_full() {
            return Err(EnqueueError::QueueFull);
        }
        cmd.validate()?;

        let tail = self.queue.tail();
        let dir = cmd.count_up == self.dir_high_counts_up;
        let mut toggle_dir = false;
        if self.dir_pin.is_some() {
            if self.queue.is_empty() {
                self.write_dir_pin(dir)?;
            } else {
                // relative to the committed tail, not the in-flight entry
                toggle_dir = dir != tail.dir;
            }
        }

        let entry = QueueEntry {
            steps: cmd.steps,
            ticks: cmd.ticks,
            toggle_dir,
            count_up: cmd.count_up,
            start_pos_last16: (tail.pos as u32 & 0xffff) as u16,
        };
        let delta = cmd.steps as i32;
        let new_tail = QueueEnd {
            pos: if cmd.count_up {
                tail.pos.wrapping_add(delta)
            } else {
                tail.pos.wrapping_sub(delta)
            },
            dir,
            count_up: cmd.count_up,
        };

        let (queue, backend) = (&self.queue, &self.backend);
        queue.commit(entry, new_tail, || backend.is_ready_for_commands())?;

        if start && !self.backend.is_running() {
            self.backend.start_queue();
        }
        Ok(())
    }

    /// Absolute position right now, reconstructed from the committed tail
    /// and the in-flight entry's snapshot, adjusted by backend pulse
    /// feedback where available.
    pub fn current_position(&self) -> i32 {
        let backend = &self.backend;
        self.queue.current_position(|| backend.performed_pulses())
    }

    /// Absolute position once all committed entries have executed.
    pub fn position_after_commands_completed(&self) -> i32 {
        self.queue.tail().pos
    }

    /// Immediately halt the channel, discard all entries not yet started and
    /// set a new absolute position.
    ///
    /// Commits racing this call fail with `DeviceNotReady` while the
    /// suppression flag is set, instead of landing in a queue about to be
    /// cleared.
    pub fn force_stop_and_new_position(&mut self, position: i32) {
        self.queue.set_ignore_commands(true);
        self.backend.force_stop();
        self.queue.clear_and_reposition(position);
        self.queue.set_ignore_commands(false);
    }

    /// Attach the channel to its physical pin/peripheral.
    pub fn connect(&mut self) {
        self.backend.connect();
    }

    /// Detach the channel from its physical pin/peripheral.
    pub fn disconnect(&mut self) {
        self.backend.disconnect();
    }

    /// Whether the backend is actively sequencing commands.
    pub fn is_running(&self) -> bool {
        self.backend.is_running()
    }

    /// Number of committed entries, including the in-flight one.
    pub fn queue_entries(&self) -> u8 {
        self.queue.queue_entries()
    }

    /// Whether occupancy equals capacity.
    pub fn is_queue_full(&self) -> bool {
        self.queue.is_full()
    }

    /// Whether nothing is committed.
    pub fn is_queue_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Buffered execution time after the in-flight entry, in ticks.
    pub fn ticks_in_queue(&self) -> u32 {
        self.queue.ticks_in_queue()
    }

    /// Whether at least `min_ticks` of execution time is buffered.
    pub fn has_ticks_in_queue(&self, min_ticks: u32) -> bool {
        self.queue.has_ticks_in_queue(min_ticks)
    }

    /// Tick period of the in-flight entry, or 0 when no meaningful rate
    /// exists.
    pub fn actual_ticks(&self) -> u16 {
        self.queue.actual_ticks()
    }

    fn write_dir_pin(&mut self, level: bool) -> Result<(), EnqueueError> {
        if let Some(pin) = self.dir_pin.as_mut() {
            let result = if level { pin.set_high() } else { pin.set_low() };
            if result.is_err() {
                return Err(EnqueueError::DeviceNotReady);
            }
            self.dir_level = level;
        }
        Ok(())
    }
}

impl<STEP, DELAY, DIR, const N: usize> Channel<SoftTimerBackend<STEP, DELAY>, DIR, N>
where
    STEP: OutputPin,
    DELAY: DelayNs,
    DIR: OutputPin,
{
    /// Execute the in-flight entry, reference-backend consumer side.
    ///
    /// Applies the entry's deferred direction toggle exactly when the entry
    /// begins, emits its pulses, then advances the read index. Returns
    /// `false` once the channel is idle.
    pub fn service_once(&mut self) -> bool {
        if !self.backend.is_running() {
            return false;
        }
        let entry = match self.queue.head() {
            Some(e) => e,
            None => {
                self.backend.finish_run();
                return false;
            }
        };
        if entry.toggle_dir {
            let level = !self.dir_level;
            // the consumer never reports errors; a failed flip surfaces as
            // the backend stopping on the next pulse
            let _ = self.write_dir_pin(level);
        }
        self.backend.execute_entry(&entry);
        self.queue.pop_front();
        self.backend.entry_completed();
        if self.queue.is_empty() {
            self.backend.finish_run();
        }
        true
    }

    /// Drain the queue to empty (blocking).
    pub fn run_to_completion(&mut self) {
        while self.service_once() {}
    }
}
