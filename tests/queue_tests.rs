//! Integration tests for the command queue on the reference backend.
//!
//! These drive a full channel (queue + soft-timer backend + DIR pin) through
//! enqueue/service cycles and verify the externally observable behavior:
//! pulse counts, direction handling, position tracking and the
//! stop/restart protocol.

mod common;

use common::RecordingPin;
use embedded_hal_mock::eh1::delay::NoopDelay;

use stepper_queue::{Channel, EnqueueError, SoftTimerBackend, StepperCommand};

type TestChannel = Channel<SoftTimerBackend<RecordingPin, NoopDelay>, RecordingPin, 32>;

struct Harness {
    channel: TestChannel,
    step_pin: RecordingPin,
    dir_pin: RecordingPin,
}

fn harness() -> Harness {
    let step_pin = RecordingPin::new();
    let dir_pin = RecordingPin::new();
    let backend = SoftTimerBackend::new(step_pin.clone(), NoopDelay);
    let mut channel = TestChannel::new(backend, heapless::String::try_from("x_axis").unwrap());
    channel.set_direction_pin(dir_pin.clone(), true);
    channel.connect();
    Harness {
        channel,
        step_pin,
        dir_pin,
    }
}

fn cmd(ticks: u16, steps: u8, count_up: bool) -> Option<StepperCommand> {
    Some(StepperCommand {
        ticks,
        steps,
        count_up,
    })
}

#[test]
fn drain_reaches_exact_signed_position() {
    let mut h = harness();

    // +10, -3, pure delay, +7 => net +14
    h.channel.add_queue_entry(cmd(5000, 10, true), false).unwrap();
    h.channel.add_queue_entry(cmd(5000, 3, false), false).unwrap();
    h.channel.add_queue_entry(cmd(6000, 0, true), false).unwrap();
    h.channel.add_queue_entry(cmd(5000, 7, true), false).unwrap();
    assert_eq!(h.channel.position_after_commands_completed(), 14);

    h.channel.add_queue_entry(None, true).unwrap();
    h.channel.run_to_completion();

    assert_eq!(h.channel.current_position(), 14);
    assert!(h.channel.is_queue_empty());
    assert!(!h.channel.is_running());
    // 10 + 3 + 7 pulses on the STEP pin
    assert_eq!(h.step_pin.pulse_count(), 20);
}

#[test]
fn direction_pin_flips_only_when_entry_begins() {
    let mut h = harness();

    h.channel.add_queue_entry(cmd(5000, 5, true), false).unwrap();
    // committing into the empty queue drove the pin once, forward
    assert_eq!(h.dir_pin.levels(), vec![true]);

    h.channel.add_queue_entry(cmd(5000, 5, false), false).unwrap();
    // the reversal is deferred, not applied at enqueue time
    assert_eq!(h.dir_pin.writes(), 1);

    h.channel.add_queue_entry(None, true).unwrap();
    assert!(h.channel.service_once());
    // first entry done, still no flip
    assert_eq!(h.dir_pin.writes(), 1);

    assert!(h.channel.service_once());
    // the flip happened exactly when the reversed entry began
    assert_eq!(h.dir_pin.levels(), vec![true, false]);
    assert_eq!(h.channel.current_position(), 0);
}

#[test]
fn start_without_data_is_rejected() {
    let mut h = harness();
    assert_eq!(
        h.channel.add_queue_entry(None, true),
        Err(EnqueueError::EmptyQueueToStart)
    );
    assert!(!h.channel.is_running());
    assert!(h.channel.is_queue_empty());
}

#[test]
fn disconnected_channel_rejects_commands() {
    let mut h = harness();
    h.channel.disconnect();
    assert_eq!(
        h.channel.add_queue_entry(cmd(5000, 5, true), false),
        Err(EnqueueError::DeviceNotReady)
    );

    h.channel.connect();
    assert!(h.channel.add_queue_entry(cmd(5000, 5, true), false).is_ok());
}

#[test]
fn queue_full_is_transient_backpressure() {
    let mut h = harness();
    for _ in 0..32 {
        h.channel.add_queue_entry(cmd(5000, 1, true), false).unwrap();
    }
    assert_eq!(
        h.channel.add_queue_entry(cmd(5000, 1, true), false),
        Err(EnqueueError::QueueFull)
    );

    // consuming one entry makes room again
    h.channel.add_queue_entry(None, true).unwrap();
    assert!(h.channel.service_once());
    assert!(h.channel.add_queue_entry(cmd(5000, 1, true), false).is_ok());
}

#[test]
fn force_stop_discards_pending_entries() {
    let mut h = harness();
    for _ in 0..4 {
        h.channel.add_queue_entry(cmd(5000, 10, true), false).unwrap();
    }
    h.channel.add_queue_entry(None, true).unwrap();
    assert!(h.channel.service_once());
    assert_eq!(h.channel.current_position(), 10);

    h.channel.force_stop_and_new_position(0);
    assert!(!h.channel.is_running());
    assert!(h.channel.is_queue_empty());
    assert_eq!(h.channel.current_position(), 0);
    // only the first entry's pulses were ever emitted
    assert_eq!(h.step_pin.pulse_count(), 10);

    // the channel accepts and runs new work afterwards
    h.channel.add_queue_entry(cmd(5000, 5, false), true).unwrap();
    h.channel.run_to_completion();
    assert_eq!(h.channel.current_position(), -5);
}

#[test]
fn queue_restarts_after_natural_drain() {
    let mut h = harness();
    h.channel.add_queue_entry(cmd(5000, 8, true), true).unwrap();
    h.channel.run_to_completion();
    assert!(!h.channel.is_running());
    assert_eq!(h.channel.current_position(), 8);

    h.channel.add_queue_entry(cmd(5000, 8, true), true).unwrap();
    assert!(h.channel.is_running());
    h.channel.run_to_completion();
    assert_eq!(h.channel.current_position(), 16);
}

#[test]
fn lookahead_tracks_buffered_time() {
    let mut h = harness();
    h.channel.add_queue_entry(cmd(4000, 1, true), false).unwrap();
    h.channel.add_queue_entry(cmd(4000, 10, true), false).unwrap();
    h.channel.add_queue_entry(cmd(8000, 0, true), false).unwrap();

    // in-flight entry excluded: 40_000 + 8_000
    assert_eq!(h.channel.ticks_in_queue(), 48_000);
    assert!(h.channel.has_ticks_in_queue(48_000));
    assert!(!h.channel.has_ticks_in_queue(48_001));

    h.channel.add_queue_entry(None, true).unwrap();
    assert!(h.channel.service_once());
    assert_eq!(h.channel.ticks_in_queue(), 8_000);
}

#[test]
fn position_is_consistent_at_every_service_step() {
    let mut h = harness();
    let mut expected: i32 = 0;
    for (steps, up) in [(10u8, true), (4, false), (0, true), (25, true), (25, false)] {
        h.channel.add_queue_entry(cmd(5000, steps, up), false).unwrap();
        expected += if up { steps as i32 } else { -(steps as i32) };
    }
    assert_eq!(h.channel.position_after_commands_completed(), expected);

    h.channel.add_queue_entry(None, true).unwrap();
    let mut running_total: i32 = 0;
    for (steps, up) in [(10u8, true), (4, false), (0, true), (25, true), (25, false)] {
        assert!(h.channel.service_once());
        running_total += if up { steps as i32 } else { -(steps as i32) };
        assert_eq!(h.channel.current_position(), running_total);
    }
    assert_eq!(h.channel.current_position(), expected);
}
