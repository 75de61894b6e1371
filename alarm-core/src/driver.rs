//! # Main loop driver
//! One polling cycle of the alarm, in the fixed order that settles simultaneous inputs:
//!
//! 1. emergency press
//! 2. reset press
//! 3. noise
//! 4. display tick
//! 5. blink tick (only while active)
//!
//! A reset and an emergency press landing in the same cycle therefore end inactive, the next
//! press raises the alarm again. Noise is looked at after a reset, so a room that is still loud
//! re-raises the alarm in the same cycle.
//!
//! The caller owns the cadence: sample the microphone, call [`AlarmLoop::cycle`], sleep for
//! [`POLL_INTERVAL`], repeat.
use crate::button::DebouncedButton;
use crate::noise::NoiseDetector;
use crate::state::{AlarmMachine, CommandSink};
use embassy_time::{Duration, Instant};

/// Sleep between two cycles
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// The buttons a cycle drains
#[derive(Debug, Clone, Copy)]
pub struct Buttons<'a> {
    /// Raises the alarm
    pub emergency: &'a DebouncedButton,
    /// Silences the alarm
    pub reset: &'a DebouncedButton,
}

/// Owner of the alarm state for the lifetime of the device
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct AlarmLoop {
    /// The alarm state machine
    machine: AlarmMachine,
    /// Threshold check for microphone levels
    detector: NoiseDetector,
}

impl AlarmLoop {
    /// A loop for a system started at `start`
    pub const fn new(start: Instant) -> Self {
        Self {
            machine: AlarmMachine::new(start),
            detector: NoiseDetector::new(),
        }
    }

    /// The state machine
    pub const fn machine(&self) -> &AlarmMachine {
        &self.machine
    }

    /// Run one cycle at `now` with the microphone reading `noise_level` taken for it
    pub fn cycle(
        &mut self,
        now: Instant,
        noise_level: u16,
        buttons: Buttons<'_>,
        sink: &mut impl CommandSink,
    ) {
        if buttons.emergency.take_pressed() {
            self.machine.on_emergency();
        }
        if buttons.reset.take_pressed() {
            self.machine.on_reset(sink);
        }
        if self.detector.exceeds(noise_level) {
            self.machine.on_noise();
        }

        self.machine.display_tick(now, sink);
        self.machine.blink_tick(now, sink);
    }
}
