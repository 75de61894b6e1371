//! # Tick scheduler
//! Non-blocking due-checks for the periodic outputs of the alarm.
//!
//! Each timer remembers when it last fired. A check fires only once strictly more than the
//! interval has passed, and then restarts from the moment of the check rather than from a fixed
//! grid: a late poll shifts the following ticks but lateness never piles up.
use embassy_time::{Duration, Instant};

/// How often the display may be redrawn
pub const DISPLAY_REFRESH_INTERVAL: Duration = Duration::from_millis(100);

/// Half period of the alarm blink and siren alternation
pub const BLINK_INTERVAL: Duration = Duration::from_millis(500);

/// A single fixed-interval timer
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IntervalTimer {
    /// Time that must pass between two fires
    interval: Duration,
    /// When the timer last fired
    last_fired: Instant,
}

impl IntervalTimer {
    /// Create a timer that counts its first interval from `last_fired`
    pub const fn new(interval: Duration, last_fired: Instant) -> Self {
        Self {
            interval,
            last_fired,
        }
    }

    /// Fire if more than the interval has passed since the last fire.
    ///
    /// Calling this before the interval is up has no effect, no matter how often.
    pub fn is_due(&mut self, now: Instant) -> bool {
        let due = now
            .checked_duration_since(self.last_fired)
            .is_some_and(|elapsed| elapsed > self.interval);
        if due {
            self.last_fired = now;
        }
        due
    }

    /// When the timer last fired
    pub const fn last_fired(&self) -> Instant {
        self.last_fired
    }
}

/// The two independent timers driving display refresh and alarm blinking
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Scheduler {
    /// Gates display refresh attempts
    display: IntervalTimer,
    /// Gates blink and siren alternation while the alarm is active
    blink: IntervalTimer,
}

impl Scheduler {
    /// Scheduler for a system started at `start`.
    ///
    /// The display counts from `start`. The blink timer counts from the clock epoch, so the first
    /// blink after activation happens on the very cycle the alarm goes off.
    pub const fn new(start: Instant) -> Self {
        Self {
            display: IntervalTimer::new(DISPLAY_REFRESH_INTERVAL, start),
            blink: IntervalTimer::new(BLINK_INTERVAL, Instant::MIN),
        }
    }

    /// Whether a display refresh is due, consuming the tick if so
    pub fn display_tick_due(&mut self, now: Instant) -> bool {
        self.display.is_due(now)
    }

    /// Whether a blink step is due, consuming the tick if so
    pub fn blink_tick_due(&mut self, now: Instant) -> bool {
        self.blink.is_due(now)
    }

    /// When the display tick last fired
    pub const fn last_display_refresh(&self) -> Instant {
        self.display.last_fired()
    }

    /// When the blink tick last fired
    pub const fn last_blink(&self) -> Instant {
        self.blink.last_fired()
    }
}
