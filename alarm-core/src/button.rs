//! # Debounced buttons
//! Turns raw, bouncing falling edges into at most one consumable press per debounce window.
//!
//! The edge side ([`DebouncedButton::on_edge`]) runs wherever the edge is observed, which on the
//! device is a task woken by the GPIO interrupt. The consuming side
//! ([`DebouncedButton::take_pressed`]) runs once per main loop cycle. Both sides share a single
//! 64 bit word holding the last accepted edge time and the pending flag, so every update is one
//! compare-and-swap and a reader can never observe a time without its flag or the other way round.
use embassy_time::{Duration, Instant};
use portable_atomic::{AtomicU64, Ordering};

/// Minimum spacing between two accepted edges of the same button.
/// An edge is accepted only if strictly more than this has passed since the last accepted one.
pub const DEBOUNCE_INTERVAL: Duration = Duration::from_millis(200);

/// Bit 0 of the record: an accepted press is waiting to be consumed.
const PENDING: u64 = 1;

/// The physical buttons of the appliance
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    /// Raises the alarm
    Emergency,
    /// Silences the alarm and returns to ready
    Reset,
}

/// Debounce record of one button.
///
/// Layout of `record`: bits 1..64 hold the tick count of the last accepted edge, bit 0 is the
/// pending flag. A fresh button starts at tick 0 with nothing pending.
#[derive(Debug)]
pub struct DebouncedButton {
    /// Which button this record belongs to
    id: ButtonId,
    /// Packed last trigger time and pending flag
    record: AtomicU64,
}

impl DebouncedButton {
    /// Create the record for a button, usable in a `static`
    pub const fn new(id: ButtonId) -> Self {
        Self {
            id,
            record: AtomicU64::new(0),
        }
    }

    /// The button this record belongs to
    pub const fn id(&self) -> ButtonId {
        self.id
    }

    /// Feed a falling edge observed at `now`.
    ///
    /// Returns `true` if the edge was accepted as a press, `false` if it fell inside the debounce
    /// window of the previous accepted edge (or is older than it) and was dropped.
    pub fn on_edge(&self, now: Instant) -> bool {
        let accepted = self
            .record
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |packed| {
                let last_trigger = Instant::from_ticks(packed >> 1);
                now.checked_duration_since(last_trigger)
                    .is_some_and(|elapsed| elapsed > DEBOUNCE_INTERVAL)
                    .then_some((now.as_ticks() << 1) | PENDING)
            })
            .is_ok();

        if accepted {
            debug!("{:?} edge accepted", self.id);
        } else {
            trace!("{:?} edge debounced", self.id);
        }
        accepted
    }

    /// Consume a pending press.
    ///
    /// Reads and clears the pending flag in one step, so a press is handed out exactly once even
    /// if an edge arrives at the same moment.
    pub fn take_pressed(&self) -> bool {
        self.record.fetch_and(!PENDING, Ordering::AcqRel) & PENDING != 0
    }

    /// Peek at the pending flag without consuming it
    pub fn is_pending(&self) -> bool {
        self.record.load(Ordering::Acquire) & PENDING != 0
    }

    /// Time of the last accepted edge, tick 0 if none was ever accepted
    pub fn last_trigger(&self) -> Instant {
        Instant::from_ticks(self.record.load(Ordering::Acquire) >> 1)
    }
}
