//! # Alarm core
//! Everything that decides *what* the alarm does, kept apart from *how* the hardware does it.
//!
//! Raw inputs flow one way through this crate:
//! button edges and microphone levels are filtered ([`button`], [`noise`]), the [`state`] machine
//! turns them into alarm transitions, the [`scheduler`] decides when periodic output is due, and
//! [`Command`]s come out the other end into whatever [`CommandSink`] the caller provides.
//! The [`driver`] module ties one polling cycle together in the fixed evaluation order.
//!
//! Nothing in here reads a clock or touches a peripheral, `now` is always handed in.
#![cfg_attr(not(test), no_std)]

// must come first, the logging macros are used by the modules below
#[macro_use]
mod fmt;

pub mod button;
pub mod driver;
pub mod noise;
pub mod pattern;
pub mod scheduler;
pub mod state;
pub mod tone;

pub use button::{ButtonId, DEBOUNCE_INTERVAL, DebouncedButton};
pub use driver::{AlarmLoop, Buttons, POLL_INTERVAL};
pub use noise::{NOISE_THRESHOLD, NoiseDetector};
pub use pattern::{LedPattern, MATRIX_LEDS};
pub use scheduler::{BLINK_INTERVAL, DISPLAY_REFRESH_INTERVAL, Scheduler};
pub use state::{AlarmMachine, AlarmState, Command, CommandSink, DisplayText, Trigger};
pub use tone::ToneChannel;
