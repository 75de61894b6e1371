//! # Button Tasks
//! One task per button, feeding every falling edge into the button's debounce record.
//!
//! The records are the only state shared with the orchestrator. Edges are timestamped here and
//! debounced in the record, the orchestrator consumes at most one press per button and cycle.
use alarm_core::{ButtonId, DebouncedButton};
use defmt::{debug, info};
use embassy_rp::gpio::Input;
use embassy_time::Instant;

/// Debounce record of the emergency button
pub static EMERGENCY_BUTTON: DebouncedButton = DebouncedButton::new(ButtonId::Emergency);

/// Debounce record of the reset button
pub static RESET_BUTTON: DebouncedButton = DebouncedButton::new(ButtonId::Reset);

/// The record belonging to a button
fn record(button: ButtonId) -> &'static DebouncedButton {
    match button {
        ButtonId::Emergency => &EMERGENCY_BUTTON,
        ButtonId::Reset => &RESET_BUTTON,
    }
}

/// Waits for falling edges on a pulled-up button input and records them.
/// The button is normally high, pressing it pulls the line low.
#[embassy_executor::task(pool_size = 2)]
pub async fn button_handler(mut input: Input<'static>, button: ButtonId) {
    info!("{} button task started", button);
    let record = record(button);

    loop {
        input.wait_for_falling_edge().await;
        if record.on_edge(Instant::now()) {
            debug!("{} button pressed", button);
        }
    }
}
