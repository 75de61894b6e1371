//! # Display task
//! This module contains the task that shows the status line on the OLED display.
//!
//! The task is responsible for initializing the display and redrawing it whenever a new status
//! line is signalled. Without a working display the rest of the alarm carries on.
use crate::task::resources::{DisplayResources, Irqs};
use alarm_core::DisplayText;
use defmt::{Debug2Format, error, info, warn};
use embassy_rp::i2c::{Config, I2c};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embedded_graphics::{
    mono_font::{MonoTextStyleBuilder, ascii::FONT_6X13},
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};
use ssd1306_async::{I2CDisplayInterface, Ssd1306, prelude::*};

/// Signal carrying the next status line
static DISPLAY_SIGNAL: Signal<CriticalSectionRawMutex, DisplayText> = Signal::new();

/// Signals the display to show a status line
pub fn signal_display_text(text: DisplayText) {
    DISPLAY_SIGNAL.signal(text);
}

/// Waits for the next status line
async fn wait_for_display_text() -> DisplayText {
    DISPLAY_SIGNAL.wait().await
}

/// Where the status line is drawn
const TEXT_POSITION: Point = Point::new(0, 0);

#[embassy_executor::task]
pub async fn display_handler(r: DisplayResources) {
    info!("Display task started");

    let mut config = Config::default();
    config.frequency = 400_000;
    let i2c = I2c::new_async(r.i2c1, r.scl, r.sda, Irqs, config);

    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    if let Err(e) = display.init().await {
        error!("Failed to initialize display: {}", Debug2Format(&e));
        return;
    }

    let text_style = MonoTextStyleBuilder::new()
        .font(&FONT_6X13)
        .text_color(BinaryColor::On)
        .build();

    loop {
        let text = wait_for_display_text().await;
        info!("Display: {}", text.as_str());

        display.clear();
        if let Err(e) = Text::with_baseline(text.as_str(), TEXT_POSITION, text_style, Baseline::Top)
            .draw(&mut display)
        {
            warn!("Display draw failed: {}", Debug2Format(&e));
        }
        if let Err(e) = display.flush().await {
            warn!("Display flush failed: {}", Debug2Format(&e));
        }
    }
}
