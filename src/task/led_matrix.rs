//! # LED matrix task
//! This module contains the task that drives the 5x5 WS2812 matrix.
//!
//! The matrix only ever shows what it was last told. Patterns signalled faster than the chain can
//! be written collapse into the latest one.
use alarm_core::{LedPattern, MATRIX_LEDS};
use defmt::{Debug2Format, debug, info, warn};
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Async, Spi};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use smart_leds::SmartLedsWriteAsync;
use ws2812_async::{Grb, Ws2812};

/// Signal carrying the next pattern to show
static LED_PATTERN_SIGNAL: Signal<CriticalSectionRawMutex, LedPattern> = Signal::new();

/// Signals the matrix to show a pattern
pub fn signal_led_pattern(pattern: LedPattern) {
    LED_PATTERN_SIGNAL.signal(pattern);
}

/// Waits for the next pattern
async fn wait_for_led_pattern() -> LedPattern {
    LED_PATTERN_SIGNAL.wait().await
}

/// Type alias for the matrix controller
type MatrixType = Ws2812<Spi<'static, SPI0, Async>, Grb, { 12 * MATRIX_LEDS }>;

/// Write one pattern to the chain
async fn show(np: &mut MatrixType, pattern: LedPattern) {
    let frame = pattern.frame();
    if let Err(e) = np.write(frame.iter().copied()).await {
        warn!("LED matrix write failed: {}", Debug2Format(&e));
    }
}

#[embassy_executor::task]
pub async fn led_matrix_handler(spi: Spi<'static, SPI0, Async>) {
    info!("LED matrix task started");
    let mut np: MatrixType = Ws2812::new(spi);

    // All off initially
    show(&mut np, LedPattern::Cleared).await;

    loop {
        let pattern = wait_for_led_pattern().await;
        debug!("LED matrix: {}", pattern);
        show(&mut np, pattern).await;
    }
}
