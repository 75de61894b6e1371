//! # Pico noise alarm
//! Raises an alarm on a loud room or a press of the emergency button: the LED matrix blinks a red
//! X, the siren alternates between two tones and the display reads "ALARME ATIVADO!" until the
//! reset button is pressed.
// we are in an environment with constrained resources, so we do not use the standard library and we define a different entry point.
#![no_std]
#![no_main]

use crate::task::buttons::button_handler;
use crate::task::display::display_handler;
use crate::task::led_matrix::led_matrix_handler;
use crate::task::microphone::Microphone;
use crate::task::orchestrate::orchestrator;
use crate::task::resources::{
    AssignedResources, DisplayResources, EmergencyButtonResources, LedMatrixResources,
    MicrophoneResources, ResetButtonResources, SirenResources,
};
use crate::task::siren::Siren;
use alarm_core::ButtonId;
use defmt::info;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::spi::{Config as SpiConfig, Spi};
use {defmt_rtt as _, panic_probe as _};

mod task;

/// Clock of the SPI bus shaping the WS2812 bit stream
const LED_SPI_FREQUENCY: u32 = 3_800_000;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Program start");

    // Initialize the peripherals for the RP2040
    let p = embassy_rp::init(Default::default());
    // and split them into resources for the tasks
    let r = split_resources!(p);

    // the siren is silent from the start, the matrix task clears the LEDs on start
    let mut siren = Siren::new(r.siren);
    siren.silence();
    let microphone = Microphone::new(r.microphone);

    // buttons
    info!("init buttons");
    let emergency = Input::new(r.btn_emergency.button_pin, Pull::Up);
    spawner.must_spawn(button_handler(emergency, ButtonId::Emergency));
    let reset = Input::new(r.btn_reset.button_pin, Pull::Up);
    spawner.must_spawn(button_handler(reset, ButtonId::Reset));

    // led matrix
    info!("init led matrix");
    let mut spi_config = SpiConfig::default();
    spi_config.frequency = LED_SPI_FREQUENCY;
    let m = r.led_matrix;
    let spi = Spi::new_txonly(m.inner_spi, m.clk_pin, m.mosi_pin, m.tx_dma_ch, spi_config);
    spawner.must_spawn(led_matrix_handler(spi));

    // display
    info!("init display");
    spawner.must_spawn(display_handler(r.display));

    // and the main loop
    spawner.must_spawn(orchestrator(microphone, siren));
}
