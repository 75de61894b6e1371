//! # Resources
//! Pin and peripheral assignment of the board, split into one group per task in `main.rs`.
use assign_resources::assign_resources;
use embassy_rp::adc::InterruptHandler as AdcInterruptHandler;
use embassy_rp::i2c::InterruptHandler as I2cInterruptHandler;
use embassy_rp::peripherals::I2C1;
use embassy_rp::{Peri, bind_interrupts, peripherals};

// group the peripherals into resources, to be used in the tasks
// the resources are assigned to the tasks in main.rs
assign_resources! {
    btn_emergency: EmergencyButtonResources {
        button_pin: PIN_5,
    },
    btn_reset: ResetButtonResources {
        button_pin: PIN_6,
    },
    microphone: MicrophoneResources {
        adc: ADC,
        mic_pin: PIN_28,
    },
    siren: SirenResources {
        tone_a_slice: PWM_SLICE2,
        tone_a_pin: PIN_21,
        tone_b_slice: PWM_SLICE5,
        tone_b_pin: PIN_10,
    },
    led_matrix: LedMatrixResources {
        inner_spi: SPI0,
        clk_pin: PIN_18, // not wired, SPI0 wants a clock pin and GPIO 6 is taken by the reset button
        mosi_pin: PIN_7,
        tx_dma_ch: DMA_CH0,
    },
    display: DisplayResources {
        scl: PIN_15,
        sda: PIN_14,
        i2c1: I2C1,
    },
}

// bind the interrupts, on a global scope
bind_interrupts!(pub struct Irqs {
    ADC_IRQ_FIFO => AdcInterruptHandler;
    I2C1_IRQ => I2cInterruptHandler<I2C1>;
});
