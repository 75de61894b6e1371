//! # Microphone
//! Sample the sound level of the room through the ADC.
use crate::task::resources::{Irqs, MicrophoneResources};
use defmt::{Debug2Format, warn};
use embassy_rp::adc::{Adc, Async, Channel, Config};
use embassy_rp::gpio::Pull;

/// The microphone on its ADC channel
pub struct Microphone {
    /// The ADC, in async mode
    adc: Adc<'static, Async>,
    /// Channel of the microphone pin
    channel: Channel<'static>,
}

impl Microphone {
    /// Take the ADC and the microphone pin
    pub fn new(r: MicrophoneResources) -> Self {
        Self {
            adc: Adc::new(r.adc, Irqs, Config::default()),
            channel: Channel::new_pin(r.mic_pin, Pull::None),
        }
    }

    /// Read the current level, 12 bit.
    /// A failed conversion reads as silence, so it can never raise the alarm.
    pub async fn level(&mut self) -> u16 {
        match self.adc.read(&mut self.channel).await {
            Ok(level) => level,
            Err(e) => {
                warn!("Microphone read failed: {}", Debug2Format(&e));
                0
            }
        }
    }
}
