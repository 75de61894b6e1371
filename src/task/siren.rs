//! # Siren
//! The two tone generators, each a PWM slice driving a piezo with a square wave.
//!
//! Switching a tone is a register write and happens on the spot, there is no task behind this.
use crate::task::resources::SirenResources;
use alarm_core::ToneChannel;
use alarm_core::tone::{TONE_CLOCK_DIVIDER, on_level, pwm_top};
use defmt::{debug, error};
use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::pwm::{Config, Pwm};

/// One tone output with the configuration it was set up with
struct Tone {
    /// The PWM slice
    pwm: Pwm<'static>,
    /// Slice configuration, `None` if the frequency can't be reached at the current clock
    config: Option<Config>,
    /// The tone is on channel B of its slice
    on_b: bool,
}

impl Tone {
    /// Build the slice configuration for a channel, with the output silent
    fn config(channel: ToneChannel) -> Option<Config> {
        let Some(top) = pwm_top(clk_sys_freq(), channel.frequency_hz(), TONE_CLOCK_DIVIDER) else {
            error!(
                "Tone {} at {} Hz can't be produced, staying silent",
                channel,
                channel.frequency_hz()
            );
            return None;
        };
        let mut c = Config::default();
        c.divider = TONE_CLOCK_DIVIDER.into();
        c.top = top;
        Some(c)
    }

    /// Switch the square wave on or off
    fn set(&mut self, on: bool) {
        let Some(config) = self.config.as_mut() else {
            return;
        };
        let level = if on { on_level(config.top) } else { 0 };
        if self.on_b {
            config.compare_b = level;
        } else {
            config.compare_a = level;
        }
        self.pwm.set_config(config);
    }
}

/// Both tones of the siren
pub struct Siren {
    /// High tone
    tone_a: Tone,
    /// Low tone
    tone_b: Tone,
}

impl Siren {
    /// Take both PWM slices, both tones start silent
    pub fn new(r: SirenResources) -> Self {
        let config_a = Tone::config(ToneChannel::A);
        let config_b = Tone::config(ToneChannel::B);
        Self {
            tone_a: Tone {
                pwm: Pwm::new_output_b(r.tone_a_slice, r.tone_a_pin, config_a.clone().unwrap_or_default()),
                config: config_a,
                on_b: true,
            },
            tone_b: Tone {
                pwm: Pwm::new_output_a(r.tone_b_slice, r.tone_b_pin, config_b.clone().unwrap_or_default()),
                config: config_b,
                on_b: false,
            },
        }
    }

    /// Switch one tone on or off
    pub fn set(&mut self, channel: ToneChannel, on: bool) {
        debug!("Tone {} {}", channel, if on { "on" } else { "off" });
        match channel {
            ToneChannel::A => self.tone_a.set(on),
            ToneChannel::B => self.tone_b.set(on),
        }
    }

    /// Silence both tones
    pub fn silence(&mut self) {
        self.set(ToneChannel::A, false);
        self.set(ToneChannel::B, false);
    }
}
