//! # Siren tones
//! The two tone channels of the siren and the PWM arithmetic to produce them.
//!
//! A channel is driven as a square wave at its nominal frequency, 50 % duty when on and a
//! compare level of zero when off.

/// One of the two tone generators of the siren
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ToneChannel {
    /// High tone
    A,
    /// Low tone
    B,
}

impl ToneChannel {
    /// Nominal frequency of the channel in Hz
    pub const fn frequency_hz(self) -> u32 {
        match self {
            Self::A => 2_000,
            Self::B => 500,
        }
    }

    /// The channel the siren alternates to
    pub const fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

/// Integer clock divider used for both tone slices, keeps the 500 Hz wrap inside 16 bits at 125 MHz
pub const TONE_CLOCK_DIVIDER: u8 = 16;

/// PWM wrap value (`top`) producing `freq_hz` from `sys_clk_hz` with an integer `divider`.
///
/// The counter runs `top + 1` steps per period. Returns `None` if the frequency can't be reached:
/// zero inputs, or a period that doesn't fit the 16 bit counter.
pub fn pwm_top(sys_clk_hz: u32, freq_hz: u32, divider: u8) -> Option<u16> {
    let steps_per_period = sys_clk_hz.checked_div(freq_hz.checked_mul(u32::from(divider))?)?;
    let top = steps_per_period.checked_sub(1)?;
    if top == 0 {
        return None;
    }
    u16::try_from(top).ok()
}

/// Compare level giving 50 % duty for a given `top`
pub const fn on_level(top: u16) -> u16 {
    top.div_ceil(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// RP2040 default system clock
    const SYS_CLK_HZ: u32 = 125_000_000;

    #[test]
    fn channels_alternate() {
        assert_eq!(ToneChannel::A.other(), ToneChannel::B);
        assert_eq!(ToneChannel::B.other(), ToneChannel::A);
        assert!(ToneChannel::A.frequency_hz() > ToneChannel::B.frequency_hz());
    }

    #[test]
    fn both_tones_fit_the_counter_at_default_clock() {
        let top_a = pwm_top(SYS_CLK_HZ, ToneChannel::A.frequency_hz(), TONE_CLOCK_DIVIDER);
        let top_b = pwm_top(SYS_CLK_HZ, ToneChannel::B.frequency_hz(), TONE_CLOCK_DIVIDER);
        assert_eq!(top_a, Some(3_905));
        assert_eq!(top_b, Some(15_624));
    }

    #[test]
    fn unreachable_frequencies_are_rejected() {
        // 125 MHz / 1 / 100 Hz needs 1.25 M steps per period
        assert_eq!(pwm_top(SYS_CLK_HZ, 100, 1), None);
        assert_eq!(pwm_top(SYS_CLK_HZ, 0, TONE_CLOCK_DIVIDER), None);
        assert_eq!(pwm_top(SYS_CLK_HZ, 2_000, 0), None);
        assert_eq!(pwm_top(1_000, 2_000, 1), None);
    }

    #[test]
    fn on_level_is_half_the_period() {
        assert_eq!(on_level(3_905), 1_953);
        assert_eq!(on_level(255), 128);
        assert_eq!(on_level(0), 0);
    }
}
