//! # Noise detector
//! Decides from a single microphone reading whether the room got loud enough to raise the alarm.
//!
//! There is no smoothing and no hysteresis: one reading above the threshold is enough.

/// Trip level on the 12 bit ADC scale (0..=4095). Readings strictly above it count as noise.
pub const NOISE_THRESHOLD: u16 = 2500;

/// Compares raw microphone levels against a fixed threshold
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NoiseDetector {
    /// Readings strictly above this trip the detector
    threshold: u16,
}

impl NoiseDetector {
    /// Detector with the appliance threshold
    pub const fn new() -> Self {
        Self {
            threshold: NOISE_THRESHOLD,
        }
    }

    /// The level a reading must exceed
    pub const fn threshold(&self) -> u16 {
        self.threshold
    }

    /// `true` iff `level` is above the threshold
    pub const fn exceeds(&self, level: u16) -> bool {
        level > self.threshold
    }
}

impl Default for NoiseDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_levels_do_not_trip() {
        let detector = NoiseDetector::new();
        assert!(!detector.exceeds(0));
        assert!(!detector.exceeds(1_200));
        assert!(!detector.exceeds(NOISE_THRESHOLD));
    }

    #[test]
    fn levels_above_threshold_trip() {
        let detector = NoiseDetector::new();
        assert!(detector.exceeds(NOISE_THRESHOLD + 1));
        assert!(detector.exceeds(3_000));
        assert!(detector.exceeds(4_095));
    }
}
