//! # LED matrix patterns
//! Frame contents for the 5x5 WS2812 matrix.
use smart_leds::RGB8;

/// Width of the matrix
pub const MATRIX_WIDTH: usize = 5;

/// Height of the matrix
pub const MATRIX_HEIGHT: usize = 5;

/// Number of LEDs in the chain
pub const MATRIX_LEDS: usize = MATRIX_WIDTH * MATRIX_HEIGHT;

/// Chain positions forming the two diagonals of the matrix
pub const X_INDICES: [usize; 9] = [0, 4, 6, 8, 12, 16, 18, 20, 24];

/// Color of the lit pixels while the alarm pattern is shown
pub const ALARM_COLOR: RGB8 = RGB8 { r: 255, g: 0, b: 0 };

/// What the matrix should show
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedPattern {
    /// Red X across the matrix
    Alarm,
    /// All LEDs dark
    Cleared,
}

impl LedPattern {
    /// Build the frame for this pattern, in chain order
    pub fn frame(self) -> [RGB8; MATRIX_LEDS] {
        let mut data = [RGB8::default(); MATRIX_LEDS];
        if self == Self::Alarm {
            for index in X_INDICES {
                data[index] = ALARM_COLOR;
            }
        }
        data
    }
}
