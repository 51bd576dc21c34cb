//! RGBW colors and frames

use smart_leds::{RGBW, White};

use crate::math8::scale8;

/// One RGBW pixel
pub type Rgbw = RGBW<u8>;

/// Full chain of pixels, index 0 closest to the data pin
pub type LedFrame<const N: usize> = [Rgbw; N];

/// Pixel turned off
pub const OFF: Rgbw = rgbw(0, 0, 0, 0);

/// Dedicated white channel at full power
pub const WHITE: Rgbw = rgbw(0, 0, 0, 255);

pub const fn rgbw(r: u8, g: u8, b: u8, w: u8) -> Rgbw {
    RGBW { r, g, b, a: White(w) }
}

/// Scale every channel, white included
pub fn dim(color: Rgbw, brightness: u8) -> Rgbw {
    rgbw(
        scale8(color.r, brightness),
        scale8(color.g, brightness),
        scale8(color.b, brightness),
        scale8(color.a.0, brightness),
    )
}
