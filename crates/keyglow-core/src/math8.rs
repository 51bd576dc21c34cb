/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// A scale of 255 leaves the value untouched and 0 turns it off.
/// Uses integer math for efficiency on embedded systems.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub fn scale8(value: u8, scale: u8) -> u8 {
    ((u16::from(value) * (u16::from(scale) + 1)) >> 8) as u8
}
