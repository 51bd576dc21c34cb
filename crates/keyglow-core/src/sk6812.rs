//! SK6812 RGBW wire format
//!
//! SK6812 RGBW pixels take 32 bits each, sent G, R, B, W. Smart-LED adapters
//! built for WS2812 take `RGB8` items and clock out 24 bits per item in
//! G, R, B order. Since the chain is just a stream of bits, packing the GRBW
//! byte stream three bytes at a time into `RGB8` items lets such an adapter
//! drive an RGBW chain unchanged.

use smart_leds::RGB8;

use crate::color::Rgbw;

/// Bytes per RGBW pixel on the wire
pub const BYTES_PER_PIXEL: usize = 4;

/// Number of `RGB8` items carrying `leds` RGBW pixels
pub const fn packed_len(leds: usize) -> usize {
    (leds * BYTES_PER_PIXEL).div_ceil(3)
}

/// Wire byte stream of a frame
pub fn grbw_bytes(frame: &[Rgbw]) -> impl Iterator<Item = u8> + '_ {
    frame
        .iter()
        .flat_map(|pixel| [pixel.g, pixel.r, pixel.b, pixel.a.0])
}

/// Frame packed into `RGB8` items for a 24-bit adapter. A partial last item
/// is padded with zeroes, which fall off the end of the chain.
pub fn pack_rgb8(frame: &[Rgbw]) -> impl Iterator<Item = RGB8> + '_ {
    Packed {
        bytes: grbw_bytes(frame),
    }
}

struct Packed<I> {
    bytes: I,
}

impl<I: Iterator<Item = u8>> Iterator for Packed<I> {
    type Item = RGB8;

    fn next(&mut self) -> Option<RGB8> {
        // The adapter sends g first, then r, then b
        let g = self.bytes.next()?;
        let r = self.bytes.next().unwrap_or(0);
        let b = self.bytes.next().unwrap_or(0);
        Some(RGB8 { r, g, b })
    }
}
