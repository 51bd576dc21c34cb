//! Buffered LED chain
//!
//! `set_pixel` and `clear` only touch the in-memory frame. Nothing reaches
//! the LEDs until [`LedChain::flush`], which applies the global brightness and
//! hands the frame to the driver in one write.

use log::debug;

use crate::color::{LedFrame, OFF, Rgbw, dim};
use crate::driver::LedDriver;

/// Fixed-length chain of RGBW pixels in front of an [`LedDriver`]
pub struct LedChain<D: LedDriver<N>, const N: usize> {
    driver: D,
    pixels: LedFrame<N>,
    brightness: u8,
}

impl<D: LedDriver<N>, const N: usize> LedChain<D, N> {
    /// Create a chain with every pixel off and full brightness
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            pixels: [OFF; N],
            brightness: u8::MAX,
        }
    }

    /// Set the global brightness applied on flush
    #[must_use]
    pub fn with_brightness(mut self, brightness: u8) -> Self {
        self.brightness = brightness;
        self
    }

    pub fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Buffer a pixel color. Indices past the end of the chain are ignored.
    pub fn set_pixel(&mut self, index: usize, color: Rgbw) {
        match self.pixels.get_mut(index) {
            Some(pixel) => *pixel = color,
            None => debug!("led: pixel {} out of range ({} leds)", index, N),
        }
    }

    /// Turn every buffered pixel off
    pub fn clear(&mut self) {
        self.pixels = [OFF; N];
    }

    /// Buffered (unscaled) frame
    pub fn pixels(&self) -> &LedFrame<N> {
        &self.pixels
    }

    /// Push the buffered frame to the chain
    pub fn flush(&mut self) {
        if self.brightness == u8::MAX {
            self.driver.write(&self.pixels);
            return;
        }

        let mut scaled = self.pixels;
        for pixel in &mut scaled {
            *pixel = dim(*pixel, self.brightness);
        }
        self.driver.write(&scaled);
    }
}
