//! LED Driver abstraction layer
//!
//! Provides a trait-based abstraction for LED chain drivers,
//! allowing the render cycle to be hardware-agnostic.

use crate::color::LedFrame;

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// Writing a frame is the only point at which the physical chain changes.
pub trait LedDriver<const N: usize> {
    /// Write colors to the LED chain
    fn write(&mut self, colors: &LedFrame<N>);
}
