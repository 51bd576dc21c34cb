//! Digital I/O expander abstraction
//!
//! Both halves of the matrix sit behind an I/O expander on a shared bus.
//! The scanner only talks to them through [`ExpanderPort`], so any chip (or a
//! test double) that can set pin direction and read/write levels will do.

/// Electrical level of a single pin
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl Level {
    /// Level encoded by a port bit (1 = HIGH)
    pub fn from_bit(bit: bool) -> Self {
        if bit { Level::High } else { Level::Low }
    }
}

/// Pin direction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinMode {
    /// Push-pull output
    Output,
    /// Input with the internal pull-up enabled
    InputPullUp,
}

/// Number of pins on an expander port
pub const PORT_WIDTH: usize = 16;

/// Fixed-width digital port addressed on a shared bus
///
/// Every operation is synchronous. A failed transfer must be reported through
/// `Self::Error`, never papered over with a guessed level.
pub trait ExpanderPort {
    /// Bus error
    type Error: core::fmt::Debug;

    /// Set direction (and pull-up) of a single pin
    fn configure_pin(&mut self, pin: u8, mode: PinMode) -> Result<(), Self::Error>;

    /// Drive an output pin
    fn write_pin(&mut self, pin: u8, level: Level) -> Result<(), Self::Error>;

    /// Sample a pin
    fn read_pin(&mut self, pin: u8) -> Result<Level, Self::Error>;

    /// Drive all pins at once. Bit `n` of `levels` is pin `n`, 1 is HIGH.
    ///
    /// The default implementation writes every pin going HIGH before any pin
    /// going LOW, so moving a single LOW bit never has two LOW pins in flight.
    /// Chips that can latch the whole port in one transfer should override it.
    #[allow(clippy::cast_possible_truncation)]
    fn write_port(&mut self, levels: u16) -> Result<(), Self::Error> {
        for pin in 0..PORT_WIDTH {
            if levels & (1 << pin) != 0 {
                self.write_pin(pin as u8, Level::High)?;
            }
        }
        for pin in 0..PORT_WIDTH {
            if levels & (1 << pin) == 0 {
                self.write_pin(pin as u8, Level::Low)?;
            }
        }
        Ok(())
    }

    /// Sample all pins at once. Bit `n` of the result is pin `n`, 1 is HIGH.
    #[allow(clippy::cast_possible_truncation)]
    fn read_port(&mut self) -> Result<u16, Self::Error> {
        let mut levels = 0;
        for pin in 0..PORT_WIDTH {
            if self.read_pin(pin as u8)? == Level::High {
                levels |= 1 << pin;
            }
        }
        Ok(levels)
    }
}
