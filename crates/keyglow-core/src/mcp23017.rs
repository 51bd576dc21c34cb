//! MCP23017 16-bit I/O expander
//!
//! Blocking driver over any `embedded_hal::i2c::I2c`, typically a device
//! handle on a shared bus. The chip is used in its power-on layout
//! (IOCON.BANK = 0, sequential addressing), where every A/B register pair is
//! adjacent, so a whole 16-bit port is one three-byte write or a two-byte
//! read.
//!
//! Direction, pull-up and output latch registers are shadowed in RAM, which
//! makes single-pin changes a write without a read-modify-write round trip.
//! A shadow only takes a new value once the chip has acknowledged it.

use core::fmt;

use embedded_hal::i2c::I2c;

use crate::port::{ExpanderPort, Level, PORT_WIDTH, PinMode};

/// Register addresses of the A half (B is always A + 1)
#[derive(Clone, Copy, Debug)]
#[repr(u8)]
enum Register {
    IoDir = 0x00,
    GpPu = 0x0C,
    Gpio = 0x12,
    OLat = 0x14,
}

/// Driver error
#[derive(Debug)]
pub enum Mcp23017Error<E> {
    /// Bus transfer failed (typically the chip did not acknowledge)
    I2c(E),
    /// Pin index outside 0..16
    InvalidPin(u8),
}

impl<E: fmt::Debug> fmt::Display for Mcp23017Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mcp23017Error::I2c(e) => write!(f, "I2C error: {:?}", e),
            Mcp23017Error::InvalidPin(pin) => write!(f, "invalid pin {}", pin),
        }
    }
}

/// MCP23017 at a fixed bus address
pub struct Mcp23017<I2C> {
    i2c: I2C,
    address: u8,
    iodir: u16,
    gppu: u16,
    olat: u16,
}

impl<I2C: I2c> Mcp23017<I2C> {
    /// Address with A2..A0 all tied low
    pub const BASE_ADDRESS: u8 = 0x20;

    /// Create a driver. Shadows start at the chip's power-on values: all
    /// inputs, no pull-ups, latches low.
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            iodir: 0xFFFF,
            gppu: 0x0000,
            olat: 0x0000,
        }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give back the bus handle
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn bit(pin: u8) -> Result<u16, Mcp23017Error<I2C::Error>> {
        if usize::from(pin) < PORT_WIDTH {
            Ok(1 << pin)
        } else {
            Err(Mcp23017Error::InvalidPin(pin))
        }
    }

    fn write_pair(&mut self, register: Register, value: u16) -> Result<(), Mcp23017Error<I2C::Error>> {
        let [a, b] = value.to_le_bytes();
        self.i2c
            .write(self.address, &[register as u8, a, b])
            .map_err(Mcp23017Error::I2c)
    }

    fn read_pair(&mut self, register: Register) -> Result<u16, Mcp23017Error<I2C::Error>> {
        let mut buffer = [0u8; 2];
        self.i2c
            .write_read(self.address, &[register as u8], &mut buffer)
            .map_err(Mcp23017Error::I2c)?;
        Ok(u16::from_le_bytes(buffer))
    }
}

impl<I2C: I2c> ExpanderPort for Mcp23017<I2C> {
    type Error = Mcp23017Error<I2C::Error>;

    fn configure_pin(&mut self, pin: u8, mode: PinMode) -> Result<(), Self::Error> {
        let bit = Self::bit(pin)?;
        let iodir = match mode {
            PinMode::Output => self.iodir & !bit,
            PinMode::InputPullUp => {
                let gppu = self.gppu | bit;
                self.write_pair(Register::GpPu, gppu)?;
                self.gppu = gppu;
                self.iodir | bit
            }
        };
        self.write_pair(Register::IoDir, iodir)?;
        self.iodir = iodir;
        Ok(())
    }

    fn write_pin(&mut self, pin: u8, level: Level) -> Result<(), Self::Error> {
        let bit = Self::bit(pin)?;
        let olat = match level {
            Level::High => self.olat | bit,
            Level::Low => self.olat & !bit,
        };
        self.write_pair(Register::OLat, olat)?;
        self.olat = olat;
        Ok(())
    }

    fn read_pin(&mut self, pin: u8) -> Result<Level, Self::Error> {
        let bit = Self::bit(pin)?;
        let levels = self.read_pair(Register::Gpio)?;
        Ok(Level::from_bit(levels & bit != 0))
    }

    /// Latches both halves in one transfer. OLATA lands before OLATB, which
    /// is enough for a LOW bit walking upwards from pin 0 to pin 15.
    fn write_port(&mut self, levels: u16) -> Result<(), Self::Error> {
        self.write_pair(Register::OLat, levels)?;
        self.olat = levels;
        Ok(())
    }

    fn read_port(&mut self) -> Result<u16, Self::Error> {
        self.read_pair(Register::Gpio)
    }
}
