#![no_std]

//! Key matrix scanning and LED feedback core
//!
//! Architecture layers:
//! - `port` - I/O expander abstraction ([`ExpanderPort`] trait)
//! - `mcp23017` - MCP23017 implementation of the port over I2C
//! - `scanner` - Column strobing, row sensing and debouncing
//! - `driver` - LED hardware abstraction ([`LedDriver`] trait)
//! - `chain` - Buffered LED chain with global brightness
//! - `render` - Per-cycle frame patterns and the render cycle
//! - `keyboard` - Top-level Init / Running / Halted state machine
//!
//! Everything is generic over the port, delay and LED driver, so the whole
//! cycle runs on the host against test doubles.

pub mod chain;
pub mod color;
pub mod debounce;
pub mod driver;
pub mod error;
pub mod event;
pub mod grid;
pub mod keyboard;
pub mod math8;
pub mod mcp23017;
pub mod port;
pub mod render;
pub mod scanner;
pub mod sk6812;

// Port exports
pub use port::{ExpanderPort, Level, PinMode};

// Scanner exports
pub use debounce::{Debounce, KeyState};
pub use event::{EdgeEvent, EdgeEvents, EdgeKind};
pub use grid::KeyStateGrid;
pub use scanner::{MatrixScanner, ScanConfig};

// LED exports
pub use chain::LedChain;
pub use color::{LedFrame, Rgbw};
pub use driver::LedDriver;
pub use render::{Heartbeat, Pattern, RenderCycle};

// Top level exports
pub use error::{BusFault, CycleError, InitFault, Role};
pub use keyboard::{Keyboard, SystemState};
pub use mcp23017::Mcp23017;
