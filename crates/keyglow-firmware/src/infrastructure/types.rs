use core::cell::RefCell;

use embassy_embedded_hal::shared_bus::blocking::i2c::I2cDevice;
use embassy_sync::blocking_mutex::{Mutex, raw::CriticalSectionRawMutex};
use esp_hal::{Blocking, delay::Delay, i2c::master::I2c};

use keyglow_core::{Heartbeat, Keyboard, Mcp23017};

use crate::config::{COL_COUNT, LED_COUNT, ROW_COUNT};
use crate::infrastructure::drivers::EspLedDriver;

pub(crate) type I2cDriver = I2c<'static, Blocking>;
/// Blocking I2C bus shared by both expanders
pub(crate) type I2cBus = Mutex<CriticalSectionRawMutex, RefCell<I2cDriver>>;
pub(crate) type Expander = Mcp23017<I2cDevice<'static, CriticalSectionRawMutex, I2cDriver>>;
pub(crate) type LightDriver = EspLedDriver<'static>;

pub(crate) type KeyboardImpl =
    Keyboard<Expander, Expander, Delay, LightDriver, Heartbeat, ROW_COUNT, COL_COUNT, LED_COUNT>;
