#![no_std]
#![no_main]

use core::cell::RefCell;

use embassy_executor::Spawner;
use embassy_embedded_hal::shared_bus::blocking::i2c::I2cDevice;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::{Duration, Timer};

use esp_backtrace as _;
use esp_hal::i2c::master::{Config as I2cConfig, I2c};
use esp_hal::time::Rate;
use esp_hal::{clock::CpuClock, delay::Delay, timer::timg::TimerGroup};
use esp_println::println;

use keyglow_core::{Heartbeat, Keyboard, LedChain, MatrixScanner, Mcp23017, RenderCycle, ScanConfig};

use crate::infrastructure::drivers::EspLedDriver;
use crate::infrastructure::tasks::keyboard_task;
use crate::infrastructure::types::I2cBus;

mod config;
mod infrastructure;

esp_bootloader_esp_idf::esp_app_desc!();

// static_cell::make_static! in main causes a compiler error
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        #[deny(unused_attributes)]
        let x = STATIC_CELL.uninit().write(($val));
        x
    }};
}

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    esp_println::logger::init_logger_from_env();
    println!("keyglow: booting");

    // Initialize hardware
    let hal_config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(hal_config);

    // Start rtos
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    // Both expanders share one bus
    println!(
        "keyglow: i2c on gpio{}/gpio{}, leds on gpio{}",
        config::PINS.i2c_sda,
        config::PINS.i2c_scl,
        config::PINS.led_data
    );
    let i2c_config = I2cConfig::default().with_frequency(Rate::from_khz(config::BUS.frequency_khz));
    let i2c = I2c::new(peripherals.I2C0, i2c_config)
        .unwrap()
        .with_sda(crate::i2c_sda!(peripherals))
        .with_scl(crate::i2c_scl!(peripherals));
    let bus: &'static I2cBus = mk_static!(I2cBus, Mutex::new(RefCell::new(i2c)));

    let columns = Mcp23017::new(I2cDevice::new(bus), config::MATRIX.columns_address);
    let rows = Mcp23017::new(I2cDevice::new(bus), config::MATRIX.rows_address);
    let scan_config = ScanConfig {
        settle_us: config::MATRIX.settle_us,
        debounce_threshold: config::MATRIX.debounce_threshold,
    };
    let scanner = MatrixScanner::new(columns, rows, Delay::new(), scan_config);

    let driver = EspLedDriver::new(peripherals.RMT, crate::led_gpio!(peripherals));
    let chain = LedChain::new(driver).with_brightness(config::LIGHT.brightness);
    let renderer = RenderCycle::new(chain, Heartbeat::default());

    let mut keyboard = Keyboard::new(scanner, renderer);
    match keyboard.start() {
        Ok(()) => {
            println!("keyglow: scanning");
            spawner.spawn(keyboard_task(keyboard)).ok();
        }
        Err(fault) => println!("keyglow: halted: {}", fault),
    }

    loop {
        Timer::after(Duration::from_secs(5)).await;
    }
}
