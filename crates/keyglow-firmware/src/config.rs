pub(crate) struct BusConfig {
    pub frequency_khz: u32,
}

pub(crate) struct MatrixConfig {
    pub columns_address: u8,
    pub rows_address: u8,
    pub settle_us: u32,
    pub debounce_threshold: u8,
    pub scan_interval_ms: u64,
}

pub(crate) struct LightConfig {
    pub brightness: u8,
}

/// Switch rows, wired to GPA0..GPA5 of the rows expander
pub(crate) const ROW_COUNT: usize = 6;
/// Switch columns, one per pin of the columns expander
pub(crate) const COL_COUNT: usize = 16;
/// SK6812 RGBW pixels on the chain
pub(crate) const LED_COUNT: usize = 96;

pub(crate) const BUS: BusConfig = BusConfig { frequency_khz: 400 };

pub(crate) const MATRIX: MatrixConfig = MatrixConfig {
    columns_address: 0x21,
    rows_address: 0x20,
    settle_us: 5,
    debounce_threshold: 3,
    scan_interval_ms: 2,
};

pub(crate) const LIGHT: LightConfig = LightConfig { brightness: 32 };

pub(crate) struct PinConfig {
    pub i2c_sda: u8,
    pub i2c_scl: u8,
    pub led_data: u8,
}

/// UART0 TX and RX on the ESP32. esp-println writes the console there, and
/// routing either pad to another peripheral silences every log line.
const CONSOLE_PINS: [u8; 2] = [1, 3];

/// GPIO numbers behind the pin macros below. The first board revision used
/// GPIO0, GPIO1 and GPIO3, which collide with the console, so the bus sits on
/// the ESP32's default I2C pins and the LED data line on GPIO25.
pub(crate) const PINS: PinConfig = PinConfig {
    i2c_sda: 21,
    i2c_scl: 22,
    led_data: 25,
};

const _: () = {
    let mut i = 0;
    while i < CONSOLE_PINS.len() {
        let pin = CONSOLE_PINS[i];
        assert!(
            PINS.i2c_sda != pin && PINS.i2c_scl != pin && PINS.led_data != pin,
            "board pins must stay off the UART0 console"
        );
        i += 1;
    }
};

// Keep in sync with `PINS`

#[macro_export]
macro_rules! i2c_sda {
    ($p:expr) => {
        $p.GPIO21
    };
}

#[macro_export]
macro_rules! i2c_scl {
    ($p:expr) => {
        $p.GPIO22
    };
}

#[macro_export]
macro_rules! led_gpio {
    ($p:expr) => {
        $p.GPIO25
    };
}
