use log::warn;
use static_cell::make_static;

use esp_hal::xtensa_lx::interrupt;
use esp_hal::{gpio::interconnect::PeripheralOutput, peripherals::RMT, rmt::Rmt, time::Rate};
use esp_hal_smartled::{SmartLedsAdapter, buffer_size, smart_led_buffer};
use smart_leds::SmartLedsWrite;

use keyglow_core::sk6812::{pack_rgb8, packed_len};
use keyglow_core::{LedDriver, LedFrame};

use crate::config::LED_COUNT;

/// `RGB8` items the RMT buffer has to hold for the whole RGBW chain
const PACKED_LEN: usize = packed_len(LED_COUNT);

/// SK6812 RGBW chain on the RMT peripheral
///
/// The adapter speaks 24-bit WS2812 items, so frames are packed into the
/// 32-bit GRBW stream the SK6812 expects before being handed over.
pub(crate) struct EspLedDriver<'a> {
    adapter: SmartLedsAdapter<'a, { buffer_size(PACKED_LEN) }>,
}

impl<'a> EspLedDriver<'a> {
    /// Create a driver on RMT channel 0
    ///
    /// # Arguments
    /// * `rmt` - RMT peripheral
    /// * `pin` - GPIO pin connected to the LED data line
    pub(crate) fn new<O>(rmt: RMT<'a>, pin: O) -> Self
    where
        O: PeripheralOutput<'a>,
    {
        let rmt = Rmt::new(rmt, Rate::from_mhz(80)).unwrap();

        // Lives for the entire program
        let rmt_buffer = make_static!(smart_led_buffer!(PACKED_LEN));
        let adapter = SmartLedsAdapter::new(rmt.channel0, pin, rmt_buffer);

        Self { adapter }
    }
}

impl LedDriver<LED_COUNT> for EspLedDriver<'_> {
    fn write(&mut self, colors: &LedFrame<LED_COUNT>) {
        let result = interrupt::free(|| self.adapter.write(pack_rgb8(colors)));
        if let Err(e) = result {
            warn!("led: write failed: {:?}", e);
        }
    }
}
