mod led_sk6812;

pub(crate) use led_sk6812::EspLedDriver;
