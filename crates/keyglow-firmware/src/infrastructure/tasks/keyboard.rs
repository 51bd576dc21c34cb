use embassy_time::{Duration, Timer};
use log::{error, info};

use keyglow_core::{CycleError, EdgeKind};

use crate::config;
use crate::infrastructure::types::KeyboardImpl;

/// Task running the scan + render cycle at a fixed interval
/// Edge events are logged, bus faults are retried on the next cycle.
#[embassy_executor::task]
pub(crate) async fn keyboard_task(mut keyboard: KeyboardImpl) {
    let interval = Duration::from_millis(config::MATRIX.scan_interval_ms);

    loop {
        match keyboard.cycle() {
            Ok(events) => {
                for event in events {
                    let action = match event.kind {
                        EdgeKind::Pressed => "pressed",
                        EdgeKind::Released => "released",
                    };
                    info!(
                        "key ({}, {}) {} at cycle {}",
                        event.row, event.col, action, event.cycle_id
                    );
                }
            }
            // Already logged by the keyboard, the next pass starts fresh
            Err(CycleError::Bus(_)) => {}
            Err(e) => {
                error!("keyboard: stopped: {}", e);
                return;
            }
        }

        Timer::after(interval).await;
    }
}
