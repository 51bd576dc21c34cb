//! Key matrix scan driver.
//!
//! # Theory of operation
//!
//! Columns hang off one expander configured as outputs, rows off another
//! configured as inputs with pull-ups. Every column idles HIGH. To sense the
//! matrix we pull one column LOW at a time, give the lines a moment to settle,
//! and read the whole row port: any row reading LOW is connected to the
//! strobed column through a closed switch.
//!
//! A strobe is a single port-wide write with exactly one column bit cleared.
//! Two columns are never LOW together, since that would let current flow
//! between them through switch diagonals and produce phantom readings.
//!
//! Raw readings go into a scratch grid first. Only once the whole matrix has
//! been read do they run through the per-key debouncers and into the
//! published [`KeyStateGrid`]. A transfer failure part-way through throws the
//! scratch grid away, so consumers never see a half-scanned matrix and a bus
//! glitch can't produce phantom presses.

use embedded_hal::delay::DelayNs;
use log::{debug, info};

use crate::debounce::{Debounce, KeyState};
use crate::error::{BusFault, InitFault, Role};
use crate::event::{EdgeEvent, EdgeEvents, EdgeKind};
use crate::grid::KeyStateGrid;
use crate::port::{ExpanderPort, PORT_WIDTH, PinMode};

/// Column port value with nothing selected
const IDLE: u16 = 0xFFFF;

/// Default settle time after a strobe, in microseconds
pub const DEFAULT_SETTLE_US: u32 = 5;

/// Default number of consecutive disagreeing scans before a key changes state
pub const DEFAULT_DEBOUNCE_THRESHOLD: u8 = 3;

/// Scanner tunables
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanConfig {
    /// Wait between driving a column and sampling the rows. Must cover the
    /// expander's output-to-input propagation plus any RC filtering.
    pub settle_us: u32,
    /// Consecutive disagreeing reads required to flip a key. 1 disables
    /// debouncing; 0 is treated as 1.
    pub debounce_threshold: u8,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            settle_us: DEFAULT_SETTLE_US,
            debounce_threshold: DEFAULT_DEBOUNCE_THRESHOLD,
        }
    }
}

/// Column-drive / row-sense matrix scanner with debouncing
pub struct MatrixScanner<C, R, D, const ROWS: usize, const COLS: usize> {
    columns: C,
    rows: R,
    delay: D,
    config: ScanConfig,
    debouncers: [[Debounce; COLS]; ROWS],
    keys: KeyStateGrid<ROWS, COLS>,
}

impl<C, R, D, const ROWS: usize, const COLS: usize> MatrixScanner<C, R, D, ROWS, COLS>
where
    C: ExpanderPort,
    R: ExpanderPort<Error = C::Error>,
    D: DelayNs,
{
    /// Create a scanner over a columns port and a rows port.
    ///
    /// Pins are not touched until [`configure`](Self::configure).
    pub fn new(columns: C, rows: R, delay: D, config: ScanConfig) -> Self {
        const {
            assert!(ROWS > 0 && ROWS <= PORT_WIDTH, "rows must fit on one port");
            assert!(COLS > 0 && COLS <= PORT_WIDTH, "columns must fit on one port");
        }

        Self {
            columns,
            rows,
            delay,
            config,
            debouncers: [[Debounce::DEFAULT; COLS]; ROWS],
            keys: KeyStateGrid::new(),
        }
    }

    /// Put both expanders into scanning configuration.
    ///
    /// Column latches are set HIGH before the pins become outputs, so no
    /// column is ever driven LOW by accident while we set up.
    #[allow(clippy::cast_possible_truncation)]
    pub fn configure(&mut self) -> Result<(), InitFault<C::Error>> {
        self.columns
            .write_port(IDLE)
            .map_err(|error| InitFault::NotResponding { role: Role::Columns, error })?;
        for col in 0..COLS {
            self.columns
                .configure_pin(col as u8, PinMode::Output)
                .map_err(|error| InitFault::NotResponding { role: Role::Columns, error })?;
        }
        for row in 0..ROWS {
            self.rows
                .configure_pin(row as u8, PinMode::InputPullUp)
                .map_err(|error| InitFault::NotResponding { role: Role::Rows, error })?;
        }

        info!("scanner: configured {}x{} matrix", ROWS, COLS);
        Ok(())
    }

    /// Run one full scan pass.
    ///
    /// `events` is cleared, then filled with the edges confirmed by this
    /// pass, tagged with `cycle_id`. On a bus fault the previous stable grid
    /// is kept as is and `events` is left empty.
    pub fn scan(
        &mut self,
        cycle_id: u32,
        events: &mut EdgeEvents,
    ) -> Result<&KeyStateGrid<ROWS, COLS>, BusFault<C::Error>> {
        events.clear();

        let raw = match self.sample() {
            Ok(raw) => raw,
            Err(fault) => {
                // Try to leave the matrix idle for the next pass anyway
                if let Err(error) = self.columns.write_port(IDLE) {
                    debug!("scanner: idle restore failed: {:?}", error);
                }
                return Err(fault);
            }
        };

        self.debounce(&raw, cycle_id, events);
        Ok(&self.keys)
    }

    /// Latest debounced key states
    pub fn keys(&self) -> &KeyStateGrid<ROWS, COLS> {
        &self.keys
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Strobe every column and collect the raw (undebounced) readings.
    fn sample(&mut self) -> Result<KeyStateGrid<ROWS, COLS>, BusFault<C::Error>> {
        let mut raw = KeyStateGrid::new();

        for col in 0..COLS {
            let strobe = IDLE & !(1 << col);
            self.columns
                .write_port(strobe)
                .map_err(|error| BusFault { role: Role::Columns, error })?;

            self.delay.delay_us(self.config.settle_us);

            let sensed = self
                .rows
                .read_port()
                .map_err(|error| BusFault { role: Role::Rows, error })?;

            for row in 0..ROWS {
                // Open switches read HIGH through the pull-up
                raw.set(row, col, sensed & (1 << row) == 0);
            }
        }

        self.columns
            .write_port(IDLE)
            .map_err(|error| BusFault { role: Role::Columns, error })?;

        Ok(raw)
    }

    // Written with ranges and indexing: the grid, the debouncers and the event
    // coordinates all share the same (row, col) addressing.
    #[allow(clippy::needless_range_loop, clippy::cast_possible_truncation)]
    fn debounce(&mut self, raw: &KeyStateGrid<ROWS, COLS>, cycle_id: u32, events: &mut EdgeEvents) {
        let threshold = self.config.debounce_threshold;

        for row in 0..ROWS {
            for col in 0..COLS {
                let input = KeyState::from_pressed(raw.is_pressed(row, col));
                let Some(new_state) = self.debouncers[row][col].step(input, threshold) else {
                    continue;
                };

                self.keys.set(row, col, new_state.is_down());
                let kind = if new_state.is_down() {
                    EdgeKind::Pressed
                } else {
                    EdgeKind::Released
                };
                debug!("scanner: r{} c{} {:?} at cycle {}", row, col, kind, cycle_id);

                // Cleared above and sized for a full 16x16 matrix, so every
                // edge of the pass fits
                let _ = events.push(EdgeEvent {
                    row: row as u8,
                    col: col as u8,
                    kind,
                    cycle_id,
                });
            }
        }
    }
}
