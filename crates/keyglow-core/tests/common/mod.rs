//! Test doubles shared by the integration tests.
//!
//! A `Board` models the physical matrix behind two mock expanders: row pins
//! read LOW when a pressed switch connects them to a column that is currently
//! driven LOW. The mocks only implement the per-pin port operations, so the
//! scanner runs through the trait's default port-wide helpers.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use keyglow_core::color::LedFrame;
use keyglow_core::{ExpanderPort, Heartbeat, LedChain, LedDriver, Level, MatrixScanner, PinMode, RenderCycle, ScanConfig};

pub const ROWS: usize = 6;
pub const COLS: usize = 16;
pub const LEDS: usize = 8;

const COLUMN_MASK: u16 = 0xFFFF;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MockError;

pub struct Board {
    pub pressed: [[bool; COLS]; ROWS],
    pub column_levels: u16,
    pub outputs: u16,
    pub pullups: u16,
    /// Most column outputs seen LOW at the same time
    pub max_low_columns: u32,
    /// Column levels (outputs only) captured at each row sample
    pub samples: Vec<u16>,
    /// Number of column pin writes
    pub column_writes: usize,
    /// Number of port operations of any kind
    pub operations: usize,
    pub delays_ns: Vec<u32>,
    pub fail_columns: bool,
    pub fail_rows: bool,
    /// Fail row reads while this column is strobed
    pub fail_rows_on_column: Option<usize>,
}

impl Board {
    pub fn new() -> Rc<RefCell<Board>> {
        Rc::new(RefCell::new(Board {
            pressed: [[false; COLS]; ROWS],
            column_levels: 0xFFFF,
            outputs: 0,
            pullups: 0,
            max_low_columns: 0,
            samples: Vec::new(),
            column_writes: 0,
            operations: 0,
            delays_ns: Vec::new(),
            fail_columns: false,
            fail_rows: false,
            fail_rows_on_column: None,
        }))
    }

    fn driven_low(&self) -> u16 {
        !self.column_levels & self.outputs & COLUMN_MASK
    }

    fn strobed_column(&self) -> Option<usize> {
        let low = self.driven_low();
        (low.count_ones() == 1).then(|| low.trailing_zeros() as usize)
    }

    fn row_level(&self, row: usize) -> Level {
        if row >= ROWS || self.pullups & (1 << row) == 0 {
            return Level::High;
        }
        let low = self.driven_low();
        let closed = (0..COLS).any(|col| low & (1 << col) != 0 && self.pressed[row][col]);
        if closed { Level::Low } else { Level::High }
    }
}

pub fn press(board: &Rc<RefCell<Board>>, row: usize, col: usize, pressed: bool) {
    board.borrow_mut().pressed[row][col] = pressed;
}

pub struct ColumnPort(pub Rc<RefCell<Board>>);

impl ExpanderPort for ColumnPort {
    type Error = MockError;

    fn configure_pin(&mut self, pin: u8, mode: PinMode) -> Result<(), MockError> {
        let mut board = self.0.borrow_mut();
        board.operations += 1;
        if board.fail_columns {
            return Err(MockError);
        }
        if mode == PinMode::Output {
            board.outputs |= 1 << pin;
        }
        Ok(())
    }

    fn write_pin(&mut self, pin: u8, level: Level) -> Result<(), MockError> {
        let mut board = self.0.borrow_mut();
        board.operations += 1;
        if board.fail_columns {
            return Err(MockError);
        }
        match level {
            Level::High => board.column_levels |= 1 << pin,
            Level::Low => board.column_levels &= !(1 << pin),
        }
        board.column_writes += 1;
        let low = board.driven_low().count_ones();
        board.max_low_columns = board.max_low_columns.max(low);
        Ok(())
    }

    fn read_pin(&mut self, pin: u8) -> Result<Level, MockError> {
        let mut board = self.0.borrow_mut();
        board.operations += 1;
        if board.fail_columns {
            return Err(MockError);
        }
        Ok(Level::from_bit(board.column_levels & (1 << pin) != 0))
    }
}

pub struct RowPort(pub Rc<RefCell<Board>>);

impl ExpanderPort for RowPort {
    type Error = MockError;

    fn configure_pin(&mut self, pin: u8, mode: PinMode) -> Result<(), MockError> {
        let mut board = self.0.borrow_mut();
        board.operations += 1;
        if board.fail_rows {
            return Err(MockError);
        }
        if mode == PinMode::InputPullUp {
            board.pullups |= 1 << pin;
        }
        Ok(())
    }

    fn write_pin(&mut self, _pin: u8, _level: Level) -> Result<(), MockError> {
        self.0.borrow_mut().operations += 1;
        Ok(())
    }

    fn read_pin(&mut self, pin: u8) -> Result<Level, MockError> {
        let mut board = self.0.borrow_mut();
        board.operations += 1;
        if board.fail_rows {
            return Err(MockError);
        }
        if board.fail_rows_on_column.is_some() && board.fail_rows_on_column == board.strobed_column() {
            return Err(MockError);
        }
        if pin == 0 {
            let sample = board.column_levels & board.outputs;
            board.samples.push(sample);
        }
        Ok(board.row_level(usize::from(pin)))
    }
}

pub struct FakeDelay(pub Rc<RefCell<Board>>);

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().delays_ns.push(ns);
    }
}

/// Captures every frame written to the chain
#[derive(Clone, Default)]
pub struct RecordingDriver<const N: usize> {
    pub frames: Rc<RefCell<Vec<LedFrame<N>>>>,
}

impl<const N: usize> LedDriver<N> for RecordingDriver<N> {
    fn write(&mut self, colors: &LedFrame<N>) {
        self.frames.borrow_mut().push(*colors);
    }
}

pub type TestScanner = MatrixScanner<ColumnPort, RowPort, FakeDelay, ROWS, COLS>;

pub fn scanner(board: &Rc<RefCell<Board>>, debounce_threshold: u8) -> TestScanner {
    let config = ScanConfig {
        debounce_threshold,
        ..ScanConfig::default()
    };
    MatrixScanner::new(
        ColumnPort(board.clone()),
        RowPort(board.clone()),
        FakeDelay(board.clone()),
        config,
    )
}

pub fn heartbeat(driver: RecordingDriver<LEDS>) -> RenderCycle<RecordingDriver<LEDS>, Heartbeat, LEDS> {
    RenderCycle::new(LedChain::new(driver), Heartbeat::default())
}

/// Index of the single LOW column in a sample, if exactly one is LOW
pub fn low_column(sample: u16, outputs: u16) -> Option<usize> {
    let low = !sample & outputs;
    (low.count_ones() == 1).then(|| low.trailing_zeros() as usize)
}
