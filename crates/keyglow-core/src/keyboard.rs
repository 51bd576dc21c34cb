//! Keyboard context - top-level state machine
//!
//! Owns the scanner, the render cycle and the per-cycle edge queue, and
//! drives them through:
//!
//! ```text
//! Init --start() ok--> Running
//!   \
//!    `--start() fails--> Halted (terminal)
//! ```
//!
//! A failed start means an expander did not answer on the bus, which is a
//! wiring or hardware problem. There is no way out of `Halted`.

use embedded_hal::delay::DelayNs;
use log::{error, info, warn};

use crate::driver::LedDriver;
use crate::error::{CycleError, InitFault};
use crate::event::{EdgeEvent, EdgeEvents};
use crate::grid::KeyStateGrid;
use crate::port::ExpanderPort;
use crate::render::{Pattern, RenderCycle, next_cycle_id};
use crate::scanner::MatrixScanner;

/// Lifecycle state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SystemState {
    /// Constructed, expanders not configured yet
    Init,
    /// Scanning and rendering every cycle
    Running,
    /// Startup failed. Nothing is scanned or rendered any more.
    Halted,
}

/// Scanner + render cycle bundled with the cycle counter
pub struct Keyboard<C, R, D, L, P, const ROWS: usize, const COLS: usize, const N: usize>
where
    L: LedDriver<N>,
    P: Pattern<N>,
{
    scanner: MatrixScanner<C, R, D, ROWS, COLS>,
    renderer: RenderCycle<L, P, N>,
    state: SystemState,
    cycle_id: u32,
    events: EdgeEvents,
}

impl<C, R, D, L, P, const ROWS: usize, const COLS: usize, const N: usize>
    Keyboard<C, R, D, L, P, ROWS, COLS, N>
where
    C: ExpanderPort,
    R: ExpanderPort<Error = C::Error>,
    D: DelayNs,
    L: LedDriver<N>,
    P: Pattern<N>,
{
    pub fn new(scanner: MatrixScanner<C, R, D, ROWS, COLS>, renderer: RenderCycle<L, P, N>) -> Self {
        Self {
            scanner,
            renderer,
            state: SystemState::Init,
            cycle_id: 0,
            events: EdgeEvents::new(),
        }
    }

    /// Configure the expanders and blank the LEDs.
    ///
    /// On failure the keyboard halts for good and every later call to
    /// `start` or [`cycle`](Self::cycle) is refused.
    pub fn start(&mut self) -> Result<(), InitFault<C::Error>> {
        match self.state {
            SystemState::Init => {}
            SystemState::Running => return Ok(()),
            SystemState::Halted => return Err(InitFault::Halted),
        }

        if let Err(fault) = self.scanner.configure() {
            error!("keyboard: init failed, halting: {}", fault);
            self.state = SystemState::Halted;
            return Err(fault);
        }

        self.renderer.blank();
        self.state = SystemState::Running;
        info!("keyboard: running");
        Ok(())
    }

    /// Run one scan + render cycle.
    ///
    /// Returns the edges confirmed during this cycle. They are dropped when
    /// the next cycle starts. The LEDs are refreshed even when the scan hits
    /// a bus fault, using the last stable key states.
    pub fn cycle(&mut self) -> Result<&[EdgeEvent], CycleError<C::Error>> {
        match self.state {
            SystemState::Running => {}
            SystemState::Init => return Err(CycleError::NotStarted),
            SystemState::Halted => return Err(CycleError::Halted),
        }

        let cycle_id = self.cycle_id;
        self.cycle_id = next_cycle_id::<N>(cycle_id);

        let scanned = self.scanner.scan(cycle_id, &mut self.events).map(|_| ());
        self.renderer.render(self.scanner.keys(), cycle_id);

        if let Err(fault) = scanned {
            warn!("keyboard: cycle {} skipped: {}", cycle_id, fault);
            return Err(fault.into());
        }

        Ok(&self.events)
    }

    pub fn state(&self) -> SystemState {
        self.state
    }

    /// Key states from the last completed scan
    pub fn keys(&self) -> &KeyStateGrid<ROWS, COLS> {
        self.scanner.keys()
    }

    /// Edges from the current cycle
    pub fn events(&self) -> &[EdgeEvent] {
        &self.events
    }

    /// Id the next cycle will run with
    pub fn cycle_id(&self) -> u32 {
        self.cycle_id
    }

    pub fn renderer(&self) -> &RenderCycle<L, P, N> {
        &self.renderer
    }
}
