//! Fault types for the scan/render core

use core::fmt;

/// Which expander a fault came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Expander driving the matrix columns
    Columns,
    /// Expander sensing the matrix rows
    Rows,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Columns => write!(f, "columns expander"),
            Role::Rows => write!(f, "rows expander"),
        }
    }
}

/// Startup failure. Always fatal: the keyboard halts for good.
#[derive(Debug)]
pub enum InitFault<E> {
    /// Expander did not respond while being configured
    NotResponding { role: Role, error: E },
    /// A previous start already failed and the keyboard is halted
    Halted,
}

impl<E: fmt::Debug> fmt::Display for InitFault<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitFault::NotResponding { role, error } => {
                write!(f, "{} not responding: {:?}", role, error)
            }
            InitFault::Halted => write!(f, "keyboard is halted"),
        }
    }
}

/// Transfer failure in the middle of a scan pass.
///
/// The pass is abandoned and the last stable key state is kept; the next
/// cycle scans again from scratch.
#[derive(Debug)]
pub struct BusFault<E> {
    pub role: Role,
    pub error: E,
}

impl<E: fmt::Debug> fmt::Display for BusFault<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bus fault on {}: {:?}", self.role, self.error)
    }
}

/// Reason a cycle did not produce a fresh scan
#[derive(Debug)]
pub enum CycleError<E> {
    /// `start` has not been called yet
    NotStarted,
    /// Startup failed, nothing runs any more
    Halted,
    /// Scan pass abandoned
    Bus(BusFault<E>),
}

impl<E: fmt::Debug> fmt::Display for CycleError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleError::NotStarted => write!(f, "keyboard not started"),
            CycleError::Halted => write!(f, "keyboard is halted"),
            CycleError::Bus(fault) => write!(f, "{}", fault),
        }
    }
}

impl<E> From<BusFault<E>> for CycleError<E> {
    fn from(fault: BusFault<E>) -> Self {
        CycleError::Bus(fault)
    }
}
