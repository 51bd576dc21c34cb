//! Edge events

use heapless::Vec;

use crate::port::PORT_WIDTH;

/// Largest number of edges a single pass can produce (every cell of a
/// 16 × 16 matrix flipping at once).
pub const MAX_EDGE_EVENTS: usize = PORT_WIDTH * PORT_WIDTH;

/// Edges collected during one cycle
pub type EdgeEvents = Vec<EdgeEvent, MAX_EDGE_EVENTS>;

/// Direction of a debounced transition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeKind {
    Pressed,
    Released,
}

/// Debounced state change of one key
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeEvent {
    pub row: u8,
    pub col: u8,
    pub kind: EdgeKind,
    /// Cycle in which the change was confirmed
    pub cycle_id: u32,
}

impl EdgeEvent {
    pub fn is_press(&self) -> bool {
        self.kind == EdgeKind::Pressed
    }
}
