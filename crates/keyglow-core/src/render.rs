//! Render cycle
//!
//! A [`Pattern`] decides what the chain shows as a pure function of the key
//! grid and the cycle number. [`RenderCycle`] owns the chain and pushes one
//! frame per call, so swapping the heartbeat for a key-mapped pattern does
//! not touch the cycle itself.

use crate::chain::LedChain;
use crate::color::{LedFrame, OFF, Rgbw, WHITE};
use crate::driver::LedDriver;
use crate::grid::KeyStateGrid;

/// Frame generator for an `N` pixel chain
pub trait Pattern<const N: usize> {
    /// Compute the frame for `cycle_id` given the current key states
    fn frame<const ROWS: usize, const COLS: usize>(
        &self,
        keys: &KeyStateGrid<ROWS, COLS>,
        cycle_id: u32,
    ) -> LedFrame<N>;
}

/// Single lit pixel walking down the chain, one step per cycle.
///
/// Ignores key state; it only shows that the cycle loop is alive.
#[derive(Clone, Copy, Debug)]
pub struct Heartbeat {
    color: Rgbw,
}

impl Heartbeat {
    pub const fn new(color: Rgbw) -> Self {
        Self { color }
    }

    /// Index lit during `cycle_id`
    pub const fn cursor<const N: usize>(cycle_id: u32) -> usize {
        (cycle_id as usize) % N
    }
}

impl Default for Heartbeat {
    fn default() -> Self {
        Self::new(WHITE)
    }
}

impl<const N: usize> Pattern<N> for Heartbeat {
    fn frame<const ROWS: usize, const COLS: usize>(
        &self,
        _keys: &KeyStateGrid<ROWS, COLS>,
        cycle_id: u32,
    ) -> LedFrame<N> {
        let mut frame = [OFF; N];
        if N > 0 {
            frame[Self::cursor::<N>(cycle_id)] = self.color;
        }
        frame
    }
}

/// Cycle id that follows `cycle_id` when driving an `N` pixel chain.
///
/// Wraps to 0 at the largest multiple of `N` that fits in a `u32` rather than
/// at `u32::MAX`, so `cycle_id % N` keeps stepping by one across the wrap.
#[allow(clippy::cast_possible_truncation, clippy::cast_lossless)]
pub const fn next_cycle_id<const N: usize>(cycle_id: u32) -> u32 {
    const SPAN: u64 = 1 << 32;
    let period = if N == 0 { SPAN } else { SPAN / N as u64 * N as u64 };
    let next = cycle_id as u64 + 1;
    if next >= period { 0 } else { next as u32 }
}

/// Owns the LED chain and refreshes it once per cycle
pub struct RenderCycle<D: LedDriver<N>, P: Pattern<N>, const N: usize> {
    chain: LedChain<D, N>,
    pattern: P,
}

impl<D: LedDriver<N>, P: Pattern<N>, const N: usize> RenderCycle<D, P, N> {
    pub fn new(chain: LedChain<D, N>, pattern: P) -> Self {
        Self { chain, pattern }
    }

    /// Render `cycle_id` and flush it to the chain. Exactly one flush per call.
    pub fn render<const ROWS: usize, const COLS: usize>(
        &mut self,
        keys: &KeyStateGrid<ROWS, COLS>,
        cycle_id: u32,
    ) {
        let frame = self.pattern.frame(keys, cycle_id);

        self.chain.clear();
        for (index, color) in frame.into_iter().enumerate() {
            self.chain.set_pixel(index, color);
        }
        self.chain.flush();
    }

    /// Turn the whole chain off
    pub fn blank(&mut self) {
        self.chain.clear();
        self.chain.flush();
    }

    pub fn chain(&self) -> &LedChain<D, N> {
        &self.chain
    }

    pub fn chain_mut(&mut self) -> &mut LedChain<D, N> {
        &mut self.chain
    }
}
