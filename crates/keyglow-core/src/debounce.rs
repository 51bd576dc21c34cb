//! Per-key debouncing
//!
//! Counts consecutive scans whose raw reading disagrees with the stable
//! state. A key changes state only once that count reaches the threshold; a
//! single agreeing read in between starts the count over. A contact that
//! chatters without settling therefore never leaves its stable state.

/// States keys can be in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum KeyState {
    #[default]
    Up,
    Down,
}

impl KeyState {
    pub fn from_pressed(pressed: bool) -> Self {
        if pressed { KeyState::Down } else { KeyState::Up }
    }

    pub fn is_down(self) -> bool {
        self == KeyState::Down
    }
}

/// State maintained for debouncing a single key.
#[derive(Clone, Copy, Debug, Default)]
pub struct Debounce {
    /// We're pretty sure the key has been hanging out in this state.
    stable_state: KeyState,
    /// Consecutive scans that read the opposite of `stable_state`.
    pending: u8,
}

impl Debounce {
    /// Default const for array initializers.
    pub const DEFAULT: Self = Self {
        stable_state: KeyState::Up,
        pending: 0,
    };

    pub fn stable_state(&self) -> KeyState {
        self.stable_state
    }

    pub fn pending(&self) -> u8 {
        self.pending
    }

    /// Move the debouncing state machine forward by one scan. `input_state` is
    /// the raw electrical state of the key this pass. If `threshold`
    /// consecutive reads disagreed with the stable state, the key flips and the
    /// new state is returned.
    pub fn step(&mut self, input_state: KeyState, threshold: u8) -> Option<KeyState> {
        if input_state == self.stable_state {
            self.pending = 0;
            return None;
        }

        self.pending = self.pending.saturating_add(1);
        if self.pending >= threshold.max(1) {
            self.stable_state = input_state;
            self.pending = 0;
            return Some(input_state);
        }

        None
    }
}
