//! Key state grid

/// `ROWS × COLS` table of key states, `true` meaning pressed.
///
/// The scanner owns the authoritative grid and replaces it only after a
/// complete pass, so a borrowed grid is always internally consistent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyStateGrid<const ROWS: usize, const COLS: usize> {
    pressed: [[bool; COLS]; ROWS],
}

impl<const ROWS: usize, const COLS: usize> KeyStateGrid<ROWS, COLS> {
    /// Grid with every key released
    pub const fn new() -> Self {
        Self {
            pressed: [[false; COLS]; ROWS],
        }
    }

    pub const fn rows(&self) -> usize {
        ROWS
    }

    pub const fn cols(&self) -> usize {
        COLS
    }

    /// Whether the key at `(row, col)` is pressed. Out of range reads as released.
    pub fn is_pressed(&self, row: usize, col: usize) -> bool {
        self.pressed
            .get(row)
            .and_then(|cells| cells.get(col))
            .copied()
            .unwrap_or(false)
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, pressed: bool) {
        self.pressed[row][col] = pressed;
    }

    /// Iterate `(row, col)` of every pressed key, row-major
    pub fn iter_pressed(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.pressed.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|(_, pressed)| **pressed)
                .map(move |(col, _)| (row, col))
        })
    }

    pub fn pressed_count(&self) -> usize {
        self.iter_pressed().count()
    }

    /// Raw row-major table
    pub fn as_rows(&self) -> &[[bool; COLS]; ROWS] {
        &self.pressed
    }
}

impl<const ROWS: usize, const COLS: usize> Default for KeyStateGrid<ROWS, COLS> {
    fn default() -> Self {
        Self::new()
    }
}
