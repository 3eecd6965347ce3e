/// Value held by one tape cell. Arithmetic wraps on overflow.
pub type Cell = i32;

/// Returned by [`Tape::retreat`] when the cursor is already at cell 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfBounds;

/// A tape that is unbounded to the right, with a single cursor.
///
/// Starts as one zero cell. Cells are only ever appended (zeroed) at the
/// high end as the cursor advances, so `len() > cursor()` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<Cell>,
    cursor: usize,
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

impl Tape {
    pub fn new() -> Self {
        Self {
            cells: vec![0],
            cursor: 0,
        }
    }

    #[inline(always)]
    pub fn read(&self) -> Cell {
        self.cells[self.cursor]
    }

    #[inline(always)]
    pub fn write(&mut self, value: Cell) {
        self.cells[self.cursor] = value;
    }

    #[inline(always)]
    pub fn increment(&mut self) {
        let cell = &mut self.cells[self.cursor];
        *cell = cell.wrapping_add(1);
    }

    #[inline(always)]
    pub fn decrement(&mut self) {
        let cell = &mut self.cells[self.cursor];
        *cell = cell.wrapping_sub(1);
    }

    /// Move the cursor right, growing the tape by one zero cell if needed.
    #[inline(always)]
    pub fn advance(&mut self) {
        self.cursor += 1;
        if self.cursor >= self.cells.len() {
            self.cells.push(0);
        }
    }

    /// Move the cursor left. At cell 0 this fails and the cursor stays put.
    #[inline(always)]
    pub fn retreat(&mut self) -> Result<(), OutOfBounds> {
        match self.cursor.checked_sub(1) {
            Some(c) => {
                self.cursor = c;
                Ok(())
            }
            None => Err(OutOfBounds),
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: a tape holds at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn reset(&mut self) {
        self.cells.clear();
        self.cells.push(0);
        self.cursor = 0;
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn cursor_always_within_tape(moves in prop::collection::vec(any::<bool>(), 0..512)) {
            let mut tape = Tape::new();
            let mut high_water = 0;
            for right in moves {
                if right {
                    tape.advance();
                } else {
                    let before = tape.cursor();
                    let moved = tape.retreat();
                    prop_assert_eq!(moved.is_err(), before == 0);
                }
                high_water = high_water.max(tape.cursor());
                prop_assert!(tape.len() > tape.cursor());
            }
            // The tape never shrinks, so it covers every cell ever visited.
            prop_assert_eq!(tape.len(), high_water + 1);
        }
    }
}
