//! Board module - the locked-material grid
//!
//! The board is a 10x20 grid where each cell is empty or holds a piece kind.
//! Uses a flat array for cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Rows above the top (y < 0) are not stored; pieces may overlap them while spawning.

use arrayvec::ArrayVec;

use crate::pieces::Mask;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Number of rows, as a capacity for per-row collections
pub const BOARD_ROWS: usize = BOARD_HEIGHT as usize;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

/// Result of [`Board::clear_full_rows`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClear {
    /// Indices of the rows that were full, bottom to top
    pub rows: ArrayVec<usize, BOARD_ROWS>,
    /// Replacement board with the full rows removed and the rest shifted down
    pub board: Board,
}

impl LineClear {
    pub fn count(&self) -> usize {
        self.rows.len()
    }
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether a piece cell may not go at (x, y).
    ///
    /// Columns outside the board and rows at or below the floor count as
    /// occupied. Rows above the top are always free.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return true;
        }
        if y < 0 {
            return false;
        }
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_ROWS {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Whether `mask` anchored at (x, y) fits: every occupied mask cell lies
    /// inside the side walls, above the floor, and on an empty cell once it
    /// is within the visible rows.
    pub fn can_place(&self, mask: &Mask, x: i8, y: i8) -> bool {
        mask.cells()
            .all(|(dx, dy)| !self.is_occupied(x + dx, y + dy))
    }

    /// Write `kind` into every occupied mask cell at (x, y) that is on the board.
    ///
    /// Cells above the top row are dropped. Callers validate placement first.
    pub fn lock(&mut self, mask: &Mask, x: i8, y: i8, kind: PieceKind) {
        for (dx, dy) in mask.cells() {
            let py = y + dy;
            if py >= 0 {
                self.set(x + dx, py, Some(kind));
            }
        }
    }

    /// Remove every full row and return the compacted board by value.
    ///
    /// Rows are scanned bottom to top; non-full rows are copied into a fresh
    /// board starting from the bottom, so everything above a cleared line
    /// moves down while keeping its order. `self` is left untouched.
    pub fn clear_full_rows(&self) -> LineClear {
        let mut rows = ArrayVec::new();
        let mut board = Board::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_ROWS;

        for read_y in (0..BOARD_ROWS).rev() {
            if self.is_row_full(read_y) {
                rows.push(read_y);
                continue;
            }
            write_y -= 1;
            let src = read_y * width;
            let dst = write_y * width;
            board.cells[dst..dst + width].copy_from_slice(&self.cells[src..src + width]);
        }

        LineClear { rows, board }
    }

    /// Count of occupied cells
    pub fn filled_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Write piece ids (0 = empty) into a row-major grid
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_ROWS]) {
        let width = BOARD_WIDTH as usize;
        for (y, row) in out.iter_mut().enumerate() {
            for (x, v) in row.iter_mut().enumerate() {
                *v = self.cells[y * width + x].map(|k| k.id()).unwrap_or(0);
            }
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Create from a 2D vector for testing (converts to flat array)
    #[cfg(test)]
    pub fn from_cells(cells_2d: Vec<Vec<Cell>>) -> Self {
        assert_eq!(cells_2d.len(), BOARD_ROWS);
        assert!(cells_2d.iter().all(|row| row.len() == BOARD_WIDTH as usize));

        let mut flat = [None; BOARD_SIZE];
        for (y, row) in cells_2d.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                flat[y * BOARD_WIDTH as usize + x] = *cell;
            }
        }
        Self { cells: flat }
    }

    /// Convert to 2D vector for testing/display
    #[cfg(test)]
    pub fn to_cells(&self) -> Vec<Vec<Cell>> {
        let width = BOARD_WIDTH as usize;
        (0..BOARD_ROWS)
            .map(|y| {
                let start = y * width;
                self.cells[start..start + width].to_vec()
            })
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
