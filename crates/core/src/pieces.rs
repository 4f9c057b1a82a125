//! Pieces module - tetromino occupancy masks and rotation
//!
//! Every piece is a 4x4 boolean mask anchored at its top-left corner.
//! Rotation is one generic clockwise transform of that mask, so there is no
//! per-orientation table. The O square is exempt and never rotates.

use crate::types::{PieceKind, MASK_SIZE};

/// 4x4 occupancy mask, indexed `[row][col]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mask {
    rows: [[bool; MASK_SIZE]; MASK_SIZE],
}

const X: bool = true;
const O: bool = false;

const I_MASK: [[bool; MASK_SIZE]; MASK_SIZE] = [[X, X, X, X], [O, O, O, O], [O, O, O, O], [O, O, O, O]];
const Z_MASK: [[bool; MASK_SIZE]; MASK_SIZE] = [[X, X, O, O], [O, X, X, O], [O, O, O, O], [O, O, O, O]];
const S_MASK: [[bool; MASK_SIZE]; MASK_SIZE] = [[O, X, X, O], [X, X, O, O], [O, O, O, O], [O, O, O, O]];
const T_MASK: [[bool; MASK_SIZE]; MASK_SIZE] = [[O, X, O, O], [X, X, X, O], [O, O, O, O], [O, O, O, O]];
const O_MASK: [[bool; MASK_SIZE]; MASK_SIZE] = [[X, X, O, O], [X, X, O, O], [O, O, O, O], [O, O, O, O]];
const L_MASK: [[bool; MASK_SIZE]; MASK_SIZE] = [[O, O, X, O], [X, X, X, O], [O, O, O, O], [O, O, O, O]];
const J_MASK: [[bool; MASK_SIZE]; MASK_SIZE] = [[X, O, O, O], [X, X, X, O], [O, O, O, O], [O, O, O, O]];

impl Mask {
    pub const fn from_rows(rows: [[bool; MASK_SIZE]; MASK_SIZE]) -> Self {
        Self { rows }
    }

    /// Canonical (spawn) mask for a piece kind
    pub fn spawn(kind: PieceKind) -> Self {
        let rows = match kind {
            PieceKind::I => I_MASK,
            PieceKind::Z => Z_MASK,
            PieceKind::S => S_MASK,
            PieceKind::T => T_MASK,
            PieceKind::O => O_MASK,
            PieceKind::L => L_MASK,
            PieceKind::J => J_MASK,
        };
        Self { rows }
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        row < MASK_SIZE && col < MASK_SIZE && self.rows[row][col]
    }

    pub fn rows(&self) -> &[[bool; MASK_SIZE]; MASK_SIZE] {
        &self.rows
    }

    /// Rotate 90° clockwise inside the 4x4 box.
    ///
    /// `new[col][3 - row] = old[row][col]`. The shape is not re-normalised to
    /// the top-left corner, so four rotations return the original mask.
    pub fn rotated_cw(&self) -> Self {
        let mut rows = [[false; MASK_SIZE]; MASK_SIZE];
        for (row, line) in self.rows.iter().enumerate() {
            for (col, &filled) in line.iter().enumerate() {
                rows[col][MASK_SIZE - 1 - row] = filled;
            }
        }
        Self { rows }
    }

    /// Occupied cells as `(dx, dy)` offsets from the anchor, row-major
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, line)| {
            line.iter()
                .enumerate()
                .filter(|(_, &filled)| filled)
                .map(move |(col, _)| (col as i8, row as i8))
        })
    }

    /// Lowest occupied row inside the mask, if any
    pub fn bottom_row(&self) -> Option<usize> {
        self.rows.iter().rposition(|line| line.iter().any(|&c| c))
    }
}

/// Horizontal offsets tried in order when rotating: in place, left, right
pub const KICK_OFFSETS: [i8; 3] = [0, -1, 1];

/// Try to rotate a piece clockwise with the simple wall kick.
///
/// Returns `Some((rotated_mask, new_x))` for the first kick that `fits`,
/// `None` if every kick is blocked or the kind never rotates.
/// There is no vertical kick.
pub fn try_rotate(
    kind: PieceKind,
    mask: &Mask,
    x: i8,
    y: i8,
    fits: impl Fn(&Mask, i8, i8) -> bool,
) -> Option<(Mask, i8)> {
    if kind.is_rotation_invariant() {
        return None;
    }

    let rotated = mask.rotated_cw();
    KICK_OFFSETS
        .iter()
        .map(|&dx| x + dx)
        .find(|&nx| fits(&rotated, nx, y))
        .map(|nx| (rotated, nx))
}
