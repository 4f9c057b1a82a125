//! RNG module - 7-bag random piece generation
//!
//! The bag holds at most one of each piece kind. When a draw finds it empty it
//! is refilled with all seven kinds and shuffled, then pieces come off the
//! front one at a time. Nothing stops the last piece of one bag from matching
//! the first piece of the next.
//!
//! Also provides a simple LCG so a seed reproduces the whole sequence.

use crate::types::{PieceKind, BAG_SIZE};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct PieceBag {
    /// Current shuffled bag
    bag: [PieceKind; BAG_SIZE],
    /// Index of the next piece to draw; `BAG_SIZE` means empty
    index: usize,
    rng: SimpleRng,
}

impl PieceBag {
    /// Create an empty bag; the first draw fills it
    pub fn new(seed: u32) -> Self {
        Self {
            bag: PieceKind::ALL,
            index: BAG_SIZE,
            rng: SimpleRng::new(seed),
        }
    }

    fn refill(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.index = 0;
    }

    /// Draw the next piece, refilling first if the bag is empty
    pub fn draw(&mut self) -> PieceKind {
        if self.is_empty() {
            self.refill();
        }
        let piece = self.bag[self.index];
        self.index += 1;
        piece
    }

    /// Pieces still pending in the current bag, in draw order
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag[self.index..]
    }

    pub fn is_empty(&self) -> bool {
        self.index >= BAG_SIZE
    }

    /// Drop any pending pieces; the RNG keeps its state
    pub fn clear(&mut self) {
        self.index = BAG_SIZE;
    }
}

impl Default for PieceBag {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed_is_usable() {
        let mut rng = SimpleRng::new(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(99);
        for max in 1..20 {
            for _ in 0..50 {
                assert!(rng.next_range(max) < max);
            }
        }
    }

    #[test]
    fn test_bag_starts_empty() {
        let bag = PieceBag::new(1);
        assert!(bag.is_empty());
        assert!(bag.remaining().is_empty());
    }

    #[test]
    fn test_bag_draws_all_seven() {
        let mut bag = PieceBag::new(1);

        let mut drawn = Vec::new();
        for _ in 0..7 {
            drawn.push(bag.draw());
        }

        for kind in PieceKind::ALL {
            assert!(drawn.contains(&kind), "Missing piece: {:?}", kind);
        }
        assert!(bag.is_empty());
    }

    #[test]
    fn test_remaining_shrinks_with_draws() {
        let mut bag = PieceBag::new(7);
        let first = bag.draw();
        assert_eq!(bag.remaining().len(), 6);
        assert!(!bag.remaining().contains(&first));
    }

    #[test]
    fn test_clear_empties_bag() {
        let mut bag = PieceBag::new(7);
        bag.draw();
        bag.clear();
        assert!(bag.is_empty());
        bag.draw();
        assert_eq!(bag.remaining().len(), 6);
    }
}
