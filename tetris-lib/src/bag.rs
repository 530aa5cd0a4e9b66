use rand::Rng;

use crate::piece::{Kind, KIND_COUNT};

pub const BAG_SIZE: usize = KIND_COUNT;

/// In-place Fisher-Yates shuffle.
pub fn shuffle<T, R: Rng + ?Sized>(seq: &mut [T], rng: &mut R) {
    for i in (1..seq.len()).rev() {
        let j = rng.random_range(0..=i);
        seq.swap(i, j);
    }
}

/// 7-bag piece generator: every kind is dealt once before the bag is reshuffled.
///
/// The kind under the cursor is the preview piece.
#[derive(Clone, Debug)]
pub struct Bag<R> {
    slots: [Kind; BAG_SIZE],
    cursor: usize,
    rng: R,
}

impl<R: Rng> Bag<R> {
    /// Creates a bag ready for a new game.
    pub fn new(rng: R) -> Self {
        let mut bag = Self {
            slots: Kind::ALL,
            cursor: 0,
            rng,
        };
        bag.reset();
        bag
    }

    /// Reshuffles until the opening piece is neither S nor Z and rewinds the cursor.
    pub fn reset(&mut self) {
        self.cursor = 0;
        loop {
            shuffle(&mut self.slots, &mut self.rng);
            if !matches!(self.slots[0], Kind::S | Kind::Z) {
                break;
            }
        }
    }

    pub fn preview(&self) -> Kind {
        self.slots[self.cursor]
    }

    /// Deals the preview piece and advances, reshuffling after the last slot.
    pub fn deal(&mut self) -> Kind {
        let kind = self.slots[self.cursor];
        self.cursor += 1;
        if self.cursor == BAG_SIZE {
            self.cursor = 0;
            shuffle(&mut self.slots, &mut self.rng);
        }
        kind
    }

    pub fn slots(&self) -> &[Kind; BAG_SIZE] {
        &self.slots
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl<R: Rng> Iterator for Bag<R> {
    type Item = Kind;

    fn next(&mut self) -> Option<Kind> {
        Some(self.deal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut seq = [0u8, 1, 2, 3, 4, 5, 6];
        shuffle(&mut seq, &mut rng);
        let mut sorted = seq;
        sorted.sort();
        assert_eq!(sorted, [0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn shuffle_handles_short_sequences() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut empty: [u8; 0] = [];
        shuffle(&mut empty, &mut rng);
        let mut one = [9u8];
        shuffle(&mut one, &mut rng);
        assert_eq!(one, [9]);
    }

    #[test]
    fn shuffle_reaches_every_position() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut positions = [[0u32; 7]; 7];
        for _ in 0..7000 {
            let mut seq = [0usize, 1, 2, 3, 4, 5, 6];
            shuffle(&mut seq, &mut rng);
            for (pos, &item) in seq.iter().enumerate() {
                positions[item][pos] += 1;
            }
        }
        // Expected 1000 each; a biased shuffle drifts far from that.
        for row in positions {
            for count in row {
                assert!((800..1200).contains(&count), "{count}");
            }
        }
    }

    #[test]
    fn each_kind_once_per_seven_draws() {
        let mut bag = Bag::new(ChaCha8Rng::seed_from_u64(3));
        for _ in 0..50 {
            assert_eq!(bag.cursor(), 0);
            let mut seen: Vec<Kind> = bag.by_ref().take(BAG_SIZE).collect();
            seen.sort_by_key(|kind| kind.index());
            assert_eq!(seen, Kind::ALL.to_vec());
        }
    }

    #[test]
    fn opening_piece_is_never_s_or_z() {
        for seed in 0..500 {
            let mut bag = Bag::new(ChaCha8Rng::seed_from_u64(seed));
            assert!(!matches!(bag.preview(), Kind::S | Kind::Z), "seed {seed}");
            bag.deal();
            bag.reset();
            assert!(!matches!(bag.deal(), Kind::S | Kind::Z), "seed {seed}");
        }
    }

    #[test]
    fn preview_is_the_next_deal() {
        let mut bag = Bag::new(ChaCha8Rng::seed_from_u64(4));
        for _ in 0..20 {
            let preview = bag.preview();
            assert_eq!(bag.deal(), preview);
        }
    }
}
