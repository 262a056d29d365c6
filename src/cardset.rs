//! The 52-bit card mask, bit-indexed rank/suit extraction and popcount.
//!
//! Bit `i` (0 = least significant) encodes `rank_of_bit(i) = (51 - i) / 4` and
//! `suit_of_bit(i) = (51 - i) % 4`, so the deuce's nibble sits at the top of
//! the word and the ace's at the bottom. Either ordering convention is valid
//! as long as the lookup tables built from it agree; this crate fixes this
//! one and never exposes the raw bit index outside this module and `tables`.

use std::fmt;
use std::ops::{Add, AddAssign, BitOr, BitOrAssign, Sub};

use crate::constants::*;

/// An unordered set of playing cards, packed into the low 52 bits of a `u64`.
///
/// A set bit means "this card is present". Union is OR, so re-inserting a
/// card already present is a no-op. Only the low 52 bits ever carry meaning;
/// constructors from raw integers mask this off rather than trust the caller.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardSet(u64);

impl CardSet {
    /// The empty set.
    pub const fn empty() -> Self {
        CardSet(0)
    }

    /// Builds a `CardSet` from a raw bitmask, discarding any bits above 51.
    pub const fn from_mask(mask: u64) -> Self {
        CardSet(mask & MASK52)
    }

    /// The raw 52-bit mask.
    pub const fn mask(self) -> u64 {
        self.0
    }

    /// A single card from its `(rank, suit)` pair. `rank` is 0 (deuce) to 12
    /// (ace); `suit` is 0..3.
    pub const fn from_rank_suit(rank: u32, suit: u32) -> Self {
        CardSet(1u64 << bit_index(rank, suit))
    }

    /// A single card from its flat index `4 * rank + suit`, matching the
    /// ordering of the [`CARDS`] table.
    pub fn from_card_index(c: u32) -> Self {
        CARDS[c as usize]
    }

    pub const fn contains(self, other: CardSet) -> bool {
        (self.0 & other.0) == other.0
    }

    pub const fn intersects(self, other: CardSet) -> bool {
        (self.0 & other.0) != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The complement within the 52-card universe.
    pub const fn complement(self) -> Self {
        CardSet((!self.0) & MASK52)
    }

    /// Number of set bits, restricted to the low 52 bits.
    #[inline(always)]
    pub const fn popcount(self) -> u32 {
        self.0.count_ones()
    }

    /// Position of the most-significant set bit (0 = least significant).
    /// Undefined (returns 0) when the set is empty; callers must guard with
    /// [`CardSet::is_empty`] first — this is a precondition violation, not a
    /// recoverable error (spec §7 kind 2).
    #[inline(always)]
    pub fn highest_bit_index(self) -> u32 {
        debug_assert!(!self.is_empty(), "highest_bit_index of an empty CardSet");
        if self.0 == 0 {
            return 0;
        }
        63 - self.0.leading_zeros()
    }

    /// Iterates the flat card indices (`4 * rank + suit`) present in this set,
    /// highest bit index first.
    pub fn iter_bits(self) -> impl Iterator<Item = u32> {
        let mut m = self.0;
        std::iter::from_fn(move || {
            if m == 0 {
                None
            } else {
                let i = 63 - m.leading_zeros();
                m &= !(1u64 << i);
                Some(i)
            }
        })
    }
}

/// `rank_of_bit(i) = (51 - i) / 4`. Rank 0 = deuce, rank 12 = ace.
#[inline(always)]
pub const fn rank_of_bit(i: u32) -> u32 {
    (51 - i) / 4
}

/// `suit_of_bit(i) = (51 - i) % 4`.
#[inline(always)]
pub const fn suit_of_bit(i: u32) -> u32 {
    (51 - i) % 4
}

/// Inverse of `rank_of_bit`/`suit_of_bit`: the bit position of a given card.
#[inline(always)]
pub const fn bit_index(rank: u32, suit: u32) -> u32 {
    51 - 4 * rank - suit
}

impl Add for CardSet {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        CardSet(self.0 | rhs.0)
    }
}

impl AddAssign for CardSet {
    fn add_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitOr for CardSet {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        CardSet(self.0 | rhs.0)
    }
}

impl BitOrAssign for CardSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Set difference: cards in `self` but not in `rhs`.
impl Sub for CardSet {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        CardSet(self.0 & !rhs.0)
    }
}

impl fmt::Display for CardSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in self.iter_bits() {
            let rank = rank_of_bit(i) as usize;
            let suit = suit_of_bit(i) as usize;
            write!(f, "{}{}", RANK_CHARS[rank], SUIT_CHARS[suit])?;
        }
        Ok(())
    }
}

lazy_static::lazy_static! {
    /// `CARDS[4 * rank + suit]` is the single-card `CardSet` for that card.
    pub static ref CARDS: [CardSet; 52] = {
        let mut cards = [CardSet::empty(); 52];
        for rank in 0..RANK_COUNT {
            for suit in 0..SUIT_COUNT {
                let c = 4 * rank + suit;
                cards[c as usize] = CardSet::from_rank_suit(rank, suit);
            }
        }
        cards
    };
}

/// A player's two private cards. Invariant: exactly 2 bits set.
///
/// This is a precondition, not a recoverable error (spec §7 kind 2):
/// `HoleCards::new` documents undefined results on a malformed mask in
/// release builds and asserts in debug builds. Parsing user-facing notation
/// into a validated `HoleCards` happens in [`crate::range`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct HoleCards(CardSet);

impl HoleCards {
    pub fn new(cards: CardSet) -> Self {
        debug_assert_eq!(cards.popcount(), 2, "hole cards must have exactly 2 cards");
        HoleCards(cards)
    }

    pub const fn cards(self) -> CardSet {
        self.0
    }
}

/// The shared community cards. Invariant: popcount ∈ {0, 3, 4, 5}.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Board(CardSet);

impl Board {
    pub fn new(cards: CardSet) -> Self {
        let n = cards.popcount();
        debug_assert!(
            n == 0 || n == 3 || n == 4 || n == 5,
            "board must have 0, 3, 4 or 5 cards, got {}",
            n
        );
        Board(cards)
    }

    pub const fn cards(self) -> CardSet {
        self.0
    }

    /// The street this board count implies.
    pub fn street(self) -> Street {
        match self.0.popcount() {
            0 => Street::Preflop,
            3 => Street::Flop,
            4 => Street::Turn,
            5 => Street::River,
            n => unreachable!("invalid board popcount {}", n),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_card_mask() {
        let c = CardSet::from_rank_suit(0, SPADE);
        assert_eq!(c.popcount(), 1);
        let i = c.highest_bit_index();
        assert_eq!(rank_of_bit(i), 0);
        assert_eq!(suit_of_bit(i), SPADE);
    }

    #[test]
    fn bit_index_roundtrip() {
        for rank in 0..RANK_COUNT {
            for suit in 0..SUIT_COUNT {
                let i = bit_index(rank, suit);
                assert_eq!(rank_of_bit(i), rank);
                assert_eq!(suit_of_bit(i), suit);
            }
        }
    }

    #[test]
    fn cards_table_matches_from_rank_suit() {
        for rank in 0..RANK_COUNT {
            for suit in 0..SUIT_COUNT {
                let c = 4 * rank + suit;
                assert_eq!(CARDS[c as usize], CardSet::from_rank_suit(rank, suit));
            }
        }
    }

    #[test]
    fn union_is_idempotent() {
        let a = CardSet::from_rank_suit(5, HEART);
        let b = a | a;
        assert_eq!(a, b);
        assert_eq!(b.popcount(), 1);
    }

    #[test]
    fn complement_is_full_minus_self() {
        let a = CardSet::from_rank_suit(0, SPADE) | CardSet::from_rank_suit(12, DIAMOND);
        let full = CardSet::from_mask(MASK52);
        assert_eq!(a | a.complement(), full);
        assert!(!a.intersects(a.complement()));
    }

    #[test]
    fn board_street_mapping() {
        let mk = |n: u32| {
            let mut m = CardSet::empty();
            for i in 0..n {
                m += CardSet::from_rank_suit(i, SPADE);
            }
            Board::new(m)
        };
        assert_eq!(mk(0).street(), Street::Preflop);
        assert_eq!(mk(3).street(), Street::Flop);
        assert_eq!(mk(4).street(), Street::Turn);
        assert_eq!(mk(5).street(), Street::River);
    }
}
