//! Fixed sizes, suit/rank orderings and the packed-strength field layout.

/// Number of cards in a standard deck.
pub const CARD_COUNT: u32 = 52;

/// Number of distinct ranks (deuce..ace).
pub const RANK_COUNT: u32 = 13;

/// Number of suits.
pub const SUIT_COUNT: u32 = 4;

/// Only the low 52 bits of a `u64` ever carry meaning.
pub const MASK52: u64 = (1u64 << CARD_COUNT) - 1;

/// Suit indices, high to low within a rank's 4-bit nibble.
pub const SPADE: u32 = 0;
pub const HEART: u32 = 1;
pub const CLUB: u32 = 2;
pub const DIAMOND: u32 = 3;

pub const SUIT_CHARS: [char; 4] = ['s', 'h', 'c', 'd'];
pub const RANK_CHARS: [char; 13] = [
    '2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A',
];

/// Packed 32-bit strength layout: `[4b category][4b top][4b second][4b third][4b fourth][4b fifth][8b reserved]`.
pub const CATEGORY_SHIFT: u32 = 28;
pub const TOP_SHIFT: u32 = 24;
pub const SECOND_SHIFT: u32 = 20;
pub const THIRD_SHIFT: u32 = 16;
pub const FOURTH_SHIFT: u32 = 12;
pub const FIFTH_SHIFT: u32 = 8;

/// Hand categories, low to high.
pub const HIGH_CARD: u32 = 0;
pub const PAIR: u32 = 1;
pub const TWO_PAIR: u32 = 2;
pub const TRIPS: u32 = 3;
pub const STRAIGHT: u32 = 4;
pub const FLUSH: u32 = 5;
pub const FULL_HOUSE: u32 = 6;
pub const QUADS: u32 = 7;
pub const STRAIGHT_FLUSH: u32 = 8;

#[inline(always)]
pub const fn category(strength: u32) -> u32 {
    strength >> CATEGORY_SHIFT
}
