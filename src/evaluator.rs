//! The hot path: maps any 1-7 card hand to a 32-bit strength integer whose
//! ordering agrees with poker hand ranking, kickers included.
//!
//! No allocation, no data-dependent branch on card identity beyond the
//! straight-line "dup-count" cascade of step 3 below — this replaces what
//! the source modeled as a per-category dispatch table (see spec notes on
//! polymorphism replacement) with a handful of integer compares.

use crate::cardset::CardSet;
use crate::constants::*;
use crate::suits::project;
use crate::tables::{popcount13, straight_high, top_card, top_five_cards};

#[inline(always)]
fn pack(category: u32, top: u32, second: u32, third: u32, fourth: u32, fifth: u32) -> u32 {
    (category << CATEGORY_SHIFT)
        | (top << TOP_SHIFT)
        | (second << SECOND_SHIFT)
        | (third << THIRD_SHIFT)
        | (fourth << FOURTH_SHIFT)
        | (fifth << FIFTH_SHIFT)
}

#[inline(always)]
fn pack_category(category: u32) -> u32 {
    category << CATEGORY_SHIFT
}

/// Bits set in exactly 3 or 4 of the four suit rank-masks (`ss`, `sh`, `sc`,
/// `sd`, in that fixed suit order). With quads already ruled out by the
/// caller this isolates a single trip rank.
#[inline(always)]
fn three_or_more_suits_mask(by_suit: &[u32; 4]) -> u32 {
    let (ss, sh, sc, sd) = (by_suit[0], by_suit[1], by_suit[2], by_suit[3]);
    ((sc & sd) | (sh & ss)) & ((sc & sh) | (sd & ss))
}

/// Bits set in an even number (>=2) of the four suit rank-masks: the rank of
/// a pair, or of each pair when several pairs are present.
#[inline(always)]
fn even_count_mask(ranks: u32, by_suit: &[u32; 4]) -> u32 {
    ranks ^ (by_suit[0] ^ by_suit[1] ^ by_suit[2] ^ by_suit[3])
}

/// Computes the 32-bit strength of `cards`. `cards` must have between 1 and
/// 7 bits set; this is a precondition (spec §7 kind 2), not a recoverable
/// error — debug builds assert, release builds leave the result undefined.
pub fn evaluate(cards: CardSet) -> u32 {
    let n = cards.popcount();
    debug_assert!(
        (1..=7).contains(&n),
        "evaluator expects 1-7 cards, got {}",
        n
    );

    let proj = project(cards);
    let ranks = proj.ranks;
    let nr = popcount13(ranks);
    let dup = n.saturating_sub(nr);

    let mut tentative: Option<u32> = None;
    if nr >= 5 {
        let flush_suit = (0..4).find(|&s| popcount13(proj.by_suit[s]) >= 5);
        if let Some(s) = flush_suit {
            let suit_ranks = proj.by_suit[s];
            let sh = straight_high(suit_ranks);
            if sh != 0 {
                return pack(STRAIGHT_FLUSH, sh, 0, 0, 0, 0);
            }
            tentative = Some(pack_category(FLUSH) | top_five_cards(suit_ranks));
        } else {
            let sh = straight_high(ranks);
            if sh != 0 {
                tentative = Some(pack(STRAIGHT, sh, 0, 0, 0, 0));
            }
        }
        if let Some(t) = tentative {
            if dup < 3 {
                return t;
            }
        }
    }

    match dup {
        0 => pack_category(HIGH_CARD) | top_five_cards(ranks),
        1 => {
            let two_mask = even_count_mask(ranks, &proj.by_suit);
            let pair_rank = top_card(two_mask);
            let kickers = ranks & !two_mask;
            // top_five_cards gives 5 kicker fields; one pair only ever uses 3
            // kickers, so shift the packed word down one field (dropping the
            // pair rank's slot) and mask off the 4th/5th kicker it would
            // otherwise leak into the fourth/fifth-field positions.
            let packed_kickers = (top_five_cards(kickers) >> 4) & 0xFFFF_F000;
            pack_category(PAIR) | (pair_rank << TOP_SHIFT) | packed_kickers
        }
        2 => {
            let two_mask = even_count_mask(ranks, &proj.by_suit);
            if two_mask != 0 {
                let hi = top_card(two_mask);
                let lo = top_card(two_mask & !(1 << hi));
                let kicker = top_card(ranks & !two_mask);
                pack(TWO_PAIR, hi, lo, kicker, 0, 0)
            } else {
                let three_mask = three_or_more_suits_mask(&proj.by_suit);
                let top = top_card(three_mask);
                let kickers = ranks & !three_mask;
                // trips only ever uses 2 kickers: keep second/third, drop
                // the rest (see the one-pair case above for the same trick).
                let packed_kickers = (top_five_cards(kickers) >> 4) & 0xFFFF_0000;
                pack_category(TRIPS) | (top << TOP_SHIFT) | packed_kickers
            }
        }
        _ => {
            let four_mask = proj.by_suit[0] & proj.by_suit[1] & proj.by_suit[2] & proj.by_suit[3];
            if four_mask != 0 {
                let top = top_card(four_mask);
                let kicker = top_card(ranks & !four_mask);
                pack(QUADS, top, kicker, 0, 0, 0)
            } else {
                let two_mask = even_count_mask(ranks, &proj.by_suit);
                let three_mask = three_or_more_suits_mask(&proj.by_suit);
                if popcount13(two_mask) != dup {
                    let top = top_card(three_mask);
                    let pair = top_card((two_mask | three_mask) & !(1 << top));
                    pack(FULL_HOUSE, top, pair, 0, 0, 0)
                } else if let Some(t) = tentative {
                    t
                } else {
                    let hi = top_card(two_mask);
                    let lo = top_card(two_mask & !(1 << hi));
                    // Only the two selected pair ranks are spent; a third
                    // pair's rank (e.g. three-pair across 7 cards) is still
                    // a legal single-card kicker and must stay in the pool.
                    let kicker = top_card(ranks & !((1 << hi) | (1 << lo)));
                    pack(TWO_PAIR, hi, lo, kicker, 0, 0)
                }
            }
        }
    }
}
