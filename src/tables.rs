//! Precomputed 13-bit → integer lookup tables shared by the evaluator.
//!
//! All four tables are indexed by a 13-bit "ranks present" value and built
//! once at startup via `lazy_static`. Total memory is four `8192`-entry
//! `u32` tables, about 128 KB.

use crate::constants::*;

const DOMAIN: usize = 1 << RANK_COUNT;

/// `top_card[v]`: index (0-12) of the most-significant set bit of `v`;
/// `top_card[0] == 0`.
fn build_top_card() -> Vec<u8> {
    let mut t = vec![0u8; DOMAIN];
    for v in 1..DOMAIN {
        t[v] = 31 - (v as u32).leading_zeros() as u8;
    }
    t
}

/// `top_five_cards[v]`: the five highest set ranks of `v` packed into the
/// top/second/third/fourth/fifth fields of the strength layout, zero-padded
/// if fewer than five bits are set.
fn build_top_five_cards() -> Vec<u32> {
    let mut t = vec![0u32; DOMAIN];
    for v in 0..DOMAIN {
        let mut bits = Vec::with_capacity(5);
        let mut m = v as u32;
        while m != 0 && bits.len() < 5 {
            let hi = 31 - m.leading_zeros();
            bits.push(hi);
            m &= !(1 << hi);
        }
        while bits.len() < 5 {
            bits.push(0);
        }
        let packed = (bits[0] << TOP_SHIFT)
            | (bits[1] << SECOND_SHIFT)
            | (bits[2] << THIRD_SHIFT)
            | (bits[3] << FOURTH_SHIFT)
            | (bits[4] << FIFTH_SHIFT);
        t[v] = packed;
    }
    t
}

/// `straight_high[v]`: high card (1-12) of the best straight in `v`, 0 if
/// none. The wheel (A-2-3-4-5) returns 3, the index of the "5", so it ranks
/// below a 6-high straight and above no straight at all.
fn build_straight_high() -> Vec<u8> {
    let mut t = vec![0u8; DOMAIN];
    const WHEEL: u32 = 0b1_0000_0000_1111; // A,5,4,3,2
    for v in 0..DOMAIN {
        let m = v as u32;
        let mut best = 0u8;
        // Straights with low card rank 0 (2-6) through rank 8 (T-A): five
        // consecutive bits starting at `low`.
        for low in 0..9u32 {
            let run = 0b11111u32 << low;
            if m & run == run {
                best = (low + 4) as u8;
            }
        }
        if m & WHEEL == WHEEL {
            best = best.max(3);
        }
        t[v] = best;
    }
    t
}

/// `popcount13[v]`: popcount of the low 13 bits of `v`.
fn build_popcount13() -> Vec<u8> {
    let mut t = vec![0u8; DOMAIN];
    for v in 0..DOMAIN {
        t[v] = (v as u32).count_ones() as u8;
    }
    t
}

lazy_static::lazy_static! {
    pub static ref TOP_CARD: Vec<u8> = build_top_card();
    pub static ref TOP_FIVE_CARDS: Vec<u32> = build_top_five_cards();
    pub static ref STRAIGHT_HIGH: Vec<u8> = build_straight_high();
    pub static ref POPCOUNT13: Vec<u8> = build_popcount13();
}

#[inline(always)]
pub fn top_card(v: u32) -> u32 {
    TOP_CARD[v as usize] as u32
}

#[inline(always)]
pub fn top_five_cards(v: u32) -> u32 {
    TOP_FIVE_CARDS[v as usize]
}

#[inline(always)]
pub fn straight_high(v: u32) -> u32 {
    STRAIGHT_HIGH[v as usize] as u32
}

#[inline(always)]
pub fn popcount13(v: u32) -> u32 {
    POPCOUNT13[v as usize] as u32
}
