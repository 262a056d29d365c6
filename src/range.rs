//! Card/hole-card/range text notation (spec §6) and the range primitive
//! (spec §4.7): a set of 2-card holdings with grid-cell construction,
//! suit-filtering, and percentage/iteration queries.
//!
//! Parsing is a boundary concern — nothing past [`parse_range`] or
//! [`parse_hole_cards`] ever sees text again, only validated [`CardSet`]s —
//! but every caller of the evaluator and equity engine needs it, so it ships
//! alongside the core rather than as an external collaborator. The
//! character-by-character scan below follows a recursive-descent shape,
//! generalized to also accept a bound subrange (`A-B`) alongside the open
//! subrange (`A+`).

use std::collections::HashSet;
use std::fmt;

use crate::cardset::{rank_of_bit, suit_of_bit, CardSet, HoleCards};
use crate::constants::*;
use crate::error::ParseError;

fn char_to_rank(c: char) -> Option<u32> {
    RANK_CHARS
        .iter()
        .position(|&r| r.eq_ignore_ascii_case(&c))
        .map(|i| i as u32)
}

fn char_to_suit(c: char) -> Option<u32> {
    SUIT_CHARS
        .iter()
        .position(|&s| s.eq_ignore_ascii_case(&c))
        .map(|i| i as u32)
}

/// Parses a single card, e.g. `"As"` or `"2d"`. Case-insensitive on both
/// rank and suit.
pub fn parse_card(text: &str) -> Result<CardSet, ParseError> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() != 2 {
        return Err(ParseError::InvalidCard(text.to_string()));
    }
    let rank = char_to_rank(chars[0]).ok_or_else(|| ParseError::InvalidCard(text.to_string()))?;
    let suit = char_to_suit(chars[1]).ok_or_else(|| ParseError::InvalidCard(text.to_string()))?;
    Ok(CardSet::from_rank_suit(rank, suit))
}

/// Parses a card list separated by whitespace, commas or semicolons (e.g.
/// `"As Kh, 2d;3c"`), rejecting duplicates.
pub fn parse_card_list(text: &str) -> Result<CardSet, ParseError> {
    let mut mask = CardSet::empty();
    for token in text.split(|c: char| c.is_whitespace() || c == ',' || c == ';') {
        if token.is_empty() {
            continue;
        }
        let card = parse_card(token)?;
        if mask.intersects(card) {
            return Err(ParseError::DuplicateCard(token.to_string()));
        }
        mask += card;
    }
    Ok(mask)
}

/// Parses exactly two concatenated cards, e.g. `"AsKh"`.
pub fn parse_hole_cards(text: &str) -> Result<HoleCards, ParseError> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() != 4 {
        return Err(ParseError::InvalidHoleCards(text.to_string()));
    }
    let first: String = chars[0..2].iter().collect();
    let second: String = chars[2..4].iter().collect();
    let c1 = parse_card(&first).map_err(|_| ParseError::InvalidHoleCards(text.to_string()))?;
    let c2 = parse_card(&second).map_err(|_| ParseError::InvalidHoleCards(text.to_string()))?;
    if c1 == c2 {
        return Err(ParseError::InvalidHoleCards(text.to_string()));
    }
    Ok(HoleCards::new(c1 + c2))
}

impl fmt::Display for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cards())
    }
}

/// Whether a `rank1 rank2 [s|o]` shape is suited-only, offsuit-only, or
/// "either" (no suit letter given, per spec §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Shape {
    rank1: u32,
    rank2: u32,
    suited: bool,
    offsuited: bool,
}

fn combos_for_shape(shape: Shape) -> Vec<CardSet> {
    let mut out = Vec::new();
    let (r1, r2) = (shape.rank1, shape.rank2);
    if shape.suited && r1 != r2 {
        for suit in 0..SUIT_COUNT {
            out.push(CardSet::from_rank_suit(r1, suit) + CardSet::from_rank_suit(r2, suit));
        }
    }
    if shape.offsuited {
        for s1 in 0..SUIT_COUNT {
            for s2 in (s1 + 1)..SUIT_COUNT {
                out.push(CardSet::from_rank_suit(r1, s1) + CardSet::from_rank_suit(r2, s2));
                if r1 != r2 {
                    out.push(CardSet::from_rank_suit(r1, s2) + CardSet::from_rank_suit(r2, s1));
                }
            }
        }
    }
    out
}

/// Expands `rank1 rank2 +` (e.g. `77+` or `A2s+`): for pairs, every pair from
/// `rank1` up to the ace; otherwise every second-rank from `rank2` up to
/// `rank1`.
fn combos_for_plus(shape: Shape) -> Vec<CardSet> {
    let mut out = Vec::new();
    if shape.rank1 == shape.rank2 {
        for r in shape.rank1..RANK_COUNT {
            out.extend(combos_for_shape(Shape { rank1: r, rank2: r, ..shape }));
        }
    } else {
        for r in shape.rank2..=shape.rank1 {
            out.extend(combos_for_shape(Shape { rank1: shape.rank1, rank2: r, ..shape }));
        }
    }
    out
}

/// Expands a bound subrange `shape_a - shape_b` of the same kind (both
/// pairs, or both sharing `rank1`), generalizing [`combos_for_plus`] to an
/// explicit lower bound instead of always running to the ace/`rank1`.
fn combos_for_bound(a: Shape, b: Shape) -> Result<Vec<CardSet>, ParseError> {
    let mut out = Vec::new();
    if a.rank1 == a.rank2 && b.rank1 == b.rank2 {
        let (lo, hi) = if a.rank1 <= b.rank1 { (a.rank1, b.rank1) } else { (b.rank1, a.rank1) };
        for r in lo..=hi {
            out.extend(combos_for_shape(Shape { rank1: r, rank2: r, ..a }));
        }
        Ok(out)
    } else if a.rank1 == b.rank1 && a.rank1 != a.rank2 && b.rank1 != b.rank2 {
        let (lo, hi) = if a.rank2 <= b.rank2 { (a.rank2, b.rank2) } else { (b.rank2, a.rank2) };
        for r in lo..=hi {
            out.extend(combos_for_shape(Shape { rank1: a.rank1, rank2: r, ..a }));
        }
        Ok(out)
    } else {
        Err(ParseError::InvalidRangeTerm(format!(
            "mismatched bound shapes around {:?}/{:?}",
            a, b
        )))
    }
}

struct Scanner<'a> {
    chars: Vec<char>,
    text: &'a str,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Scanner { chars: text.chars().collect(), text }
    }

    fn peek(&self, i: usize) -> Option<char> {
        self.chars.get(i).copied()
    }

    fn parse_shape(&self, i: &mut usize) -> Option<Shape> {
        let start = *i;
        let rank1 = char_to_rank(self.peek(*i)?)?;
        *i += 1;
        let rank2 = char_to_rank(self.peek(*i)?);
        let rank2 = match rank2 {
            Some(r) => {
                *i += 1;
                r
            }
            None => {
                *i = start;
                return None;
            }
        };
        let mut suited = true;
        let mut offsuited = true;
        match self.peek(*i) {
            Some('s') | Some('S') => {
                offsuited = false;
                *i += 1;
            }
            Some('o') | Some('O') => {
                suited = false;
                *i += 1;
            }
            _ => {}
        }
        Some(Shape { rank1, rank2, suited, offsuited })
    }

    fn parse_exact_combo(&self, i: &mut usize) -> Option<CardSet> {
        let start = *i;
        if self.peek(*i)? == ' ' {
            return None;
        }
        if *i + 4 > self.chars.len() {
            return None;
        }
        let slice: String = self.chars[*i..*i + 4].iter().collect();
        match parse_hole_cards(&slice) {
            Ok(hc) => {
                *i += 4;
                Some(hc.cards())
            }
            Err(_) => {
                *i = start;
                None
            }
        }
    }
}

/// Parses whitespace/comma-separated range notation into a [`Range`]
/// (spec §6): each term is an exact combo (`AsKh`), a shape (`AKs`, `AKo`,
/// `AK`, `77`), an open subrange (`77+`, `A2s+`), or a bound subrange
/// (`87s-54s`).
pub fn parse_range(text: &str) -> Result<Range, ParseError> {
    let mut range = Range::new();
    for term in text.split(|c: char| c.is_whitespace() || c == ',') {
        if term.is_empty() {
            continue;
        }
        if term.eq_ignore_ascii_case("random") {
            range.add_all();
            continue;
        }
        let scanner = Scanner::new(term);
        let mut i = 0usize;
        if let Some(combo) = scanner.parse_exact_combo(&mut i) {
            if i == scanner.chars.len() {
                range.add_hand(combo);
                continue;
            }
        }
        i = 0;
        let shape = scanner
            .parse_shape(&mut i)
            .ok_or_else(|| ParseError::InvalidRangeTerm(term.to_string()))?;
        match scanner.peek(i) {
            Some('+') => {
                if i + 1 != scanner.chars.len() {
                    return Err(ParseError::InvalidRangeTerm(term.to_string()));
                }
                for c in combos_for_plus(shape) {
                    range.add_hand(c);
                }
            }
            Some('-') => {
                let rest = i + 1;
                let mut j = rest;
                let second = Scanner::new(&scanner.text[rest..])
                    .parse_shape(&mut j)
                    .ok_or_else(|| ParseError::InvalidRangeTerm(term.to_string()))?;
                if rest + j != scanner.chars.len() {
                    return Err(ParseError::InvalidRangeTerm(term.to_string()));
                }
                for c in combos_for_bound(shape, second)? {
                    range.add_hand(c);
                }
            }
            None if i == scanner.chars.len() => {
                for c in combos_for_shape(shape) {
                    range.add_hand(c);
                }
            }
            _ => return Err(ParseError::InvalidRangeTerm(term.to_string())),
        }
    }
    Ok(range)
}

/// Whether a grid cell's combos are fully, partially, or not present in a
/// [`Range`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStatus {
    Empty,
    Partial,
    Full,
}

/// A set of 2-card holdings (spec §4.7). Built incrementally by the parser,
/// grid-cell selection, or `add_all`; consumed read-only by the equity
/// engine. There are 1326 possible 2-card combos in total.
#[derive(Debug, Clone, Default)]
pub struct Range {
    combos: HashSet<CardSet>,
}

pub const TOTAL_COMBOS: usize = 1326;

impl Range {
    pub fn new() -> Self {
        Range { combos: HashSet::new() }
    }

    pub fn add_hand(&mut self, cards: CardSet) {
        debug_assert_eq!(cards.popcount(), 2, "range holdings must have exactly 2 cards");
        self.combos.insert(cards);
    }

    pub fn add_all(&mut self) {
        for r1 in 0..RANK_COUNT {
            for s1 in 0..SUIT_COUNT {
                for r2 in 0..RANK_COUNT {
                    for s2 in 0..SUIT_COUNT {
                        if r1 * SUIT_COUNT + s1 >= r2 * SUIT_COUNT + s2 {
                            continue;
                        }
                        self.add_hand(CardSet::from_rank_suit(r1, s1) + CardSet::from_rank_suit(r2, s2));
                    }
                }
            }
        }
    }

    /// Adds every combo for grid cell `(col, row)`: 6 pairs when `col ==
    /// row`, 4 suited when `col > row`, 12 offsuit when `col < row` (spec
    /// §4.7). Both axes use the grid's own convention where index 0 is the
    /// ace.
    pub fn add_cell(&mut self, col: u32, row: u32) {
        let rank_a = RANK_COUNT - 1 - col;
        let rank_b = RANK_COUNT - 1 - row;
        let shape = match col.cmp(&row) {
            std::cmp::Ordering::Equal => Shape { rank1: rank_a, rank2: rank_b, suited: true, offsuited: true },
            std::cmp::Ordering::Greater => Shape { rank1: rank_a, rank2: rank_b, suited: true, offsuited: false },
            std::cmp::Ordering::Less => Shape { rank1: rank_a, rank2: rank_b, suited: false, offsuited: true },
        };
        for c in combos_for_shape(shape) {
            self.add_hand(c);
        }
    }

    /// Reports how fully a grid cell is selected.
    pub fn cell_status(&self, col: u32, row: u32) -> CellStatus {
        let rank_a = RANK_COUNT - 1 - col;
        let rank_b = RANK_COUNT - 1 - row;
        let all = match col.cmp(&row) {
            std::cmp::Ordering::Equal => Shape { rank1: rank_a, rank2: rank_b, suited: true, offsuited: true },
            std::cmp::Ordering::Greater => Shape { rank1: rank_a, rank2: rank_b, suited: true, offsuited: false },
            std::cmp::Ordering::Less => Shape { rank1: rank_a, rank2: rank_b, suited: false, offsuited: true },
        };
        let cell_combos = combos_for_shape(all);
        let have = cell_combos.iter().filter(|c| self.combos.contains(c)).count();
        if have == 0 {
            CellStatus::Empty
        } else if have == cell_combos.len() {
            CellStatus::Full
        } else {
            CellStatus::Partial
        }
    }

    /// Restricts this range to combos whose (high-suit, low-suit) pair has
    /// its bit set in `allowed` (bit `4 * high_suit + low_suit`). For a
    /// pocket pair, "high suit" is simply `min(suit_a, suit_b)` — there is
    /// no rank to break the tie, so suit index order is used instead.
    pub fn filter_by_suits(&self, allowed: u16) -> Range {
        let filtered = self
            .combos
            .iter()
            .copied()
            .filter(|&c| allowed & (1 << suit_pair_bit(c)) != 0)
            .collect();
        Range { combos: filtered }
    }

    pub fn percentage(&self) -> f64 {
        self.combos.len() as f64 / TOTAL_COMBOS as f64
    }

    pub fn len(&self) -> usize {
        self.combos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combos.is_empty()
    }

    pub fn contains(&self, cards: CardSet) -> bool {
        self.combos.contains(&cards)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardSet> {
        self.combos.iter()
    }

    /// Removes combos that share a card with `dead`.
    pub fn remove_conflicting(&mut self, dead: CardSet) {
        self.combos.retain(|c| !c.intersects(dead));
    }
}

fn suit_pair_bit(combo: CardSet) -> u32 {
    let bits: Vec<u32> = combo.iter_bits().collect();
    debug_assert_eq!(bits.len(), 2);
    let (r0, s0) = (rank_of_bit(bits[0]), suit_of_bit(bits[0]));
    let (r1, s1) = (rank_of_bit(bits[1]), suit_of_bit(bits[1]));
    let (high, low) = if r0 > r1 {
        (s0, s1)
    } else if r1 > r0 {
        (s1, s0)
    } else {
        (s0.min(s1), s0.max(s1))
    };
    4 * high + low
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_card_roundtrip() {
        let c = parse_card("As").unwrap();
        assert_eq!(format!("{}", c), "As");
        let c = parse_card("2d").unwrap();
        assert_eq!(format!("{}", c), "2d");
    }

    #[test]
    fn parse_card_rejects_garbage() {
        assert!(parse_card("Xs").is_err());
        assert!(parse_card("A").is_err());
    }

    #[test]
    fn parse_hole_cards_rejects_duplicate() {
        assert!(parse_hole_cards("AsAs").is_err());
    }

    #[test]
    fn parse_hole_cards_rejects_multibyte_input_without_panicking() {
        // Four `char`s but not four bytes - must error, not slice across a
        // UTF-8 boundary and panic.
        assert!(parse_hole_cards("s÷Kh").is_err());
        assert!(parse_hole_cards("A÷Kh").is_err());
    }

    #[test]
    fn pair_shape_has_six_combos() {
        assert_eq!(combos_for_shape(Shape { rank1: 1, rank2: 1, suited: true, offsuited: true }).len(), 6);
    }

    #[test]
    fn suited_shape_has_four_combos() {
        assert_eq!(combos_for_shape(Shape { rank1: 1, rank2: 0, suited: true, offsuited: false }).len(), 4);
    }

    #[test]
    fn offsuit_shape_has_twelve_combos() {
        assert_eq!(combos_for_shape(Shape { rank1: 1, rank2: 0, suited: false, offsuited: true }).len(), 12);
    }

    #[test]
    fn parse_range_pair() {
        let r = parse_range("77").unwrap();
        assert_eq!(r.len(), 6);
    }

    #[test]
    fn parse_range_suited_and_offsuit() {
        let r = parse_range("AKs").unwrap();
        assert_eq!(r.len(), 4);
        let r = parse_range("AKo").unwrap();
        assert_eq!(r.len(), 12);
        let r = parse_range("AK").unwrap();
        assert_eq!(r.len(), 16);
    }

    #[test]
    fn parse_range_plus() {
        let r = parse_range("QQ+").unwrap();
        assert_eq!(r.len(), 18); // QQ, KK, AA
    }

    #[test]
    fn parse_range_random_is_all_combos() {
        let r = parse_range("random").unwrap();
        assert_eq!(r.len(), TOTAL_COMBOS);
    }

    #[test]
    fn grid_cell_diagonal_is_pair() {
        let mut r = Range::new();
        r.add_cell(0, 0); // A=0 on both axes -> pocket aces
        assert_eq!(r.len(), 6);
        assert_eq!(r.cell_status(0, 0), CellStatus::Full);
    }

    #[test]
    fn percentage_of_full_range_is_one() {
        let mut r = Range::new();
        r.add_all();
        assert!((r.percentage() - 1.0).abs() < 1e-9);
    }
}
