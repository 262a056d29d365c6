//! The equity engine: exact enumeration, Monte-Carlo sampling, range-vs-range
//! averaging, and a cancellable live-streaming variant, all built on top of
//! the pure [`crate::evaluator`] and [`crate::combinatorics`] layers.
//!
//! Precondition violations here get a real `Result` rather than a
//! `debug_assert!`, unlike the cardset/evaluator layer: equity inputs
//! routinely come from untrusted range combinations assembled at runtime
//! (spec §7 kind 2), not from values the caller constructed by hand.

pub mod exact;
pub mod live;
pub mod range_vs_range;
pub mod result;
pub mod sampled;

pub use exact::{completion_count, exact_equity};
pub use live::{stream_equity, LiveEquity, LiveUpdate};
pub use range_vs_range::{range_vs_range_equity, DEFAULT_TRIALS_PER_COMBO};
pub use result::EquityReport;
pub use sampled::sampled_equity;

use crate::cardset::{Board, CardSet, HoleCards};
use crate::error::EquityError;

/// Checks the preconditions every equity mode shares: at least two players,
/// a board of a valid street size, and no two holdings (or a holding and the
/// board/dead cards) sharing a physical card.
pub(crate) fn validate_inputs(
    board: Board,
    holdings: &[HoleCards],
    dead: CardSet,
) -> Result<(), EquityError> {
    if holdings.len() < 2 {
        return Err(EquityError::TooFewPlayers);
    }
    let n = board.cards().popcount();
    if n != 0 && n != 3 && n != 4 && n != 5 {
        return Err(EquityError::InvalidBoardSize(n));
    }
    let mut seen = board.cards() | dead;
    for h in holdings {
        if seen.intersects(h.cards()) {
            return Err(EquityError::ConflictingHoldings);
        }
        seen += h.cards();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::parse_hole_cards;

    #[test]
    fn rejects_a_single_player() {
        let h1 = parse_hole_cards("AhAs").unwrap();
        assert_eq!(
            validate_inputs(Board::new(CardSet::empty()), &[h1], CardSet::empty()),
            Err(EquityError::TooFewPlayers)
        );
    }

    #[test]
    fn rejects_a_malformed_board() {
        let h1 = parse_hole_cards("AhAs").unwrap();
        let h2 = parse_hole_cards("KhKs").unwrap();
        let mut m = CardSet::empty();
        for c in ["2c", "5d"] {
            m += crate::range::parse_card(c).unwrap();
        }
        assert_eq!(
            validate_inputs(Board::new(m), &[h1, h2], CardSet::empty()),
            Err(EquityError::InvalidBoardSize(2))
        );
    }

    #[test]
    fn rejects_dead_card_overlap() {
        let h1 = parse_hole_cards("AhAs").unwrap();
        let h2 = parse_hole_cards("KhKs").unwrap();
        let dead = crate::range::parse_card("Ah").unwrap();
        assert_eq!(
            validate_inputs(Board::new(CardSet::empty()), &[h1, h2], dead),
            Err(EquityError::ConflictingHoldings)
        );
    }

    #[test]
    fn accepts_well_formed_inputs() {
        let h1 = parse_hole_cards("AhAs").unwrap();
        let h2 = parse_hole_cards("KhKs").unwrap();
        assert!(validate_inputs(Board::new(CardSet::empty()), &[h1, h2], CardSet::empty()).is_ok());
    }
}
