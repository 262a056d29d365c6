//! Exact equity: enumerate every completion of the board and tally winners.

use crate::cardset::{Board, CardSet, HoleCards};
use crate::combinatorics::Combinations;
use crate::constants::CARD_COUNT;
use crate::equity::result::{winners_of, EquityReport, Tally};
use crate::equity::validate_inputs;
use crate::error::EquityError;
use crate::evaluator::evaluate;

/// Enumerates all `(5 - popcount(board))`-card completions of
/// `~(board | dead | ⋃holdings)` and evaluates every player against each,
/// normalizing by the completion count (spec §4.6).
pub fn exact_equity(
    board: Board,
    holdings: &[HoleCards],
    dead: CardSet,
) -> Result<EquityReport, EquityError> {
    validate_inputs(board, holdings, dead)?;

    let used = holdings
        .iter()
        .fold(board.cards() | dead, |acc, h| acc + h.cards());
    let need = 5 - board.cards().popcount();
    let mut tally = Tally::new(holdings.len());

    if need == 0 {
        let strengths: Vec<u32> = holdings
            .iter()
            .map(|h| evaluate(board.cards() + h.cards()))
            .collect();
        tally.record(&winners_of(&strengths));
        return Ok(tally.report());
    }

    let excluded = used.mask();
    for completion in Combinations::constrained(CARD_COUNT, need, 0, excluded) {
        let c = CardSet::from_mask(completion);
        let strengths: Vec<u32> = holdings
            .iter()
            .map(|h| evaluate(board.cards() + c + h.cards()))
            .collect();
        tally.record(&winners_of(&strengths));
    }
    Ok(tally.report())
}

/// Number of board completions [`exact_equity`] would enumerate for a given
/// board/holdings/dead combination; used by [`crate::equity::sampled`] to
/// decide whether sampling is cheaper than exhaustive enumeration.
pub fn completion_count(board: Board, holdings: &[HoleCards], dead: CardSet) -> u64 {
    let used = holdings
        .iter()
        .fold(board.cards() | dead, |acc, h| acc + h.cards());
    let need = (5 - board.cards().popcount()) as u64;
    let universe = CARD_COUNT as u64 - used.popcount() as u64;
    binomial(universe, need)
}

fn binomial(n: u64, k: u64) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result = 1u64;
    for i in 0..k {
        result = result * (n - i) / (i + 1);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::range::parse_hole_cards;

    fn board_of(cards: &[&str]) -> Board {
        let mut m = CardSet::empty();
        for c in cards {
            m += crate::range::parse_card(c).unwrap();
        }
        Board::new(m)
    }

    #[test]
    fn river_board_gives_single_completion() {
        let board = board_of(&["Ac", "Js", "7h", "6h", "3d"]);
        let h1 = parse_hole_cards("AhKh").unwrap();
        let h2 = parse_hole_cards("AsKs").unwrap();
        let report = exact_equity(board, &[h1, h2], CardSet::empty()).unwrap();
        assert_eq!(report.trials, 1);
        assert!((report.player_equities[0] - report.player_equities[1]).abs() < 1e-12);
        assert!((report.split_equity - 1.0).abs() < 1e-12);
    }

    #[test]
    fn overpair_beats_underpair_on_river() {
        let board = board_of(&["9h", "7c", "6s", "3h", "Tc"]);
        let h1 = parse_hole_cards("AhAs").unwrap();
        let h2 = parse_hole_cards("KhKs").unwrap();
        let report = exact_equity(board, &[h1, h2], CardSet::empty()).unwrap();
        assert_eq!(report.player_equities[0], 1.0);
        assert_eq!(report.player_equities[1], 0.0);
    }

    #[test]
    fn equities_sum_to_one_on_the_turn() {
        let h1 = parse_hole_cards("AhAs").unwrap();
        let h2 = parse_hole_cards("KhKs").unwrap();
        let turn_board = board_of(&["2c", "5d", "9h", "Jc"]);
        let report = exact_equity(turn_board, &[h1, h2], CardSet::empty()).unwrap();
        let total: f64 = report.player_equities.iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_overlapping_holdings() {
        let board = Board::new(CardSet::empty());
        let h1 = parse_hole_cards("AhAs").unwrap();
        let h2 = parse_hole_cards("AhKs").unwrap();
        assert!(exact_equity(board, &[h1, h2], CardSet::empty()).is_err());
    }
}
