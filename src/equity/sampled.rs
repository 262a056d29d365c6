//! Monte-Carlo equity: sample random board completions instead of
//! enumerating all of them. Falls back to exact enumeration when the exact
//! completion count is no larger than the trial budget — sampling buys
//! nothing there.
//!
//! The RNG is always caller-provided (spec §5/§9's "mutable ambient
//! randomness" redesign flag): there is no process-global RNG here, only
//! `&mut impl Rng` threaded through every call.

use rand::Rng;

use crate::cardset::{Board, CardSet, HoleCards};
use crate::combinatorics::expand_right;
use crate::constants::CARD_COUNT;
use crate::equity::exact::{completion_count, exact_equity};
use crate::equity::result::{winners_of, EquityReport, Tally};
use crate::equity::validate_inputs;
use crate::error::EquityError;
use crate::evaluator::evaluate;

/// Picks a uniformly random `k`-bit subset of `universe` (a raw card mask)
/// via partial Fisher-Yates over the universe's set-bit positions, densified
/// and then scattered back into place with [`expand_right`] — the dense
/// value is what spec §4.6 calls sampling "via `expand_right` applied to a
/// random dense value".
fn random_completion<R: Rng>(rng: &mut R, universe: u64, k: u32) -> u64 {
    let width = universe.count_ones();
    let mut positions: Vec<u32> = (0..width).collect();
    for i in 0..k {
        let j = rng.gen_range(i..width);
        positions.swap(i as usize, j as usize);
    }
    let mut dense = 0u64;
    for &p in &positions[..k as usize] {
        dense |= 1u64 << p;
    }
    expand_right(dense, universe)
}

/// Samples `trials` random completions of the board and tallies winners.
/// Falls back to [`exact_equity`] when the exact completion count is `<=
/// trials`.
pub fn sampled_equity<R: Rng>(
    board: Board,
    holdings: &[HoleCards],
    dead: CardSet,
    trials: u64,
    rng: &mut R,
) -> Result<EquityReport, EquityError> {
    validate_inputs(board, holdings, dead)?;

    if completion_count(board, holdings, dead) <= trials {
        return exact_equity(board, holdings, dead);
    }

    let used = holdings
        .iter()
        .fold(board.cards() | dead, |acc, h| acc + h.cards());
    let universe = (!used.mask()) & ((1u64 << CARD_COUNT) - 1);
    let need = 5 - board.cards().popcount();
    let mut tally = Tally::new(holdings.len());

    for _ in 0..trials {
        let completion = CardSet::from_mask(random_completion(rng, universe, need));
        let strengths: Vec<u32> = holdings
            .iter()
            .map(|h| evaluate(board.cards() + completion + h.cards()))
            .collect();
        tally.record(&winners_of(&strengths));
    }
    Ok(tally.report())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::parse_hole_cards;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn sampled_equity_sums_to_one() {
        let mut rng = SmallRng::seed_from_u64(42);
        let h1 = parse_hole_cards("AhAs").unwrap();
        let h2 = parse_hole_cards("KhKs").unwrap();
        let report =
            sampled_equity(Board::new(CardSet::empty()), &[h1, h2], CardSet::empty(), 2000, &mut rng)
                .unwrap();
        let total: f64 = report.player_equities.iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
        // AA vs KK preflop: AA should be a clear favorite.
        assert!(report.player_equities[0] > 0.7);
    }

    #[test]
    fn sampled_equity_is_deterministic_given_a_seed() {
        let h1 = parse_hole_cards("AhAs").unwrap();
        let h2 = parse_hole_cards("KhKs").unwrap();
        let mut rng1 = SmallRng::seed_from_u64(7);
        let mut rng2 = SmallRng::seed_from_u64(7);
        let r1 =
            sampled_equity(Board::new(CardSet::empty()), &[h1, h2], CardSet::empty(), 500, &mut rng1)
                .unwrap();
        let r2 =
            sampled_equity(Board::new(CardSet::empty()), &[h1, h2], CardSet::empty(), 500, &mut rng2)
                .unwrap();
        assert_eq!(r1.player_equities, r2.player_equities);
    }

    #[test]
    fn falls_back_to_exact_on_river() {
        let mut rng = SmallRng::seed_from_u64(1);
        let board = {
            let mut m = CardSet::empty();
            for c in ["Ac", "Js", "7h", "6h", "3d"] {
                m += crate::range::parse_card(c).unwrap();
            }
            Board::new(m)
        };
        let h1 = parse_hole_cards("AhKh").unwrap();
        let h2 = parse_hole_cards("AsKs").unwrap();
        // with 0 cards left to complete, trials >> completion_count(=1), so
        // this must equal the exact result exactly.
        let sampled = sampled_equity(board, &[h1, h2], CardSet::empty(), 100, &mut rng).unwrap();
        assert_eq!(sampled.trials, 1);
        assert!((sampled.split_equity - 1.0).abs() < 1e-12);
    }
}
