//! Cooperative live-streaming equity: runs until cancelled, periodically
//! publishing a snapshot of the running equity so a caller (a UI, a
//! long-poll handler) can read partial progress without waiting for
//! completion. A `crossbeam::atomic::AtomicCell<bool>` stop flag is checked
//! every iteration, and an `RwLock` guards the shared result — generalized
//! from a single fixed-trial run into an unbounded stream with an explicit
//! cancellation handle.

use std::sync::RwLock;

use crossbeam::atomic::AtomicCell;
use log::{debug, warn};
use rand::Rng;

use crate::cardset::{Board, CardSet, HoleCards};
use crate::equity::result::{winners_of, EquityReport, Tally};
use crate::equity::validate_inputs;
use crate::error::EquityError;
use crate::evaluator::evaluate;
use crate::range::Range;

/// How often (in completed deals) the shared snapshot is refreshed.
const PROGRESS_INTERVAL: u64 = 200;

/// Deals in a row after which, if every one was skipped for a holding
/// conflict, the stream gives up rather than spin forever (spec §4.6's
/// "ranges too narrow" termination).
const NARROW_WINDOW: u64 = 2_000;
const NARROW_SKIP_RATIO: f64 = 0.95;

/// One published snapshot of a running live computation.
#[derive(Debug, Clone)]
pub struct LiveUpdate {
    pub report: EquityReport,
    pub deals: u64,
}

/// A handle to a running live-equity stream: `cancel()` stops the worker at
/// its next deal boundary, `snapshot()` reads the latest published update.
pub struct LiveEquity {
    stop: AtomicCell<bool>,
    latest: RwLock<LiveUpdate>,
}

impl LiveEquity {
    /// A fresh handle reporting all-zero equities until the first periodic
    /// snapshot is published.
    pub fn new(n_players: usize) -> Self {
        LiveEquity {
            stop: AtomicCell::new(false),
            latest: RwLock::new(LiveUpdate { report: EquityReport::zero(n_players), deals: 0 }),
        }
    }

    /// Requests that the stream stop at its next deal boundary.
    pub fn cancel(&self) {
        self.stop.store(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.stop.load()
    }

    /// The most recently published snapshot.
    pub fn snapshot(&self) -> LiveUpdate {
        self.latest.read().unwrap().clone()
    }
}

/// Runs a live equity stream over ranges rather than fixed holdings: each
/// deal draws one uniformly random holding per range plus a random board
/// completion, retrying on a holding conflict. The first range to draw is
/// rotated every deal so no single range's sampling dominates the early
/// snapshots (spec §4.6's fairness note for the streaming variant).
///
/// Blocks the calling thread until `handle.cancel()` is observed or the
/// ranges prove too narrow to deal from; callers that want a background
/// stream should run this on its own thread and poll `handle.snapshot()`
/// from elsewhere.
pub fn stream_equity<R: Rng>(
    board: Board,
    ranges: &[Range],
    dead: CardSet,
    rng: &mut R,
    handle: &LiveEquity,
) -> Result<(), EquityError> {
    if ranges.len() < 2 {
        return Err(EquityError::TooFewPlayers);
    }
    let n = board.cards().popcount();
    if n != 0 && n != 3 && n != 4 && n != 5 {
        return Err(EquityError::InvalidBoardSize(n));
    }
    let combos: Vec<Vec<CardSet>> = ranges.iter().map(|r| r.iter().copied().collect()).collect();
    if combos.iter().any(|c| c.is_empty()) {
        return Err(EquityError::RangesTooNarrow { skipped: 0, attempted: 0 });
    }

    let mut tally = Tally::new(ranges.len());
    let mut rotation = 0usize;
    let mut window_deals = 0u64;
    let mut window_skips = 0u64;
    let mut attempted = 0u64;

    loop {
        if handle.stop.load() {
            debug!("live equity stream cancelled after {} deals", tally.trials);
            return Ok(());
        }

        attempted += 1;
        let order: Vec<usize> = (0..ranges.len()).map(|i| (i + rotation) % ranges.len()).collect();
        rotation = (rotation + 1) % ranges.len().max(1);

        let mut used = board.cards() | dead;
        let mut holdings: Vec<Option<HoleCards>> = vec![None; ranges.len()];
        let mut conflict = false;
        for &p in &order {
            let choice = combos[p][rng.gen_range(0..combos[p].len())];
            if used.intersects(choice) {
                conflict = true;
                break;
            }
            used += choice;
            holdings[p] = Some(HoleCards::new(choice));
        }

        window_deals += 1;
        if conflict {
            window_skips += 1;
        } else {
            let holdings: Vec<HoleCards> = holdings.into_iter().map(|h| h.unwrap()).collect();
            let need = 5 - board.cards().popcount();
            let completion = random_board_completion(rng, used, need);
            let strengths: Vec<u32> = holdings
                .iter()
                .map(|h| evaluate(board.cards() + completion + h.cards()))
                .collect();
            tally.record(&winners_of(&strengths));

            if tally.trials % PROGRESS_INTERVAL == 0 {
                let mut latest = handle.latest.write().unwrap();
                *latest = LiveUpdate { report: tally.report(), deals: tally.trials };
            }
        }

        if window_deals >= NARROW_WINDOW {
            let ratio = window_skips as f64 / window_deals as f64;
            if ratio >= NARROW_SKIP_RATIO {
                warn!(
                    "live equity stream aborting: {:.1}% of the last {} deals conflicted",
                    ratio * 100.0,
                    window_deals
                );
                return Err(EquityError::RangesTooNarrow { skipped: window_skips, attempted });
            }
            window_deals = 0;
            window_skips = 0;
        }
    }
}

fn random_board_completion<R: Rng>(rng: &mut R, used: CardSet, need: u32) -> CardSet {
    use crate::combinatorics::expand_right;
    use crate::constants::CARD_COUNT;

    let universe = (!used.mask()) & ((1u64 << CARD_COUNT) - 1);
    let width = universe.count_ones();
    let mut positions: Vec<u32> = (0..width).collect();
    for i in 0..need {
        let j = rng.gen_range(i..width);
        positions.swap(i as usize, j as usize);
    }
    let mut dense = 0u64;
    for &p in &positions[..need as usize] {
        dense |= 1u64 << p;
    }
    CardSet::from_mask(expand_right(dense, universe))
}

/// Convenience wrapper: validates fixed (non-range) holdings and streams
/// against them directly, useful when the caller already knows each
/// player's exact two cards and only wants live progress on the board.
pub fn stream_fixed_holdings<R: Rng>(
    board: Board,
    holdings: &[HoleCards],
    dead: CardSet,
    rng: &mut R,
    handle: &LiveEquity,
) -> Result<(), EquityError> {
    validate_inputs(board, holdings, dead)?;
    let as_ranges: Vec<Range> = holdings
        .iter()
        .map(|h| {
            let mut r = Range::new();
            r.add_hand(h.cards());
            r
        })
        .collect();
    stream_equity(board, &as_ranges, dead, rng, handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::{parse_hole_cards, parse_range};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn stream_converges_and_can_be_cancelled() {
        let mut rng = SmallRng::seed_from_u64(3);
        let h1 = parse_hole_cards("AhAs").unwrap();
        let h2 = parse_hole_cards("KhKs").unwrap();
        let handle = LiveEquity::new(2);
        handle.stop.store(true);
        let result =
            stream_fixed_holdings(Board::new(CardSet::empty()), &[h1, h2], CardSet::empty(), &mut rng, &handle);
        assert!(result.is_ok());
    }

    #[test]
    fn too_narrow_ranges_abort_with_an_error() {
        let mut rng = SmallRng::seed_from_u64(4);
        // Both ranges are the same single pair, so every second deal after
        // the first conflicts and the stream should give up quickly... but
        // a single-combo range is rejected up front as empty-of-options
        // once the first seat takes the only combo.
        let mut narrow = Range::new();
        narrow.add_hand(parse_hole_cards("AhAs").unwrap().cards());
        let handle = LiveEquity::new(2);
        let result = stream_equity(Board::new(CardSet::empty()), &[narrow.clone(), narrow], CardSet::empty(), &mut rng, &handle);
        assert!(matches!(result, Err(EquityError::RangesTooNarrow { .. })));
    }

    #[test]
    fn rejects_a_single_range() {
        let mut rng = SmallRng::seed_from_u64(5);
        let random = parse_range("random").unwrap();
        let handle = LiveEquity::new(1);
        let result = stream_equity(Board::new(CardSet::empty()), &[random], CardSet::empty(), &mut rng, &handle);
        assert_eq!(result, Err(EquityError::TooFewPlayers));
    }
}
