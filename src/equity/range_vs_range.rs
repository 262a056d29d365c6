//! Range-vs-range equity: the Cartesian product of per-player ranges, each
//! non-conflicting combination sampled with a small trial budget and
//! averaged (spec §4.6). Sharded across worker threads the way the
//! teacher's `Simulator::exact_equity`/`approx_equity` shard combined ranges
//! across `crossbeam::scope` workers, using `fastdivide` to turn a flat
//! shard index back into one combo index per range without a hardware
//! divide per iteration.

use std::sync::Mutex;

use fastdivide::DividerU64;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::cardset::{Board, CardSet};
use crate::equity::result::EquityReport;
use crate::equity::sampled::sampled_equity;
use crate::error::EquityError;
use crate::range::Range;

/// Default per-combo trial budget (spec §4.6: "T ≈ 100").
pub const DEFAULT_TRIALS_PER_COMBO: u64 = 100;

struct Accumulator {
    sum_equities: Vec<f64>,
    sum_split: f64,
    valid_combos: u64,
    skipped: u64,
}

impl Accumulator {
    fn new(n_players: usize) -> Self {
        Accumulator { sum_equities: vec![0.0; n_players], sum_split: 0.0, valid_combos: 0, skipped: 0 }
    }

    fn merge(&mut self, other: &Accumulator) {
        for i in 0..self.sum_equities.len() {
            self.sum_equities[i] += other.sum_equities[i];
        }
        self.sum_split += other.sum_split;
        self.valid_combos += other.valid_combos;
        self.skipped += other.skipped;
    }
}

/// Computes range-vs-range equity by sampling every non-conflicting
/// combination of one holding per player. `rng` seeds one `SmallRng` per
/// worker thread up front so the whole computation is reproducible for a
/// fixed seed and thread count.
pub fn range_vs_range_equity<R: Rng>(
    board: Board,
    ranges: &[Range],
    dead: CardSet,
    trials_per_combo: u64,
    n_threads: usize,
    rng: &mut R,
) -> Result<EquityReport, EquityError> {
    if ranges.len() < 2 {
        return Err(EquityError::TooFewPlayers);
    }
    let n = board.cards().popcount();
    if n != 0 && n != 3 && n != 4 && n != 5 {
        return Err(EquityError::InvalidBoardSize(n));
    }

    let combos: Vec<Vec<CardSet>> = ranges.iter().map(|r| r.iter().copied().collect()).collect();
    let sizes: Vec<u64> = combos.iter().map(|c| c.len() as u64).collect();
    if sizes.iter().any(|&s| s == 0) {
        return Err(EquityError::RangesTooNarrow { skipped: 0, attempted: 0 });
    }
    let total: u64 = sizes.iter().product();
    let dividers: Vec<DividerU64> = sizes.iter().map(|&s| DividerU64::divide_by(s)).collect();

    let n_threads = n_threads.max(1);
    let shard = (total / n_threads as u64).max(1);

    let worker_seeds: Vec<SmallRng> = (0..n_threads)
        .map(|_| SmallRng::from_rng(&mut *rng).expect("SmallRng seeding from a valid Rng cannot fail"))
        .collect();

    let shared = Mutex::new(Accumulator::new(ranges.len()));

    crossbeam::scope(|scope| {
        for (t, mut worker_rng) in worker_seeds.into_iter().enumerate() {
            let start = t as u64 * shard;
            let end = if t as usize + 1 == n_threads { total } else { start + shard };
            let combos = &combos;
            let sizes = &sizes;
            let dividers = &dividers;
            let shared = &shared;
            scope.spawn(move |_| {
                let mut local = Accumulator::new(ranges.len());
                for idx in start..end {
                    let mut rem = idx;
                    let mut holdings = Vec::with_capacity(ranges.len());
                    let mut used = board.cards() | dead;
                    let mut conflict = false;
                    for i in 0..ranges.len() {
                        let q = dividers[i].divide(rem);
                        let r = rem - q * sizes[i];
                        rem = q;
                        let cards = combos[i][r as usize];
                        if used.intersects(cards) {
                            conflict = true;
                            break;
                        }
                        used += cards;
                        holdings.push(crate::cardset::HoleCards::new(cards));
                    }
                    if conflict {
                        local.skipped += 1;
                        continue;
                    }
                    match sampled_equity(board, &holdings, dead, trials_per_combo, &mut worker_rng) {
                        Ok(report) => {
                            for i in 0..ranges.len() {
                                local.sum_equities[i] += report.player_equities[i];
                            }
                            local.sum_split += report.split_equity;
                            local.valid_combos += 1;
                        }
                        Err(_) => local.skipped += 1,
                    }
                }
                shared.lock().unwrap().merge(&local);
            });
        }
    })
    .expect("worker thread panicked");

    let acc = shared.into_inner().unwrap();
    if acc.valid_combos == 0 {
        return Err(EquityError::RangesTooNarrow { skipped: acc.skipped, attempted: total });
    }
    let n_valid = acc.valid_combos as f64;
    Ok(EquityReport {
        player_equities: acc.sum_equities.iter().map(|s| s / n_valid).collect(),
        split_equity: acc.sum_split / n_valid,
        trials: acc.valid_combos,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::parse_range;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn pocket_aces_favored_over_random() {
        let mut rng = SmallRng::seed_from_u64(99);
        let aa = parse_range("AA").unwrap();
        let random = parse_range("random").unwrap();
        let board = Board::new(CardSet::empty());
        let report = range_vs_range_equity(board, &[aa, random], CardSet::empty(), 30, 2, &mut rng).unwrap();
        assert!(report.player_equities[0] > report.player_equities[1]);
        let total: f64 = report.player_equities.iter().sum();
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn too_few_players_is_an_error() {
        let mut rng = SmallRng::seed_from_u64(1);
        let aa = parse_range("AA").unwrap();
        let board = Board::new(CardSet::empty());
        assert!(range_vs_range_equity(board, &[aa], CardSet::empty(), 30, 2, &mut rng).is_err());
    }
}
