//! The equity engine's output type and the running tally it accumulates
//! into, shared across the exact, sampled, range-vs-range and live-streaming
//! modes.

use serde::{Deserialize, Serialize};

/// Per-player win probabilities plus a split probability. Each player's
/// equity already includes their share of split pots, so `sum(player_equities)
/// == 1.0` within floating-point tolerance (spec §4.6); `split_equity` is the
/// fraction of trials that ended in a chop, reported separately but not an
/// additional share on top of `player_equities`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityReport {
    pub player_equities: Vec<f64>,
    pub split_equity: f64,
    pub trials: u64,
}

impl EquityReport {
    pub fn zero(n_players: usize) -> Self {
        EquityReport {
            player_equities: vec![0.0; n_players],
            split_equity: 0.0,
            trials: 0,
        }
    }
}

/// Accumulates wins/splits across completions or samples. `wins[p]` counts
/// outright wins for player `p`; `splits` counts pots that were chopped,
/// weighted by how many players shared the chop (tracked as a fractional
/// share so the final normalization is exact).
#[derive(Debug, Clone)]
pub struct Tally {
    pub wins: Vec<u64>,
    pub split_shares: Vec<f64>,
    pub trials: u64,
}

impl Tally {
    pub fn new(n_players: usize) -> Self {
        Tally {
            wins: vec![0u64; n_players],
            split_shares: vec![0.0; n_players],
            trials: 0,
        }
    }

    pub fn merge(&mut self, other: &Tally) {
        for i in 0..self.wins.len() {
            self.wins[i] += other.wins[i];
            self.split_shares[i] += other.split_shares[i];
        }
        self.trials += other.trials;
    }

    /// Records one completion's outcome: `winners` holds the index of every
    /// player tied for the best strength.
    pub fn record(&mut self, winners: &[usize]) {
        self.trials += 1;
        if winners.len() == 1 {
            self.wins[winners[0]] += 1;
        } else {
            let share = 1.0 / winners.len() as f64;
            for &p in winners {
                self.split_shares[p] += share;
            }
        }
    }

    pub fn report(&self) -> EquityReport {
        let n = self.wins.len();
        if self.trials == 0 {
            return EquityReport::zero(n);
        }
        let total = self.trials as f64;
        let mut player_equities = vec![0.0; n];
        let mut split_equity = 0.0;
        for i in 0..n {
            let wins = self.wins[i] as f64 / total;
            let splits = self.split_shares[i] / total;
            player_equities[i] = wins + splits;
            split_equity += splits;
        }
        EquityReport { player_equities, split_equity, trials: self.trials }
    }
}

/// Given a slice of strengths (one per player, in player order), returns the
/// indices of every player tied for the maximum.
pub fn winners_of(strengths: &[u32]) -> Vec<usize> {
    let best = strengths.iter().copied().max().unwrap_or(0);
    strengths
        .iter()
        .enumerate()
        .filter(|&(_, &s)| s == best)
        .map(|(i, _)| i)
        .collect()
}
