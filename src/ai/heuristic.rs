use serde::{Deserialize, Serialize};

use crate::game::runs::{count_window, windows, WindowCount};
use crate::game::{Grid, Player};

/// Trait for evaluating a grid from one player's perspective.
pub trait Heuristic: Send {
    fn evaluate(&self, grid: &Grid, player: Player, run_length: usize) -> f64;
}

/// Score weights for [`WindowHeuristic`].
///
/// Only the ordering matters: `complete > open_one > open_two > 0`, and
/// `block` (subtracted) must exceed `open_two`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicWeights {
    /// Per own token in the center column
    pub center: f64,
    /// Window fully owned
    pub complete: f64,
    /// N-1 owned, one empty
    pub open_one: f64,
    /// N-2 owned, two empty
    pub open_two: f64,
    /// Penalty for N-1 opponent tokens with one empty
    pub block: f64,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        HeuristicWeights {
            center: 3.0,
            complete: 100.0,
            open_one: 5.0,
            open_two: 2.0,
            block: 4.0,
        }
    }
}

/// Default heuristic: a center-column bonus plus a score for every window of
/// the run length.
#[derive(Debug, Clone, Default)]
pub struct WindowHeuristic {
    weights: HeuristicWeights,
}

impl WindowHeuristic {
    pub fn new(weights: HeuristicWeights) -> Self {
        WindowHeuristic { weights }
    }

    // Tiers that would match empty or near-empty windows are skipped for
    // run lengths below 3.
    fn score_window(&self, count: WindowCount, n: usize) -> f64 {
        let w = &self.weights;
        let mut score = 0.0;

        if count.own == n {
            score += w.complete;
        } else if n >= 2 && count.own == n - 1 && count.empty == 1 {
            score += w.open_one;
        } else if n >= 3 && count.own == n - 2 && count.empty == 2 {
            score += w.open_two;
        }

        if n >= 2 && count.opponent == n - 1 && count.empty == 1 {
            score -= w.block;
        }

        score
    }
}

impl Heuristic for WindowHeuristic {
    fn evaluate(&self, grid: &Grid, player: Player, run_length: usize) -> f64 {
        let mut score = 0.0;

        // Center column bonus
        if grid.cols() > 0 {
            let center = grid.center_column();
            let own = (0..grid.rows())
                .filter(|&row| grid.get(row, center) == Some(player.to_cell()))
                .count();
            score += own as f64 * self.weights.center;
        }

        for window in windows(grid.rows(), grid.cols(), run_length) {
            let count = count_window(window.cells(grid), player);
            score += self.score_window(count, run_length);
        }

        score
    }
}
