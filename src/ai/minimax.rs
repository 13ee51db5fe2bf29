use serde::{Deserialize, Serialize};

use crate::game::{has_run, GameState, Grid, Player};

use super::agent::Agent;
use super::heuristic::{Heuristic, HeuristicWeights, WindowHeuristic};

/// Score of a grid where the searching player has a run, before the
/// remaining depth is added.
pub const WIN_SCORE: f64 = 1e14;
/// Score of a grid where the opponent has a run, before the remaining depth
/// is subtracted.
pub const LOSS_SCORE: f64 = -WIN_SCORE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimaxConfig {
    /// Plies searched below the root
    pub depth: usize,
}

impl Default for MinimaxConfig {
    fn default() -> Self {
        MinimaxConfig { depth: 5 }
    }
}

/// Column picked at a node (if any) and its backed-up score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    pub column: Option<usize>,
    pub score: f64,
}

impl SearchResult {
    fn leaf(score: f64) -> Self {
        SearchResult {
            column: None,
            score,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes visited, root included
    pub nodes: u64,
}

/// Depth-bounded minimax with alpha-beta pruning, always scoring from the
/// point of view of `player`.
pub struct Minimax<'a> {
    heuristic: &'a dyn Heuristic,
    run_length: usize,
    player: Player,
    stats: SearchStats,
}

impl<'a> Minimax<'a> {
    pub fn new(heuristic: &'a dyn Heuristic, run_length: usize, player: Player) -> Self {
        Minimax {
            heuristic,
            run_length,
            player,
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Search `grid` from the root: `player` to move, full alpha-beta window.
    pub fn search(&mut self, grid: &Grid, depth: usize) -> SearchResult {
        self.minimax(grid, depth, f64::NEG_INFINITY, f64::INFINITY, true)
    }

    /// One node of the search tree.
    ///
    /// Wins, losses and full grids are checked before `depth`, so a run
    /// completed on the last ply is still scored as a win or loss. Wins score
    /// higher and losses lower the more depth is left, so quicker wins and
    /// slower losses are preferred. When every
    /// branch scores no better than the initial bound, the lowest playable
    /// column is returned.
    pub fn minimax(
        &mut self,
        grid: &Grid,
        depth: usize,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
    ) -> SearchResult {
        self.stats.nodes += 1;
        let opponent = self.player.other();

        if has_run(grid, self.player, self.run_length) {
            return SearchResult::leaf(WIN_SCORE + depth as f64);
        }
        if has_run(grid, opponent, self.run_length) {
            return SearchResult::leaf(LOSS_SCORE - depth as f64);
        }
        let columns = grid.valid_columns();
        let Some(&fallback) = columns.first() else {
            return SearchResult::leaf(0.0);
        };
        if depth == 0 {
            return SearchResult::leaf(self.heuristic.evaluate(grid, self.player, self.run_length));
        }

        let (mover, mut best) = if maximizing {
            (self.player, f64::NEG_INFINITY)
        } else {
            (opponent, f64::INFINITY)
        };
        let mut column = fallback;

        for col in columns {
            let mut child = grid.clone();
            if child.drop_token(col, mover).is_err() {
                continue;
            }
            let score = self.minimax(&child, depth - 1, alpha, beta, !maximizing).score;

            if maximizing {
                if score > best {
                    best = score;
                    column = col;
                }
                alpha = alpha.max(best);
            } else {
                if score < best {
                    best = score;
                    column = col;
                }
                beta = beta.min(best);
            }
            if alpha >= beta {
                break;
            }
        }

        SearchResult {
            column: Some(column),
            score: best,
        }
    }
}

/// Pick a column for `player`. `None` when the grid is already decided or full.
pub fn choose_move(
    grid: &Grid,
    depth: usize,
    player: Player,
    run_length: usize,
    heuristic: &dyn Heuristic,
) -> Option<usize> {
    Minimax::new(heuristic, run_length, player)
        .search(grid, depth)
        .column
}

/// Minimax agent with alpha-beta pruning.
pub struct MinimaxAgent {
    depth: usize,
    heuristic: Box<dyn Heuristic>,
}

impl MinimaxAgent {
    pub fn new(depth: usize) -> Self {
        MinimaxAgent {
            depth,
            heuristic: Box::new(WindowHeuristic::default()),
        }
    }

    pub fn from_config(config: &MinimaxConfig, weights: HeuristicWeights) -> Self {
        Self::with_heuristic(config.depth, Box::new(WindowHeuristic::new(weights)))
    }

    pub fn with_heuristic(depth: usize, heuristic: Box<dyn Heuristic>) -> Self {
        MinimaxAgent { depth, heuristic }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Full search result and statistics for the player to move.
    pub fn analyse(&self, state: &GameState) -> (SearchResult, SearchStats) {
        let mut search = Minimax::new(
            &*self.heuristic,
            state.run_length(),
            state.current_player(),
        );
        let result = search.search(state.grid(), self.depth);
        (result, search.stats())
    }
}

impl Agent for MinimaxAgent {
    fn select_action(&mut self, state: &GameState) -> Option<usize> {
        if state.is_terminal() {
            return None;
        }
        let (result, stats) = self.analyse(state);
        tracing::debug!(
            player = state.current_player().name(),
            column = ?result.column,
            score = result.score,
            nodes = stats.nodes,
            depth = self.depth,
            "minimax search finished"
        );
        result.column
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}
