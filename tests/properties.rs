use proptest::prelude::*;

use spin_connect::ai::minimax::{Minimax, LOSS_SCORE, WIN_SCORE};
use spin_connect::ai::{Heuristic, WindowHeuristic};
use spin_connect::game::rotation::rotate;
use spin_connect::game::{has_run, rotate_and_settle, Grid, Player, Rotation};

/// Player to move after `i` attempted drops.
fn mover(i: usize) -> Player {
    if i % 2 == 0 {
        Player::One
    } else {
        Player::Two
    }
}

/// Grids reachable by dropping tokens, failed drops included.
fn grid_strategy(max_side: usize) -> impl Strategy<Value = Grid> {
    (
        1..=max_side,
        1..=max_side,
        prop::collection::vec(0usize..max_side + 1, 0..48),
    )
        .prop_map(|(rows, cols, moves)| {
            let mut grid = Grid::new(rows, cols);
            for (i, col) in moves.into_iter().enumerate() {
                let _ = grid.drop_token(col, mover(i));
            }
            grid
        })
}

/// Direct scan of every cell and direction.
fn reference_has_run(grid: &Grid, player: Player, n: usize) -> bool {
    if n == 0 {
        return false;
    }
    let owned = Some(player.to_cell());
    let steps: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];
    for row in 0..grid.rows() as isize {
        for col in 0..grid.cols() as isize {
            for (dr, dc) in steps {
                let full = (0..n as isize).all(|i| {
                    let (r, c) = (row + dr * i, col + dc * i);
                    r >= 0 && c >= 0 && grid.get(r as usize, c as usize) == owned
                });
                if full {
                    return true;
                }
            }
        }
    }
    false
}

/// Exhaustive minimax over the same leaf rules.
fn reference_minimax(
    grid: &Grid,
    depth: usize,
    maximizing: bool,
    player: Player,
    n: usize,
    h: &dyn Heuristic,
) -> f64 {
    if has_run(grid, player, n) {
        return WIN_SCORE + depth as f64;
    }
    if has_run(grid, player.other(), n) {
        return LOSS_SCORE - depth as f64;
    }
    let columns = grid.valid_columns();
    if columns.is_empty() {
        return 0.0;
    }
    if depth == 0 {
        return h.evaluate(grid, player, n);
    }
    let mover = if maximizing { player } else { player.other() };
    let scores = columns.into_iter().map(|col| {
        let mut child = grid.clone();
        child.drop_token(col, mover).unwrap();
        reference_minimax(&child, depth - 1, !maximizing, player, n, h)
    });
    if maximizing {
        scores.fold(f64::NEG_INFINITY, f64::max)
    } else {
        scores.fold(f64::INFINITY, f64::min)
    }
}

proptest! {
    #[test]
    fn drop_keeps_columns_contiguous(
        grid in grid_strategy(8),
        col in 0usize..9,
        one in any::<bool>(),
    ) {
        prop_assert!(grid.is_settled());
        let player = if one { Player::One } else { Player::Two };
        let mut after = grid.clone();
        match after.drop_token(col, player) {
            Ok(mv) => {
                prop_assert_eq!(Some(mv.row), grid.next_open_row(col));
                prop_assert_eq!(after.token_count(), grid.token_count() + 1);
            }
            Err(_) => {
                prop_assert!(!grid.is_valid_column(col));
                prop_assert_eq!(&after, &grid);
            }
        }
        prop_assert!(after.is_settled());
    }

    #[test]
    fn rotation_preserves_tokens_and_settles(
        grid in grid_strategy(8),
        turns in prop::sample::select(vec![-1, 1, 2]),
    ) {
        let result = rotate_and_settle(&grid, turns).unwrap();
        let rotated = rotate(&grid, Rotation::try_from(turns).unwrap());
        let out = &result.grid;

        prop_assert!(out.is_settled());
        if turns == 2 {
            prop_assert_eq!((out.rows(), out.cols()), (grid.rows(), grid.cols()));
        } else {
            prop_assert_eq!((out.rows(), out.cols()), (grid.cols(), grid.rows()));
        }
        for player in Player::ALL {
            prop_assert_eq!(out.count(player), grid.count(player));
        }
        prop_assert_eq!(result.relocations.len(), grid.token_count());
        for r in &result.relocations {
            prop_assert_eq!(rotated.get(r.from_row, r.from_col), Some(r.player.to_cell()));
            prop_assert_eq!(out.get(r.to_row, r.to_col), Some(r.player.to_cell()));
            prop_assert_eq!(r.from_col, r.to_col);
        }
        for pair in result.relocations.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(
                a.from_row > b.from_row || (a.from_row == b.from_row && a.from_col < b.from_col)
            );
        }
    }

    #[test]
    fn quarter_turn_and_back_restores_dimensions(
        grid in grid_strategy(7),
        clockwise_first in any::<bool>(),
    ) {
        let (a, b) = if clockwise_first { (1, -1) } else { (-1, 1) };
        let once = rotate_and_settle(&grid, a).unwrap().grid;
        let back = rotate_and_settle(&once, b).unwrap().grid;
        prop_assert_eq!((back.rows(), back.cols()), (grid.rows(), grid.cols()));
        prop_assert!(back.is_settled());
        prop_assert_eq!(back.token_count(), grid.token_count());
    }

    #[test]
    fn full_bottom_row_survives_round_trip(
        rows in 1usize..7,
        owners in prop::collection::vec(any::<bool>(), 1..7),
    ) {
        let mut grid = Grid::new(rows, owners.len());
        for (col, &one) in owners.iter().enumerate() {
            grid.drop_token(col, if one { Player::One } else { Player::Two }).unwrap();
        }
        let once = rotate_and_settle(&grid, 1).unwrap().grid;
        let back = rotate_and_settle(&once, -1).unwrap().grid;
        prop_assert_eq!(back, grid);
    }

    #[test]
    fn has_run_matches_direct_scan(grid in grid_strategy(7), n in 0usize..6) {
        for player in Player::ALL {
            prop_assert_eq!(
                has_run(&grid, player, n),
                reference_has_run(&grid, player, n)
            );
        }
    }

    #[test]
    fn alpha_beta_agrees_with_exhaustive_search(
        moves in prop::collection::vec(0usize..5, 0..12),
        one in any::<bool>(),
        depth in 1usize..4,
    ) {
        let mut grid = Grid::new(4, 5);
        for (i, col) in moves.into_iter().enumerate() {
            let _ = grid.drop_token(col, mover(i));
        }
        let player = if one { Player::One } else { Player::Two };
        let h = WindowHeuristic::default();

        let expected = reference_minimax(&grid, depth, true, player, 3, &h);
        let first = Minimax::new(&h, 3, player).search(&grid, depth);
        let second = Minimax::new(&h, 3, player).search(&grid, depth);

        prop_assert_eq!(first.score, expected);
        prop_assert_eq!(first, second);
        if let Some(column) = first.column {
            prop_assert!(grid.is_valid_column(column));
        }
    }
}
