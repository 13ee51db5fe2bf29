//! Run detection: finding N same-owner cells along a row, column, or diagonal.

use std::ops::Range;

use super::{Cell, Grid, Player};

/// The four line directions a run can follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Left to right along a row
    Horizontal,
    /// Top to bottom along a column
    Vertical,
    /// Top-left to bottom-right (\)
    DiagonalDown,
    /// Bottom-left to top-right (/)
    DiagonalUp,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DiagonalDown,
        Direction::DiagonalUp,
    ];

    /// Row and column deltas of one step.
    fn step(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::DiagonalDown => (1, 1),
            Direction::DiagonalUp => (-1, 1),
        }
    }

    /// Starting rows and columns for which a line of `len` cells stays inside
    /// a `rows`×`cols` grid.
    fn start_ranges(self, rows: usize, cols: usize, len: usize) -> (Range<usize>, Range<usize>) {
        let row_starts = starts(rows, len);
        let col_starts = starts(cols, len);
        match self {
            Direction::Horizontal if col_starts > 0 => (0..rows, 0..col_starts),
            Direction::Vertical if row_starts > 0 => (0..row_starts, 0..cols),
            Direction::DiagonalDown => (0..row_starts, 0..col_starts),
            Direction::DiagonalUp if row_starts > 0 => (len - 1..rows, 0..col_starts),
            _ => (0..0, 0..0),
        }
    }
}

/// Number of positions a line of `len` can start at along an axis of `extent`.
fn starts(extent: usize, len: usize) -> usize {
    if len == 0 || len > extent {
        0
    } else {
        extent - len + 1
    }
}

/// A line of `len` cells starting at (`row`, `col`), fully inside the grid it
/// was enumerated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Window {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
    pub len: usize,
}

impl Window {
    /// Coordinates covered by this window, in order from the start cell.
    pub fn coords(&self) -> impl Iterator<Item = (usize, usize)> {
        let Window { row, col, len, .. } = *self;
        let direction = self.direction;
        (0..len).map(move |i| match direction {
            Direction::Horizontal => (row, col + i),
            Direction::Vertical => (row + i, col),
            Direction::DiagonalDown => (row + i, col + i),
            Direction::DiagonalUp => (row - i, col + i),
        })
    }

    /// Cells covered by this window. `grid` must have the dimensions the
    /// window was enumerated for.
    pub fn cells<'a>(&self, grid: &'a Grid) -> impl Iterator<Item = Cell> + 'a {
        self.coords().map(move |(row, col)| grid.at(row, col))
    }
}

/// Every window of length `len` that fits inside a `rows`×`cols` grid, in all
/// four directions. Yields nothing when `len` is zero or fits no axis.
pub fn windows(rows: usize, cols: usize, len: usize) -> impl Iterator<Item = Window> {
    Direction::ALL.into_iter().flat_map(move |direction| {
        let (row_range, col_range) = direction.start_ranges(rows, cols, len);
        row_range.flat_map(move |row| {
            col_range.clone().map(move |col| Window {
                row,
                col,
                direction,
                len,
            })
        })
    })
}

/// True iff `player` owns `n` consecutive cells in some direction.
pub fn has_run(grid: &Grid, player: Player, n: usize) -> bool {
    let owned = player.to_cell();
    windows(grid.rows(), grid.cols(), n).any(|window| window.cells(grid).all(|cell| cell == owned))
}

/// Check whether the token at (`row`, `col`) is part of a run of at least `n`.
///
/// Cheaper than [`has_run`] after a single drop since only lines through the
/// new token can have changed.
pub fn run_through(grid: &Grid, row: usize, col: usize, n: usize) -> bool {
    let Some(Cell::Owned(player)) = grid.get(row, col) else {
        return false;
    };
    if n == 0 {
        return false;
    }
    let owned = player.to_cell();

    Direction::ALL.into_iter().any(|direction| {
        let (dr, dc) = direction.step();
        // Count the current token, then extend both ways
        let mut count = 1;
        for sign in [1isize, -1] {
            let mut r = row as isize + dr * sign;
            let mut c = col as isize + dc * sign;
            while r >= 0
                && c >= 0
                && grid.get(r as usize, c as usize) == Some(owned)
            {
                count += 1;
                r += dr * sign;
                c += dc * sign;
            }
        }
        count >= n
    })
}

/// Ownership tally of a single window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowCount {
    pub own: usize,
    pub opponent: usize,
    pub empty: usize,
}

/// Count cells owned by `player`, by their opponent, and empty.
pub fn count_window<I>(cells: I, player: Player) -> WindowCount
where
    I: IntoIterator<Item = Cell>,
{
    cells
        .into_iter()
        .fold(WindowCount::default(), |mut count, cell| {
            match cell.owner() {
                Some(owner) if owner == player => count.own += 1,
                Some(_) => count.opponent += 1,
                None => count.empty += 1,
            }
            count
        })
}
