use std::fmt;
use std::str::FromStr;

use crate::error::{MoveError, ParseGridError};

use super::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Owned(Player),
}

impl Cell {
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Owned(player) => Some(player),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Owned(player) => char::from(b'0' + player.id()),
        }
    }
}

/// One token placement. The landing row is derived by the grid, never chosen
/// by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub column: usize,
    pub row: usize,
    pub player: Player,
}

/// An R×C matrix of cell owners, row 0 at the top.
///
/// Every public constructor and mutation keeps tokens stacked from the bottom
/// of each column with no gaps underneath them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new empty grid
    pub fn new(rows: usize, cols: usize) -> Self {
        Grid {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get the cell at a specific position, `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.rows && col < self.cols {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// Unchecked read for coordinates already known to be in bounds.
    pub(crate) fn at(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.cols + col]
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row * self.cols + col] = cell;
    }

    /// True if `col` is on the grid and its top cell is still empty.
    pub fn is_valid_column(&self, col: usize) -> bool {
        self.get(0, col) == Some(Cell::Empty)
    }

    /// Lowest empty row in a column, scanning from the bottom up.
    pub fn next_open_row(&self, col: usize) -> Option<usize> {
        if col >= self.cols {
            return None;
        }
        (0..self.rows).rev().find(|&row| self.at(row, col).is_empty())
    }

    /// Drop a token in a column. The grid is left untouched on error.
    pub fn drop_token(&mut self, col: usize, player: Player) -> Result<Move, MoveError> {
        if col >= self.cols {
            return Err(MoveError::InvalidColumn(col));
        }
        let row = self.next_open_row(col).ok_or(MoveError::ColumnFull(col))?;
        self.set(row, col, player.to_cell());
        Ok(Move {
            column: col,
            row,
            player,
        })
    }

    /// Playable columns in ascending order
    pub fn valid_columns(&self) -> Vec<usize> {
        (0..self.cols)
            .filter(|&col| self.is_valid_column(col))
            .collect()
    }

    /// Check if no column can take another token
    pub fn is_full(&self) -> bool {
        (0..self.cols).all(|col| !self.is_valid_column(col))
    }

    pub fn center_column(&self) -> usize {
        self.cols / 2
    }

    /// Number of tokens owned by `player`
    pub fn count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|&&cell| cell == player.to_cell())
            .count()
    }

    pub fn token_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// First token found with an empty cell directly below it, if any.
    pub fn first_floating(&self) -> Option<(usize, usize)> {
        (0..self.rows.saturating_sub(1))
            .flat_map(|row| (0..self.cols).map(move |col| (row, col)))
            .find(|&(row, col)| !self.at(row, col).is_empty() && self.at(row + 1, col).is_empty())
    }

    /// True when every column is stacked from the bottom with no gaps.
    pub fn is_settled(&self) -> bool {
        self.first_floating().is_none()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.cols {
                write!(f, "{}", self.at(row, col).symbol())?;
            }
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = ParseGridError;

    /// Parse the text form: one line per row, top row first, `.` for empty and
    /// `1`/`2` for owners. Whitespace inside a line and blank lines are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows: Vec<Vec<Cell>> = Vec::new();
        for line in s.lines() {
            let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.is_empty() {
                continue;
            }
            let row = rows.len();
            let cells = symbols
                .into_iter()
                .enumerate()
                .map(|(col, ch)| match ch {
                    '.' => Ok(Cell::Empty),
                    _ => ch
                        .to_digit(10)
                        .and_then(|id| Player::from_id(id as u8))
                        .map(Cell::Owned)
                        .ok_or(ParseGridError::InvalidCell { row, col, ch }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(cells);
        }

        let cols = rows.first().map(Vec::len).ok_or(ParseGridError::Empty)?;
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != cols)
        {
            return Err(ParseGridError::RaggedRow {
                row,
                expected: cols,
                found,
            });
        }

        let grid = Grid {
            rows: rows.len(),
            cols,
            cells: rows.into_iter().flatten().collect(),
        };
        match grid.first_floating() {
            Some((row, col)) => Err(ParseGridError::Floating { row, col }),
            None => Ok(grid),
        }
    }
}
