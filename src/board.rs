//! The 3x3 grid shared by the human and the computer

use anyhow::{anyhow, Result};

use crate::{CELLS, SIZE};

/// One of the two sides of a game
///
/// `First` always plays `X` and moves first.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Player {
    First,
    Second,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    pub fn mark(self) -> char {
        match self {
            Player::First => 'X',
            Player::Second => 'O',
        }
    }

    pub fn from_mark(mark: char) -> Option<Self> {
        match mark.to_ascii_uppercase() {
            'X' => Some(Player::First),
            'O' => Some(Player::Second),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Cell {
    Empty,
    Mark(Player),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            _ => false,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Empty
    }
}

/// A (row, column) coordinate on the board, zero-indexed
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn in_range(&self) -> bool {
        self.row < SIZE && self.col < SIZE
    }

    /// Converts a keypad position (1-9, row-major from the top left) to a move
    pub fn from_position(position: usize) -> Option<Self> {
        match position {
            1..=CELLS => Some(Self::new((position - 1) / SIZE, (position - 1) % SIZE)),
            _ => None,
        }
    }

    /// The keypad position (1-9) of this move
    pub fn position(&self) -> usize {
        self.row * SIZE + self.col + 1
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The game grid
///
/// Cells are stored row-major, top-to-bottom and left-to-right. Every
/// operation touches at most the targeted cell, so the search can simulate a
/// move with [`place`](Board::place) and undo it with [`clear`](Board::clear)
/// without copying the board.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Board {
    cells: [Cell; CELLS],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; CELLS],
        }
    }

    /// Parses a board from a layout string of 9 cells, `X`, `O` or `.`
    ///
    /// Whitespace and `|` separators are ignored, so `"XO. | .X. | ..O"` is accepted.
    pub fn from_layout<S: AsRef<str>>(layout: S) -> Result<Self> {
        let mut board = Self::new();
        let mut index = 0;

        for cell_char in layout.as_ref().chars() {
            if cell_char.is_whitespace() || cell_char == '|' {
                continue;
            }
            if index == CELLS {
                return Err(anyhow!("layout has more than {} cells", CELLS));
            }
            board.cells[index] = match cell_char {
                '.' | '_' | '-' => Cell::Empty,
                mark => match Player::from_mark(mark) {
                    Some(player) => Cell::Mark(player),
                    None => return Err(anyhow!("could not parse '{}' as a cell", mark)),
                },
            };
            index += 1;
        }

        if index != CELLS {
            return Err(anyhow!("layout has {} cells, expected {}", index, CELLS));
        }
        Ok(board)
    }

    fn index(row: usize, col: usize) -> usize {
        debug_assert!(row < SIZE && col < SIZE, "cell ({}, {}) off the board", row, col);
        row * SIZE + col
    }

    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[Self::index(row, col)]
    }

    pub fn is_empty(&self, row: usize, col: usize) -> bool {
        self.cell(row, col).is_empty()
    }

    pub fn place(&mut self, row: usize, col: usize, player: Player) {
        let index = Self::index(row, col);
        debug_assert!(self.cells[index].is_empty(), "cell ({}, {}) already taken", row, col);
        self.cells[index] = Cell::Mark(player);
    }

    pub fn clear(&mut self, row: usize, col: usize) {
        self.cells[Self::index(row, col)] = Cell::Empty;
    }

    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_empty()).count()
    }

    /// Iterates over the empty cells in row-major order
    pub fn empty_cells(&self) -> impl Iterator<Item = Move> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(index, _)| Move::new(index / SIZE, index % SIZE))
    }

    /// Iterates over the rows of the board, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(SIZE)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (row_index, row) in self.rows().enumerate() {
            if row_index > 0 {
                writeln!(f)?;
            }
            for cell in row {
                let symbol = match cell {
                    Cell::Empty => '.',
                    Cell::Mark(player) => player.mark(),
                };
                write!(f, "{}", symbol)?;
            }
        }
        Ok(())
    }
}
