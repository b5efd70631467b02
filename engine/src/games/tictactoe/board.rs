use std::fmt;
use std::str::FromStr;

use super::error::GameError;
use super::types::{BOARD_SIZE, Cell, Mark};

/// 3x3 board stored row-major; index 0 is top-left, 8 is bottom-right.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [Cell; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Cell; BOARD_SIZE] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Result<Cell, GameError> {
        self.cells
            .get(index)
            .copied()
            .ok_or(GameError::InvalidIndex { index })
    }

    pub fn is_cell_free(&self, index: usize) -> Result<bool, GameError> {
        Ok(self.get(index)?.is_empty())
    }

    /// Leaves the board untouched when it returns an error.
    pub fn apply_move(&mut self, mark: Mark, index: usize) -> Result<(), GameError> {
        if !self.is_cell_free(index)? {
            return Err(GameError::IllegalMove { index });
        }
        self.cells[index] = Cell::Marked(mark);
        Ok(())
    }

    /// Independent copy for lookahead; mutating it never touches `self`.
    pub fn snapshot(&self) -> Board {
        *self
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    pub fn free_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(index, _)| index)
            .collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }
}

/// Accepts a human move only on a free cell and hands the index back.
pub fn validate_human_move(board: &Board, index: usize) -> Result<usize, GameError> {
    if board.is_cell_free(index)? {
        Ok(index)
    } else {
        Err(GameError::IllegalMove { index })
    }
}

impl FromStr for Board {
    type Err = GameError;

    /// Parses `X`, `O` and `.`/`_`/`-` for empty; `/` and whitespace are
    /// separators, so `"XOX/OXO/O.X"` is a full row-major board.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = [Cell::Empty; BOARD_SIZE];
        let mut count = 0;

        for ch in s.chars().filter(|c| *c != '/' && !c.is_whitespace()) {
            if count == BOARD_SIZE {
                return Err(GameError::MalformedBoard {
                    reason: format!("more than {} cells", BOARD_SIZE),
                });
            }
            cells[count] = match ch.to_ascii_uppercase() {
                'X' => Cell::Marked(Mark::X),
                'O' => Cell::Marked(Mark::O),
                '.' | '_' | '-' => Cell::Empty,
                other => {
                    return Err(GameError::MalformedBoard {
                        reason: format!("unexpected character '{}'", other),
                    });
                }
            };
            count += 1;
        }

        if count != BOARD_SIZE {
            return Err(GameError::MalformedBoard {
                reason: format!("expected {} cells, got {}", BOARD_SIZE, count),
            });
        }

        Ok(Self::from_cells(cells))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.cells.chunks(3).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for cell in chunk {
                let ch = cell.mark().map_or('.', |mark| mark.symbol());
                write!(f, "{}", ch)?;
            }
        }
        Ok(())
    }
}
