//! The 7×5 bit matrix that carries one encoded symbol.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::placement::Cell;
use crate::{COLS, ROWS};

type Cells = [[u8; COLS]; ROWS];

/// Fixed 7 rows × 5 columns of bits, stored one byte per cell (0 or 1).
///
/// Serialized as a bare 7×5 matrix. Deserializing rejects any cell that is
/// not 0 or 1.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Cells", into = "Cells")]
pub struct Grid {
    cells: Cells,
}

impl TryFrom<Cells> for Grid {
    type Error = Error;

    fn try_from(cells: Cells) -> Result<Self, Error> {
        for (row, bits) in cells.iter().enumerate() {
            for (col, &value) in bits.iter().enumerate() {
                if value > 1 {
                    return Err(Error::InvalidCell { row, col, value });
                }
            }
        }
        Ok(Grid { cells })
    }
}

impl From<Grid> for Cells {
    fn from(grid: Grid) -> Self {
        grid.cells
    }
}

impl Grid {
    pub fn zeroed() -> Self {
        Grid::default()
    }

    /// Bit at (`row`, `col`). Panics outside the grid.
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row][col]
    }

    pub fn set(&mut self, cell: Cell) {
        self.cells[cell.row][cell.col] = 1;
    }

    /// Flip one cell. Used to simulate corruption.
    pub fn toggle(&mut self, row: usize, col: usize) {
        self.cells[row][col] ^= 1;
    }

    pub fn row(&self, row: usize) -> &[u8; COLS] {
        &self.cells[row]
    }

    pub fn column(&self, col: usize) -> [u8; ROWS] {
        let mut out = [0u8; ROWS];
        for (row, bit) in out.iter_mut().enumerate() {
            *bit = self.cells[row][col];
        }
        out
    }

    /// Even parity of a row: sum of its bits mod 2.
    pub fn row_parity(&self, row: usize) -> u8 {
        self.cells[row].iter().sum::<u8>() % 2
    }

    pub fn column_parity(&self, col: usize) -> u8 {
        self.column(col).iter().sum::<u8>() % 2
    }

    /// Number of set cells.
    pub fn count_ones(&self) -> u32 {
        self.cells.iter().flatten().map(|&b| b as u32).sum()
    }

    /// Set cells in row-major order.
    pub fn ones(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, bits)| {
            bits.iter()
                .enumerate()
                .filter(|(_, b)| **b == 1)
                .map(move |(col, _)| Cell { row, col })
        })
    }

    /// Row-major cell bytes, as hashed by [`crate::Message::digest`].
    pub fn as_bytes(&self) -> [u8; crate::CELLS] {
        let mut out = [0u8; crate::CELLS];
        for (i, &b) in self.cells.iter().flatten().enumerate() {
            out[i] = b;
        }
        out
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for &b in row {
                f.write_str(if b == 1 { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}
