//! Row/column check values for a grid.
//!
//! Row checks are row parity offset by the key:
//! `row_checks[i] = (parity(row i) + key mod 13) mod 2`. Since only the
//! parity of the residue matters, the key either flips every row check or
//! none of them. Column checks are plain even parity and ignore the key.
//!
//! The harmonic checksum folds the linear index of every set cell into a
//! value mod 13. It catches some multi-cell corruptions that leave every
//! row and column parity intact.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::{COLS, ROWS};

/// Keys live in `[0, KEY_MODULUS)`.
pub const KEY_MODULUS: u32 = 13;

const HARMONIC_STEP: usize = 5;

/// Verification key, reduced into `[0, 13)` on construction.
///
/// Serialized as a bare integer; deserializing goes through
/// [`VerificationKey::new`], so out-of-range input is reduced too.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct VerificationKey(u32);

impl VerificationKey {
    pub const fn new(raw: u32) -> Self {
        VerificationKey(raw % KEY_MODULUS)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// The bit every row check is offset by.
    pub fn parity(&self) -> u8 {
        (self.0 % KEY_MODULUS % 2) as u8
    }

    /// A key whose row checks are the complement of this key's.
    pub fn with_opposite_parity(&self) -> Self {
        VerificationKey::new(u32::from(1 - self.parity()))
    }
}

impl From<u32> for VerificationKey {
    fn from(raw: u32) -> Self {
        VerificationKey::new(raw)
    }
}

impl From<VerificationKey> for u32 {
    fn from(key: VerificationKey) -> Self {
        key.0
    }
}

/// Check values computed from one grid and one key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct VerificationRecord {
    pub row_checks: [u8; ROWS],
    pub col_checks: [u8; COLS],
    pub harmonic: u8,
}

/// Compute the verification record for `grid` under `key`.
pub fn verify(grid: &Grid, key: VerificationKey) -> VerificationRecord {
    let mut row_checks = [0u8; ROWS];
    for (row, check) in row_checks.iter_mut().enumerate() {
        *check = (grid.row_parity(row) + key.parity()) % 2;
    }

    let mut col_checks = [0u8; COLS];
    for (col, check) in col_checks.iter_mut().enumerate() {
        *check = grid.column_parity(col);
    }

    VerificationRecord {
        row_checks,
        col_checks,
        harmonic: harmonic_checksum(grid),
    }
}

/// Sum of `(i * 5) mod 13` over the linear index `i` of every set cell, mod 13.
pub fn harmonic_checksum(grid: &Grid) -> u8 {
    let sum = grid
        .ones()
        .map(|cell| (cell.linear() * HARMONIC_STEP) % KEY_MODULUS as usize)
        .fold(0, |acc, term| (acc + term) % KEY_MODULUS as usize);
    sum as u8
}

/// Recompute checks for `grid` and compare them with `record`.
///
/// Rows are compared first, then columns, then the harmonic checksum; the
/// first difference is returned.
pub fn check_integrity(
    grid: &Grid,
    record: &VerificationRecord,
    key: VerificationKey,
) -> Result<()> {
    let expected = verify(grid, key);

    for row in 0..ROWS {
        if expected.row_checks[row] != record.row_checks[row] {
            return Err(Error::RowCheckMismatch {
                row,
                expected: expected.row_checks[row],
                actual: record.row_checks[row],
            });
        }
    }

    for col in 0..COLS {
        if expected.col_checks[col] != record.col_checks[col] {
            return Err(Error::ColumnCheckMismatch {
                col,
                expected: expected.col_checks[col],
                actual: record.col_checks[col],
            });
        }
    }

    if expected.harmonic != record.harmonic {
        return Err(Error::HarmonicChecksumMismatch {
            expected: expected.harmonic,
            actual: record.harmonic,
        });
    }

    Ok(())
}
