//! Bit placement: which grid cell carries each bit of a symbol.
//!
//! A bit index `b` lands at linear position `(b * stride) mod 35`, read
//! row-major. The reference stride is 5, which puts every bit in column 0
//! (one bit per row). [`Placement::spread`] uses stride 6 so the seven bits
//! cover all five columns instead.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::{CELLS, COLS, SYMBOL_BITS};

/// Stride of the reference scheme.
pub const REFERENCE_STRIDE: usize = COLS;

/// Stride coprime with both 5 and 35, spreading bits across every column.
pub const SPREAD_STRIDE: usize = 6;

/// A (row, col) coordinate inside a grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    /// Row-major index in `[0, 35)`.
    pub fn linear(self) -> usize {
        self.row * COLS + self.col
    }
}

/// Maps bit indices to cells for a fixed stride.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    stride: usize,
}

impl Placement {
    /// Stride 5, bit-for-bit compatible with the reference encoder.
    pub const fn reference() -> Self {
        Placement {
            stride: REFERENCE_STRIDE,
        }
    }

    /// Stride 6: bits 0..7 land in 7 distinct cells across all columns.
    pub const fn spread() -> Self {
        Placement {
            stride: SPREAD_STRIDE,
        }
    }

    /// Build a placement, rejecting strides under which two bits collide.
    pub fn with_stride(stride: usize) -> Result<Self> {
        let mut seen = [false; CELLS];
        for bit in 0..SYMBOL_BITS {
            let pos = linear_position(bit, stride);
            if seen[pos] {
                return Err(Error::InvalidStride { stride });
            }
            seen[pos] = true;
        }
        Ok(Placement { stride })
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Cell for `bit_index`.
    ///
    /// # Panics
    /// If `bit_index >= 7`. Callers only ever pass bit positions of a
    /// 7-bit symbol, so anything else is a bug.
    pub fn place(&self, bit_index: usize) -> Cell {
        assert!(
            bit_index < SYMBOL_BITS,
            "bit index {bit_index} out of range 0..{SYMBOL_BITS}"
        );
        let pos = linear_position(bit_index, self.stride);
        Cell {
            row: pos / COLS,
            col: pos % COLS,
        }
    }

    /// The seven cells in bit order.
    pub fn cells(&self) -> [Cell; SYMBOL_BITS] {
        let mut out = [Cell { row: 0, col: 0 }; SYMBOL_BITS];
        for (bit, cell) in out.iter_mut().enumerate() {
            *cell = self.place(bit);
        }
        out
    }
}

// Reducing the stride first keeps `bit * stride` in range for any stride.
fn linear_position(bit: usize, stride: usize) -> usize {
    (bit * (stride % CELLS)) % CELLS
}

impl Default for Placement {
    fn default() -> Self {
        Placement::reference()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_reference_places_one_bit_per_row() {
        let placement = Placement::reference();
        for bit in 0..SYMBOL_BITS {
            assert_eq!(placement.place(bit), Cell { row: bit, col: 0 });
        }
    }

    #[test]
    fn test_spread_uses_every_column() {
        let cells = Placement::spread().cells();
        let distinct: HashSet<_> = cells.iter().collect();
        assert_eq!(distinct.len(), SYMBOL_BITS);

        let cols: HashSet<_> = cells.iter().map(|c| c.col).collect();
        assert_eq!(cols.len(), COLS);
        assert_eq!(cells[6], Cell { row: 0, col: 1 });
    }

    #[test]
    fn test_colliding_strides_rejected() {
        for stride in [0, 7, 35, 70] {
            assert!(matches!(
                Placement::with_stride(stride),
                Err(Error::InvalidStride { stride: s }) if s == stride
            ));
        }
        assert_eq!(Placement::with_stride(5).unwrap(), Placement::reference());
    }

    #[test]
    fn test_huge_stride_from_config_does_not_overflow() {
        let config =
            crate::config::EncoderConfig::from_json(r#"{"stride": 18446744073709551615}"#)
                .unwrap();
        match config.placement() {
            Ok(placement) => {
                let linear: HashSet<_> = placement.cells().iter().map(|c| c.linear()).collect();
                assert_eq!(linear.len(), SYMBOL_BITS);
            }
            Err(Error::InvalidStride { stride }) => assert_eq!(stride, usize::MAX),
            Err(other) => panic!("unexpected error: {other}"),
        }

        // Strides equal mod 35 place bits identically.
        let big = Placement::with_stride(usize::MAX - usize::MAX % CELLS + 6).unwrap();
        assert_eq!(big.cells(), Placement::spread().cells());
    }

    #[test]
    #[should_panic(expected = "bit index 7 out of range")]
    fn test_place_out_of_range_panics() {
        Placement::reference().place(7);
    }

    proptest! {
        #[test]
        fn test_coprime_stride_is_injective(stride in 1usize..500) {
            prop_assume!(stride % 5 != 0 && stride % 7 != 0);
            let placement = Placement::with_stride(stride).unwrap();
            let linear: HashSet<_> = placement.cells().iter().map(|c| c.linear()).collect();
            prop_assert_eq!(linear.len(), SYMBOL_BITS);
        }

        #[test]
        fn test_place_stays_in_grid(stride in any::<usize>(), bit in 0usize..SYMBOL_BITS) {
            let cell = Placement { stride }.place(bit);
            prop_assert!(cell.row < crate::ROWS);
            prop_assert!(cell.col < COLS);
        }
    }
}
