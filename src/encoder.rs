//! Symbol to grid: each set bit of a 7-bit code lights the cell chosen by
//! the [`Placement`].

use tracing::{debug, trace, warn};

use crate::config::{EncoderConfig, WidthPolicy};
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::placement::Placement;
use crate::SYMBOL_BITS;

const SYMBOL_MASK: u32 = (1 << SYMBOL_BITS as u32) - 1;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CharacterEncoder {
    placement: Placement,
    width_policy: WidthPolicy,
}

impl CharacterEncoder {
    pub fn new(placement: Placement, width_policy: WidthPolicy) -> Self {
        CharacterEncoder {
            placement,
            width_policy,
        }
    }

    pub fn from_config(config: &EncoderConfig) -> Result<Self> {
        Ok(CharacterEncoder::new(config.placement()?, config.width_policy))
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn width_policy(&self) -> WidthPolicy {
        self.width_policy
    }

    /// Encode one symbol code.
    ///
    /// # Errors
    /// `InvalidSymbolWidth` if `symbol` has bits above bit 6 and the policy
    /// is [`WidthPolicy::Reject`].
    pub fn encode(&self, symbol: u32) -> Result<Grid> {
        let code = self.narrow(symbol)?;
        let mut grid = Grid::zeroed();
        for bit in 0..SYMBOL_BITS {
            if code & (1 << bit) != 0 {
                grid.set(self.placement.place(bit));
            }
        }
        trace!(symbol, ones = grid.count_ones(), "encoded symbol");
        Ok(grid)
    }

    pub fn encode_char(&self, ch: char) -> Result<Grid> {
        self.encode(ch as u32)
    }

    fn narrow(&self, symbol: u32) -> Result<u32> {
        if symbol & !SYMBOL_MASK == 0 {
            return Ok(symbol);
        }
        let bits = u32::BITS - symbol.leading_zeros();
        match self.width_policy {
            WidthPolicy::Reject => {
                debug!(symbol, bits, "rejecting oversized symbol");
                Err(Error::InvalidSymbolWidth { symbol, bits })
            }
            WidthPolicy::Truncate => {
                warn!(symbol, bits, "truncating symbol to 7 bits");
                Ok(symbol & SYMBOL_MASK)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::Cell;
    use crate::{COLS, ROWS};
    use proptest::prelude::*;

    #[test]
    fn test_encode_a_reference() {
        let grid = CharacterEncoder::default().encode_char('A').unwrap();
        let ones: Vec<_> = grid.ones().collect();
        assert_eq!(ones, vec![Cell { row: 0, col: 0 }, Cell { row: 6, col: 0 }]);
    }

    #[test]
    fn test_spread_full_code_fills_seven_cells() {
        let encoder = CharacterEncoder::new(Placement::spread(), WidthPolicy::Reject);
        let grid = encoder.encode(0x7f).unwrap();
        assert_eq!(grid.count_ones(), 7);
        let cols: std::collections::HashSet<_> = grid.ones().map(|c| c.col).collect();
        assert!(cols.len() > 1);
    }

    #[test]
    fn test_oversized_symbol_rejected_by_default() {
        let encoder = CharacterEncoder::default();
        assert!(matches!(
            encoder.encode_char('é'),
            Err(Error::InvalidSymbolWidth { symbol: 0xe9, bits: 8 })
        ));
        assert!(matches!(
            encoder.encode(0x1_0000),
            Err(Error::InvalidSymbolWidth { bits: 17, .. })
        ));
    }

    #[test]
    fn test_truncate_policy_keeps_low_bits() {
        let encoder = CharacterEncoder::new(Placement::reference(), WidthPolicy::Truncate);
        // 0xC1 & 0x7f == 0x41 ('A')
        assert_eq!(encoder.encode(0xc1).unwrap(), encoder.encode(0x41).unwrap());
    }

    #[test]
    fn test_from_config_rejects_bad_stride() {
        let config = EncoderConfig {
            stride: 0,
            ..EncoderConfig::default()
        };
        assert!(CharacterEncoder::from_config(&config).is_err());
    }

    proptest! {
        #[test]
        fn test_popcount_matches(
            symbol in 0u32..128,
            stride in prop::sample::select(vec![5usize, 6, 8, 11]),
        ) {
            let placement = Placement::with_stride(stride).unwrap();
            let encoder = CharacterEncoder::new(placement, WidthPolicy::Reject);
            let grid = encoder.encode(symbol).unwrap();
            prop_assert_eq!(grid.count_ones(), symbol.count_ones());
            prop_assert_eq!(grid, encoder.encode(symbol).unwrap());
        }

        #[test]
        fn test_reference_never_leaves_column_zero(symbol in 0u32..128) {
            let grid = CharacterEncoder::default().encode(symbol).unwrap();
            for row in 0..ROWS {
                for col in 1..COLS {
                    prop_assert_eq!(grid.get(row, col), 0);
                }
            }
        }

        #[test]
        fn test_truncation_matches_low_bits(symbol in any::<u32>()) {
            let encoder = CharacterEncoder::new(Placement::spread(), WidthPolicy::Truncate);
            prop_assert_eq!(
                encoder.encode(symbol).unwrap(),
                encoder.encode(symbol & 0x7f).unwrap()
            );
        }
    }
}
