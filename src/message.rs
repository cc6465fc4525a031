//! Encoded messages: an ordered list of grids with their check values, all
//! verified under one key.
//!
//! # Example
//! ```
//! use protocol7::{Message, VerificationKey};
//!
//! let mut msg = Message::new(Some(VerificationKey::new(5)));
//! msg.encode_str("Hi").unwrap();
//! assert_eq!(msg.len(), 2);
//! assert!(msg.check_integrity().is_ok());
//! ```

use serde::Serialize;
use tracing::debug;
use xxhash_rust::xxh3::xxh3_64;

use crate::config::EncoderConfig;
use crate::encoder::CharacterEncoder;
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::key::{FixedKey, KeySource};
use crate::verify::{check_integrity, verify, VerificationKey, VerificationRecord};
use crate::{CELLS, COLS, ROWS};

/// One symbol's grid together with the checks computed from it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct EncodedSymbol {
    grid: Grid,
    #[serde(flatten)]
    record: VerificationRecord,
}

impl EncodedSymbol {
    /// Encode `symbol` and verify it under `key`.
    pub fn encode(encoder: &CharacterEncoder, symbol: u32, key: VerificationKey) -> Result<Self> {
        let grid = encoder.encode(symbol)?;
        let record = verify(&grid, key);
        Ok(EncodedSymbol { grid, record })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cell(&self, row: usize, col: usize) -> u8 {
        self.grid.get(row, col)
    }

    pub fn record(&self) -> &VerificationRecord {
        &self.record
    }

    pub fn row_checks(&self) -> &[u8; ROWS] {
        &self.record.row_checks
    }

    pub fn col_checks(&self) -> &[u8; COLS] {
        &self.record.col_checks
    }

    pub fn harmonic(&self) -> u8 {
        self.record.harmonic
    }

    /// Recompute this symbol's checks under `key` and compare.
    pub fn check(&self, key: VerificationKey) -> Result<()> {
        check_integrity(&self.grid, &self.record, key)
    }

    fn write_canonical(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.grid.as_bytes());
        out.extend_from_slice(&self.record.row_checks);
        out.extend_from_slice(&self.record.col_checks);
        out.push(self.record.harmonic);
    }
}

/// Encoded symbols in input order, all sharing one verification key.
///
/// Entries are never edited or removed; `append` is always allowed.
#[derive(Clone, Debug, Serialize)]
pub struct Message {
    key: VerificationKey,
    symbols: Vec<EncodedSymbol>,
    #[serde(skip)]
    encoder: CharacterEncoder,
}

impl Message {
    /// Reference encoder. Without a key the default key (5) is used.
    pub fn new(key: Option<VerificationKey>) -> Self {
        match key {
            Some(key) => Message::with_encoder(CharacterEncoder::default(), key),
            None => Message::with_key_source(&mut FixedKey::default()),
        }
    }

    /// Draw the key once from `source`.
    pub fn with_key_source<S: KeySource + ?Sized>(source: &mut S) -> Self {
        let key = source.next_key();
        debug!(key = key.value(), "generated message key");
        Message::with_encoder(CharacterEncoder::default(), key)
    }

    /// Encoder settings from `config`; `key` falls back to `config.default_key`.
    pub fn with_config(config: &EncoderConfig, key: Option<VerificationKey>) -> Result<Self> {
        let encoder = CharacterEncoder::from_config(config)?;
        let key = key.unwrap_or_else(|| config.default_key());
        Ok(Message::with_encoder(encoder, key))
    }

    pub fn with_encoder(encoder: CharacterEncoder, key: VerificationKey) -> Self {
        debug!(
            key = key.value(),
            stride = encoder.placement().stride(),
            "new message"
        );
        Message {
            key,
            symbols: Vec::new(),
            encoder,
        }
    }

    pub fn key(&self) -> VerificationKey {
        self.key
    }

    pub fn encoder(&self) -> &CharacterEncoder {
        &self.encoder
    }

    pub fn symbols(&self) -> &[EncodedSymbol] {
        &self.symbols
    }

    pub fn get(&self, index: usize) -> Option<&EncodedSymbol> {
        self.symbols.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EncodedSymbol> {
        self.symbols.iter()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Encode `symbol` with this message's encoder and key without storing it.
    ///
    /// Takes `&self`, so independent symbols can be prepared on several
    /// threads; only `append` needs exclusive access.
    pub fn encode_symbol(&self, symbol: u32) -> Result<EncodedSymbol> {
        EncodedSymbol::encode(&self.encoder, symbol, self.key)
    }

    /// Encode, verify and store one symbol. On error nothing is stored.
    pub fn append(&mut self, symbol: u32) -> Result<&EncodedSymbol> {
        let encoded = self.encode_symbol(symbol)?;
        let index = self.symbols.len();
        debug!(index, symbol, ones = encoded.grid.count_ones(), "appended symbol");
        self.symbols.push(encoded);
        Ok(&self.symbols[index])
    }

    pub fn append_char(&mut self, ch: char) -> Result<&EncodedSymbol> {
        self.append(ch as u32)
    }

    /// Append every symbol in order.
    ///
    /// All symbols are encoded before any is stored, so a rejected symbol
    /// leaves the message unchanged. The error names its position in
    /// `symbols`.
    pub fn encode_all<I>(&mut self, symbols: I) -> Result<()>
    where
        I: IntoIterator<Item = u32>,
    {
        let encoded = symbols
            .into_iter()
            .enumerate()
            .map(|(index, symbol)| {
                self.encode_symbol(symbol).map_err(|source| Error::Symbol {
                    index,
                    source: Box::new(source),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        debug!(
            count = encoded.len(),
            total = self.symbols.len() + encoded.len(),
            "appended symbols"
        );
        self.symbols.extend(encoded);
        Ok(())
    }

    pub fn encode_str(&mut self, text: &str) -> Result<()> {
        self.encode_all(text.chars().map(|ch| ch as u32))
    }

    /// Re-check every symbol under the message key; the first failure wins.
    pub fn check_integrity(&self) -> Result<()> {
        for (index, symbol) in self.symbols.iter().enumerate() {
            symbol.check(self.key).map_err(|source| Error::Symbol {
                index,
                source: Box::new(source),
            })?;
        }
        Ok(())
    }

    /// xxh3-64 fingerprint of every symbol's cells and checks, then the key.
    pub fn digest(&self) -> u64 {
        let per_symbol = CELLS + ROWS + COLS + 1;
        let mut buf = Vec::with_capacity(self.symbols.len() * per_symbol + 4);
        for symbol in &self.symbols {
            symbol.write_canonical(&mut buf);
        }
        buf.extend_from_slice(&self.key.value().to_le_bytes());
        xxh3_64(&buf)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for Message {
    fn default() -> Self {
        Message::new(None)
    }
}

impl<'a> IntoIterator for &'a Message {
    type Item = &'a EncodedSymbol;
    type IntoIter = std::slice::Iter<'a, EncodedSymbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.symbols.iter()
    }
}
