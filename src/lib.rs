//! Protocol-7 message encoder.
//!
//! Each 7-bit symbol becomes a 7×5 bit grid. Every grid carries row checks
//! (parity offset by the message key), column checks (plain parity) and a
//! harmonic checksum, so corrupted grids can be detected.

pub mod config;
pub mod encoder;
pub mod error;
pub mod grid;
pub mod key;
pub mod message;
pub mod placement;
pub mod verify;

pub use config::{EncoderConfig, WidthPolicy};
pub use encoder::CharacterEncoder;
pub use error::{Error, Result};
pub use grid::Grid;
pub use key::{FixedKey, KeySource, RandomKey, DEFAULT_KEY};
pub use message::{EncodedSymbol, Message};
pub use placement::{Cell, Placement};
pub use verify::{check_integrity, harmonic_checksum, verify, VerificationKey, VerificationRecord};

/// Grid rows; also the number of bits per symbol.
pub const ROWS: usize = 7;
/// Grid columns
pub const COLS: usize = 5;
pub const CELLS: usize = ROWS * COLS;
pub const SYMBOL_BITS: usize = ROWS;

/// Encode `content` character by character with the reference encoder.
///
/// Without a key the default key (5) is used.
pub fn encode_message(content: &str, key: Option<VerificationKey>) -> Result<Message> {
    let mut msg = Message::new(key);
    msg.encode_str(content)?;
    Ok(msg)
}

/// Like [`encode_message`] for raw symbol codes.
pub fn encode_symbols<I>(symbols: I, key: Option<VerificationKey>) -> Result<Message>
where
    I: IntoIterator<Item = u32>,
{
    let mut msg = Message::new(key);
    msg.encode_all(symbols)?;
    Ok(msg)
}
